// Controller API wire types
//
// Request and response bodies exactly as the controller serializes them.
// Sequence fields tolerate both a missing key and an explicit `null`;
// either decodes as an empty vec. The controller keys switches by OpenFlow
// datapath id, which arrives as a JSON number, so switch identifiers accept
// strings and numbers alike.

use serde::{Deserialize, Deserializer, Serialize};

// ── Whitelist ────────────────────────────────────────────────────────

/// One permitted `(src, dst)` flow, as listed by `GET /whitelist` and sent
/// as the body of `POST`/`DELETE /whitelist`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WhitelistEntry {
    pub src: String,
    pub dst: String,
}

/// `GET /whitelist` → `{ "whitelist": [{src, dst}, ...] }`
#[derive(Debug, Default, Deserialize)]
pub struct WhitelistResponse {
    #[serde(default, deserialize_with = "nullable_vec")]
    pub whitelist: Vec<WhitelistEntry>,
}

/// Borrowed request body for whitelist mutations.
#[derive(Debug, Serialize)]
pub(crate) struct WhitelistRequest<'a> {
    pub src: &'a str,
    pub dst: &'a str,
}

// ── Topology ─────────────────────────────────────────────────────────

/// `GET /topology` → `{ "hosts": [...], "switches": [...] }`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TopologyResponse {
    #[serde(default, deserialize_with = "nullable_vec")]
    pub hosts: Vec<HostEntry>,
    #[serde(default, deserialize_with = "nullable_vec")]
    pub switches: Vec<SwitchEntry>,
}

/// A learned end-station: IP → (MAC, switch, port).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HostEntry {
    pub ip: String,
    pub mac: String,
    #[serde(deserialize_with = "string_or_number")]
    pub switch: String,
    pub port: u32,
}

/// A switch and the MAC addresses learned on its ports.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SwitchEntry {
    #[serde(deserialize_with = "string_or_number")]
    pub switch_id: String,
    #[serde(default, deserialize_with = "nullable_vec")]
    pub ports: Vec<PortEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PortEntry {
    pub port: u32,
    pub mac: String,
}

// ── Stats ────────────────────────────────────────────────────────────

/// `GET /stats` → `{ total_hosts, total_switches, whitelist_rules }`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct StatsResponse {
    pub total_hosts: u64,
    pub total_switches: u64,
    pub whitelist_rules: u64,
}

// ── Mutation status ──────────────────────────────────────────────────

/// `{ "status": "success" | <other>, "message": "..." }` returned by the
/// whitelist mutations.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct StatusResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Acknowledgement of a successful mutation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ack {
    /// Server-provided confirmation, e.g. `"Added 10.0.0.1 -> 10.0.0.2"`.
    pub message: Option<String>,
}

impl StatusResponse {
    /// `status == "success"` is the only domain success; everything else,
    /// a missing status included, is a rejection.
    pub(crate) fn into_ack(self) -> Result<Ack, crate::Error> {
        if self.status.as_deref() == Some("success") {
            Ok(Ack {
                message: self.message,
            })
        } else {
            Err(crate::Error::Rejected {
                message: self
                    .message
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or_else(|| crate::error::GENERIC_FAILURE.into()),
            })
        }
    }
}

// ── Serde helpers ────────────────────────────────────────────────────

fn nullable_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    String(String),
    Unsigned(u64),
    Signed(i64),
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match StringOrNumber::deserialize(deserializer)? {
        StringOrNumber::String(s) => s,
        StringOrNumber::Unsigned(n) => n.to_string(),
        StringOrNumber::Signed(n) => n.to_string(),
    })
}
