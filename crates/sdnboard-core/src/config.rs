// ── Runtime connection configuration ──
//
// These types describe *how* to reach the SDN controller. They never touch
// disk; the CLI (via sdnboard-config) constructs a `ControllerConfig` and
// hands it in.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use url::Url;

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// Bundled root store (strict).
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(std::path::PathBuf),
    /// Skip verification (self-signed certs).
    DangerAcceptInvalid,
}

/// What to do with a refresh response when a newer refresh of the same
/// resource kind has already been applied.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum StalePolicy {
    /// Apply every response as it completes; the last to complete wins.
    #[default]
    LastCompletedWins,
    /// Drop a response whose request was issued before the newest
    /// response already applied.
    DiscardSuperseded,
}

/// Configuration for connecting to a single controller.
///
/// Built by the CLI, passed to `Controller` -- core never reads config files.
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    /// Controller API root (e.g., `http://127.0.0.1:8080`).
    pub url: Url,
    /// TLS verification strategy.
    pub tls: TlsVerification,
    /// Request timeout. `None` leaves a hung request pending indefinitely.
    pub timeout: Option<Duration>,
    /// Handling of out-of-order refresh responses.
    pub stale_policy: StalePolicy,
}

impl ControllerConfig {
    /// A config for `url` with default TLS, no timeout, last-completed-wins.
    pub fn new(url: Url) -> Self {
        Self {
            url,
            tls: TlsVerification::default(),
            timeout: None,
            stale_policy: StalePolicy::default(),
        }
    }
}
