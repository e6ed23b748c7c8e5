// ── Domain model ──
//
// Canonical, immutable snapshot types held by the store. Wire shapes live
// in `sdnboard_api::models`; `crate::convert` maps them into these.

pub mod mac;
pub mod stats;
pub mod sync;
pub mod topology;
pub mod whitelist;

// ── Re-exports ──────────────────────────────────────────────────────

pub use mac::MacAddress;
pub use stats::Stats;
pub use sync::{Operation, Outcome, ResourceStatus, SyncPhase, SyncState};
pub use topology::{Host, Switch, SwitchPort, Topology};
pub use whitelist::WhitelistRule;

pub use sdnboard_api::ResourceKind;
