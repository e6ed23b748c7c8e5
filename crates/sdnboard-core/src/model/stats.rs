// ── Aggregate statistics ──

use serde::{Deserialize, Serialize};

/// Point-in-time counters reported by the controller.
///
/// Fetched independently of the topology and whitelist, so the counts may
/// disagree with those snapshots.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub total_hosts: u64,
    pub total_switches: u64,
    pub whitelist_rules: u64,
}
