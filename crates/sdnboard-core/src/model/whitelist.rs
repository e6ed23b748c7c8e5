// ── Whitelist domain types ──

use std::fmt;

use serde::{Deserialize, Serialize};

/// A permitted traffic flow between two IP addresses.
///
/// Identity is the `(src, dst)` pair. The store keeps rules in server order
/// and never deduplicates; it trusts the controller's listing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WhitelistRule {
    pub src: String,
    pub dst: String,
}

impl WhitelistRule {
    pub fn new(src: impl Into<String>, dst: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            dst: dst.into(),
        }
    }

    /// `true` when either endpoint is empty or whitespace-only.
    pub fn is_blank(&self) -> bool {
        is_blank(&self.src) || is_blank(&self.dst)
    }
}

impl fmt::Display for WhitelistRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.src, self.dst)
    }
}

pub(crate) fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}
