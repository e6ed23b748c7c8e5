// ── Synchronization status types ──
//
// `SyncState` is the single shared status register the presentation layer
// reads. `ResourceStatus` is the per-kind view: its own phase and error,
// untouched by the other kinds' operations.

use chrono::{DateTime, Utc};
use serde::Serialize;
use strum::Display;

/// Shared loading/error register across all resource kinds.
///
/// `loading` is `true` while any operation is in flight. `error` is
/// last-write-wins: the latest failing operation's message, cleared when
/// the next operation starts or when dismissed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SyncState {
    pub loading: bool,
    pub error: Option<String>,
}

/// Per-resource state machine: `Idle -> Loading -> {Ready, Failed} -> Loading -> ...`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, Serialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SyncPhase {
    #[default]
    Idle,
    Loading,
    Ready,
    Failed,
}

/// Sync status of one resource kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResourceStatus {
    pub phase: SyncPhase,
    /// Message of the last failed refresh of this kind, cleared on the next start.
    pub error: Option<String>,
    pub last_success: Option<DateTime<Utc>>,
    /// Refreshes of this kind currently awaiting the controller.
    pub in_flight: usize,
    /// Generation of the newest response applied to the snapshot.
    pub applied_generation: u64,
    /// Phase to fall back to when an in-flight refresh is dropped.
    #[serde(skip)]
    pub(crate) settled: SyncPhase,
}

/// A store operation, named in error messages and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    #[strum(serialize = "fetch whitelist")]
    FetchWhitelist,
    #[strum(serialize = "fetch topology")]
    FetchTopology,
    #[strum(serialize = "fetch stats")]
    FetchStats,
    #[strum(serialize = "add rule")]
    AddRule,
    #[strum(serialize = "remove rule")]
    RemoveRule,
}

/// What a store operation did. Failures carry the same message that was
/// written to [`SyncState::error`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "message", rename_all = "lowercase")]
pub enum Outcome {
    /// The controller accepted the request and its answer was applied.
    Applied,
    /// Blank input; nothing was sent.
    Skipped,
    /// A newer refresh of the same kind was already applied; this response
    /// was dropped.
    Discarded,
    /// Transport failure, non-2xx status, or unreadable response.
    Failed(String),
    /// The controller answered but reported the operation as failed.
    Rejected(String),
}

impl Outcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed(_) | Self::Rejected(_))
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(message) | Self::Rejected(message) => Some(message),
            _ => None,
        }
    }
}
