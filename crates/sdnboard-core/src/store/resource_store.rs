// ── ResourceStore ──
//
// Central snapshot storage for controller resources. Each resource kind is
// one slot holding an `Arc` snapshot in a `watch` channel; writes replace
// the whole snapshot, reads are a cheap `Arc` clone.

use std::sync::Arc;
use std::sync::atomic::AtomicUsize;

use sdnboard_api::ControllerClient;
use tokio::sync::watch;

use super::tracker::{OperationGuard, Slot};
use crate::config::StalePolicy;
use crate::model::{ResourceKind, ResourceStatus, Stats, SyncState, Topology, WhitelistRule};
use crate::stream::SnapshotStream;

/// Snapshot store for the whitelist, topology, and stats resources.
///
/// All mutating operations live in the `refresh` module; this file holds
/// the storage and the read side.
pub struct ResourceStore {
    pub(super) client: ControllerClient,
    pub(super) stale_policy: StalePolicy,
    pub(super) whitelist: Slot<Vec<WhitelistRule>>,
    pub(super) topology: Slot<Topology>,
    pub(super) stats: Slot<Stats>,
    sync: watch::Sender<SyncState>,
    in_flight: AtomicUsize,
}

impl ResourceStore {
    pub fn new(client: ControllerClient, stale_policy: StalePolicy) -> Self {
        let (sync, _) = watch::channel(SyncState::default());
        Self {
            client,
            stale_policy,
            whitelist: Slot::new(),
            topology: Slot::new(),
            stats: Slot::new(),
            sync,
            in_flight: AtomicUsize::new(0),
        }
    }

    pub fn client(&self) -> &ControllerClient {
        &self.client
    }

    pub fn stale_policy(&self) -> StalePolicy {
        self.stale_policy
    }

    pub(super) fn begin_operation(&self) -> OperationGuard<'_> {
        OperationGuard::begin(&self.sync, &self.in_flight)
    }

    /// Clear the shared error without touching any snapshot.
    pub fn dismiss_error(&self) {
        self.sync.send_if_modified(|state| state.error.take().is_some());
    }

    // ── Snapshots ────────────────────────────────────────────────────

    pub fn whitelist(&self) -> Arc<Vec<WhitelistRule>> {
        self.whitelist.snapshot.borrow().clone()
    }

    pub fn topology(&self) -> Arc<Topology> {
        self.topology.snapshot.borrow().clone()
    }

    pub fn stats(&self) -> Arc<Stats> {
        self.stats.snapshot.borrow().clone()
    }

    pub fn sync_state(&self) -> SyncState {
        self.sync.borrow().clone()
    }

    pub fn resource_status(&self, kind: ResourceKind) -> ResourceStatus {
        self.status_sender(kind).borrow().clone()
    }

    // ── Subscriptions ────────────────────────────────────────────────

    pub fn subscribe_whitelist(&self) -> SnapshotStream<Vec<WhitelistRule>> {
        SnapshotStream::new(self.whitelist.snapshot.subscribe())
    }

    pub fn subscribe_topology(&self) -> SnapshotStream<Topology> {
        SnapshotStream::new(self.topology.snapshot.subscribe())
    }

    pub fn subscribe_stats(&self) -> SnapshotStream<Stats> {
        SnapshotStream::new(self.stats.snapshot.subscribe())
    }

    pub fn subscribe_sync_state(&self) -> watch::Receiver<SyncState> {
        self.sync.subscribe()
    }

    pub fn subscribe_status(&self, kind: ResourceKind) -> watch::Receiver<ResourceStatus> {
        self.status_sender(kind).subscribe()
    }

    fn status_sender(&self, kind: ResourceKind) -> &watch::Sender<ResourceStatus> {
        match kind {
            ResourceKind::Whitelist => &self.whitelist.status,
            ResourceKind::Topology => &self.topology.status,
            ResourceKind::Stats => &self.stats.status,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::SyncPhase;

    fn store() -> ResourceStore {
        let client = ControllerClient::from_url("http://127.0.0.1:8080").unwrap();
        ResourceStore::new(client, StalePolicy::default())
    }

    #[test]
    fn new_store_is_empty_and_idle() {
        let store = store();

        assert!(store.whitelist().is_empty());
        assert!(store.topology().is_empty());
        assert_eq!(*store.stats(), Stats::default());
        assert_eq!(store.sync_state(), SyncState::default());
        for kind in [ResourceKind::Whitelist, ResourceKind::Topology, ResourceKind::Stats] {
            assert_eq!(store.resource_status(kind).phase, SyncPhase::Idle);
        }
    }

    #[test]
    fn dismiss_error_clears_only_the_error() {
        let store = store();
        let mut rx = store.subscribe_sync_state();

        store.dismiss_error();
        assert!(!rx.has_changed().unwrap());

        {
            let mut guard = store.begin_operation();
            guard.fail("fetch stats failed: boom".into());
        }
        rx.borrow_and_update();

        store.dismiss_error();
        assert!(rx.has_changed().unwrap());
        assert_eq!(store.sync_state(), SyncState::default());
    }
}
