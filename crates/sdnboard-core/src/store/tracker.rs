// ── In-flight bookkeeping ──
//
// Guards that bracket every store operation. Both decrement their in-flight
// counters on drop, so `loading` falls back to `false` even when the
// operation's future is dropped mid-request.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use chrono::Utc;
use tokio::sync::watch;

use crate::config::StalePolicy;
use crate::model::{ResourceStatus, SyncPhase, SyncState};

// ── Shared register ──────────────────────────────────────────────────

/// One operation's hold on the shared [`SyncState`].
///
/// Starting clears `error` and raises `loading`; dropping lowers `loading`
/// once no other operation is in flight and publishes the recorded error.
pub(crate) struct OperationGuard<'a> {
    sync: &'a watch::Sender<SyncState>,
    in_flight: &'a AtomicUsize,
    error: Option<String>,
}

impl<'a> OperationGuard<'a> {
    pub(crate) fn begin(sync: &'a watch::Sender<SyncState>, in_flight: &'a AtomicUsize) -> Self {
        sync.send_modify(|state| {
            in_flight.fetch_add(1, Ordering::SeqCst);
            state.loading = true;
            state.error = None;
        });
        Self {
            sync,
            in_flight,
            error: None,
        }
    }

    /// Record the message published when this guard drops.
    pub(crate) fn fail(&mut self, message: String) {
        self.error = Some(message);
    }
}

impl Drop for OperationGuard<'_> {
    fn drop(&mut self) {
        let in_flight = self.in_flight;
        let error = self.error.take();
        self.sync.send_modify(|state| {
            let remaining = in_flight.fetch_sub(1, Ordering::SeqCst).saturating_sub(1);
            state.loading = remaining > 0;
            if let Some(message) = error {
                state.error = Some(message);
            }
        });
    }
}

// ── Per-resource slot ────────────────────────────────────────────────

/// Snapshot and status channels for one resource kind.
pub(crate) struct Slot<T> {
    pub(crate) snapshot: watch::Sender<Arc<T>>,
    pub(crate) status: watch::Sender<ResourceStatus>,
    issued: AtomicU64,
}

impl<T: Default> Slot<T> {
    pub(crate) fn new() -> Self {
        let (snapshot, _) = watch::channel(Arc::new(T::default()));
        let (status, _) = watch::channel(ResourceStatus::default());
        Self {
            snapshot,
            status,
            issued: AtomicU64::new(0),
        }
    }
}

impl<T> Slot<T> {
    /// Issue a generation number and move the slot into `Loading`.
    pub(crate) fn begin(&self) -> RefreshTicket<'_, T> {
        let generation = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        self.status.send_modify(|st| {
            st.in_flight += 1;
            st.phase = SyncPhase::Loading;
            st.error = None;
        });
        RefreshTicket {
            slot: self,
            generation,
            done: false,
        }
    }
}

/// One in-flight refresh of a slot.
pub(crate) struct RefreshTicket<'a, T> {
    slot: &'a Slot<T>,
    generation: u64,
    done: bool,
}

impl<T> RefreshTicket<'_, T> {
    pub(crate) fn generation(&self) -> u64 {
        self.generation
    }

    /// Replace the snapshot with `value`. Returns `false` if the policy
    /// discarded it as superseded.
    pub(crate) fn apply(mut self, value: T, policy: StalePolicy) -> bool {
        self.done = true;
        let generation = self.generation;
        let snapshot = &self.slot.snapshot;
        let mut applied = false;

        self.slot.status.send_modify(|st| {
            st.in_flight = st.in_flight.saturating_sub(1);
            if is_superseded(policy, generation, st) {
                st.phase = resting_phase(st);
                return;
            }
            snapshot.send_replace(Arc::new(value));
            st.applied_generation = st.applied_generation.max(generation);
            st.last_success = Some(Utc::now());
            st.error = None;
            st.settled = SyncPhase::Ready;
            st.phase = resting_phase(st);
            applied = true;
        });

        applied
    }

    /// Record a failed refresh. The snapshot is left untouched. Returns
    /// `false` if the policy discarded the failure as superseded.
    pub(crate) fn fail(mut self, message: &str, policy: StalePolicy) -> bool {
        self.done = true;
        let generation = self.generation;
        let mut recorded = false;

        self.slot.status.send_modify(|st| {
            st.in_flight = st.in_flight.saturating_sub(1);
            if is_superseded(policy, generation, st) {
                st.phase = resting_phase(st);
                return;
            }
            st.error = Some(message.to_owned());
            st.settled = SyncPhase::Failed;
            st.phase = resting_phase(st);
            recorded = true;
        });

        recorded
    }
}

impl<T> Drop for RefreshTicket<'_, T> {
    fn drop(&mut self) {
        if self.done {
            return;
        }
        self.slot.status.send_modify(|st| {
            st.in_flight = st.in_flight.saturating_sub(1);
            st.phase = resting_phase(st);
        });
    }
}

fn is_superseded(policy: StalePolicy, generation: u64, st: &ResourceStatus) -> bool {
    policy == StalePolicy::DiscardSuperseded && generation < st.applied_generation
}

fn resting_phase(st: &ResourceStatus) -> SyncPhase {
    if st.in_flight > 0 {
        SyncPhase::Loading
    } else {
        st.settled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operation_guard_raises_and_lowers_loading() {
        let (sync, _rx) = watch::channel(SyncState {
            loading: false,
            error: Some("stale".into()),
        });
        let in_flight = AtomicUsize::new(0);

        let guard = OperationGuard::begin(&sync, &in_flight);
        assert!(sync.borrow().loading);
        assert!(sync.borrow().error.is_none());

        drop(guard);
        assert!(!sync.borrow().loading);
        assert_eq!(in_flight.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn overlapping_guards_keep_loading_until_last_drops() {
        let (sync, _rx) = watch::channel(SyncState::default());
        let in_flight = AtomicUsize::new(0);

        let first = OperationGuard::begin(&sync, &in_flight);
        let mut second = OperationGuard::begin(&sync, &in_flight);
        second.fail("fetch stats failed: boom".into());

        drop(second);
        assert!(sync.borrow().loading);
        assert_eq!(
            sync.borrow().error.as_deref(),
            Some("fetch stats failed: boom")
        );

        drop(first);
        assert!(!sync.borrow().loading);
        assert!(sync.borrow().error.is_some());
    }

    #[test]
    fn ticket_apply_moves_to_ready() {
        let slot: Slot<Vec<u32>> = Slot::new();

        let ticket = slot.begin();
        assert_eq!(slot.status.borrow().phase, SyncPhase::Loading);

        assert!(ticket.apply(vec![1, 2], StalePolicy::LastCompletedWins));
        let st = slot.status.borrow().clone();
        assert_eq!(st.phase, SyncPhase::Ready);
        assert_eq!(st.applied_generation, 1);
        assert!(st.last_success.is_some());
        assert_eq!(**slot.snapshot.borrow(), vec![1, 2]);
    }

    #[test]
    fn ticket_fail_keeps_snapshot() {
        let slot: Slot<Vec<u32>> = Slot::new();
        slot.begin().apply(vec![7], StalePolicy::LastCompletedWins);

        assert!(slot.begin().fail("nope", StalePolicy::LastCompletedWins));

        let st = slot.status.borrow().clone();
        assert_eq!(st.phase, SyncPhase::Failed);
        assert_eq!(st.error.as_deref(), Some("nope"));
        assert_eq!(**slot.snapshot.borrow(), vec![7]);
    }

    #[test]
    fn dropped_ticket_reverts_to_settled_phase() {
        let slot: Slot<Vec<u32>> = Slot::new();
        slot.begin().apply(vec![1], StalePolicy::LastCompletedWins);

        drop(slot.begin());

        let st = slot.status.borrow().clone();
        assert_eq!(st.phase, SyncPhase::Ready);
        assert_eq!(st.in_flight, 0);
    }

    #[test]
    fn superseded_response_is_discarded_only_under_discard_policy() {
        let slot: Slot<Vec<u32>> = Slot::new();

        let older = slot.begin();
        let newer = slot.begin();
        assert!(newer.apply(vec![2], StalePolicy::DiscardSuperseded));
        assert!(!older.apply(vec![1], StalePolicy::DiscardSuperseded));
        assert_eq!(**slot.snapshot.borrow(), vec![2]);

        let older = slot.begin();
        let newer = slot.begin();
        assert!(newer.apply(vec![4], StalePolicy::LastCompletedWins));
        assert!(older.apply(vec![3], StalePolicy::LastCompletedWins));
        assert_eq!(**slot.snapshot.borrow(), vec![3]);
    }

    #[test]
    fn phase_stays_loading_while_another_refresh_is_pending() {
        let slot: Slot<Vec<u32>> = Slot::new();

        let first = slot.begin();
        let second = slot.begin();
        first.apply(vec![1], StalePolicy::LastCompletedWins);
        assert_eq!(slot.status.borrow().phase, SyncPhase::Loading);

        second.fail("boom", StalePolicy::LastCompletedWins);
        assert_eq!(slot.status.borrow().phase, SyncPhase::Failed);
    }
}
