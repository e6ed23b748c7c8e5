// ── Controller abstraction ──
//
// The sole write surface for the presentation layer. Owns the resource
// store, routes commands, and forwards snapshot reads and subscriptions.
// There is no background task: every refresh is triggered by a caller.

use std::future::Future;
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::watch;
use tracing::{debug, info};

use sdnboard_api::transport::{TlsMode, TransportConfig};
use sdnboard_api::ControllerClient;

use crate::command::{Command, CommandResult};
use crate::config::{ControllerConfig, TlsVerification};
use crate::error::CoreError;
use crate::model::{
    Outcome, ResourceKind, ResourceStatus, Stats, SyncState, Topology, WhitelistRule,
};
use crate::store::ResourceStore;
use crate::stream::SnapshotStream;

// ── RefreshReport ────────────────────────────────────────────────

/// Per-kind outcomes of a full refresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RefreshReport {
    pub whitelist: Outcome,
    pub topology: Outcome,
    pub stats: Outcome,
}

impl RefreshReport {
    pub fn get(&self, kind: ResourceKind) -> &Outcome {
        match kind {
            ResourceKind::Whitelist => &self.whitelist,
            ResourceKind::Topology => &self.topology,
            ResourceKind::Stats => &self.stats,
        }
    }

    /// Failed kinds with their messages.
    pub fn errors(&self) -> impl Iterator<Item = (ResourceKind, &str)> {
        [
            (ResourceKind::Whitelist, &self.whitelist),
            (ResourceKind::Topology, &self.topology),
            (ResourceKind::Stats, &self.stats),
        ]
        .into_iter()
        .filter_map(|(kind, outcome)| outcome.error().map(|message| (kind, message)))
    }

    pub fn is_clean(&self) -> bool {
        self.errors().next().is_none()
    }
}

// ── Controller ───────────────────────────────────────────────────

/// The main entry point for consumers.
///
/// Cheaply cloneable via `Arc<ControllerInner>`; clones share one store.
#[derive(Clone)]
pub struct Controller {
    inner: Arc<ControllerInner>,
}

struct ControllerInner {
    config: ControllerConfig,
    store: Arc<ResourceStore>,
}

impl Controller {
    /// Build the HTTP client and an empty store. Makes no request.
    pub fn new(config: ControllerConfig) -> Result<Self, CoreError> {
        let transport = build_transport(&config);
        let client = ControllerClient::new(config.url.clone(), &transport).map_err(|e| {
            CoreError::Config {
                message: e.to_string(),
            }
        })?;
        Ok(Self::with_client(config, client))
    }

    /// Use a pre-built client (tests, custom transports).
    pub fn with_client(config: ControllerConfig, client: ControllerClient) -> Self {
        let store = Arc::new(ResourceStore::new(client, config.stale_policy));
        Self {
            inner: Arc::new(ControllerInner { config, store }),
        }
    }

    /// Access the controller configuration.
    pub fn config(&self) -> &ControllerConfig {
        &self.inner.config
    }

    /// Access the underlying ResourceStore.
    pub fn store(&self) -> &Arc<ResourceStore> {
        &self.inner.store
    }

    // ── Lifecycle ────────────────────────────────────────────────

    /// Initial load: all three resource kinds fetched concurrently.
    /// Failures are independent; each kind keeps its own outcome.
    pub async fn initialize(&self) -> RefreshReport {
        info!(url = %self.inner.config.url, "initial load");
        self.refresh_all().await
    }

    /// Refresh all three resource kinds concurrently.
    pub async fn refresh_all(&self) -> RefreshReport {
        let store = &self.inner.store;
        let (whitelist, topology, stats) = tokio::join!(
            store.refresh_whitelist(),
            store.refresh_topology(),
            store.refresh_stats(),
        );
        let report = RefreshReport {
            whitelist,
            topology,
            stats,
        };
        debug!(clean = report.is_clean(), "refresh complete");
        report
    }

    pub async fn refresh(&self, kind: ResourceKind) -> Outcome {
        self.inner.store.refresh(kind).await
    }

    // ── Whitelist mutations ──────────────────────────────────────

    pub async fn add_rule(&self, src: &str, dst: &str) -> Outcome {
        self.inner.store.add_rule(src, dst).await
    }

    pub async fn remove_rule(&self, src: &str, dst: &str) -> Outcome {
        self.inner.store.remove_rule(src, dst).await
    }

    pub fn dismiss_error(&self) {
        self.inner.store.dismiss_error();
    }

    // ── Command execution ────────────────────────────────────────

    /// Route a command to the matching store operation.
    pub async fn execute(&self, cmd: Command) -> CommandResult {
        match cmd {
            Command::Refresh(kind) => CommandResult::Outcome(self.refresh(kind).await),
            Command::RefreshAll => CommandResult::Report(self.refresh_all().await),
            Command::AddRule { src, dst } => CommandResult::Outcome(self.add_rule(&src, &dst).await),
            Command::RemoveRule { src, dst } => {
                CommandResult::Outcome(self.remove_rule(&src, &dst).await)
            }
            Command::DismissError => {
                self.dismiss_error();
                CommandResult::Ok
            }
        }
    }

    // ── One-shot convenience ─────────────────────────────────────

    /// One-shot: build a controller, run closure.
    ///
    /// Nothing is fetched up front; the closure triggers exactly the
    /// refreshes it needs.
    pub async fn oneshot<F, Fut, T>(config: ControllerConfig, f: F) -> Result<T, CoreError>
    where
        F: FnOnce(Controller) -> Fut,
        Fut: Future<Output = Result<T, CoreError>>,
    {
        let controller = Controller::new(config)?;
        f(controller).await
    }

    // ── State observation ────────────────────────────────────────

    pub fn sync_state(&self) -> SyncState {
        self.inner.store.sync_state()
    }

    pub fn resource_status(&self, kind: ResourceKind) -> ResourceStatus {
        self.inner.store.resource_status(kind)
    }

    pub fn subscribe_sync_state(&self) -> watch::Receiver<SyncState> {
        self.inner.store.subscribe_sync_state()
    }

    pub fn subscribe_status(&self, kind: ResourceKind) -> watch::Receiver<ResourceStatus> {
        self.inner.store.subscribe_status(kind)
    }

    // ── Snapshot accessors (delegate to ResourceStore) ───────────

    pub fn whitelist_snapshot(&self) -> Arc<Vec<WhitelistRule>> {
        self.inner.store.whitelist()
    }

    pub fn topology_snapshot(&self) -> Arc<Topology> {
        self.inner.store.topology()
    }

    pub fn stats_snapshot(&self) -> Arc<Stats> {
        self.inner.store.stats()
    }

    // ── Stream accessors ─────────────────────────────────────────

    pub fn whitelist(&self) -> SnapshotStream<Vec<WhitelistRule>> {
        self.inner.store.subscribe_whitelist()
    }

    pub fn topology(&self) -> SnapshotStream<Topology> {
        self.inner.store.subscribe_topology()
    }

    pub fn stats(&self) -> SnapshotStream<Stats> {
        self.inner.store.subscribe_stats()
    }
}

// ── Helpers ──────────────────────────────────────────────────────

/// Build a [`TransportConfig`] from the controller configuration.
fn build_transport(config: &ControllerConfig) -> TransportConfig {
    TransportConfig {
        tls: tls_to_transport(&config.tls),
        timeout: config.timeout,
    }
}

fn tls_to_transport(tls: &TlsVerification) -> TlsMode {
    match tls {
        TlsVerification::SystemDefaults => TlsMode::System,
        TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
        TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn config() -> ControllerConfig {
        ControllerConfig::new("http://127.0.0.1:8080".parse().unwrap())
    }

    #[test]
    fn transport_carries_timeout_and_tls() {
        let mut cfg = config();
        cfg.timeout = Some(Duration::from_secs(3));
        cfg.tls = TlsVerification::DangerAcceptInvalid;

        let transport = build_transport(&cfg);
        assert_eq!(transport.timeout, Some(Duration::from_secs(3)));
        assert!(matches!(transport.tls, TlsMode::DangerAcceptInvalid));
    }

    #[tokio::test]
    async fn clones_share_one_store() {
        let controller = Controller::new(config()).unwrap();
        let clone = controller.clone();
        assert!(Arc::ptr_eq(controller.store(), clone.store()));
    }

    #[tokio::test]
    async fn dismiss_command_returns_ok() {
        let controller = Controller::new(config()).unwrap();
        assert_eq!(controller.execute(Command::DismissError).await, CommandResult::Ok);
    }

    #[test]
    fn report_lists_failures_in_order() {
        let report = RefreshReport {
            whitelist: Outcome::Failed("fetch whitelist failed: x".into()),
            topology: Outcome::Applied,
            stats: Outcome::Discarded,
        };
        assert!(!report.is_clean());
        assert_eq!(
            report.errors().collect::<Vec<_>>(),
            vec![(ResourceKind::Whitelist, "fetch whitelist failed: x")]
        );
        assert_eq!(report.get(ResourceKind::Topology), &Outcome::Applied);
    }
}
