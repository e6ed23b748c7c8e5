// ── Store operations ──
//
// Refreshes and whitelist mutations. None of these return an error to the
// caller: failures are recorded in the shared `SyncState` and in the
// resource's own status, and reported back as an `Outcome`.

use std::future::Future;

use sdnboard_api::Ack;
use tracing::{debug, info, warn};

use super::ResourceStore;
use super::tracker::Slot;
use crate::error::CoreError;
use crate::model::{Operation, Outcome, ResourceKind, Stats, Topology, WhitelistRule, whitelist};

impl ResourceStore {
    /// Refresh one resource kind from the controller.
    pub async fn refresh(&self, kind: ResourceKind) -> Outcome {
        match kind {
            ResourceKind::Whitelist => self.refresh_whitelist().await,
            ResourceKind::Topology => self.refresh_topology().await,
            ResourceKind::Stats => self.refresh_stats().await,
        }
    }

    pub async fn refresh_whitelist(&self) -> Outcome {
        let fetch = async {
            let entries = self.client.list_whitelist().await?;
            Ok(entries.into_iter().map(WhitelistRule::from).collect::<Vec<_>>())
        };
        self.refresh_slot(&self.whitelist, Operation::FetchWhitelist, fetch)
            .await
    }

    pub async fn refresh_topology(&self) -> Outcome {
        let fetch = async { self.client.get_topology().await.map(Topology::from) };
        self.refresh_slot(&self.topology, Operation::FetchTopology, fetch)
            .await
    }

    pub async fn refresh_stats(&self) -> Outcome {
        let fetch = async { self.client.get_stats().await.map(Stats::from) };
        self.refresh_slot(&self.stats, Operation::FetchStats, fetch)
            .await
    }

    /// Ask the controller to allow `src -> dst`, then re-read the whitelist.
    ///
    /// Blank endpoints are skipped without touching the network or any state.
    pub async fn add_rule(&self, src: &str, dst: &str) -> Outcome {
        if whitelist::is_blank(src) || whitelist::is_blank(dst) {
            debug!(src, dst, "add rule skipped: blank endpoint");
            return Outcome::Skipped;
        }
        let (src, dst) = (src.trim(), dst.trim());
        self.mutate(
            Operation::AddRule,
            src,
            dst,
            self.client.add_whitelist_rule(src, dst),
        )
        .await
    }

    /// Ask the controller to drop `src -> dst`, then re-read the whitelist.
    ///
    /// Endpoints are trimmed the same way as for `add_rule`.
    pub async fn remove_rule(&self, src: &str, dst: &str) -> Outcome {
        let (src, dst) = (src.trim(), dst.trim());
        self.mutate(
            Operation::RemoveRule,
            src,
            dst,
            self.client.remove_whitelist_rule(src, dst),
        )
        .await
    }

    async fn refresh_slot<T, F>(&self, slot: &Slot<T>, operation: Operation, fetch: F) -> Outcome
    where
        F: Future<Output = Result<T, sdnboard_api::Error>>,
    {
        let mut op = self.begin_operation();
        let ticket = slot.begin();
        let generation = ticket.generation();
        debug!(%operation, generation, "refresh started");

        match fetch.await {
            Ok(value) => {
                if ticket.apply(value, self.stale_policy) {
                    debug!(%operation, generation, "snapshot replaced");
                    Outcome::Applied
                } else {
                    debug!(%operation, generation, "superseded response discarded");
                    Outcome::Discarded
                }
            }
            Err(err) => {
                let err = CoreError::from_api(operation, err);
                let message = err.to_string();
                if ticket.fail(&message, self.stale_policy) {
                    warn!(%operation, generation, error = %message, "refresh failed");
                    op.fail(message);
                    failed(&err)
                } else {
                    debug!(%operation, generation, "superseded failure discarded");
                    Outcome::Discarded
                }
            }
        }
    }

    async fn mutate<F>(&self, operation: Operation, src: &str, dst: &str, request: F) -> Outcome
    where
        F: Future<Output = Result<Ack, sdnboard_api::Error>>,
    {
        let mut op = self.begin_operation();

        match request.await {
            Ok(ack) => {
                info!(
                    %operation,
                    src,
                    dst,
                    reply = ack.message.as_deref().unwrap_or_default(),
                    "controller accepted"
                );
                self.refresh_whitelist().await
            }
            Err(err) => {
                let err = CoreError::from_api(operation, err);
                let message = err.to_string();
                warn!(%operation, src, dst, error = %message, "whitelist change failed");
                op.fail(message);
                failed(&err)
            }
        }
    }
}

fn failed(err: &CoreError) -> Outcome {
    match err {
        CoreError::Rejected { .. } => Outcome::Rejected(err.to_string()),
        _ => Outcome::Failed(err.to_string()),
    }
}
