// Resource kinds and the per-kind fetch dispatcher.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::client::ControllerClient;
use crate::error::Error;
use crate::models::{StatsResponse, TopologyResponse, WhitelistEntry};

/// An independently fetchable unit of remote state.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumIter,
    EnumString,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Whitelist,
    Topology,
    Stats,
}

impl ResourceKind {
    /// API path relative to the controller base URL.
    pub const fn path(self) -> &'static str {
        match self {
            Self::Whitelist => "whitelist",
            Self::Topology => "topology",
            Self::Stats => "stats",
        }
    }
}

/// Typed payload of a [`ControllerClient::fetch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourcePayload {
    Whitelist(Vec<WhitelistEntry>),
    Topology(TopologyResponse),
    Stats(StatsResponse),
}

impl ResourcePayload {
    pub fn kind(&self) -> ResourceKind {
        match self {
            Self::Whitelist(_) => ResourceKind::Whitelist,
            Self::Topology(_) => ResourceKind::Topology,
            Self::Stats(_) => ResourceKind::Stats,
        }
    }
}

impl ControllerClient {
    /// Fetch one resource kind.
    pub async fn fetch(&self, kind: ResourceKind) -> Result<ResourcePayload, Error> {
        match kind {
            ResourceKind::Whitelist => self.list_whitelist().await.map(ResourcePayload::Whitelist),
            ResourceKind::Topology => self.get_topology().await.map(ResourcePayload::Topology),
            ResourceKind::Stats => self.get_stats().await.map(ResourcePayload::Stats),
        }
    }
}
