// Topology endpoint

use tracing::debug;

use crate::client::ControllerClient;
use crate::error::Error;
use crate::models::TopologyResponse;
use crate::resource::ResourceKind;

impl ControllerClient {
    /// Fetch the learned topology: hosts and per-switch port tables.
    ///
    /// `GET /topology`
    pub async fn get_topology(&self) -> Result<TopologyResponse, Error> {
        let topo: TopologyResponse = self.get(ResourceKind::Topology.path()).await?;
        debug!(
            hosts = topo.hosts.len(),
            switches = topo.switches.len(),
            "fetched topology"
        );
        Ok(topo)
    }
}
