// Statistics endpoint
//
// Point-in-time counters computed by the controller. Not transactionally
// consistent with a concurrently fetched topology or whitelist.

use tracing::debug;

use crate::client::ControllerClient;
use crate::error::Error;
use crate::models::StatsResponse;
use crate::resource::ResourceKind;

impl ControllerClient {
    /// Fetch aggregate counters.
    ///
    /// `GET /stats`
    pub async fn get_stats(&self) -> Result<StatsResponse, Error> {
        let stats: StatsResponse = self.get(ResourceKind::Stats.path()).await?;
        debug!(?stats, "fetched stats");
        Ok(stats)
    }
}
