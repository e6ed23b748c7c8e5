// Whitelist endpoints
//
// `GET`, `POST` and `DELETE /whitelist`. Mutations carry `{src, dst}` as a
// JSON body and succeed only when the controller answers
// `{"status": "success"}`.

use tracing::debug;

use crate::client::ControllerClient;
use crate::error::Error;
use crate::models::{Ack, WhitelistEntry, WhitelistRequest, WhitelistResponse};
use crate::resource::ResourceKind;

const WHITELIST_PATH: &str = ResourceKind::Whitelist.path();

impl ControllerClient {
    /// List all whitelist rules in server order.
    ///
    /// `GET /whitelist`
    pub async fn list_whitelist(&self) -> Result<Vec<WhitelistEntry>, Error> {
        let resp: WhitelistResponse = self.get(WHITELIST_PATH).await?;
        debug!(count = resp.whitelist.len(), "fetched whitelist");
        Ok(resp.whitelist)
    }

    /// Permit traffic from `src` to `dst`.
    ///
    /// `POST /whitelist` with `{src, dst}`
    pub async fn add_whitelist_rule(&self, src: &str, dst: &str) -> Result<Ack, Error> {
        debug!(src, dst, "adding whitelist rule");
        self.post_status(WHITELIST_PATH, &WhitelistRequest { src, dst })
            .await
    }

    /// Revoke the `src` → `dst` rule.
    ///
    /// `DELETE /whitelist` with `{src, dst}`
    pub async fn remove_whitelist_rule(&self, src: &str, dst: &str) -> Result<Ack, Error> {
        debug!(src, dst, "removing whitelist rule");
        self.delete_status(WHITELIST_PATH, &WhitelistRequest { src, dst })
            .await
    }
}
