// Panel node endpoints
//
// Node descriptor polling and node status reporting.

use tracing::debug;

use crate::client::{Conditional, PanelClient, PanelResponse};
use crate::error::Error;
use crate::models::NodeStatusRequest;

pub const NODE_INFO_PATH: &str = "/api/public/airgo/node/getNodeInfo";
pub const NODE_STATUS_PATH: &str = "/api/public/airgo/node/reportNodeStatus";

impl PanelClient {
    /// Fetch the node descriptor, conditional on `etag`.
    ///
    /// `GET /api/public/airgo/node/getNodeInfo?id={node_id}`
    ///
    /// The body is returned undecoded so the caller can record the new
    /// validator before decoding; see [`PanelResponse::json`].
    pub async fn get_node_info(
        &self,
        node_id: u32,
        etag: &str,
    ) -> Result<Conditional<PanelResponse>, Error> {
        debug!(node_id, "fetching node info");
        self.get_conditional(NODE_INFO_PATH, &[("id", node_id.to_string())], etag)
            .await
    }

    /// Report CPU, memory, disk usage and uptime.
    ///
    /// `POST /api/public/airgo/node/reportNodeStatus`
    pub async fn report_node_status(&self, status: &NodeStatusRequest) -> Result<(), Error> {
        debug!(node_id = status.id, "reporting node status");
        self.post(NODE_STATUS_PATH, status).await
    }
}
