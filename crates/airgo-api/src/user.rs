// Panel user endpoints
//
// User list polling plus the traffic and online-user reports.

use tracing::debug;

use crate::client::{Conditional, PanelClient, PanelResponse};
use crate::error::Error;
use crate::models::{OnlineUsersRequest, UserTrafficRequest};

pub const USER_LIST_PATH: &str = "/api/public/airgo/user/getUserlist";
pub const USER_TRAFFIC_PATH: &str = "/api/public/airgo/user/reportUserTraffic";
pub const ONLINE_USERS_PATH: &str = "/api/public/airgo/user/AGReportNodeOnlineUsers";

impl PanelClient {
    /// Fetch the users assigned to this node, conditional on `etag`.
    ///
    /// `GET /api/public/airgo/user/getUserlist?id={node_id}`
    pub async fn get_user_list(
        &self,
        node_id: u32,
        etag: &str,
    ) -> Result<Conditional<PanelResponse>, Error> {
        debug!(node_id, "fetching user list");
        self.get_conditional(USER_LIST_PATH, &[("id", node_id.to_string())], etag)
            .await
    }

    /// Report per-user traffic deltas.
    ///
    /// `POST /api/public/airgo/user/reportUserTraffic`
    ///
    /// Not idempotent: the panel adds every delta it accepts.
    pub async fn report_user_traffic(&self, traffic: &UserTrafficRequest) -> Result<(), Error> {
        debug!(
            node_id = traffic.id,
            users = traffic.user_traffic.len(),
            "reporting user traffic"
        );
        self.post(USER_TRAFFIC_PATH, traffic).await
    }

    /// Report the IPs each online user is connected from.
    ///
    /// `POST /api/public/airgo/user/AGReportNodeOnlineUsers`
    pub async fn report_online_users(&self, online: &OnlineUsersRequest) -> Result<(), Error> {
        debug!(
            node_id = online.node_id,
            users = online.user_node_map.len(),
            "reporting online users"
        );
        self.post(ONLINE_USERS_PATH, online).await
    }
}
