// ── Telemetry-to-panel encoding ──
//
// Builds the panel's report bodies from runtime telemetry, stamping the
// session's node id. The panel accepts or rejects each body as a whole.

use std::collections::BTreeMap;

use airgo_api::models::{
    NodeStatusRequest, OnlineUsersRequest, UserTrafficEntry, UserTrafficRequest,
};

use crate::model::{NodeStatus, OnlineUser, UserTraffic};

pub fn node_status_request(node_id: u32, status: &NodeStatus) -> NodeStatusRequest {
    NodeStatusRequest {
        id: node_id,
        cpu: status.cpu,
        mem: status.mem,
        disk: status.disk,
        uptime: status.uptime,
    }
}

pub fn user_traffic_request(node_id: u32, traffic: &[UserTraffic]) -> UserTrafficRequest {
    UserTrafficRequest {
        id: node_id,
        user_traffic: traffic
            .iter()
            .map(|t| UserTrafficEntry {
                uid: t.uid,
                email: t.email.clone(),
                upload: t.upload,
                download: t.download,
            })
            .collect(),
    }
}

/// Group observations by user. Repeated IPs for one user are kept, in
/// observation order.
pub fn online_users_request(node_id: u32, online: &[OnlineUser]) -> OnlineUsersRequest {
    let mut user_node_map: BTreeMap<i64, Vec<String>> = BTreeMap::new();
    for o in online {
        user_node_map.entry(o.uid).or_default().push(o.ip.clone());
    }
    OnlineUsersRequest {
        node_id,
        user_node_map,
    }
}
