// Panel wire types
//
// Records exchanged with the AirGo panel. Every inbound field is
// `#[serde(default)]`: the panel omits empty values freely and a missing
// field must decode to its zero value rather than fail the whole poll.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

// ── Node ─────────────────────────────────────────────────────────────

/// Node descriptor from `GET /api/public/airgo/node/getNodeInfo`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeInfoResponse {
    pub id: i64,
    /// Per-node limit in Mbps. `0` means "use the client default".
    #[serde(rename = "node_speedlimit")]
    pub node_speed_limit: f64,
    pub traffic_rate: f64,
    pub node_type: String,
    pub remarks: String,
    pub address: String,
    pub port: u32,

    // ── Protocol ──
    /// `vless`, `vmess` or `shadowsocks`, case-insensitive.
    pub protocol: String,
    /// Cipher method (vmess / shadowsocks).
    pub scy: String,
    pub server_key: String,
    pub aid: i64,
    #[serde(rename = "flow")]
    pub vless_flow: String,
    #[serde(rename = "encryption")]
    pub vless_encryption: String,

    // ── Transport ──
    /// `tcp`, `ws`, `grpc`, ...
    pub network: String,
    /// Camouflage type; `http` turns on the HTTP header disguise for tcp.
    #[serde(rename = "type")]
    pub camouflage_type: String,
    pub host: String,
    pub path: String,
    #[serde(rename = "mode")]
    pub grpc_mode: String,
    pub service_name: String,

    // ── Security ──
    /// `none`, empty, `tls` or `reality`.
    pub security: String,
    pub sni: String,
    #[serde(rename = "fp")]
    pub fingerprint: String,
    pub alpn: String,
    pub dest: String,
    pub private_key: String,
    #[serde(rename = "pbk")]
    pub public_key: String,
    #[serde(rename = "sid")]
    pub short_id: String,
    #[serde(rename = "spx")]
    pub spider_x: String,
}

// ── User ─────────────────────────────────────────────────────────────

/// One entry of `GET /api/public/airgo/user/getUserlist`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserResponse {
    pub id: i64,
    pub uuid: String,
    pub passwd: String,
    pub user_name: String,
    /// Maximum simultaneous connections (devices).
    pub node_connector: i64,
    /// Per-user limit in Mbps. `0` means "use the client default".
    #[serde(rename = "node_speedlimit")]
    pub node_speed_limit: f64,
}

// ── Reports ──────────────────────────────────────────────────────────

/// Body of `POST /api/public/airgo/node/reportNodeStatus`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeStatusRequest {
    pub id: u32,
    pub cpu: f64,
    pub mem: f64,
    pub disk: f64,
    pub uptime: u64,
}

/// Body of `POST /api/public/airgo/user/reportUserTraffic`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserTrafficRequest {
    pub id: u32,
    #[serde(rename = "userTraffic")]
    pub user_traffic: Vec<UserTrafficEntry>,
}

/// Per-user traffic delta, in the panel's capitalized field naming.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserTrafficEntry {
    #[serde(rename = "UID")]
    pub uid: i64,
    #[serde(rename = "Email")]
    pub email: String,
    #[serde(rename = "Upload")]
    pub upload: i64,
    #[serde(rename = "Download")]
    pub download: i64,
}

/// Body of `POST /api/public/airgo/user/AGReportNodeOnlineUsers`.
///
/// Map keys serialize as JSON strings (`{"1": ["1.1.1.1"]}`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OnlineUsersRequest {
    #[serde(rename = "nodeID")]
    pub node_id: u32,
    #[serde(rename = "userNodeMap")]
    pub user_node_map: BTreeMap<i64, Vec<String>>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn node_descriptor_tolerates_missing_fields() {
        let node: NodeInfoResponse = serde_json::from_value(json!({
            "protocol": "vless",
            "port": 443,
            "network": "tcp",
            "type": "http",
            "node_speedlimit": 100
        }))
        .unwrap();
        assert_eq!(node.protocol, "vless");
        assert_eq!(node.port, 443);
        assert_eq!(node.camouflage_type, "http");
        assert!((node.node_speed_limit - 100.0).abs() < f64::EPSILON);
        assert!(node.security.is_empty());
        assert!(node.sni.is_empty());
    }

    #[test]
    fn online_users_request_uses_panel_field_names() {
        let req = OnlineUsersRequest {
            node_id: 7,
            user_node_map: BTreeMap::from([(1, vec!["1.1.1.1".to_owned()])]),
        };
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({ "nodeID": 7, "userNodeMap": { "1": ["1.1.1.1"] } })
        );
    }

    #[test]
    fn traffic_request_uses_panel_field_names() {
        let req = UserTrafficRequest {
            id: 3,
            user_traffic: vec![UserTrafficEntry {
                uid: 9,
                email: "a@b.c".into(),
                upload: 10,
                download: 20,
            }],
        };
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({
                "id": 3,
                "userTraffic": [{ "UID": 9, "Email": "a@b.c", "Upload": 10, "Download": 20 }]
            })
        );
    }
}
