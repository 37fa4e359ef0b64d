// ── Node configuration domain types ──

use bytes::Bytes;
use serde::{Deserialize, Serialize, Serializer};
use strum::{Display, EnumString};

/// Inbound kind the runtime builds for this node (set locally, not by the panel).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum NodeType {
    #[strum(serialize = "V2ray")]
    V2ray,
    #[strum(serialize = "Trojan")]
    Trojan,
    #[strum(serialize = "Shadowsocks")]
    Shadowsocks,
    #[serde(rename = "Shadowsocks-Plugin")]
    #[strum(serialize = "Shadowsocks-Plugin")]
    ShadowsocksPlugin,
}

/// Client-side values the node mapping falls back on.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeDefaults {
    pub node_id: u32,
    pub node_type: NodeType,
    /// Mbps; `0` disables limiting.
    pub speed_limit: f64,
    /// Used when the panel leaves the VLESS flow empty.
    pub vless_flow: String,
}

/// REALITY server parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RealityConfig {
    pub dest: String,
    pub proxy_protocol_ver: u64,
    pub server_names: Vec<String>,
    pub private_key: String,
    pub min_client_ver: String,
    pub max_client_ver: String,
    pub max_time_diff: u64,
    pub short_ids: Vec<String>,
}

/// The normalized node configuration.
///
/// `NodeInfo::default()` is the zero value returned for a protocol the
/// panel sent but this client does not recognize.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NodeInfo {
    pub node_type: Option<NodeType>,
    pub node_id: u32,
    pub port: u32,
    /// Bytes per second; `0` means unlimited.
    pub speed_limit: u64,

    // Protocol
    pub enable_vless: bool,
    pub vless_flow: String,
    pub alter_id: u16,
    pub cypher_method: String,
    pub server_key: String,

    // Transport
    pub transport_protocol: String,
    pub host: String,
    pub path: String,
    pub service_name: String,
    /// Serialized HTTP camouflage header, passed through to the runtime as-is.
    #[serde(serialize_with = "serialize_header")]
    pub header: Option<Bytes>,

    // Security. `security = "reality"` also leaves `enable_tls` set; the
    // runtime gives REALITY precedence.
    pub enable_tls: bool,
    pub enable_reality: bool,
    pub reality_config: Option<RealityConfig>,
}

impl NodeInfo {
    /// `true` for the zero value produced by an unrecognized protocol.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[allow(clippy::ref_option)]
fn serialize_header<S: Serializer>(header: &Option<Bytes>, s: S) -> Result<S::Ok, S::Error> {
    match header.as_deref().map(std::str::from_utf8) {
        Some(Ok(text)) => s.serialize_some(text),
        _ => s.serialize_none(),
    }
}
