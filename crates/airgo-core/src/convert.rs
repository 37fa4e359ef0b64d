// ── Panel-to-runtime conversions ──
//
// Maps the panel's node descriptor and user records into the normalized
// `model` types. Speed limits arrive in Mbps and leave in bytes/sec; the
// protocol field picks one of three output shapes.

use bytes::Bytes;
use serde::Serialize;
use tracing::warn;

use airgo_api::models::{NodeInfoResponse, UserResponse};

use crate::model::{NodeDefaults, NodeInfo, RealityConfig, UserInfo};

/// Placeholder REALITY short id the panel's clients are provisioned with.
pub const REALITY_SHORT_ID: &str = "0123456789abcdef";

// ── Speed limit ────────────────────────────────────────────────────

/// Resolve a limit to bytes/sec: the override when positive, else the default.
///
/// `mbps * 1_000_000 / 8`, truncated toward zero.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::as_conversions)]
pub fn speed_limit_bytes(override_mbps: f64, default_mbps: f64) -> u64 {
    let mbps = if override_mbps > 0.0 {
        override_mbps
    } else {
        default_mbps
    };
    ((mbps * 1_000_000.0) / 8.0) as u64
}

// ── Camouflage header ──────────────────────────────────────────────

/// `{"type":"http","request":{"path":[P],"headers":{"Host":[H]}}}`
#[derive(Debug, Serialize)]
struct CamouflageHeader<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    request: CamouflageRequest<'a>,
}

#[derive(Debug, Serialize)]
struct CamouflageRequest<'a> {
    path: [&'a str; 1],
    headers: CamouflageHeaders<'a>,
}

#[derive(Debug, Serialize)]
struct CamouflageHeaders<'a> {
    #[serde(rename = "Host")]
    host: [&'a str; 1],
}

/// Serialize the HTTP camouflage header for `path` / `host`.
///
/// A serialization failure leaves the node without a header rather than
/// failing the whole mapping.
fn http_header(path: &str, host: &str) -> Option<Bytes> {
    let header = CamouflageHeader {
        kind: "http",
        request: CamouflageRequest {
            path: [path],
            headers: CamouflageHeaders { host: [host] },
        },
    };
    match serde_json::to_vec(&header) {
        Ok(raw) => Some(Bytes::from(raw)),
        Err(e) => {
            warn!(error = %e, "failed to serialize camouflage header, leaving it unset");
            None
        }
    }
}

/// Header for vless/vmess: only plain tcp carries one; ws and grpc encode
/// host and path natively.
fn transport_header(n: &NodeInfoResponse) -> Option<Bytes> {
    match n.network.as_str() {
        "tcp" if n.camouflage_type == "http" => http_header(&n.path, &n.host),
        _ => None,
    }
}

// ── Security ───────────────────────────────────────────────────────

/// Only an empty or `none` security mode turns TLS off.
fn tls_enabled(security: &str) -> bool {
    !matches!(security, "" | "none")
}

fn reality_config(n: &NodeInfoResponse) -> Option<RealityConfig> {
    (n.security == "reality").then(|| RealityConfig {
        dest: n.dest.clone(),
        proxy_protocol_ver: 0,
        server_names: vec![n.sni.clone()],
        private_key: n.private_key.clone(),
        min_client_ver: String::new(),
        max_client_ver: String::new(),
        max_time_diff: 0,
        short_ids: vec![String::new(), REALITY_SHORT_ID.to_owned()],
    })
}

// ── Node ───────────────────────────────────────────────────────────

/// Protocol families the panel can assign to a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Protocol {
    Vless,
    Vmess,
    Shadowsocks,
}

fn parse_protocol(raw: &str) -> Option<Protocol> {
    if raw.eq_ignore_ascii_case("vless") {
        Some(Protocol::Vless)
    } else if raw.eq_ignore_ascii_case("vmess") {
        Some(Protocol::Vmess)
    } else if raw.eq_ignore_ascii_case("shadowsocks") {
        Some(Protocol::Shadowsocks)
    } else {
        None
    }
}

/// Translate a panel node descriptor into the runtime's node configuration.
///
/// An unrecognized protocol yields `NodeInfo::default()` (not an error);
/// a warning is logged so the misconfiguration is visible.
pub fn node_info(n: &NodeInfoResponse, defaults: &NodeDefaults) -> NodeInfo {
    let Some(protocol) = parse_protocol(&n.protocol) else {
        warn!(
            protocol = %n.protocol,
            node_id = defaults.node_id,
            "unsupported protocol, returning empty node config"
        );
        return NodeInfo::default();
    };

    let base = NodeInfo {
        node_type: Some(defaults.node_type),
        node_id: defaults.node_id,
        port: n.port,
        speed_limit: speed_limit_bytes(n.node_speed_limit, defaults.speed_limit),
        ..NodeInfo::default()
    };

    match protocol {
        // vmess also carries REALITY parameters when security is reality.
        Protocol::Vless | Protocol::Vmess => {
            let reality = reality_config(n);
            let mut info = NodeInfo {
                transport_protocol: n.network.clone(),
                host: n.host.clone(),
                path: n.path.clone(),
                service_name: n.service_name.clone(),
                header: transport_header(n),
                enable_tls: tls_enabled(&n.security),
                enable_reality: reality.is_some(),
                reality_config: reality,
                ..base
            };
            if protocol == Protocol::Vless {
                info.enable_vless = true;
                info.vless_flow = if n.vless_flow.is_empty() {
                    defaults.vless_flow.clone()
                } else {
                    n.vless_flow.clone()
                };
            } else {
                info.alter_id = 0;
                info.cypher_method = n.scy.clone();
            }
            info
        }
        // Shadowsocks ignores security and always listens on tcp.
        Protocol::Shadowsocks => NodeInfo {
            transport_protocol: "tcp".to_owned(),
            cypher_method: n.scy.clone(),
            server_key: n.server_key.clone(),
            header: (n.camouflage_type == "http")
                .then(|| http_header(&n.path, &n.host))
                .flatten(),
            ..base
        },
    }
}

// ── Users ──────────────────────────────────────────────────────────

impl UserInfo {
    /// Normalize one panel user, resolving its speed limit against `default_mbps`.
    pub fn from_panel(u: &UserResponse, default_mbps: f64) -> Self {
        Self {
            uid: u.id,
            email: u.user_name.clone(),
            uuid: u.uuid.clone(),
            passwd: u.passwd.clone(),
            speed_limit: speed_limit_bytes(u.node_speed_limit, default_mbps),
            device_limit: u.node_connector,
        }
    }
}

/// Normalize a user list; output order equals input order.
pub fn user_infos(users: &[UserResponse], default_mbps: f64) -> Vec<UserInfo> {
    users
        .iter()
        .map(|u| UserInfo::from_panel(u, default_mbps))
        .collect()
}
