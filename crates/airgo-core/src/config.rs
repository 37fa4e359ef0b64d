// ── Runtime session configuration ──
//
// Describes which panel and node this client talks for, plus the local
// defaults the translators fall back on. Never touches disk; airgo-config
// (or an embedding runtime) builds a `ClientConfig` and hands it in.

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use url::Url;

use crate::model::{NodeDefaults, NodeType};

/// TLS verification strategy for the panel connection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(PathBuf),
    /// Skip verification (self-signed panels).
    DangerAcceptInvalid,
}

/// Configuration for one node's session with the panel.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Panel base URL (e.g., `https://panel.example.com`).
    pub api_host: Url,
    /// Shared secret sent as the `key` query parameter.
    pub key: SecretString,
    pub node_id: u32,
    pub node_type: NodeType,
    /// Fallback VLESS flow when the panel sends none.
    pub vless_flow: String,
    /// Default per-node / per-user limit in Mbps. `0` = unlimited.
    pub speed_limit: f64,
    /// Default device limit. Not sent to the panel; the CLI `describe`
    /// command shows it alongside the session identity.
    pub device_limit: u32,
    /// Optional file of line-delimited detection regexes.
    pub rule_list_path: Option<PathBuf>,
    pub tls: TlsVerification,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Extra attempts after a connection-level failure.
    pub retry_count: u32,
}

impl ClientConfig {
    /// Create a config with default tuning for the given panel and node.
    pub fn new(api_host: Url, key: SecretString, node_id: u32, node_type: NodeType) -> Self {
        Self {
            api_host,
            key,
            node_id,
            node_type,
            vless_flow: String::new(),
            speed_limit: 0.0,
            device_limit: 0,
            rule_list_path: None,
            tls: TlsVerification::default(),
            timeout: Duration::from_secs(30),
            retry_count: 5,
        }
    }

    /// The defaults the node mapping falls back on.
    pub fn node_defaults(&self) -> NodeDefaults {
        NodeDefaults {
            node_id: self.node_id,
            node_type: self.node_type,
            speed_limit: self.speed_limit,
            vless_flow: self.vless_flow.clone(),
        }
    }
}
