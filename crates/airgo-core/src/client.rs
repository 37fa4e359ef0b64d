// ── Client facade ──
//
// What a proxy runtime polls: node config, users, rules, and the three
// telemetry reports. Owns the panel client, the validator tokens, and the
// rule list loaded at construction.

use std::sync::Arc;

use tracing::{debug, info};

use airgo_api::models::{NodeInfoResponse, UserResponse};
use airgo_api::transport::{TlsMode, TransportConfig};
use airgo_api::{Conditional, PanelClient, PanelResponse};

use crate::config::{ClientConfig, TlsVerification};
use crate::convert;
use crate::error::CoreError;
use crate::model::{
    ClientInfo, DetectResult, DetectRule, NodeInfo, NodeStatus, OnlineUser, UserInfo, UserTraffic,
};
use crate::report;
use crate::rules;
use crate::store::{NODE_KEY, USER_LIST_KEY, ValidatorStore};

/// Session with the panel for one node.
///
/// Cheaply cloneable via `Arc<ClientInner>`; clones share validator tokens,
/// so concurrent pollers never double-fetch unchanged data.
#[derive(Clone)]
pub struct AirGoClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    config: ClientConfig,
    api: PanelClient,
    validators: ValidatorStore,
    rules: Vec<DetectRule>,
}

impl AirGoClient {
    /// Build the HTTP client and load the local rule list.
    ///
    /// Fails on an invalid TLS setup, or when the rule file cannot be read
    /// to the end or holds an invalid pattern.
    pub fn new(config: ClientConfig) -> Result<Self, CoreError> {
        let transport = TransportConfig {
            tls: tls_mode(&config.tls),
            timeout: config.timeout,
            retry_count: config.retry_count,
        };
        let api = PanelClient::new(config.api_host.as_str(), config.key.clone(), &transport)?;
        Self::with_panel(config, api)
    }

    /// Use a pre-built `PanelClient` (custom `reqwest::Client`, tests).
    pub fn with_panel(config: ClientConfig, api: PanelClient) -> Result<Self, CoreError> {
        let rules = rules::load_rule_list(config.rule_list_path.as_deref())?;
        info!(
            api_host = %config.api_host,
            node_id = config.node_id,
            node_type = %config.node_type,
            rules = rules.len(),
            "panel client ready"
        );
        Ok(Self {
            inner: Arc::new(ClientInner {
                config,
                api,
                validators: ValidatorStore::new(),
                rules,
            }),
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    /// Current validator token for a resource key (`"node"`, `"userlist"`).
    pub fn validator(&self, key: &str) -> String {
        self.inner.validators.get(key)
    }

    // ── Fetch ────────────────────────────────────────────────────────

    /// Fetch and translate the node configuration.
    ///
    /// Returns `CoreError::NodeNotModified` when the panel reports no change
    /// since the last successful fetch.
    pub async fn get_node_info(&self) -> Result<NodeInfo, CoreError> {
        let inner = &self.inner;
        let etag = inner.validators.get(NODE_KEY);
        let resp = match inner.api.get_node_info(inner.config.node_id, &etag).await? {
            Conditional::NotModified => return Err(CoreError::NodeNotModified),
            Conditional::Modified(resp) => resp,
        };
        self.record_validator(NODE_KEY, &resp);

        let descriptor: NodeInfoResponse = resp.json()?;
        Ok(convert::node_info(&descriptor, &inner.config.node_defaults()))
    }

    /// Fetch and translate the node's user list, in panel order.
    ///
    /// Returns `CoreError::UserNotModified` when unchanged.
    pub async fn get_user_list(&self) -> Result<Vec<UserInfo>, CoreError> {
        let inner = &self.inner;
        let etag = inner.validators.get(USER_LIST_KEY);
        let resp = match inner.api.get_user_list(inner.config.node_id, &etag).await? {
            Conditional::NotModified => return Err(CoreError::UserNotModified),
            Conditional::Modified(resp) => resp,
        };
        self.record_validator(USER_LIST_KEY, &resp);

        let users: Vec<UserResponse> = resp.json()?;
        Ok(convert::user_infos(&users, inner.config.speed_limit))
    }

    /// The detection rules loaded at startup. Never fails.
    pub fn get_node_rule(&self) -> &[DetectRule] {
        &self.inner.rules
    }

    fn record_validator(&self, key: &str, resp: &PanelResponse) {
        if let Some(etag) = resp.etag.as_deref() {
            if self.inner.validators.update(key, etag) {
                debug!(key, etag, "validator updated");
            }
        }
    }

    // ── Report ───────────────────────────────────────────────────────

    pub async fn report_node_status(&self, status: &NodeStatus) -> Result<(), CoreError> {
        let body = report::node_status_request(self.inner.config.node_id, status);
        Ok(self.inner.api.report_node_status(&body).await?)
    }

    /// Report traffic deltas. Not safe to blindly resend: the panel adds
    /// every accepted delta.
    pub async fn report_user_traffic(&self, traffic: &[UserTraffic]) -> Result<(), CoreError> {
        let body = report::user_traffic_request(self.inner.config.node_id, traffic);
        Ok(self.inner.api.report_user_traffic(&body).await?)
    }

    pub async fn report_node_online_users(&self, online: &[OnlineUser]) -> Result<(), CoreError> {
        let body = report::online_users_request(self.inner.config.node_id, online);
        Ok(self.inner.api.report_online_users(&body).await?)
    }

    /// The panel has no endpoint for rule hits; results are dropped.
    pub fn report_illegal(&self, results: &[DetectResult]) -> Result<(), CoreError> {
        debug!(
            node_id = self.inner.config.node_id,
            count = results.len(),
            "panel does not accept rule hits, dropping"
        );
        Ok(())
    }

    // ── Identity ─────────────────────────────────────────────────────

    pub fn describe(&self) -> ClientInfo {
        let config = &self.inner.config;
        ClientInfo {
            api_host: config.api_host.to_string(),
            node_id: config.node_id,
            key: config.key.clone(),
            node_type: config.node_type,
        }
    }
}

fn tls_mode(tls: &TlsVerification) -> TlsMode {
    match tls {
        TlsVerification::SystemDefaults => TlsMode::System,
        TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
        TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
    }
}
