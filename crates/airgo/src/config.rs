//! CLI configuration: thin wrapper around `airgo_config` shared types.
//!
//! Adds resolution that respects `GlobalOpts` flag overrides
//! (--api-host, --key, --node-id, ...).

use std::time::Duration;

use secrecy::SecretString;

use airgo_core::{ClientConfig, NodeType, TlsVerification};

use crate::cli::GlobalOpts;
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use airgo_config::{Config, Defaults, Profile, config_path};

// ── CLI-specific helpers ────────────────────────────────────────────

/// Load the config file named by `--config`, else the platform default.
pub fn load(global: &GlobalOpts) -> Result<Config, CliError> {
    Ok(airgo_config::load_config(global.config.as_deref())?)
}

/// The file `load` reads.
pub fn effective_path(global: &GlobalOpts) -> std::path::PathBuf {
    global.config.clone().unwrap_or_else(config_path)
}

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    config.profile_name(global.profile.as_deref()).to_owned()
}

/// Build the session config from the config file, profile, and flags.
///
/// Without a matching profile, `--api-host`, `--key` and `--node-id`
/// must describe the session on their own.
pub fn build_client_config(global: &GlobalOpts, cfg: &Config) -> Result<ClientConfig, CliError> {
    let profile_name = active_profile_name(global, cfg);

    if let Some(profile) = cfg.profiles.get(&profile_name) {
        return resolve_profile(profile, &profile_name, global, cfg);
    }

    if global.profile.is_some() {
        let mut available: Vec<_> = cfg.profiles.keys().cloned().collect();
        available.sort();
        return Err(CliError::ProfileNotFound {
            name: profile_name,
            available: if available.is_empty() {
                "(none)".into()
            } else {
                available.join(", ")
            },
        });
    }

    let host = global.api_host.as_deref().ok_or_else(|| CliError::NoConfig {
        path: effective_path(global).display().to_string(),
    })?;
    let api_host: url::Url = host.parse().map_err(|_| CliError::Validation {
        field: "api_host".into(),
        reason: format!("invalid URL: {host}"),
    })?;

    let key = global
        .key
        .clone()
        .map(SecretString::from)
        .ok_or(CliError::NoCredentials {
            profile: profile_name,
        })?;

    let node_id = global.node_id.ok_or_else(|| CliError::Validation {
        field: "node_id".into(),
        reason: "required when no profile is configured (--node-id)".into(),
    })?;

    let node_type = match global.node_type.as_deref() {
        Some(raw) => airgo_config::parse_node_type(raw)?,
        None => NodeType::V2ray,
    };

    let mut config = ClientConfig::new(api_host, key, node_id, node_type);
    if global.insecure {
        config.tls = TlsVerification::DangerAcceptInvalid;
    }
    config.timeout = Duration::from_secs(global.timeout.unwrap_or(cfg.defaults.timeout));
    config.retry_count = cfg.defaults.retry_count;
    Ok(config)
}

/// Translate a `Profile` + global flags into a `ClientConfig`.
///
/// CLI flag overrides take priority over profile values.
fn resolve_profile(
    profile: &Profile,
    profile_name: &str,
    global: &GlobalOpts,
    cfg: &Config,
) -> Result<ClientConfig, CliError> {
    let mut merged = profile.clone();
    if let Some(ref host) = global.api_host {
        merged.api_host.clone_from(host);
    }
    if let Some(node_id) = global.node_id {
        merged.node_id = node_id;
    }
    if let Some(ref node_type) = global.node_type {
        merged.node_type.clone_from(node_type);
    }
    if global.insecure {
        merged.insecure = Some(true);
    }
    if global.timeout.is_some() {
        merged.timeout = global.timeout;
    }
    // A --key flag must not be shadowed by key_env or the keyring.
    if let Some(ref key) = global.key {
        merged.key_env = None;
        merged.key = Some(key.clone());
    }

    let mut config = airgo_config::profile_to_client_config(&merged, profile_name, &cfg.defaults)?;
    if let Some(ref key) = global.key {
        config.key = SecretString::from(key.clone());
    }
    Ok(config)
}
