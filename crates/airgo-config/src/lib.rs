//! Configuration for airgo-node.
//!
//! TOML profiles (one per panel node), key resolution (env + keyring +
//! plaintext), and translation to `airgo_core::ClientConfig`. The binary
//! layers its command-line overrides on top.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use airgo_core::{ClientConfig, NodeType, TlsVerification};

/// Keyring service name; entries are `<profile>/key`.
pub const KEYRING_SERVICE: &str = "airgo";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no panel key configured for profile '{profile}'")]
    NoCredentials { profile: String },

    #[error("profile '{name}' not found in config")]
    UnknownProfile { name: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Profile used when `--profile` is not given.
    pub default_profile: Option<String>,

    #[serde(default)]
    pub defaults: Defaults,

    /// Named node profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

impl Config {
    /// Name of the profile to use: the explicit one, else `default_profile`,
    /// else `"default"`.
    pub fn profile_name<'a>(&'a self, explicit: Option<&'a str>) -> &'a str {
        explicit
            .or(self.default_profile.as_deref())
            .unwrap_or("default")
    }

    pub fn profile(&self, name: &str) -> Result<&Profile, ConfigError> {
        self.profiles
            .get(name)
            .ok_or_else(|| ConfigError::UnknownProfile { name: name.into() })
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Defaults {
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    #[serde(default = "default_retry_count")]
    pub retry_count: u32,

    /// Seconds between `poll` rounds.
    #[serde(default = "default_poll_interval")]
    pub poll_interval: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            timeout: default_timeout(),
            retry_count: default_retry_count(),
            poll_interval: default_poll_interval(),
        }
    }
}

fn default_timeout() -> u64 {
    30
}
fn default_retry_count() -> u32 {
    5
}
fn default_poll_interval() -> u64 {
    60
}

/// One node's session with a panel.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Profile {
    /// Panel base URL (e.g., "https://panel.example.com").
    pub api_host: String,

    /// Panel key (plaintext; prefer keyring or env var).
    pub key: Option<String>,

    /// Environment variable name containing the panel key.
    pub key_env: Option<String>,

    pub node_id: u32,

    /// `V2ray`, `Trojan`, `Shadowsocks` or `Shadowsocks-Plugin`.
    #[serde(default = "default_node_type")]
    pub node_type: String,

    /// Fallback VLESS flow.
    #[serde(default)]
    pub vless_flow: String,

    /// Default speed limit in Mbps; 0 = unlimited.
    #[serde(default)]
    pub speed_limit: f64,

    #[serde(default)]
    pub device_limit: u32,

    /// Line-delimited detection regexes.
    pub rule_list_path: Option<PathBuf>,

    /// Accept invalid panel certificates.
    pub insecure: Option<bool>,

    /// Path to custom CA certificate.
    pub ca_cert: Option<PathBuf>,

    /// Override `defaults.timeout`.
    pub timeout: Option<u64>,

    /// Override `defaults.retry_count`.
    pub retry_count: Option<u32>,
}

fn default_node_type() -> String {
    "V2ray".into()
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "airgo", "airgo").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("airgo");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config: defaults, then the TOML file (`path` or the
/// platform path), then `AIRGO_` environment variables.
///
/// Nested keys use a double underscore: `AIRGO_DEFAULTS__TIMEOUT=10`.
/// A missing file is not an error.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let path = path.map_or_else(config_path, Path::to_path_buf);

    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(&path))
        .merge(Env::prefixed("AIRGO_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, falling back to the default on any error.
pub fn load_config_or_default(path: Option<&Path>) -> Config {
    load_config(path).unwrap_or_default()
}

/// Render config as TOML with plaintext keys masked.
pub fn render_config(cfg: &Config) -> Result<String, ConfigError> {
    let mut masked = cfg.clone();
    for profile in masked.profiles.values_mut() {
        if profile.key.is_some() {
            profile.key = Some("********".into());
        }
    }
    Ok(toml::to_string_pretty(&masked)?)
}

// ── Key resolution ──────────────────────────────────────────────────

/// Resolve the panel key: `key_env` variable, then the system keyring,
/// then the plaintext `key`.
pub fn resolve_key(profile: &Profile, profile_name: &str) -> Result<SecretString, ConfigError> {
    // 1. Profile's key_env → env var lookup
    if let Some(ref env_name) = profile.key_env {
        if let Ok(val) = std::env::var(env_name) {
            return Ok(SecretString::from(val));
        }
    }

    // 2. System keyring
    if let Ok(entry) = keyring::Entry::new(KEYRING_SERVICE, &format!("{profile_name}/key")) {
        if let Ok(secret) = entry.get_password() {
            return Ok(SecretString::from(secret));
        }
    }

    // 3. Plaintext in config
    if let Some(ref key) = profile.key {
        return Ok(SecretString::from(key.clone()));
    }

    Err(ConfigError::NoCredentials {
        profile: profile_name.into(),
    })
}

/// Parse the profile's `node_type` (case-insensitive).
pub fn parse_node_type(raw: &str) -> Result<NodeType, ConfigError> {
    raw.parse().map_err(|_| ConfigError::Validation {
        field: "node_type".into(),
        reason: format!(
            "expected 'V2ray', 'Trojan', 'Shadowsocks', or 'Shadowsocks-Plugin', got '{raw}'"
        ),
    })
}

/// Build a `ClientConfig` from a profile, no command-line overrides.
///
/// Profile `timeout` / `retry_count` win over `defaults`.
pub fn profile_to_client_config(
    profile: &Profile,
    profile_name: &str,
    defaults: &Defaults,
) -> Result<ClientConfig, ConfigError> {
    let api_host: url::Url = profile
        .api_host
        .parse()
        .map_err(|_| ConfigError::Validation {
            field: "api_host".into(),
            reason: format!("invalid URL: {}", profile.api_host),
        })?;

    let key = resolve_key(profile, profile_name)?;
    let node_type = parse_node_type(&profile.node_type)?;

    let tls = if profile.insecure.unwrap_or(false) {
        TlsVerification::DangerAcceptInvalid
    } else if let Some(ref ca_path) = profile.ca_cert {
        TlsVerification::CustomCa(ca_path.clone())
    } else {
        TlsVerification::SystemDefaults
    };

    let mut config = ClientConfig::new(api_host, key, profile.node_id, node_type);
    config.vless_flow.clone_from(&profile.vless_flow);
    config.speed_limit = profile.speed_limit;
    config.device_limit = profile.device_limit;
    config.rule_list_path.clone_from(&profile.rule_list_path);
    config.tls = tls;
    config.timeout = Duration::from_secs(profile.timeout.unwrap_or(defaults.timeout));
    config.retry_count = profile.retry_count.unwrap_or(defaults.retry_count);
    Ok(config)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::io::Write;

    use pretty_assertions::assert_eq;
    use secrecy::ExposeSecret;

    use super::*;

    fn write_config(body: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(body.as_bytes()).unwrap();
        file
    }

    fn profile(api_host: &str) -> Profile {
        Profile {
            api_host: api_host.into(),
            key: Some("plain".into()),
            key_env: None,
            node_id: 3,
            node_type: "vless-is-not-a-type".into(),
            vless_flow: String::new(),
            speed_limit: 0.0,
            device_limit: 0,
            rule_list_path: None,
            insecure: None,
            ca_cert: None,
            timeout: None,
            retry_count: None,
        }
    }

    #[test]
    fn missing_file_yields_defaults() {
        let cfg = load_config(Some(Path::new("/nonexistent/airgo/config.toml"))).unwrap();
        assert_eq!(cfg.default_profile.as_deref(), Some("default"));
        assert_eq!(cfg.defaults.timeout, 30);
        assert_eq!(cfg.defaults.retry_count, 5);
        assert_eq!(cfg.defaults.poll_interval, 60);
        assert!(cfg.profiles.is_empty());
    }

    #[test]
    fn loads_profiles_from_toml() {
        let file = write_config(
            r#"
default_profile = "edge"

[defaults]
timeout = 10
poll_interval = 15

[profiles.edge]
api_host = "https://panel.example.com"
key = "s3cret"
node_id = 4
node_type = "shadowsocks"
speed_limit = 100.0
device_limit = 3
insecure = true
retry_count = 1
"#,
        );

        let cfg = load_config(Some(file.path())).unwrap();
        assert_eq!(cfg.profile_name(None), "edge");
        assert_eq!(cfg.profile_name(Some("other")), "other");
        assert_eq!(cfg.defaults.timeout, 10);
        assert_eq!(cfg.defaults.retry_count, 5);
        assert_eq!(cfg.defaults.poll_interval, 15);

        let edge = cfg.profile("edge").unwrap();
        let client = profile_to_client_config(edge, "edge", &cfg.defaults).unwrap();
        assert_eq!(client.api_host.as_str(), "https://panel.example.com/");
        assert_eq!(client.key.expose_secret(), "s3cret");
        assert_eq!(client.node_id, 4);
        assert_eq!(client.node_type, NodeType::Shadowsocks);
        assert_eq!(client.device_limit, 3);
        assert_eq!(client.tls, TlsVerification::DangerAcceptInvalid);
        assert_eq!(client.timeout, Duration::from_secs(10));
        assert_eq!(client.retry_count, 1);
    }

    #[test]
    fn unknown_profile_is_an_error() {
        let cfg = Config::default();
        assert!(matches!(
            cfg.profile("nope"),
            Err(ConfigError::UnknownProfile { name }) if name == "nope"
        ));
    }

    #[test]
    fn invalid_toml_is_an_error() {
        let file = write_config("default_profile = [");
        assert!(matches!(
            load_config(Some(file.path())),
            Err(ConfigError::Figment(_))
        ));
        assert!(load_config_or_default(Some(file.path())).profiles.is_empty());
    }

    #[test]
    fn rejects_bad_url() {
        let p = profile("not a url");
        let err = profile_to_client_config(&p, "x", &Defaults::default()).unwrap_err();
        assert!(matches!(err, ConfigError::Validation { ref field, .. } if field == "api_host"));
    }

    #[test]
    fn rejects_unknown_node_type() {
        let p = profile("https://panel.example.com");
        let err = profile_to_client_config(&p, "x", &Defaults::default()).unwrap_err();
        assert!(matches!(err, ConfigError::Validation { ref field, .. } if field == "node_type"));
    }

    #[test]
    fn node_type_parse_is_case_insensitive() {
        assert_eq!(parse_node_type("v2ray").unwrap(), NodeType::V2ray);
        assert_eq!(
            parse_node_type("shadowsocks-plugin").unwrap(),
            NodeType::ShadowsocksPlugin
        );
    }

    #[test]
    fn key_env_wins_over_plaintext() {
        // PATH is set in any environment the tests run in.
        let expected = std::env::var("PATH").unwrap();
        let mut p = profile("https://panel.example.com");
        p.key_env = Some("PATH".into());
        let key = resolve_key(&p, "airgo-test-profile").unwrap();
        assert_eq!(key.expose_secret(), expected);
    }

    #[test]
    fn ca_cert_selects_custom_ca() {
        let mut p = profile("https://panel.example.com");
        p.node_type = "Trojan".into();
        p.ca_cert = Some(PathBuf::from("/etc/airgo/ca.pem"));
        let cfg = profile_to_client_config(&p, "x", &Defaults::default()).unwrap();
        assert_eq!(
            cfg.tls,
            TlsVerification::CustomCa(PathBuf::from("/etc/airgo/ca.pem"))
        );
        assert_eq!(cfg.timeout, Duration::from_secs(30));
        assert_eq!(cfg.retry_count, 5);
    }

    #[test]
    fn render_masks_plaintext_keys() {
        let mut cfg = Config::default();
        cfg.profiles
            .insert("n1".into(), profile("https://panel.example.com"));
        let text = render_config(&cfg).unwrap();
        assert!(text.contains("********"), "{text}");
        assert!(!text.contains("plain"), "{text}");
    }
}
