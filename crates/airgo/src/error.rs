//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` variants into user-facing errors with
//! actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use airgo_config::ConfigError;
use airgo_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
#[allow(dead_code, unused_assignments)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach the panel at {url}")]
    #[diagnostic(
        code(airgo::connection_failed),
        help(
            "Check that the panel is running and reachable from this host.\n\
             For a self-signed panel certificate use --insecure (-k) or set ca_cert."
        )
    )]
    ConnectionFailed {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    // ── Panel responses ──────────────────────────────────────────────
    #[error("Panel rejected the key ({status}) at {url}")]
    #[diagnostic(
        code(airgo::auth_failed),
        help("Verify the panel key and node id for this profile.")
    )]
    AuthFailed { url: String, status: u16 },

    #[error("Panel request to {url} failed with status {status}")]
    #[diagnostic(code(airgo::api_error))]
    ApiError { url: String, status: u16 },

    #[error("Unexpected panel response: {message}")]
    #[diagnostic(
        code(airgo::decode),
        help("The panel version may not match this client; rerun with -vv to see the request.")
    )]
    Decode { message: String },

    #[error("{resource} unchanged since the last fetch")]
    #[diagnostic(code(airgo::not_modified))]
    Unchanged { resource: String },

    // ── Credentials ──────────────────────────────────────────────────
    #[error("No panel key configured for profile '{profile}'")]
    #[diagnostic(
        code(airgo::no_credentials),
        help(
            "Set `key_env` or `key` in the profile, store it in the system keyring \
             (service `airgo`, entry `{profile}/key`), or pass --key / AIRGO_KEY."
        )
    )]
    NoCredentials { profile: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(airgo::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(airgo::profile_not_found),
        help("Available profiles: {available}")
    )]
    ProfileNotFound { name: String, available: String },

    #[error("No panel configured")]
    #[diagnostic(
        code(airgo::no_config),
        help(
            "Add a profile to {path}\n\
             or pass --api-host, --key and --node-id."
        )
    )]
    NoConfig { path: String },

    #[error("Configuration error: {message}")]
    #[diagnostic(code(airgo::config))]
    Config { message: String },

    #[error("{message}")]
    #[diagnostic(
        code(airgo::rule_list),
        help("Fix or remove `rule_list_path` in the profile.")
    )]
    RuleList { message: String },

    // ── IO / Serialization ────────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON: {0}")]
    #[diagnostic(code(airgo::json), help("Check the JSON file contents and try again."))]
    Json(#[from] serde_json::Error),

    #[error("YAML rendering failed: {0}")]
    #[diagnostic(code(airgo::yaml))]
    Yaml(#[from] serde_yaml::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::ProfileNotFound { .. } => exit_code::NOT_FOUND,
            Self::Validation { .. } => exit_code::USAGE,
            Self::Unchanged { .. } => exit_code::SUCCESS,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::NodeNotModified => CliError::Unchanged {
                resource: "node config".into(),
            },
            CoreError::UserNotModified => CliError::Unchanged {
                resource: "user list".into(),
            },

            CoreError::RequestFailed { url, reason } => CliError::ConnectionFailed {
                url,
                source: reason.into(),
            },

            CoreError::Rejected { url, status } if matches!(status, 401 | 403) => {
                CliError::AuthFailed { url, status }
            }
            CoreError::Rejected { url, status } => CliError::ApiError { url, status },

            CoreError::Decode { message, body: _ } => CliError::Decode { message },

            CoreError::Config { message } => CliError::Config { message },

            err @ (CoreError::RuleFile { .. } | CoreError::RulePattern { .. }) => {
                CliError::RuleList {
                    message: err.to_string(),
                }
            }
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            ConfigError::NoCredentials { profile } => CliError::NoCredentials { profile },
            ConfigError::UnknownProfile { name } => CliError::ProfileNotFound {
                name,
                available: String::new(),
            },
            ConfigError::Serialization(e) => CliError::Config {
                message: e.to_string(),
            },
            ConfigError::Figment(e) => CliError::Config {
                message: e.to_string(),
            },
        }
    }
}
