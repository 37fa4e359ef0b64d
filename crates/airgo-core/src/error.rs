// ── Core error types ──
//
// Errors surfaced to the proxy runtime. The two "not modified" variants are
// sentinels, not failures: callers check `is_not_modified()` and skip the
// rebuild. The `From<airgo_api::Error>` impl translates transport-layer
// errors into these variants.

use std::path::PathBuf;

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Conditional fetch sentinels ──────────────────────────────────
    #[error("node info not modified")]
    NodeNotModified,

    #[error("user list not modified")]
    UserNotModified,

    // ── Transport errors ─────────────────────────────────────────────
    #[error("failed to send request to {url}: {reason}")]
    RequestFailed { url: String, reason: String },

    #[error("request to {url} failed with status: {status}")]
    Rejected { url: String, status: u16 },

    // ── Data errors ──────────────────────────────────────────────────
    #[error("failed to decode panel response: {message}")]
    Decode {
        message: String,
        /// Raw response text, for diagnostics.
        body: String,
    },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("error while reading rule list {path}: {source}")]
    RuleFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid rule on line {line} of {path}: {source}")]
    RulePattern {
        path: PathBuf,
        line: usize,
        #[source]
        source: regex::Error,
    },
}

impl CoreError {
    /// Returns `true` for the "no change since last poll" sentinels.
    pub fn is_not_modified(&self) -> bool {
        matches!(self, Self::NodeNotModified | Self::UserNotModified)
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<airgo_api::Error> for CoreError {
    fn from(err: airgo_api::Error) -> Self {
        match err {
            airgo_api::Error::Transport { url, source } => CoreError::RequestFailed {
                url,
                reason: source.to_string(),
            },
            airgo_api::Error::Status { url, status } => CoreError::Rejected {
                url,
                status: status.as_u16(),
            },
            airgo_api::Error::Deserialization { message, body } => {
                CoreError::Decode { message, body }
            }
            airgo_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            airgo_api::Error::Tls(message) => CoreError::Config {
                message: format!("TLS error: {message}"),
            },
        }
    }
}
