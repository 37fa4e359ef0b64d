// airgo-core: Panel synchronization layer between airgo-api and a proxy runtime.

pub mod client;
pub mod config;
pub mod convert;
pub mod error;
pub mod model;
pub mod report;
pub mod rules;
pub mod store;

// ── Primary re-exports ──────────────────────────────────────────────
pub use client::AirGoClient;
pub use config::{ClientConfig, TlsVerification};
pub use error::CoreError;
pub use store::ValidatorStore;

// Re-export model types at the crate root for ergonomics.
pub use model::{
    // Node
    NodeDefaults, NodeInfo, NodeType, RealityConfig,
    // Users
    UserInfo,
    // Telemetry
    NodeStatus, OnlineUser, UserTraffic,
    // Rules / identity
    ClientInfo, DetectResult, DetectRule,
};
