// ── Normalized domain model ──
//
// Every type in this module is what a proxy runtime consumes. Panel wire
// records never leave `convert` / `report`; callers only see these.

pub mod node;
pub mod rule;
pub mod telemetry;
pub mod user;

// ── Re-exports ──────────────────────────────────────────────────────

// Node
pub use node::{NodeDefaults, NodeInfo, NodeType, RealityConfig};

// Users
pub use user::UserInfo;

// Telemetry
pub use telemetry::{NodeStatus, OnlineUser, UserTraffic};

// Rules / identity
pub use rule::{ClientInfo, DetectResult, DetectRule};
