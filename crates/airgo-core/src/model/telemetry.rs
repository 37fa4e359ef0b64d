// ── Runtime telemetry ──
//
// What the proxy runtime hands back for reporting.

use serde::{Deserialize, Serialize};

/// Host resource usage snapshot. Percentages are 0-100.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeStatus {
    pub cpu: f64,
    pub mem: f64,
    pub disk: f64,
    /// Seconds since the node started.
    pub uptime: u64,
}

/// Traffic used by one user since the last successful report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserTraffic {
    pub uid: i64,
    pub email: String,
    pub upload: i64,
    pub download: i64,
}

/// One (user, source IP) observation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OnlineUser {
    pub uid: i64,
    pub ip: String,
}
