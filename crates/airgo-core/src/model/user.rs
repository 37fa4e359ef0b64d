// ── User domain types ──

use serde::{Deserialize, Serialize};

/// A user the runtime should accept, with limits resolved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    pub uid: i64,
    pub email: String,
    pub uuid: String,
    pub passwd: String,
    /// Bytes per second; `0` means unlimited.
    pub speed_limit: u64,
    /// Maximum simultaneous devices; `0` means unlimited.
    pub device_limit: i64,
}
