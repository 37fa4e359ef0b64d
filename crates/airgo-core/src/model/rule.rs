// ── Detection rules and client identity ──

use regex::Regex;
use secrecy::SecretString;

use super::node::NodeType;

/// Id carried by rules loaded from the local rule file.
pub const LOCAL_RULE_ID: i64 = -1;

/// A destination pattern the runtime should block and report.
#[derive(Debug, Clone)]
pub struct DetectRule {
    pub id: i64,
    pub pattern: Regex,
}

impl PartialEq for DetectRule {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.pattern.as_str() == other.pattern.as_str()
    }
}

impl Eq for DetectRule {}

/// A rule hit observed by the runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetectResult {
    pub uid: i64,
    pub rule_id: i64,
}

/// Identity of the client session, for diagnostics.
#[derive(Debug, Clone)]
pub struct ClientInfo {
    pub api_host: String,
    pub node_id: u32,
    pub key: SecretString,
    pub node_type: NodeType,
}
