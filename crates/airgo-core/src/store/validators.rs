// ── Conditional-fetch validator tokens ──
//
// One opaque token (the panel's ETag) per logical resource. Backed by a
// DashMap so concurrent pollers sharing a session update keys atomically.

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

/// Resource key for the node descriptor.
pub const NODE_KEY: &str = "node";
/// Resource key for the user list.
pub const USER_LIST_KEY: &str = "userlist";

/// Last-seen validator token per resource key.
#[derive(Debug, Default)]
pub struct ValidatorStore {
    tokens: DashMap<String, String>,
}

impl ValidatorStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The stored token, or an empty string if none was ever recorded.
    pub fn get(&self, key: &str) -> String {
        self.tokens
            .get(key)
            .map(|t| t.value().clone())
            .unwrap_or_default()
    }

    /// Record `token` for `key`. Returns `true` if the stored value changed.
    ///
    /// Empty tokens and tokens equal to the stored one are ignored.
    pub fn update(&self, key: &str, token: &str) -> bool {
        if token.is_empty() {
            return false;
        }
        match self.tokens.entry(key.to_owned()) {
            Entry::Occupied(mut e) => {
                if e.get() == token {
                    false
                } else {
                    e.insert(token.to_owned());
                    true
                }
            }
            Entry::Vacant(e) => {
                e.insert(token.to_owned());
                true
            }
        }
    }
}
