// ── Session state ──
//
// The only mutable state a client session owns: validator tokens for
// conditional fetches.

mod validators;

pub use validators::{NODE_KEY, USER_LIST_KEY, ValidatorStore};
