//! Vanity prefix matching for encoded public keys.

mod prefix;

pub use prefix::{MatchResult, Prefix};
