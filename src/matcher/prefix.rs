//! Vanity prefix matching.

use std::fmt;

use crate::error::{NkError, Result};

/// RFC 4648 base32 alphabet used by the key encoding.
const BASE32_ALPHABET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ234567";

/// Result of a prefix match operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchResult {
    /// Full match found
    Match,
    /// No match
    NoMatch,
}

impl MatchResult {
    #[inline]
    pub fn is_match(self) -> bool {
        matches!(self, MatchResult::Match)
    }
}

/// A validated, upper-cased vanity prefix.
///
/// The prefix is compared against a public key with its leading type
/// character removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prefix {
    prefix: String,
}

impl Prefix {
    /// Normalises `raw` to upper case and checks it only uses base32
    /// characters.
    pub fn new(raw: &str) -> Result<Self> {
        let prefix = raw.to_uppercase();
        if !prefix.chars().all(|c| BASE32_ALPHABET.contains(c)) {
            return Err(NkError::UnencodablePrefix(prefix));
        }
        Ok(Self { prefix })
    }

    /// Returns the normalised prefix.
    pub fn as_str(&self) -> &str {
        &self.prefix
    }

    pub fn len(&self) -> usize {
        self.prefix.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prefix.is_empty()
    }

    /// Matches an encoded public key against this prefix.
    #[inline]
    pub fn matches(&self, public_key: &str) -> MatchResult {
        let body = public_key.get(1..).unwrap_or("");
        if body.starts_with(&self.prefix) {
            MatchResult::Match
        } else {
            MatchResult::NoMatch
        }
    }

    /// Whether any key can produce this prefix.
    ///
    /// Every supported prefix byte has its low three bits clear, so the
    /// character after the type character is always one of `A`..=`D`.
    pub fn is_reachable(&self) -> bool {
        self.prefix
            .chars()
            .next()
            .map_or(true, |c| ('A'..='D').contains(&c))
    }

    /// Returns the expected number of attempts to find a match.
    ///
    /// The first character has 4 possible values, every following one 32.
    /// Unreachable prefixes report `u64::MAX`.
    pub fn estimated_difficulty(&self) -> u64 {
        if self.prefix.is_empty() {
            return 1;
        }
        if !self.is_reachable() {
            return u64::MAX;
        }
        4u64.saturating_mul(32u64.saturating_pow(self.prefix.len() as u32 - 1))
    }

    /// Returns a human-readable difficulty estimate.
    pub fn difficulty_description(&self) -> String {
        if !self.is_reachable() {
            return "Impossible (no key of this shape exists)".into();
        }
        match self.estimated_difficulty() {
            0..=1_000 => "Very Easy (< 1 second)".into(),
            1_001..=100_000 => "Easy (seconds)".into(),
            100_001..=10_000_000 => "Medium (minutes)".into(),
            10_000_001..=1_000_000_000 => "Hard (hours)".into(),
            _ => "Very Hard (days or more)".into(),
        }
    }
}

impl fmt::Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.prefix)
    }
}
