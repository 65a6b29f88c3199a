//! # nk
//!
//! NATS nkey management: key generation, vanity public-key search,
//! signing and verification.
//!
//! ## Architecture
//!
//! - `crypto`: Key types, entropy and keypair handles over `nkeys`
//! - `matcher`: Vanity prefix validation and matching
//! - `worker`: Bounded parallel vanity search
//! - `secret`: Key extraction from scrubbed input buffers
//! - `commands`: Generate / sign / verify / show-public flows
//! - `config`: Command-line configuration

pub mod commands;
pub mod config;
pub mod crypto;
pub mod error;
pub mod matcher;
pub mod secret;
pub mod worker;

pub use config::{Config, ConfigError, KeySource, Mode};
pub use crypto::{EntropySource, KeyType, Keypair, PublicKey, VerifyingKey};
pub use error::{NkError, Result};
pub use matcher::{MatchResult, Prefix};
pub use secret::{read_key, read_key_file};
pub use worker::{SearchJob, VanityResult, VanitySearch};
