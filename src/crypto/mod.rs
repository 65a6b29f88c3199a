//! Key handling on top of the nkeys library.
//!
//! This module provides:
//! - Key roles (`KeyType`) and their public-key prefix characters
//! - Entropy sources for raw seeds
//! - Full and public-only keypair handles
//! - Encoding validation for key lines

mod entropy;
mod key_type;
mod keypair;

pub use entropy::{EntropySource, RAW_SEED_LEN};
pub use key_type::KeyType;
pub use keypair::{is_valid_encoding, Keypair, PublicKey, VerifyingKey};
