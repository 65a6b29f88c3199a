//! Generate, sign, verify and show-public flows.
//!
//! Each flow returns its output instead of printing it; `main` owns stdout.

use std::fs;
use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use tracing::debug;

use crate::config::KeySource;
use crate::crypto::{EntropySource, KeyType, Keypair, PublicKey, VerifyingKey};
use crate::error::{NkError, Result};
use crate::secret::read_key_string;

/// Generates a plain (non-vanity) keypair.
pub fn generate(key_type: KeyType, entropy: &EntropySource) -> Result<Keypair> {
    debug!(%key_type, ?entropy, "generating keypair");
    Keypair::generate(key_type, entropy)
}

/// Signs `content` with the seed, returning a standard base64 signature.
pub fn sign(content: &[u8], seed: &str) -> Result<String> {
    let keypair = Keypair::from_seed(seed)?;
    let signature = keypair.sign(content)?;
    Ok(STANDARD.encode(signature))
}

/// Verifies a base64 `signature` over `content`.
pub fn verify(content: &[u8], key: &VerifyingKey, signature: &str) -> Result<()> {
    let raw = STANDARD.decode(signature.trim())?;
    key.verify(content, &raw)
}

/// Returns the public key belonging to a seed.
pub fn show_public(seed: &str) -> Result<String> {
    Ok(Keypair::from_seed(seed)?.public_key())
}

/// Loads a verifying key from a seed file or a public key file.
pub fn load_verifying_key(source: &KeySource) -> Result<VerifyingKey> {
    match source {
        KeySource::Seed(path) => {
            let seed = read_key_string(path)?;
            Ok(Keypair::from_seed(&seed)?.into())
        }
        KeySource::Public(path) => {
            let public = read_key_string(path)?;
            Ok(PublicKey::from_encoded(&public)?.into())
        }
    }
}

/// Signs the file at `content` with the key in `inkey`.
pub fn sign_file(content: &Path, inkey: &Path) -> Result<String> {
    let seed = read_key_string(inkey)?;
    sign(&read_file(content)?, &seed)
}

/// Verifies the file at `content` against the signature file `sig`.
pub fn verify_file(content: &Path, key: &KeySource, sig: &Path) -> Result<()> {
    let key = load_verifying_key(key)?;
    let signature = fs::read_to_string(sig).map_err(|error| NkError::Read {
        path: sig.to_path_buf(),
        error,
    })?;
    verify(&read_file(content)?, &key, &signature)
}

/// Returns the public key for the seed in `inkey`.
pub fn show_public_file(inkey: &Path) -> Result<String> {
    let seed = read_key_string(inkey)?;
    show_public(&seed)
}

fn read_file(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|error| NkError::Read {
        path: path.to_path_buf(),
        error,
    })
}
