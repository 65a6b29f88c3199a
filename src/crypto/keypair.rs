//! Keypair handles over the nkeys collaborator.
//!
//! A [`Keypair`] carries a seed and can sign; a [`PublicKey`] can only
//! verify. [`VerifyingKey`] accepts either for signature verification.

use std::fmt;

use nkeys::KeyPair;
use zeroize::Zeroizing;

use super::{EntropySource, KeyType};
use crate::error::Result;

/// A full keypair: seed, public key, sign and verify.
pub struct Keypair {
    inner: KeyPair,
}

impl Keypair {
    /// Creates a keypair of `key_type` from 32 raw seed bytes.
    pub fn from_raw(key_type: KeyType, raw_seed: [u8; 32]) -> Result<Self> {
        let inner = KeyPair::new_from_raw(key_type.pair_type(), raw_seed)?;
        Ok(Self { inner })
    }

    /// Generates a keypair of `key_type` from `entropy`.
    pub fn generate(key_type: KeyType, entropy: &EntropySource) -> Result<Self> {
        let raw = entropy.read_seed()?;
        Self::from_raw(key_type, *raw)
    }

    /// Loads a keypair from an encoded seed (`S...`).
    pub fn from_seed(seed: &str) -> Result<Self> {
        let inner = KeyPair::from_seed(seed)?;
        Ok(Self { inner })
    }

    /// Returns the encoded seed.
    pub fn seed(&self) -> Result<Zeroizing<String>> {
        Ok(Zeroizing::new(self.inner.seed()?))
    }

    /// Returns the encoded public key.
    #[inline]
    pub fn public_key(&self) -> String {
        self.inner.public_key()
    }

    /// Signs `content`, returning the raw signature bytes.
    pub fn sign(&self, content: &[u8]) -> Result<Vec<u8>> {
        Ok(self.inner.sign(content)?)
    }

    /// Verifies `signature` over `content`.
    pub fn verify(&self, content: &[u8], signature: &[u8]) -> Result<()> {
        Ok(self.inner.verify(content, signature)?)
    }
}

impl fmt::Debug for Keypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Keypair")
            .field("public_key", &self.public_key())
            .finish_non_exhaustive()
    }
}

/// A public-only key. Cannot sign.
pub struct PublicKey {
    inner: KeyPair,
}

impl PublicKey {
    /// Loads a public key from its encoding.
    pub fn from_encoded(public_key: &str) -> Result<Self> {
        let inner = KeyPair::from_public_key(public_key)?;
        Ok(Self { inner })
    }

    /// Returns the encoded public key.
    pub fn public_key(&self) -> String {
        self.inner.public_key()
    }

    /// Verifies `signature` over `content`.
    pub fn verify(&self, content: &[u8], signature: &[u8]) -> Result<()> {
        Ok(self.inner.verify(content, signature)?)
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", self.public_key())
    }
}

/// Any key able to verify a signature.
#[derive(Debug)]
pub enum VerifyingKey {
    Full(Keypair),
    Public(PublicKey),
}

impl VerifyingKey {
    pub fn public_key(&self) -> String {
        match self {
            VerifyingKey::Full(kp) => kp.public_key(),
            VerifyingKey::Public(pk) => pk.public_key(),
        }
    }

    pub fn verify(&self, content: &[u8], signature: &[u8]) -> Result<()> {
        match self {
            VerifyingKey::Full(kp) => kp.verify(content, signature),
            VerifyingKey::Public(pk) => pk.verify(content, signature),
        }
    }
}

impl From<Keypair> for VerifyingKey {
    fn from(kp: Keypair) -> Self {
        VerifyingKey::Full(kp)
    }
}

impl From<PublicKey> for VerifyingKey {
    fn from(pk: PublicKey) -> Self {
        VerifyingKey::Public(pk)
    }
}

/// Returns true if `line` is a syntactically valid encoded seed or public
/// key (base32, checksum and prefix byte all check out).
pub fn is_valid_encoding(line: &[u8]) -> bool {
    let Ok(text) = std::str::from_utf8(line) else {
        return false;
    };
    if text.is_empty() {
        return false;
    }
    KeyPair::from_seed(text).is_ok() || KeyPair::from_public_key(text).is_ok()
}
