//! Entropy for key generation.

use std::fs::File;
use std::io::{self, Read};
use std::path::PathBuf;

use rand::rngs::OsRng;
use rand::RngCore;
use zeroize::Zeroizing;

use crate::error::{NkError, Result};

/// Number of raw seed bytes consumed per generated keypair.
pub const RAW_SEED_LEN: usize = 32;

/// Where raw seed bytes come from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EntropySource {
    /// The operating system's CSPRNG.
    #[default]
    System,
    /// The first 32 bytes of a file, re-opened on every read
    /// (e.g. `/dev/urandom`).
    File(PathBuf),
}

impl EntropySource {
    /// Reads exactly 32 bytes.
    pub fn read_seed(&self) -> Result<Zeroizing<[u8; RAW_SEED_LEN]>> {
        let mut raw = Zeroizing::new([0u8; RAW_SEED_LEN]);
        match self {
            EntropySource::System => OsRng
                .try_fill_bytes(&mut raw[..])
                .map_err(|e| NkError::Entropy {
                    source_name: "system random source".into(),
                    error: io::Error::new(io::ErrorKind::Other, e.to_string()),
                })?,
            EntropySource::File(path) => File::open(path)
                .and_then(|mut f| f.read_exact(&mut raw[..]))
                .map_err(|error| NkError::Entropy {
                    source_name: path.display().to_string(),
                    error,
                })?,
        }
        Ok(raw)
    }
}
