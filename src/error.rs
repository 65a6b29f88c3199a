//! Error type shared by every fatal path of the tool.

use std::io;
use std::path::PathBuf;

use crate::config::ConfigError;

/// Errors returned by key generation, vanity search, key reading and
/// signing. Each one terminates the current invocation.
#[derive(Debug, thiserror::Error)]
pub enum NkError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Can not generate base32 encoded strings to match '{0}'")]
    UnencodablePrefix(String),

    #[error("Error reading entropy from {source_name}: {error}")]
    Entropy {
        source_name: String,
        #[source]
        error: io::Error,
    },

    #[error("Failed to generate prefix after {attempts} attempts")]
    Exhausted { attempts: u64 },

    #[error("Could not find a valid key")]
    KeyNotFound,

    #[error("{0}")]
    Key(#[from] nkeys::error::Error),

    #[error("Invalid signature encoding: {0}")]
    SignatureEncoding(#[from] base64::DecodeError),

    #[error("Failed to read {}: {error}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        error: io::Error,
    },

    #[error("Failed to start vanity worker: {0}")]
    Spawn(#[source] io::Error),

    #[error("All vanity workers exited before the search finished")]
    WorkersGone,

    #[error("Interrupted")]
    Interrupted,
}

pub type Result<T> = std::result::Result<T, NkError>;
