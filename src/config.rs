//! Command-line configuration and mode selection.

use std::path::PathBuf;

use clap::Parser;

use crate::crypto::{EntropySource, KeyType};

/// Default vanity attempt budget.
pub const DEFAULT_MAX_ATTEMPTS: u64 = 10_000_000;

/// NATS nkey tool: generate keys, search vanity public keys, sign and verify
#[derive(Parser, Debug, Clone)]
#[command(name = "nk", author, version, about, long_about = None)]
pub struct Config {
    /// Generate a key for <TYPE>: user, account, server, cluster or operator
    #[arg(long = "gen", value_name = "TYPE")]
    pub key_type: Option<KeyType>,

    /// Output the public key
    #[arg(long)]
    pub pubout: bool,

    /// Attempt to generate a public key with this prefix, e.g. --gen user --pre derek
    #[arg(long = "pre", value_name = "PREFIX")]
    pub vanity: Option<String>,

    /// Maximum attempts at generating the vanity prefix
    #[arg(long = "maxpre", value_name = "N", default_value_t = DEFAULT_MAX_ATTEMPTS)]
    pub max_attempts: u64,

    /// Entropy file to read raw seeds from, e.g. /dev/urandom
    #[arg(short = 'e', long, value_name = "FILE")]
    pub entropy: Option<PathBuf>,

    /// Input key file (seed/private key)
    #[arg(long, value_name = "FILE")]
    pub inkey: Option<PathBuf>,

    /// Input public key file
    #[arg(long, value_name = "FILE")]
    pub pubin: Option<PathBuf>,

    /// Sign <FILE> with --inkey <key>
    #[arg(long, value_name = "FILE")]
    pub sign: Option<PathBuf>,

    /// Verify <FILE> with --inkey <key> or --pubin <public> and --sig <file>
    #[arg(long, value_name = "FILE")]
    pub verify: Option<PathBuf>,

    /// File holding a base64 signature
    #[arg(long, value_name = "FILE")]
    pub sig: Option<PathBuf>,

    /// Number of vanity search workers (default: number of CPU cores)
    #[arg(short = 'w', long)]
    pub workers: Option<usize>,

    /// Do not draw the progress spinner
    #[arg(short = 'q', long)]
    pub quiet: bool,
}

/// What a single invocation does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Generate {
        key_type: KeyType,
        vanity: Option<String>,
    },
    Sign {
        content: PathBuf,
        inkey: PathBuf,
    },
    Verify {
        content: PathBuf,
        key: KeySource,
        sig: PathBuf,
    },
    ShowPublic {
        inkey: PathBuf,
    },
}

/// Where a verifying key is loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeySource {
    Seed(PathBuf),
    Public(PathBuf),
}

impl Config {
    /// Returns the number of workers, defaulting to CPU count.
    pub fn worker_count(&self) -> usize {
        self.workers.unwrap_or_else(num_cpus::get)
    }

    /// Returns the entropy source for key generation.
    pub fn entropy_source(&self) -> EntropySource {
        match &self.entropy {
            Some(path) => EntropySource::File(path.clone()),
            None => EntropySource::System,
        }
    }

    /// Validates the configuration and picks the mode to run.
    pub fn mode(&self) -> Result<Mode, ConfigError> {
        if self.workers == Some(0) {
            return Err(ConfigError::NoWorkers);
        }

        if let Some(key_type) = self.key_type {
            let vanity = self.vanity.clone().filter(|v| !v.is_empty());
            return Ok(Mode::Generate { key_type, vanity });
        }

        if self.entropy.is_some() {
            return Err(ConfigError::EntropyWithoutGen);
        }

        if let Some(content) = &self.sign {
            let inkey = self.inkey.clone().ok_or(ConfigError::SignNeedsSeed)?;
            return Ok(Mode::Sign {
                content: content.clone(),
                inkey,
            });
        }

        if let Some(content) = &self.verify {
            let key = match (&self.inkey, &self.pubin) {
                (Some(seed), _) => KeySource::Seed(seed.clone()),
                (None, Some(public)) => KeySource::Public(public.clone()),
                (None, None) => return Err(ConfigError::VerifyNeedsKey),
            };
            let sig = self.sig.clone().ok_or(ConfigError::VerifyNeedsSignature)?;
            return Ok(Mode::Verify {
                content: content.clone(),
                key,
                sig,
            });
        }

        if let (Some(inkey), true) = (&self.inkey, self.pubout) {
            return Ok(Mode::ShowPublic {
                inkey: inkey.clone(),
            });
        }

        Err(ConfigError::Usage)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Entropy file only used when creating keys with --gen")]
    EntropyWithoutGen,

    #[error("Sign requires a seed/private key via --inkey <file>")]
    SignNeedsSeed,

    #[error("Verify requires a seed key via --inkey or a public key via --pubin")]
    VerifyNeedsKey,

    #[error("Verify requires a signature via --sig <file>")]
    VerifyNeedsSignature,

    #[error("Worker count must be at least 1")]
    NoWorkers,

    #[error(
        "Usage: nk [--gen type] [--sign file] [--verify file] [--inkey key] [--pubin publickey] \
         [--sig signature] [--pubout] [-e entropy] [--pre vanity] [--maxpre N]"
    )]
    Usage,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Config {
        Config::try_parse_from(std::iter::once("nk").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_generate_mode() {
        let config = parse(&["--gen", "User", "--pre", "derek"]);
        assert_eq!(
            config.mode().unwrap(),
            Mode::Generate {
                key_type: KeyType::User,
                vanity: Some("derek".into()),
            }
        );
        assert_eq!(config.max_attempts, DEFAULT_MAX_ATTEMPTS);
    }

    #[test]
    fn test_empty_vanity_is_plain_generation() {
        let config = parse(&["--gen", "account", "--pre", ""]);
        assert_eq!(
            config.mode().unwrap(),
            Mode::Generate {
                key_type: KeyType::Account,
                vanity: None,
            }
        );
    }

    #[test]
    fn test_unknown_key_type_rejected_by_parser() {
        let args = ["nk", "--gen", "wizard"];
        assert!(Config::try_parse_from(args).is_err());
    }

    #[test]
    fn test_entropy_requires_gen() {
        let config = parse(&["-e", "/dev/urandom", "--inkey", "k", "--pubout"]);
        assert!(matches!(config.mode(), Err(ConfigError::EntropyWithoutGen)));
        assert_eq!(
            config.entropy_source(),
            EntropySource::File("/dev/urandom".into())
        );
    }

    #[test]
    fn test_sign_requires_inkey() {
        let config = parse(&["--sign", "data"]);
        assert!(matches!(config.mode(), Err(ConfigError::SignNeedsSeed)));
    }

    #[test]
    fn test_verify_requirements() {
        let config = parse(&["--verify", "data", "--sig", "s"]);
        assert!(matches!(config.mode(), Err(ConfigError::VerifyNeedsKey)));

        let config = parse(&["--verify", "data", "--pubin", "p"]);
        assert!(matches!(
            config.mode(),
            Err(ConfigError::VerifyNeedsSignature)
        ));

        let config = parse(&["--verify", "data", "--pubin", "p", "--sig", "s"]);
        assert_eq!(
            config.mode().unwrap(),
            Mode::Verify {
                content: "data".into(),
                key: KeySource::Public("p".into()),
                sig: "s".into(),
            }
        );
    }

    #[test]
    fn test_show_public_needs_pubout() {
        let config = parse(&["--inkey", "k"]);
        assert!(matches!(config.mode(), Err(ConfigError::Usage)));

        let config = parse(&["--inkey", "k", "--pubout"]);
        assert_eq!(
            config.mode().unwrap(),
            Mode::ShowPublic { inkey: "k".into() }
        );
    }

    #[test]
    fn test_zero_workers_rejected() {
        let config = parse(&["--gen", "user", "-w", "0"]);
        assert!(matches!(config.mode(), Err(ConfigError::NoWorkers)));
    }
}
