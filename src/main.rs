//! nk command-line tool
//!
//! Usage:
//!   nk --gen user --pubout               # Generate a user key, print seed and public key
//!   nk --gen account --pre derek         # Search for a public key starting with "ADEREK"
//!   nk --sign data --inkey user.seed     # Print a base64 signature over a file
//!   nk --verify data --pubin user.pub --sig data.sig

use std::process;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use clap::Parser;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use nk::commands;
use nk::{Config, KeyType, Keypair, Mode, SearchJob, VanitySearch};

fn main() {
    let config = Config::parse();
    init_tracing();

    if let Err(e) = run(&config) {
        eprintln!("{}", e);
        process::exit(1);
    }
}

fn run(config: &Config) -> nk::Result<()> {
    match config.mode()? {
        Mode::Generate { key_type, vanity } => {
            let keypair = match &vanity {
                Some(prefix) => vanity_keypair(config, key_type, prefix)?,
                None => commands::generate(key_type, &config.entropy_source())?,
            };
            let seed = keypair.seed()?;
            println!("{}", seed.as_str());
            if config.pubout || vanity.is_some() {
                println!("{}", keypair.public_key());
            }
        }
        Mode::Sign { content, inkey } => {
            println!("{}", commands::sign_file(&content, &inkey)?);
        }
        Mode::Verify { content, key, sig } => {
            commands::verify_file(&content, &key, &sig)?;
            println!("Verified OK");
        }
        Mode::ShowPublic { inkey } => {
            println!("{}", commands::show_public_file(&inkey)?);
        }
    }
    Ok(())
}

fn vanity_keypair(config: &Config, key_type: KeyType, prefix: &str) -> nk::Result<Keypair> {
    let job = SearchJob::new(
        key_type,
        prefix,
        config.entropy_source(),
        config.max_attempts,
    )?;
    let search = VanitySearch::new(job)
        .with_workers(config.worker_count())
        .with_progress(!config.quiet);

    ctrlc_handler(search.stop_flag_clone());

    Ok(search.run()?.keypair)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn ctrlc_handler(stop_flag: Arc<AtomicBool>) {
    if let Err(e) = ctrlc::set_handler(move || {
        stop_flag.store(true, Ordering::Relaxed);
    }) {
        warn!("Ctrl-C handler not installed: {}", e);
    }
}
