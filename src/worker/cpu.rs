//! CPU worker performing one generation attempt per work token.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crossbeam_channel::{Receiver, Sender};
use tracing::{debug, trace};

use crate::crypto::Keypair;
use crate::error::Result;

use super::SearchJob;

/// Counters shared by all workers of one search.
#[derive(Debug, Default)]
pub struct WorkerStats {
    /// Generation attempts performed
    pub attempts: AtomicU64,
    /// Matches found
    pub matches_found: AtomicU64,
}

impl WorkerStats {
    /// Creates new worker stats.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the total generation attempts performed.
    pub fn total_attempts(&self) -> u64 {
        self.attempts.load(Ordering::Relaxed)
    }

    /// Returns the total matches found.
    pub fn total_matches(&self) -> u64 {
        self.matches_found.load(Ordering::Relaxed)
    }
}

/// What a retiring worker hands back to the dispatcher.
pub(crate) struct Found {
    pub worker_id: usize,
    pub outcome: Result<Keypair>,
}

/// A worker that generates and tests one keypair per received token.
pub(crate) struct CpuWorker {
    id: usize,
    job: Arc<SearchJob>,
    work_rx: Receiver<()>,
    found_tx: Sender<Found>,
    stats: Arc<WorkerStats>,
}

impl CpuWorker {
    pub(crate) fn new(
        id: usize,
        job: Arc<SearchJob>,
        work_rx: Receiver<()>,
        found_tx: Sender<Found>,
        stats: Arc<WorkerStats>,
    ) -> Self {
        Self {
            id,
            job,
            work_rx,
            found_tx,
            stats,
        }
    }

    /// Runs the worker loop.
    ///
    /// Performs exactly one attempt per token until:
    /// - A match is found (hands the keypair over and retires)
    /// - Generation fails (hands the error over and retires)
    /// - The work channel is closed
    pub(crate) fn run(self) {
        for () in self.work_rx.iter() {
            let outcome = Keypair::generate(self.job.key_type, &self.job.entropy);
            self.stats.attempts.fetch_add(1, Ordering::Relaxed);

            let outcome = match outcome {
                Ok(keypair) => {
                    if !self.job.prefix.matches(&keypair.public_key()).is_match() {
                        continue;
                    }
                    self.stats.matches_found.fetch_add(1, Ordering::Relaxed);
                    Ok(keypair)
                }
                Err(e) => Err(e),
            };

            trace!(worker = self.id, ok = outcome.is_ok(), "worker retiring");
            // The dispatcher may already be gone; nothing left to do then.
            let _ = self.found_tx.send(Found {
                worker_id: self.id,
                outcome,
            });
            return;
        }
        debug!(worker = self.id, "work channel closed");
    }
}
