//! Vanity search dispatcher and worker pool management.

use std::mem;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crossbeam_channel::{bounded, select, Receiver, RecvError, Sender};
use tracing::{debug, info, warn};

use crate::crypto::{EntropySource, KeyType, Keypair};
use crate::error::{NkError, Result};
use crate::matcher::Prefix;

use super::cpu::{CpuWorker, Found, WorkerStats};
use super::progress::Spinner;

/// One vanity search request.
#[derive(Debug, Clone)]
pub struct SearchJob {
    /// Type of key to generate
    pub key_type: KeyType,
    /// Prefix wanted right after the type character
    pub prefix: Prefix,
    /// Seed bytes for each attempt
    pub entropy: EntropySource,
    /// Upper bound on generation attempts
    pub max_attempts: u64,
}

impl SearchJob {
    /// Builds a job, rejecting prefixes outside the base32 alphabet.
    pub fn new(
        key_type: KeyType,
        prefix: &str,
        entropy: EntropySource,
        max_attempts: u64,
    ) -> Result<Self> {
        Ok(Self {
            key_type,
            prefix: Prefix::new(prefix)?,
            entropy,
            max_attempts,
        })
    }
}

/// Result of a successful vanity search.
#[derive(Debug)]
pub struct VanityResult {
    /// The matching keypair
    pub keypair: Keypair,
    /// The ID of the worker that found it
    pub worker_id: usize,
    /// Work tokens handed out before the match was collected
    pub dispatched: u64,
}

/// Runs a bounded vanity search over a pool of worker threads.
///
/// Each work token sent to the pool is exactly one generation attempt, and
/// at most `max_attempts` tokens are sent whatever the worker count.
pub struct VanitySearch {
    /// Number of workers
    num_workers: usize,
    /// The job being searched for
    job: Arc<SearchJob>,
    /// Shared stop flag
    stop_flag: Arc<AtomicBool>,
    /// Shared statistics
    stats: Arc<WorkerStats>,
    /// Draw the spinner on stderr
    progress: bool,
}

impl VanitySearch {
    /// Creates a search using one worker per logical CPU.
    pub fn new(job: SearchJob) -> Self {
        Self {
            num_workers: num_cpus::get(),
            job: Arc::new(job),
            stop_flag: Arc::new(AtomicBool::new(false)),
            stats: Arc::new(WorkerStats::new()),
            progress: true,
        }
    }

    /// Overrides the worker count (at least one).
    pub fn with_workers(mut self, num_workers: usize) -> Self {
        self.num_workers = num_workers.max(1);
        self
    }

    /// Enables or disables the progress spinner.
    pub fn with_progress(mut self, enabled: bool) -> Self {
        self.progress = enabled;
        self
    }

    /// Runs the search until a match, exhaustion or interruption.
    pub fn run(&self) -> Result<VanityResult> {
        let job = &self.job;
        if !job.prefix.is_reachable() {
            warn!(
                prefix = %job.prefix,
                "no {} key can start with this prefix; the search will exhaust its budget",
                job.key_type
            );
        }
        debug!(
            workers = self.num_workers,
            prefix = %job.prefix,
            max_attempts = job.max_attempts,
            difficulty = job.prefix.estimated_difficulty(),
            "starting vanity search"
        );

        let pool = Pool::spawn(self.num_workers, job.clone(), self.stats.clone())?;
        let mut spinner = Spinner::new(self.progress);

        for attempt in 0..job.max_attempts {
            if self.is_stopped() {
                return Err(NkError::Interrupted);
            }
            spinner.tick(attempt);

            // A worker holding a match must be able to hand it over even
            // while no idle worker is left to take the next token.
            select! {
                send(pool.work_tx, ()) -> sent => {
                    if sent.is_err() {
                        return Err(NkError::WorkersGone);
                    }
                }
                recv(pool.found_rx) -> found => return self.collect(found, attempt),
            }

            if let Ok(found) = pool.found_rx.try_recv() {
                return self.collect(Ok(found), attempt + 1);
            }
        }

        Err(NkError::Exhausted {
            attempts: job.max_attempts,
        })
    }

    fn collect(
        &self,
        found: std::result::Result<Found, RecvError>,
        dispatched: u64,
    ) -> Result<VanityResult> {
        let found = found.map_err(|_| NkError::WorkersGone)?;
        let keypair = found.outcome?;
        info!(
            worker = found.worker_id,
            dispatched,
            public_key = %keypair.public_key(),
            "vanity key found"
        );
        Ok(VanityResult {
            keypair,
            worker_id: found.worker_id,
            dispatched,
        })
    }

    /// Returns the number of workers.
    pub fn num_workers(&self) -> usize {
        self.num_workers
    }

    /// Returns the job being searched for.
    pub fn job(&self) -> &SearchJob {
        &self.job
    }

    /// Returns the generation attempts performed so far.
    ///
    /// Final once [`run`](Self::run) has returned.
    pub fn attempts(&self) -> u64 {
        self.stats.total_attempts()
    }

    /// Returns the matches found so far.
    pub fn total_matches(&self) -> u64 {
        self.stats.total_matches()
    }

    /// Returns a clone of the stop flag for external use (e.g., signal handlers).
    pub fn stop_flag_clone(&self) -> Arc<AtomicBool> {
        self.stop_flag.clone()
    }

    /// Returns true if the search has been signaled to stop.
    pub fn is_stopped(&self) -> bool {
        self.stop_flag.load(Ordering::Relaxed)
    }
}

/// Worker threads plus the dispatcher's ends of both hand-off channels.
///
/// Dropping the pool closes the work channel, releases workers blocked on
/// handing over a result, and joins every thread.
struct Pool {
    work_tx: Sender<()>,
    found_rx: Receiver<Found>,
    handles: Vec<JoinHandle<()>>,
}

impl Pool {
    fn spawn(num_workers: usize, job: Arc<SearchJob>, stats: Arc<WorkerStats>) -> Result<Self> {
        // Zero capacity: a send completes only when a worker takes it.
        let (work_tx, work_rx) = bounded(0);
        let (found_tx, found_rx) = bounded(0);

        let mut pool = Self {
            work_tx,
            found_rx,
            handles: Vec::with_capacity(num_workers),
        };

        for id in 0..num_workers {
            let worker = CpuWorker::new(
                id,
                job.clone(),
                work_rx.clone(),
                found_tx.clone(),
                stats.clone(),
            );
            let handle = thread::Builder::new()
                .name(format!("nk-vanity-{}", id))
                .spawn(move || worker.run())
                .map_err(NkError::Spawn)?;
            pool.handles.push(handle);
        }

        Ok(pool)
    }
}

impl Drop for Pool {
    fn drop(&mut self) {
        // Swap in detached endpoints so the real channels close before joining.
        let (detached_tx, _) = bounded(0);
        drop(mem::replace(&mut self.work_tx, detached_tx));
        drop(mem::replace(
            &mut self.found_rx,
            crossbeam_channel::never(),
        ));

        for handle in self.handles.drain(..) {
            let _ = handle.join();
        }
        debug!("vanity workers stopped");
    }
}
