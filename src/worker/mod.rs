//! Worker pool for parallel vanity key search.
//!
//! This module provides:
//! - A dispatcher handing out one work token per generation attempt
//! - Multi-threaded CPU workers fed through a zero-capacity channel
//! - Attempt accounting and a progress spinner

mod cpu;
mod pool;
mod progress;

pub use cpu::WorkerStats;
pub use pool::{SearchJob, VanityResult, VanitySearch};
pub use progress::Spinner;
