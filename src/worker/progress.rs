//! Transient progress line on stderr.

use std::io::{self, Write};

const SPINNER: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

/// Rotating "computing" indicator. The line is erased when dropped.
pub struct Spinner {
    enabled: bool,
    drawn: bool,
}

impl Spinner {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            drawn: false,
        }
    }

    /// Redraws the indicator for attempt `n`.
    pub fn tick(&mut self, n: u64) {
        if !self.enabled {
            return;
        }
        let glyph = SPINNER[(n % SPINNER.len() as u64) as usize];
        let mut err = io::stderr().lock();
        let _ = write!(err, "\r\x1b[mcomputing\x1b[m {} ", glyph);
        let _ = err.flush();
        self.drawn = true;
    }

    /// Erases the indicator line.
    pub fn clear(&mut self) {
        if self.drawn {
            let _ = write!(io::stderr(), "\r\x1b[K");
            self.drawn = false;
        }
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        self.clear();
    }
}
