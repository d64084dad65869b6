//! GC Timer - Timing Utilities
//!
//! Measures collection pauses with the monotonic clock.

use std::time::{Duration, Instant};

/// GcTimer - timer for measuring GC operations
#[derive(Debug, Clone, Copy)]
pub struct GcTimer {
    start: Instant,
}

impl GcTimer {
    /// Create new timer
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Get elapsed time
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

impl Default for GcTimer {
    fn default() -> Self {
        Self::new()
    }
}
