//! Stats Module - GC Performance Monitoring
//!
//! Collects collector statistics for tuning and debugging.
//!
//! Metrics:
//! - Collection count, split by trigger reason
//! - Objects allocated and reclaimed
//! - Peak live count
//! - Pause time (last, max, total)

pub mod timer;

pub use timer::GcTimer;

use crate::gc::{CollectionReport, GcReason};
use serde::Serialize;
use std::time::Duration;

/// GcStats - statistics collector for one heap
#[derive(Debug, Clone, Default)]
pub struct GcStats {
    /// Total GC cycles
    total_cycles: u64,
    /// Cycles triggered by the allocation threshold
    threshold_cycles: u64,
    /// Cycles triggered by reaching `max_objects`
    capacity_cycles: u64,
    /// Explicitly requested cycles
    explicit_cycles: u64,
    /// Final teardown cycles
    shutdown_cycles: u64,
    /// Objects allocated over the heap's lifetime
    total_allocated: u64,
    /// Objects reclaimed over the heap's lifetime
    total_reclaimed: u64,
    /// Highest live count observed
    peak_live: usize,
    /// Most recent pause
    last_pause: Duration,
    /// Longest pause
    max_pause: Duration,
    /// Sum of all pauses
    total_pause: Duration,
}

impl GcStats {
    /// Create new stats collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one allocation; `live` is the live count after it
    pub fn record_allocation(&mut self, live: usize) {
        self.total_allocated += 1;
        self.peak_live = self.peak_live.max(live);
    }

    /// Record a finished collection
    pub fn record_collection(&mut self, report: &CollectionReport) {
        self.total_cycles += 1;

        match report.reason {
            GcReason::Threshold { .. } => self.threshold_cycles += 1,
            GcReason::Capacity { .. } => self.capacity_cycles += 1,
            GcReason::Explicit => self.explicit_cycles += 1,
            GcReason::Shutdown => self.shutdown_cycles += 1,
        }

        self.total_reclaimed += report.reclaimed as u64;
        self.last_pause = report.duration;
        self.max_pause = self.max_pause.max(report.duration);
        self.total_pause += report.duration;
    }

    pub fn total_cycles(&self) -> u64 {
        self.total_cycles
    }

    pub fn total_allocated(&self) -> u64 {
        self.total_allocated
    }

    pub fn total_reclaimed(&self) -> u64 {
        self.total_reclaimed
    }

    pub fn peak_live(&self) -> usize {
        self.peak_live
    }

    /// Get summary statistics
    pub fn summary(&self) -> GcSummary {
        let avg_pause_ms = if self.total_cycles == 0 {
            0.0
        } else {
            self.total_pause.as_secs_f64() * 1000.0 / self.total_cycles as f64
        };

        GcSummary {
            total_cycles: self.total_cycles,
            threshold_cycles: self.threshold_cycles,
            capacity_cycles: self.capacity_cycles,
            explicit_cycles: self.explicit_cycles,
            shutdown_cycles: self.shutdown_cycles,
            total_allocated: self.total_allocated,
            total_reclaimed: self.total_reclaimed,
            peak_live: self.peak_live,
            last_pause_ms: self.last_pause.as_secs_f64() * 1000.0,
            max_pause_ms: self.max_pause.as_secs_f64() * 1000.0,
            avg_pause_ms,
        }
    }

    /// Reset statistics
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Summary statistics
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct GcSummary {
    /// Total GC cycles
    pub total_cycles: u64,
    /// Threshold-triggered cycles
    pub threshold_cycles: u64,
    /// Capacity-triggered cycles
    pub capacity_cycles: u64,
    /// Explicit cycles
    pub explicit_cycles: u64,
    /// Shutdown cycles
    pub shutdown_cycles: u64,
    /// Objects allocated
    pub total_allocated: u64,
    /// Objects reclaimed
    pub total_reclaimed: u64,
    /// Peak live objects
    pub peak_live: usize,
    /// Last pause time (ms)
    pub last_pause_ms: f64,
    /// Max pause time (ms)
    pub max_pause_ms: f64,
    /// Average pause time (ms)
    pub avg_pause_ms: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(reason: GcReason, reclaimed: usize, micros: u64) -> CollectionReport {
        CollectionReport {
            cycle: 1,
            reason,
            live_before: reclaimed,
            marked: 0,
            reclaimed,
            live_after: 0,
            old_threshold: 10,
            new_threshold: 0,
            max_mark_depth: 0,
            duration: Duration::from_micros(micros),
        }
    }

    #[test]
    fn test_record_collection_by_reason() {
        let mut stats = GcStats::new();
        stats.record_collection(&report(GcReason::Explicit, 3, 10));
        stats.record_collection(&report(
            GcReason::Threshold {
                live: 10,
                threshold: 10,
            },
            2,
            30,
        ));

        let summary = stats.summary();
        assert_eq!(summary.total_cycles, 2);
        assert_eq!(summary.explicit_cycles, 1);
        assert_eq!(summary.threshold_cycles, 1);
        assert_eq!(summary.total_reclaimed, 5);
        assert!((summary.max_pause_ms - 0.03).abs() < 1e-9);
        assert!((summary.avg_pause_ms - 0.02).abs() < 1e-9);
    }

    #[test]
    fn test_peak_live() {
        let mut stats = GcStats::new();
        stats.record_allocation(1);
        stats.record_allocation(5);
        stats.record_allocation(3);
        assert_eq!(stats.peak_live(), 5);
        assert_eq!(stats.summary().total_allocated, 3);

        stats.reset();
        assert_eq!(stats.summary(), GcSummary::default());
    }
}
