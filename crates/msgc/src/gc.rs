//! GC Core Module - Garbage Collection Cycle Management
//!
//! Implements one stop-the-world collection cycle:
//!
//! 1. **Mark** - tag the reachability closure of the roots
//! 2. **Sweep** - reclaim untagged objects, untag survivors
//! 3. **Resize** - `threshold = survivors * growth_factor`
//!
//! The collector keeps no state of its own between cycles; everything it
//! needs lives in the `Heap`. An empty sweep yields threshold 0, so the
//! very next allocation runs another (cheap) collection first.

use crate::error::Result;
use crate::heap::Heap;
use crate::logging::{self, GcEvent};
use crate::marker::{Marker, RootStack};
use crate::object::ObjectId;
use crate::stats::GcTimer;
use crate::sweeper;
use std::fmt;
use std::time::Duration;

/// GC cycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GcState {
    /// Idle - no GC in progress
    Idle,
    /// Marking phase - tagging live objects
    Marking,
    /// Sweeping phase - reclaiming dead objects
    Sweeping,
}

/// Reason for GC trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GcReason {
    /// Live count reached the threshold on allocation
    Threshold { live: usize, threshold: usize },
    /// Live count reached `max_objects` on allocation
    Capacity { live: usize, max_objects: usize },
    /// Explicit GC request (user call)
    Explicit,
    /// Teardown - final collection with no roots
    Shutdown,
}

impl fmt::Display for GcReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GcReason::Threshold { live, threshold } => {
                write!(f, "threshold ({}/{})", live, threshold)
            }
            GcReason::Capacity { live, max_objects } => {
                write!(f, "capacity ({}/{})", live, max_objects)
            }
            GcReason::Explicit => f.write_str("explicit"),
            GcReason::Shutdown => f.write_str("shutdown"),
        }
    }
}

/// Outcome of one collection cycle
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionReport {
    /// Cycle number, starting at 1
    pub cycle: u64,
    /// What triggered the cycle
    pub reason: GcReason,
    /// Live count before marking
    pub live_before: usize,
    /// Objects tagged reachable
    pub marked: usize,
    /// Objects reclaimed by the sweep
    pub reclaimed: usize,
    /// Live count after the sweep
    pub live_after: usize,
    /// Threshold in force before the cycle
    pub old_threshold: usize,
    /// Threshold computed from the survivors
    pub new_threshold: usize,
    /// Peak mark worklist depth
    pub max_mark_depth: usize,
    /// Pause length
    pub duration: Duration,
}

/// Run a full collection against a root stack
pub fn collect(heap: &mut Heap, roots: &RootStack, reason: GcReason) -> Result<CollectionReport> {
    collect_from(heap, roots.iter().copied(), reason)
}

/// Run a full collection against any root source
///
/// On error every mark bit is cleared and the threshold and cycle count
/// are unchanged. A mark-phase error sweeps nothing; a sweep-phase error
/// keeps whatever the sweep had already reclaimed.
pub fn collect_from<I>(heap: &mut Heap, roots: I, reason: GcReason) -> Result<CollectionReport>
where
    I: IntoIterator<Item = ObjectId>,
{
    let timer = GcTimer::new();
    let cycle = heap.cycle_count + 1;
    let live_before = heap.live_count;
    let old_threshold = heap.threshold;

    log::debug!(
        "[GC] Cycle {} started (reason: {}, live: {})",
        cycle,
        reason,
        live_before
    );
    if heap.config.verbose {
        logging::log_event(GcEvent::CycleStart {
            cycle,
            reason: reason.to_string(),
            live: live_before,
        });
    }

    // Phase 1: Marking
    heap.state = GcState::Marking;
    let mut marker = Marker::new();
    if let Err(e) = marker.mark_roots(heap, roots) {
        heap.clear_marks();
        heap.state = GcState::Idle;
        log::error!("[GC] Cycle {} aborted during marking: {}", cycle, e);
        return Err(e);
    }
    let mark_stats = marker.stats();

    // Phase 2: Sweeping
    heap.state = GcState::Sweeping;
    let sweep_stats = match sweeper::sweep(heap) {
        Ok(stats) => stats,
        Err(e) => {
            heap.clear_marks();
            heap.state = GcState::Idle;
            log::error!("[GC] Cycle {} aborted during sweep: {}", cycle, e);
            return Err(e);
        }
    };

    // Phase 3: Threshold
    let new_threshold = heap.live_count.saturating_mul(heap.config.growth_factor);
    heap.threshold = new_threshold;
    heap.state = GcState::Idle;
    heap.cycle_count = cycle;

    let report = CollectionReport {
        cycle,
        reason,
        live_before,
        marked: mark_stats.marked,
        reclaimed: sweep_stats.swept,
        live_after: heap.live_count,
        old_threshold,
        new_threshold,
        max_mark_depth: mark_stats.max_depth,
        duration: timer.elapsed(),
    };

    finalize_gc_cycle(heap, &report);
    Ok(report)
}

/// Record statistics and log completion
fn finalize_gc_cycle(heap: &mut Heap, report: &CollectionReport) {
    if heap.config.stats_enabled {
        heap.stats.record_collection(report);
    }

    log::debug!(
        "[GC] Cycle {} complete in {:.3}ms: marked {}, reclaimed {}, live {}, threshold {} -> {}",
        report.cycle,
        report.duration.as_secs_f64() * 1000.0,
        report.marked,
        report.reclaimed,
        report.live_after,
        report.old_threshold,
        report.new_threshold
    );

    if heap.config.verbose {
        logging::log_event(GcEvent::CycleEnd {
            cycle: report.cycle,
            duration_ms: report.duration.as_secs_f64() * 1000.0,
            reclaimed: report.reclaimed,
            live: report.live_after,
        });
        if report.old_threshold != report.new_threshold {
            logging::log_event(GcEvent::ThresholdAdjusted {
                cycle: report.cycle,
                old_value: report.old_threshold,
                new_value: report.new_threshold,
            });
        }
    }
}
