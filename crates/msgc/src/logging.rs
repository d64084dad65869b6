//! GC Logging and Tracing
//!
//! Records collector events for performance analysis and debugging.
//! Events are forwarded to the `log` facade and kept in memory so tests
//! and tools can inspect them. The in-memory buffer is bounded; once it
//! holds `max_events` entries the oldest one is dropped for each new event.
//!
//! Log Levels:
//! - ERROR: Allocation failures
//! - INFO: Cycle completion
//! - DEBUG: Cycle start, threshold changes

use chrono::{DateTime, Local};
use parking_lot::Mutex;
use serde::Serialize;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};

/// Log level for GC operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Error = 0,
    Warn = 1,
    Info = 2,
    Debug = 3,
    Trace = 4,
}

impl From<LogLevel> for log::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => log::Level::Error,
            LogLevel::Warn => log::Level::Warn,
            LogLevel::Info => log::Level::Info,
            LogLevel::Debug => log::Level::Debug,
            LogLevel::Trace => log::Level::Trace,
        }
    }
}

/// Default bound of the in-memory event buffer
pub const DEFAULT_MAX_EVENTS: usize = 1024;

/// GC event types
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GcEvent {
    /// GC cycle started
    CycleStart {
        cycle: u64,
        reason: String,
        live: usize,
    },

    /// GC cycle completed
    CycleEnd {
        cycle: u64,
        duration_ms: f64,
        reclaimed: usize,
        live: usize,
    },

    /// Collection threshold recomputed
    ThresholdAdjusted {
        cycle: u64,
        old_value: usize,
        new_value: usize,
    },

    /// Allocation failure
    AllocationFailure { requested: usize, live: usize },
}

impl GcEvent {
    /// Get log level for event
    pub fn level(&self) -> LogLevel {
        match self {
            GcEvent::AllocationFailure { .. } => LogLevel::Error,
            GcEvent::CycleEnd { .. } => LogLevel::Info,
            GcEvent::CycleStart { .. } | GcEvent::ThresholdAdjusted { .. } => LogLevel::Debug,
        }
    }
}

/// GC Logger configuration
#[derive(Debug, Clone)]
pub struct GcLoggerConfig {
    /// Minimum log level
    pub level: LogLevel,

    /// Render events as JSON instead of text
    pub json: bool,

    /// Prefix rendered events with a local timestamp
    pub timestamps: bool,

    /// Events kept in memory; 0 keeps none
    ///
    /// Default: `DEFAULT_MAX_EVENTS`
    pub max_events: usize,
}

impl Default for GcLoggerConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            json: false,
            timestamps: true,
            max_events: DEFAULT_MAX_EVENTS,
        }
    }
}

/// GC Logger - centralized logging for GC operations
pub struct GcLogger {
    config: GcLoggerConfig,
    events: Mutex<VecDeque<(DateTime<Local>, GcEvent)>>,
    enabled: AtomicBool,
}

impl GcLogger {
    /// Create new GC logger
    pub fn new(config: GcLoggerConfig) -> Self {
        Self {
            config,
            events: Mutex::new(VecDeque::new()),
            enabled: AtomicBool::new(true),
        }
    }

    /// Enable logging
    pub fn enable(&self) {
        self.enabled.store(true, Ordering::Relaxed);
    }

    /// Disable logging
    pub fn disable(&self) {
        self.enabled.store(false, Ordering::Relaxed);
    }

    /// Check if logging is enabled
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }

    /// Log a GC event
    pub fn log(&self, event: GcEvent) {
        if !self.is_enabled() {
            return;
        }

        let level = event.level();
        if level > self.config.level {
            return;
        }

        let timestamp = Local::now();
        let line = self.render(&timestamp, &event);
        log::log!(target: "msgc::gc", log::Level::from(level), "{}", line);
        self.record(timestamp, event);
    }

    fn record(&self, timestamp: DateTime<Local>, event: GcEvent) {
        let max_events = self.config.max_events;
        if max_events == 0 {
            return;
        }
        let mut events = self.events.lock();
        while events.len() >= max_events {
            events.pop_front();
        }
        events.push_back((timestamp, event));
    }

    /// Render an event as one line
    pub fn render(&self, timestamp: &DateTime<Local>, event: &GcEvent) -> String {
        let body = if self.config.json {
            render_json(event)
        } else {
            render_human(event)
        };

        if self.config.timestamps {
            format!("[{}] {}", timestamp.format("%Y-%m-%d %H:%M:%S%.3f"), body)
        } else {
            body
        }
    }

    /// Get all buffered events, oldest first
    pub fn get_events(&self) -> Vec<(DateTime<Local>, GcEvent)> {
        self.events.lock().iter().cloned().collect()
    }

    /// Get event count
    pub fn event_count(&self) -> usize {
        self.events.lock().len()
    }
}

impl Default for GcLogger {
    fn default() -> Self {
        Self::new(GcLoggerConfig::default())
    }
}

fn render_human(event: &GcEvent) -> String {
    match event {
        GcEvent::CycleStart {
            cycle,
            reason,
            live,
        } => format!(
            "[GC] Cycle {} started (reason: {}, {} live objects)",
            cycle, reason, live
        ),
        GcEvent::CycleEnd {
            cycle,
            duration_ms,
            reclaimed,
            live,
        } => format!(
            "[GC] Cycle {} completed ({:.3}ms, reclaimed {} objects, {} live)",
            cycle, duration_ms, reclaimed, live
        ),
        GcEvent::ThresholdAdjusted {
            cycle,
            old_value,
            new_value,
        } => format!(
            "[GC] Cycle {}: threshold changed from {} to {}",
            cycle, old_value, new_value
        ),
        GcEvent::AllocationFailure { requested, live } => format!(
            "[GC] Allocation failure: {} object(s) requested ({} live)",
            requested, live
        ),
    }
}

fn render_json(event: &GcEvent) -> String {
    serde_json::to_string(event).unwrap_or_else(|e| format!("{{\"error\":\"{}\"}}", e))
}

lazy_static::lazy_static! {
    static ref GLOBAL_LOGGER: Mutex<GcLogger> = Mutex::new(GcLogger::default());
}

/// Log a GC event to global logger
pub fn log_event(event: GcEvent) {
    GLOBAL_LOGGER.lock().log(event);
}

/// Get global logger event count
pub fn get_event_count() -> usize {
    GLOBAL_LOGGER.lock().event_count()
}

/// Snapshot of the events held by the global logger
pub fn get_events() -> Vec<GcEvent> {
    GLOBAL_LOGGER
        .lock()
        .get_events()
        .into_iter()
        .map(|(_, event)| event)
        .collect()
}
