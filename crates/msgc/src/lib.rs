//! # MSGC - Minimal Tracing Mark-Sweep Garbage Collector
//!
//! MSGC manages a heap of small objects (integer scalars and two-field
//! pairs) for a stack-oriented interpreter. Reachability is decided by
//! tracing from a bounded operand stack; everything else is reclaimed.
//!
//! ## Overview
//!
//! - **Precise roots**: the only roots are the entries of the operand stack
//! - **Stop-the-world**: one collection runs mark then sweep to completion
//! - **Explicit worklist marking**: deep or cyclic graphs never recurse
//! - **Intrusive enumeration**: every object is threaded into one list the
//!   sweeper walks linearly
//! - **Adaptive trigger**: after each cycle the threshold becomes
//!   `survivors * growth_factor`
//!
//! ## Quick Start
//!
//! ```rust
//! use msgc::{GcConfig, Vm};
//!
//! fn main() -> Result<(), msgc::GcError> {
//!     let mut vm = Vm::new(GcConfig::default())?;
//!
//!     // Build (1 . 2) on the stack
//!     vm.push_int(1)?;
//!     vm.push_int(2)?;
//!     let pair = vm.push_pair()?;
//!     assert_eq!(vm.num_objects(), 3);
//!
//!     // Everything is reachable from the pair
//!     vm.gc()?;
//!     assert_eq!(vm.num_objects(), 3);
//!
//!     // Drop the only root and collect
//!     assert_eq!(vm.pop()?, pair);
//!     vm.gc()?;
//!     assert_eq!(vm.num_objects(), 0);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │                     Vm                        │
//! │  ┌─────────────┐        ┌──────────────────┐ │
//! │  │ RootStack   │ roots  │      Heap        │ │
//! │  │ (<= 256)    │───────►│ Arena + enum list│ │
//! │  └─────────────┘        └────────┬─────────┘ │
//! └──────────────────────────────────┼───────────┘
//!                                    │ live >= threshold
//!                                    ▼
//!                 ┌────────────────────────────────┐
//!                 │ gc::collect                    │
//!                 │  1. Marker (worklist)          │
//!                 │  2. sweeper::sweep (one pass)  │
//!                 │  3. threshold = live * factor  │
//!                 └────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`config`]: Collector parameters and validation
//! - [`error`]: Error type for all operations
//! - [`gc`]: Collection cycle orchestration
//! - [`heap`]: Object arena, enumeration and allocation trigger
//! - [`logging`]: Structured collector events
//! - [`marker`]: Root stack and worklist marking
//! - [`object`]: Object model and handles
//! - [`stats`]: Collection statistics
//! - [`sweeper`]: Reclamation pass
//! - [`vm`]: Root-holding facade
//!
//! ## Limitations
//!
//! - Single-threaded: a `Vm` is `Send` but not shared across threads
//! - Non-moving: handles stay valid until the object is reclaimed

// Core GC modules
pub mod config;
pub mod error;
pub mod gc;

// Object storage
pub mod heap;
pub mod object;

// GC algorithm components
pub mod marker;
pub mod sweeper;

// Monitoring
pub mod logging;
pub mod stats;

// Embedding surface
pub mod vm;

// Re-export main types for convenience
pub use config::{ConfigError, GcConfig};
pub use error::{GcError, Result};
pub use gc::{CollectionReport, GcReason, GcState};
pub use heap::Heap;
pub use marker::{MarkStats, RootStack};
pub use object::{Object, ObjectId, ObjectKind, ObjectValue};
pub use stats::{GcStats, GcSummary};
pub use sweeper::SweepStats;
pub use vm::Vm;

/// MSGC version string from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize a VM with default configuration
///
/// # Examples
///
/// ```rust
/// let mut vm = msgc::init()?;
/// vm.push_int(42)?;
/// assert_eq!(vm.num_objects(), 1);
/// # Ok::<(), msgc::GcError>(())
/// ```
pub fn init() -> Result<Vm> {
    Vm::new(GcConfig::default())
}

/// Initialize a VM with custom configuration
///
/// # Examples
///
/// ```rust
/// use msgc::GcConfig;
///
/// let config = GcConfig {
///     initial_threshold: 64,
///     stack_max: 1024,
///     ..Default::default()
/// };
///
/// let vm = msgc::init_with_config(config)?;
/// assert_eq!(vm.threshold(), 64);
/// # Ok::<(), msgc::GcError>(())
/// ```
pub fn init_with_config(config: GcConfig) -> Result<Vm> {
    Vm::new(config)
}
