//! Error Module - MSGC Error Types
//!
//! Defines all error types used in MSGC.
//!
//! # Error Categories
//!
//! ## Contract Violations (fatal)
//! - `StackOverflow` - Root stack capacity exceeded
//! - `StackUnderflow` - Pop or pair construction on a short root stack
//!
//! ## Resource Errors (fatal)
//! - `AllocationFailure` - Storage exhausted even after a collection
//!
//! ## Handle Errors
//! - `InvalidHandle` - Handle refers to a reclaimed or unknown slot
//! - `NotAPair` - Pair operation applied to a scalar
//!
//! ## Configuration / Internal
//! - `Configuration` - Invalid configuration
//! - `Internal` - Heap invariant violated

use crate::object::ObjectId;
use thiserror::Error;

/// Main error type for all MSGC operations
///
/// A failing operation leaves the heap and root stack exactly as they were
/// before the call. Whether a fatal error terminates the process is up to
/// the caller.
///
/// # Examples
///
/// ```rust
/// use msgc::{GcError, Vm};
///
/// let mut vm = Vm::default();
/// match vm.pop() {
///     Err(GcError::StackUnderflow { required, available }) => {
///         assert_eq!((required, available), (1, 0));
///     }
///     other => panic!("unexpected: {:?}", other),
/// }
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GcError {
    /// Root stack is full
    ///
    /// **When returned:** `push` on a stack already holding `capacity` roots
    #[error("Stack overflow: root stack capacity of {capacity} exceeded")]
    StackOverflow { capacity: usize },

    /// Root stack holds fewer entries than the operation consumes
    ///
    /// **When returned:** `pop` on an empty stack, `push_pair` with fewer
    /// than two roots
    #[error("Stack underflow: operation needs {required} roots, stack holds {available}")]
    StackUnderflow { required: usize, available: usize },

    /// Storage could not satisfy the request after a collection attempt
    ///
    /// **When returned:** heap at `max_objects` with everything still
    /// reachable, or the slot vector failed to grow
    #[error("Allocation failure: requested {requested} object(s) with {live} live")]
    AllocationFailure { requested: usize, live: usize },

    /// Handle does not name a live object
    ///
    /// **When returned:** lookup through a handle whose object was swept
    #[error("Invalid handle: {id} does not refer to a live object")]
    InvalidHandle { id: ObjectId },

    /// Operation needs a pair, found a scalar
    #[error("Object {id} is not a pair")]
    NotAPair { id: ObjectId },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error - indicates a bug in MSGC
    #[error("Internal error: {0}")]
    Internal(String),
}

impl GcError {
    /// Check if this error belongs to the fatal taxonomy
    ///
    /// Fatal errors are contract violations or resource exhaustion; nothing
    /// inside the collector retries them.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            GcError::StackOverflow { .. }
                | GcError::StackUnderflow { .. }
                | GcError::AllocationFailure { .. }
        )
    }

    /// Check if this error indicates a bug in the calling code or in MSGC
    pub fn is_bug(&self) -> bool {
        matches!(
            self,
            GcError::InvalidHandle { .. } | GcError::NotAPair { .. } | GcError::Internal(_)
        )
    }
}

/// Result type alias for MSGC operations
pub type Result<T> = std::result::Result<T, GcError>;

/// Ensure condition is true, otherwise return error
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $err:expr) => {
        if !$cond {
            return Err($err);
        }
    };
}
