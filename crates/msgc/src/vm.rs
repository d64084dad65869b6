//! VM Module - Root-holding facade over the heap
//!
//! `Vm` pairs a `Heap` with the operand stack that roots it, and exposes
//! object construction as direct API calls:
//!
//! - `push_int` allocates a scalar and pushes it
//! - `push_pair` pops tail then head, builds a pair, pushes it
//! - `pop` drops a root, making its object collectible
//!
//! Dropping the VM clears the stack and runs a final collection, so every
//! object is reclaimed. Teardown is attempted once: after `destroy`, even a
//! failed one, `Drop` does nothing.

use crate::config::GcConfig;
use crate::error::{GcError, Result};
use crate::gc::{self, CollectionReport, GcReason};
use crate::heap::Heap;
use crate::marker::RootStack;
use crate::object::{ObjectId, ObjectValue};
use crate::stats::GcStats;

/// Vm - heap plus root stack
///
/// # Examples
///
/// ```rust
/// use msgc::Vm;
///
/// # fn main() -> msgc::Result<()> {
/// let mut vm = Vm::default();
/// vm.push_int(1)?;
/// vm.push_int(2)?;
/// vm.push_pair()?;
///
/// vm.gc()?;
/// assert_eq!(vm.num_objects(), 3);
///
/// vm.pop()?;
/// vm.gc()?;
/// assert_eq!(vm.num_objects(), 0);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Vm {
    heap: Heap,
    stack: RootStack,
    /// Final collection already attempted
    torn_down: bool,
}

impl Vm {
    /// Create VM with the given configuration
    ///
    /// # Errors
    /// `Configuration` if `config` fails validation.
    pub fn new(config: GcConfig) -> Result<Self> {
        let stack = RootStack::new(config.stack_max);
        let heap = Heap::new(config)?;
        Ok(Self {
            heap,
            stack,
            torn_down: false,
        })
    }

    /// Push an existing object as a root
    ///
    /// # Errors
    /// - `InvalidHandle` if `id` is not live
    /// - `StackOverflow` if the stack is full
    pub fn push(&mut self, id: ObjectId) -> Result<()> {
        self.heap.ensure_live(id)?;
        self.stack.push(id)
    }

    /// Pop the top root
    ///
    /// # Errors
    /// `StackUnderflow` if the stack is empty.
    pub fn pop(&mut self) -> Result<ObjectId> {
        self.stack.pop()
    }

    /// Look at a root without popping; 0 is the top
    pub fn peek(&self, distance: usize) -> Result<ObjectId> {
        self.stack.peek(distance)
    }

    /// Allocate a scalar and push it
    ///
    /// # Errors
    /// - `StackOverflow` if the stack is full (checked before allocating)
    /// - `AllocationFailure` if the heap cannot take another object
    pub fn push_int(&mut self, value: i32) -> Result<ObjectId> {
        self.ensure_stack_room()?;
        let id = self
            .heap
            .allocate_with_roots(ObjectValue::Scalar(value), self.stack.as_slice())?;
        self.stack.push(id)?;
        Ok(id)
    }

    /// Pop tail then head, allocate a pair of them, push it
    ///
    /// Both operands stay rooted while the allocation (and any collection
    /// it triggers) runs.
    ///
    /// # Errors
    /// `StackUnderflow` if fewer than two roots are present; nothing is
    /// allocated or popped in that case.
    pub fn push_pair(&mut self) -> Result<ObjectId> {
        self.stack.require(2)?;
        let tail = self.stack.peek(0)?;
        let head = self.stack.peek(1)?;

        let id = self
            .heap
            .allocate_with_roots(ObjectValue::Pair { head, tail }, self.stack.as_slice())?;

        self.stack.pop()?;
        self.stack.pop()?;
        self.stack.push(id)?;
        Ok(id)
    }

    /// Point a pair's head at `value`
    pub fn set_head(&mut self, pair: ObjectId, value: ObjectId) -> Result<()> {
        self.heap.set_head(pair, value)
    }

    /// Point a pair's tail at `value`
    pub fn set_tail(&mut self, pair: ObjectId, value: ObjectId) -> Result<()> {
        self.heap.set_tail(pair, value)
    }

    /// Force a collection cycle regardless of the threshold
    pub fn gc(&mut self) -> Result<CollectionReport> {
        gc::collect(&mut self.heap, &self.stack, GcReason::Explicit)
    }

    /// Drop all roots and reclaim every object
    pub fn destroy(mut self) -> Result<CollectionReport> {
        self.shutdown()
    }

    fn shutdown(&mut self) -> Result<CollectionReport> {
        self.torn_down = true;
        self.stack.clear();
        self.heap.release_all()
    }

    fn ensure_stack_room(&self) -> Result<()> {
        if self.stack.len() >= self.stack.capacity() {
            return Err(GcError::StackOverflow {
                capacity: self.stack.capacity(),
            });
        }
        Ok(())
    }

    // === Accessors ===

    /// Live objects on the heap
    pub fn num_objects(&self) -> usize {
        self.heap.live_count()
    }

    /// Current collection threshold
    pub fn threshold(&self) -> usize {
        self.heap.threshold()
    }

    pub fn stack_len(&self) -> usize {
        self.stack.len()
    }

    /// Roots from bottom to top
    pub fn roots(&self) -> &[ObjectId] {
        self.stack.as_slice()
    }

    pub fn heap(&self) -> &Heap {
        &self.heap
    }

    pub fn stats(&self) -> &GcStats {
        self.heap.stats()
    }
}

impl Default for Vm {
    /// VM with the default configuration (threshold 10, 256 roots)
    fn default() -> Self {
        let config = GcConfig::default();
        Self {
            stack: RootStack::new(config.stack_max),
            heap: Heap::new(config).unwrap_or_else(|e| unreachable!("default config invalid: {}", e)),
            torn_down: false,
        }
    }
}

impl Drop for Vm {
    fn drop(&mut self) {
        if self.torn_down || self.heap.is_empty() {
            return;
        }
        if let Err(e) = self.shutdown() {
            log::error!("final collection failed: {}", e);
        }
    }
}
