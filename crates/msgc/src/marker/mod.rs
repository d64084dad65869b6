//! Marker Module - Reachability Marking
//!
//! This module implements the mark phase: every object reachable from the
//! roots through `head`/`tail` edges gets its mark bit set.
//!
//! Marking Algorithm:
//! - Explicit worklist (`MarkStack`) instead of native recursion
//! - The mark bit doubles as the visited set, so each object is expanded
//!   at most once and cycles terminate
//! - Pair children are visited head before tail
//!
//! Root Types:
//! - Operand stack entries (`RootStack`)
//! - Fields of an object whose allocation triggered the collection

pub mod mark_stack;
pub mod roots;

pub use mark_stack::MarkStack;
pub use roots::RootStack;

use crate::error::{GcError, Result};
use crate::heap::Heap;
use crate::object::{ObjectId, ObjectValue};

/// Marker - drives one mark phase over a heap
///
/// A marker accumulates across calls, so several root sources can be
/// marked into the same cycle before the sweep runs.
#[derive(Debug, Default)]
pub struct Marker {
    /// Pending work
    stack: MarkStack,
    /// Objects whose mark bit this marker set
    marked_count: usize,
    /// Pair fields examined
    edges_scanned: usize,
}

impl Marker {
    /// Create new marker
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `root` and everything reachable from it
    ///
    /// Returns immediately for an already-marked root.
    pub fn mark(&mut self, heap: &mut Heap, root: ObjectId) -> Result<()> {
        self.stack.push(root);
        self.drain(heap)
    }

    /// Mark every root in `roots`
    pub fn mark_roots<I>(&mut self, heap: &mut Heap, roots: I) -> Result<()>
    where
        I: IntoIterator<Item = ObjectId>,
    {
        for root in roots {
            self.mark(heap, root)?;
        }
        Ok(())
    }

    fn drain(&mut self, heap: &mut Heap) -> Result<()> {
        while let Some(id) = self.stack.pop() {
            let object = heap
                .object_mut(id)
                .ok_or(GcError::InvalidHandle { id })?;

            if object.marked {
                continue;
            }
            object.marked = true;
            self.marked_count += 1;

            if let ObjectValue::Pair { head, tail } = object.value {
                self.edges_scanned += 2;
                // LIFO: push tail first so head is expanded first
                self.stack.push(tail);
                self.stack.push(head);
            }
        }
        Ok(())
    }

    /// Get statistics
    pub fn stats(&self) -> MarkStats {
        MarkStats {
            marked: self.marked_count,
            edges_scanned: self.edges_scanned,
            max_depth: self.stack.max_depth(),
        }
    }
}

/// Mark phase statistics
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MarkStats {
    /// Objects newly marked
    pub marked: usize,
    /// Pair fields followed
    pub edges_scanned: usize,
    /// Peak worklist depth
    pub max_depth: usize,
}

/// Mark one root and its reachability closure
pub fn mark(heap: &mut Heap, root: ObjectId) -> Result<MarkStats> {
    let mut marker = Marker::new();
    marker.mark(heap, root)?;
    Ok(marker.stats())
}

/// Mark the reachability closure of every root
///
/// Traversal order does not change the resulting marked set.
pub fn mark_all<I>(heap: &mut Heap, roots: I) -> Result<MarkStats>
where
    I: IntoIterator<Item = ObjectId>,
{
    let mut marker = Marker::new();
    marker.mark_roots(heap, roots)?;
    Ok(marker.stats())
}
