//! Mark Stack - Explicit worklist for the mark phase
//!
//! Marking pushes pending handles here instead of recursing, so native
//! stack usage stays constant no matter how long a reference chain is.
//! Depth of the worklist is tracked as the scaling indicator.

use crate::object::ObjectId;

/// MarkStack - LIFO worklist of handles waiting to be marked
#[derive(Debug, Default)]
pub struct MarkStack {
    /// Pending handles
    data: Vec<ObjectId>,
    /// Deepest the worklist got
    max_depth: usize,
}

impl MarkStack {
    /// Create new empty worklist
    pub fn new() -> Self {
        Self::default()
    }

    /// Push handle onto the worklist
    #[inline]
    pub fn push(&mut self, id: ObjectId) {
        self.data.push(id);
        self.max_depth = self.max_depth.max(self.data.len());
    }

    /// Pop most recently pushed handle
    #[inline]
    pub fn pop(&mut self) -> Option<ObjectId> {
        self.data.pop()
    }

    /// Peak worklist depth since creation
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }
}
