//! Root Stack - Bounded operand stack of GC roots
//!
//! Every entry is definitionally reachable. The stack holds non-owning
//! handles; the heap owns the objects they name.
//!
//! ```text
//!            top
//! ┌─────────┐ ◄── push / pop
//! │ #4@0    │
//! ├─────────┤
//! │ #1@0    │
//! ├─────────┤
//! │ #0@0    │
//! └─────────┘
//!   bottom (index 0)
//! ```

use crate::error::{GcError, Result};
use crate::object::ObjectId;

/// RootStack - fixed-capacity stack of root handles
#[derive(Debug, Clone)]
pub struct RootStack {
    entries: Vec<ObjectId>,
    capacity: usize,
}

impl RootStack {
    /// Create empty stack with the given capacity
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Push a root
    ///
    /// # Errors
    /// `StackOverflow` if the stack already holds `capacity` entries.
    pub fn push(&mut self, id: ObjectId) -> Result<()> {
        if self.entries.len() >= self.capacity {
            return Err(GcError::StackOverflow {
                capacity: self.capacity,
            });
        }
        self.entries.push(id);
        Ok(())
    }

    /// Pop the top root
    ///
    /// # Errors
    /// `StackUnderflow` if the stack is empty.
    pub fn pop(&mut self) -> Result<ObjectId> {
        self.entries.pop().ok_or(GcError::StackUnderflow {
            required: 1,
            available: 0,
        })
    }

    /// Look at an entry without removing it; `distance` 0 is the top
    ///
    /// # Errors
    /// `StackUnderflow` if fewer than `distance + 1` roots are present.
    pub fn peek(&self, distance: usize) -> Result<ObjectId> {
        let len = self.entries.len();
        len.checked_sub(distance)
            .and_then(|n| n.checked_sub(1))
            .map(|index| self.entries[index])
            .ok_or(GcError::StackUnderflow {
                required: distance.saturating_add(1),
                available: len,
            })
    }

    /// Fail with `StackUnderflow` unless at least `required` roots are present
    pub fn require(&self, required: usize) -> Result<()> {
        if self.entries.len() < required {
            return Err(GcError::StackUnderflow {
                required,
                available: self.entries.len(),
            });
        }
        Ok(())
    }

    /// Drop every root
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Roots from bottom to top
    #[inline]
    pub fn as_slice(&self) -> &[ObjectId] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ObjectId> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a RootStack {
    type Item = &'a ObjectId;
    type IntoIter = std::slice::Iter<'a, ObjectId>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
