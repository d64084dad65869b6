//! Object Handle - Generation-checked reference into the heap arena
//!
//! Handle Layout (8 bytes):
//! ┌──────────────────────┬──────────────────────┐
//! │   Slot index (u32)   │   Generation (u32)   │
//! └──────────────────────┴──────────────────────┘
//!
//! A slot's generation is bumped every time it is reused, so a handle kept
//! past its object's reclamation no longer matches and is rejected.

use std::fmt;

/// ObjectId - non-owning reference to a heap object
///
/// Roots and pair fields hold `ObjectId`s; the heap owns the storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId {
    index: u32,
    generation: u32,
}

impl ObjectId {
    /// Create handle from raw parts
    #[inline]
    pub const fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    /// Slot index in the heap arena
    #[inline]
    pub const fn index(self) -> usize {
        self.index as usize
    }

    /// Generation the slot had when this handle was issued
    #[inline]
    pub const fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}@{}", self.index, self.generation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_parts() {
        let id = ObjectId::new(12, 3);
        assert_eq!(id.index(), 12);
        assert_eq!(id.generation(), 3);
        assert_eq!(id.to_string(), "#12@3");
    }

    #[test]
    fn test_generation_distinguishes_handles() {
        assert_ne!(ObjectId::new(0, 0), ObjectId::new(0, 1));
    }
}
