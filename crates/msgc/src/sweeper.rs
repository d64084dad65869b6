//! Sweeper - Reclamation of unmarked objects
//!
//! One linear pass over the heap enumeration:
//! - unmarked: unlink (repair predecessor's link or the heap head),
//!   release the slot, decrement the live count
//! - marked: clear the mark, advance
//!
//! No object is visited twice. Afterwards no survivor is marked and the
//! live count equals the number of survivors.

use crate::error::{GcError, Result};
use crate::heap::Heap;
use crate::object::ObjectId;

/// Sweep phase statistics
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SweepStats {
    /// Objects reclaimed
    pub swept: usize,
    /// Objects kept (mark cleared)
    pub survivors: usize,
}

/// Sweep the heap
///
/// # Errors
/// `Internal` if the enumeration links to a slot that holds no object.
pub fn sweep(heap: &mut Heap) -> Result<SweepStats> {
    let mut stats = SweepStats::default();
    let mut previous: Option<ObjectId> = None;
    let mut cursor = heap.first_object;

    while let Some(id) = cursor {
        let object = heap.object_mut(id).ok_or_else(|| dangling_link(id))?;
        let next = object.next;

        if object.marked {
            object.marked = false;
            stats.survivors += 1;
            previous = Some(id);
        } else {
            match previous {
                None => heap.first_object = next,
                Some(prev) => {
                    heap.object_mut(prev).ok_or_else(|| dangling_link(prev))?.next = next;
                }
            }
            heap.arena.remove(id);
            heap.live_count -= 1;
            stats.swept += 1;
            log::trace!("swept {}", id);
        }

        cursor = next;
    }

    Ok(stats)
}

fn dangling_link(id: ObjectId) -> GcError {
    GcError::Internal(format!("heap enumeration links to dead slot {}", id))
}
