//! Slot Arena - Dense storage for heap objects
//!
//! Objects live in a `Vec` of slots addressed by index. Vacant slots are
//! kept on a free list and reused LIFO; each reuse happens under a new
//! generation so old handles to the slot stop resolving. A slot whose
//! generation is exhausted is retired: it stays vacant and never returns
//! to the free list.
//!
//! ```text
//! slots:  [ occ g0 | vac g1 | occ g0 | vac g3 ]
//! free:   [ 1, 3 ]   <- next allocation takes slot 3
//! ```

use crate::error::{GcError, Result};
use crate::object::{Object, ObjectId};

#[derive(Debug)]
struct Slot {
    generation: u32,
    object: Option<Object>,
}

/// Arena - slot storage with generation-checked access
#[derive(Debug, Default)]
pub struct Arena {
    slots: Vec<Slot>,
    free_slots: Vec<u32>,
}

impl Arena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `object` and return its handle
    ///
    /// # Errors
    /// `AllocationFailure` if the slot vector cannot grow.
    pub fn insert(&mut self, object: Object, live: usize) -> Result<ObjectId> {
        if let Some(index) = self.free_slots.pop() {
            let slot = &mut self.slots[index as usize];
            debug_assert!(slot.object.is_none(), "free list names an occupied slot");
            slot.object = Some(object);
            return Ok(ObjectId::new(index, slot.generation));
        }

        let index = u32::try_from(self.slots.len())
            .map_err(|_| GcError::AllocationFailure { requested: 1, live })?;
        self.slots
            .try_reserve(1)
            .map_err(|_| GcError::AllocationFailure { requested: 1, live })?;
        self.slots.push(Slot {
            generation: 0,
            object: Some(object),
        });
        Ok(ObjectId::new(index, 0))
    }

    /// Release the object behind `id` and retire the handle
    pub fn remove(&mut self, id: ObjectId) -> Option<Object> {
        let slot = self.slots.get_mut(id.index())?;
        if slot.generation != id.generation() {
            return None;
        }
        let object = slot.object.take()?;
        match slot.generation.checked_add(1) {
            Some(generation) => {
                slot.generation = generation;
                self.free_slots.push(id.index() as u32);
            }
            None => log::debug!("slot {} retired at generation {}", id.index(), u32::MAX),
        }
        Some(object)
    }

    #[inline]
    pub fn get(&self, id: ObjectId) -> Option<&Object> {
        self.slots
            .get(id.index())
            .filter(|slot| slot.generation == id.generation())
            .and_then(|slot| slot.object.as_ref())
    }

    #[inline]
    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut Object> {
        self.slots
            .get_mut(id.index())
            .filter(|slot| slot.generation == id.generation())
            .and_then(|slot| slot.object.as_mut())
    }

    #[inline]
    pub fn contains(&self, id: ObjectId) -> bool {
        self.get(id).is_some()
    }

    /// Every stored object, in slot order
    pub fn objects_mut(&mut self) -> impl Iterator<Item = &mut Object> {
        self.slots.iter_mut().filter_map(|slot| slot.object.as_mut())
    }

    /// Slots ever created, occupied or vacant
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Vacant slots waiting for reuse
    pub fn free_count(&self) -> usize {
        self.free_slots.len()
    }

    /// Trim spare capacity of the bookkeeping vectors
    ///
    /// Vacant slots stay so their generations keep retired handles invalid.
    pub fn shrink_to_fit(&mut self) {
        self.slots.shrink_to_fit();
        self.free_slots.shrink_to_fit();
    }
}
