//! Heap Management Module - Object Arena and Collection Trigger
//!
//! The heap owns every object. Objects sit in a slot arena and are threaded
//! into one intrusive enumeration, newest first, so the sweeper can visit
//! every allocation without a separate registry.
//!
//! ```text
//! first_object
//!      │
//!      ▼
//!  ┌────────┐ next ┌────────┐ next ┌────────┐
//!  │ Pair   │─────►│ Scalar │─────►│ Scalar │──► None
//!  │ #2@0   │      │ #1@0   │      │ #0@0   │
//!  └────────┘      └────────┘      └────────┘
//! ```
//!
//! Allocation Lifecycle:
//! 1. `live_count >= threshold` (or at `max_objects`) - run a full collection first
//! 2. Still at `max_objects` - fail with `AllocationFailure`
//! 3. Store the object, prepend it to the enumeration, bump `live_count`
//!
//! Reclamation happens only in `sweeper::sweep`.

pub mod arena;

pub use arena::Arena;

use crate::config::GcConfig;
use crate::error::{GcError, Result};
use crate::gc::{self, CollectionReport, GcReason, GcState};
use crate::logging::{self, GcEvent};
use crate::marker::RootStack;
use crate::object::{Object, ObjectId, ObjectKind, ObjectValue};
use crate::stats::GcStats;

#[derive(Debug, Clone, Copy)]
enum PairField {
    Head,
    Tail,
}

/// Heap - owner of all objects and of the collection trigger
pub struct Heap {
    /// Object storage
    pub(crate) arena: Arena,

    /// Head of the intrusive enumeration (most recent allocation)
    pub(crate) first_object: Option<ObjectId>,

    /// Objects currently stored
    pub(crate) live_count: usize,

    /// Live count at which the next allocation collects first
    pub(crate) threshold: usize,

    /// Current collector phase
    pub(crate) state: GcState,

    /// Completed collections
    pub(crate) cycle_count: u64,

    /// GC configuration
    pub(crate) config: GcConfig,

    /// Statistics collector
    pub(crate) stats: GcStats,
}

impl Heap {
    /// Create empty heap
    ///
    /// # Errors
    /// `Configuration` if `config` fails validation.
    pub fn new(config: GcConfig) -> Result<Self> {
        config
            .validate()
            .map_err(|e| GcError::Configuration(format!("Invalid configuration: {}", e)))?;

        Ok(Self {
            arena: Arena::new(),
            first_object: None,
            live_count: 0,
            threshold: config.initial_threshold,
            state: GcState::Idle,
            cycle_count: 0,
            config,
            stats: GcStats::new(),
        })
    }

    /// Allocate an object, collecting first if the threshold is reached
    ///
    /// `roots` are preserved by the collection. The fields of a pending
    /// pair are treated as roots too, so they cannot be reclaimed before
    /// the pair that references them exists.
    ///
    /// # Errors
    /// - `InvalidHandle` if a pair field does not name a live object
    /// - `AllocationFailure` if storage is exhausted after collecting
    pub fn allocate(&mut self, value: ObjectValue, roots: &RootStack) -> Result<ObjectId> {
        self.allocate_with_roots(value, roots.as_slice())
    }

    /// Allocate a scalar
    pub fn allocate_scalar(&mut self, value: i32, roots: &RootStack) -> Result<ObjectId> {
        self.allocate(ObjectValue::Scalar(value), roots)
    }

    /// Allocate a pair referencing `head` and `tail`
    pub fn allocate_pair(
        &mut self,
        head: ObjectId,
        tail: ObjectId,
        roots: &RootStack,
    ) -> Result<ObjectId> {
        self.allocate(ObjectValue::Pair { head, tail }, roots)
    }

    pub(crate) fn allocate_with_roots(
        &mut self,
        value: ObjectValue,
        roots: &[ObjectId],
    ) -> Result<ObjectId> {
        let pending = Object::new(value, None);
        for field in pending.references() {
            self.ensure_live(field)?;
        }

        let live = self.live_count;
        let reason = if live >= self.threshold {
            Some(GcReason::Threshold {
                live,
                threshold: self.threshold,
            })
        } else {
            self.config
                .max_objects
                .filter(|&max| live >= max)
                .map(|max_objects| GcReason::Capacity { live, max_objects })
        };

        if let Some(reason) = reason {
            let extra = pending.references();
            gc::collect_from(self, roots.iter().copied().chain(extra), reason)?;
        }

        if self.at_capacity() {
            return Err(self.allocation_failure());
        }

        let object = Object::new(value, self.first_object);
        let id = match self.arena.insert(object, self.live_count) {
            Ok(id) => id,
            Err(_) => return Err(self.allocation_failure()),
        };

        self.first_object = Some(id);
        self.live_count += 1;
        if self.config.stats_enabled {
            self.stats.record_allocation(self.live_count);
        }

        log::trace!("allocated {:?} {} (live={})", value.kind(), id, self.live_count);
        Ok(id)
    }

    fn at_capacity(&self) -> bool {
        self.config
            .max_objects
            .map_or(false, |max| self.live_count >= max)
    }

    fn allocation_failure(&self) -> GcError {
        log::warn!(
            "allocation failed with {} live objects (max_objects={:?})",
            self.live_count,
            self.config.max_objects
        );
        if self.config.verbose {
            logging::log_event(GcEvent::AllocationFailure {
                requested: 1,
                live: self.live_count,
            });
        }
        GcError::AllocationFailure {
            requested: 1,
            live: self.live_count,
        }
    }

    /// Force a collection against `roots`, regardless of the threshold
    pub fn collect(&mut self, roots: &RootStack) -> Result<CollectionReport> {
        gc::collect(self, roots, GcReason::Explicit)
    }

    /// Reclaim every object and release bookkeeping
    ///
    /// Runs a final collection with no roots. Afterwards the heap is empty
    /// and its threshold is 0.
    pub fn release_all(&mut self) -> Result<CollectionReport> {
        let report = gc::collect_from(self, std::iter::empty(), GcReason::Shutdown)?;
        self.arena.shrink_to_fit();
        Ok(report)
    }

    // === Object access ===

    /// Look up a live object
    pub fn get(&self, id: ObjectId) -> Result<&Object> {
        self.arena.get(id).ok_or(GcError::InvalidHandle { id })
    }

    pub(crate) fn object_mut(&mut self, id: ObjectId) -> Option<&mut Object> {
        self.arena.get_mut(id)
    }

    /// Whether `id` names a live object
    #[inline]
    pub fn contains(&self, id: ObjectId) -> bool {
        self.arena.contains(id)
    }

    pub(crate) fn ensure_live(&self, id: ObjectId) -> Result<()> {
        crate::ensure!(self.contains(id), GcError::InvalidHandle { id });
        Ok(())
    }

    /// Variant tag of a live object
    pub fn kind(&self, id: ObjectId) -> Result<ObjectKind> {
        Ok(self.get(id)?.kind())
    }

    /// Payload of a live object
    pub fn value(&self, id: ObjectId) -> Result<ObjectValue> {
        Ok(*self.get(id)?.value())
    }

    /// Integer of a scalar, `None` for a pair
    pub fn scalar_value(&self, id: ObjectId) -> Result<Option<i32>> {
        match self.value(id)? {
            ObjectValue::Scalar(v) => Ok(Some(v)),
            ObjectValue::Pair { .. } => Ok(None),
        }
    }

    /// `(head, tail)` of a pair
    pub fn pair_fields(&self, id: ObjectId) -> Result<(ObjectId, ObjectId)> {
        match self.value(id)? {
            ObjectValue::Pair { head, tail } => Ok((head, tail)),
            ObjectValue::Scalar(_) => Err(GcError::NotAPair { id }),
        }
    }

    /// Point a pair's head at `value`
    pub fn set_head(&mut self, pair: ObjectId, value: ObjectId) -> Result<()> {
        self.update_pair(pair, PairField::Head, value)
    }

    /// Point a pair's tail at `value`
    pub fn set_tail(&mut self, pair: ObjectId, value: ObjectId) -> Result<()> {
        self.update_pair(pair, PairField::Tail, value)
    }

    fn update_pair(&mut self, pair: ObjectId, field: PairField, value: ObjectId) -> Result<()> {
        self.ensure_live(value)?;
        let object = self
            .arena
            .get_mut(pair)
            .ok_or(GcError::InvalidHandle { id: pair })?;
        match (&mut object.value, field) {
            (ObjectValue::Pair { head, .. }, PairField::Head) => *head = value,
            (ObjectValue::Pair { tail, .. }, PairField::Tail) => *tail = value,
            (ObjectValue::Scalar(_), _) => return Err(GcError::NotAPair { id: pair }),
        }
        Ok(())
    }

    /// Clear every mark bit; used to roll back an aborted cycle
    ///
    /// Covers every stored object, linked into the enumeration or not.
    pub(crate) fn clear_marks(&mut self) {
        for object in self.arena.objects_mut() {
            object.marked = false;
        }
    }

    /// Walk the enumeration, newest object first
    pub fn iter(&self) -> HeapIter<'_> {
        HeapIter {
            heap: self,
            cursor: self.first_object,
        }
    }

    // === Accessors ===

    #[inline]
    pub fn live_count(&self) -> usize {
        self.live_count
    }

    #[inline]
    pub fn threshold(&self) -> usize {
        self.threshold
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.live_count == 0
    }

    /// Head of the enumeration
    #[inline]
    pub fn first_object(&self) -> Option<ObjectId> {
        self.first_object
    }

    #[inline]
    pub fn state(&self) -> GcState {
        self.state
    }

    #[inline]
    pub fn cycle_count(&self) -> u64 {
        self.cycle_count
    }

    pub fn config(&self) -> &GcConfig {
        &self.config
    }

    pub fn stats(&self) -> &GcStats {
        &self.stats
    }

    /// Arena slots ever created
    pub fn slot_count(&self) -> usize {
        self.arena.slot_count()
    }

    /// Check heap invariants
    ///
    /// - enumeration length equals `live_count`
    /// - no object is left marked
    /// - every pair field names a live object
    ///
    /// # Errors
    /// `Internal` describing the first violation found.
    pub fn verify(&self) -> Result<()> {
        let mut seen = 0usize;
        let mut cursor = self.first_object;

        while let Some(id) = cursor {
            let object = self.arena.get(id).ok_or_else(|| {
                GcError::Internal(format!("enumeration links to dead slot {}", id))
            })?;
            if object.marked {
                return Err(GcError::Internal(format!("{} is still marked", id)));
            }
            for field in object.references() {
                if !self.contains(field) {
                    return Err(GcError::Internal(format!(
                        "{} references reclaimed object {}",
                        id, field
                    )));
                }
            }
            seen += 1;
            if seen > self.live_count {
                return Err(GcError::Internal(format!(
                    "enumeration longer than live count {}",
                    self.live_count
                )));
            }
            cursor = object.next;
        }

        if seen != self.live_count {
            return Err(GcError::Internal(format!(
                "enumeration holds {} objects, live count is {}",
                seen, self.live_count
            )));
        }
        Ok(())
    }
}

impl std::fmt::Debug for Heap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Heap")
            .field("live_count", &self.live_count)
            .field("threshold", &self.threshold)
            .field("first_object", &self.first_object)
            .field("state", &self.state)
            .field("cycle_count", &self.cycle_count)
            .finish()
    }
}

/// Iterator over the heap enumeration
pub struct HeapIter<'a> {
    heap: &'a Heap,
    cursor: Option<ObjectId>,
}

impl<'a> Iterator for HeapIter<'a> {
    type Item = (ObjectId, &'a Object);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.cursor?;
        let object = self.heap.arena.get(id)?;
        self.cursor = object.next;
        Some((id, object))
    }
}
