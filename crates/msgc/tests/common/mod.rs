//! Test Utilities for the MSGC Test Suite
//!
//! Fixtures and strict assertions shared by the integration tests.
//! Every helper checks heap invariants after it acts, so a bug surfaces at
//! the step that caused it rather than in a later assertion.

#![allow(dead_code)]

use msgc::{CollectionReport, GcConfig, ObjectId, Vm};
use std::collections::HashSet;

/// Initial threshold of the default configuration
pub const DEFAULT_THRESHOLD: usize = 10;

/// ============================================================================
/// VM FIXTURE
/// ============================================================================

/// Test fixture wrapping a `Vm`
pub struct VmFixture {
    pub vm: Vm,
}

impl VmFixture {
    /// Fixture with the default configuration
    pub fn with_defaults() -> Self {
        Self::with_config(GcConfig::default())
    }

    /// Fixture with a custom initial threshold
    pub fn with_threshold(initial_threshold: usize) -> Self {
        Self::with_config(GcConfig {
            initial_threshold,
            ..Default::default()
        })
    }

    /// Fixture with a custom configuration
    pub fn with_config(config: GcConfig) -> Self {
        let vm = Vm::new(config).expect("VM initialization should succeed with valid config");
        Self { vm }
    }

    /// Push a scalar, panicking on failure
    #[track_caller]
    pub fn push_int(&mut self, value: i32) -> ObjectId {
        let id = self.vm.push_int(value).expect("push_int should succeed");
        assert_heap_consistent(&self.vm);
        id
    }

    /// Build a pair from the top two roots, panicking on failure
    #[track_caller]
    pub fn push_pair(&mut self) -> ObjectId {
        let id = self.vm.push_pair().expect("push_pair should succeed");
        assert_heap_consistent(&self.vm);
        id
    }

    /// Pop the top root, panicking on failure
    #[track_caller]
    pub fn pop(&mut self) -> ObjectId {
        self.vm.pop().expect("pop should succeed")
    }

    /// Run an explicit collection, panicking on failure
    #[track_caller]
    pub fn gc(&mut self) -> CollectionReport {
        let report = self.vm.gc().expect("collection should succeed");
        assert_heap_consistent(&self.vm);
        report
    }

    pub fn live(&self) -> usize {
        self.vm.num_objects()
    }

    /// Push a chain of `len` pairs; returns the outermost pair
    ///
    /// Leaves exactly one root on the stack. Allocates `2 * len + 1` objects.
    #[track_caller]
    pub fn push_list(&mut self, len: usize) -> ObjectId {
        let mut top = self.push_int(0);
        for i in 0..len {
            self.push_int(i as i32 + 1);
            top = self.push_pair();
        }
        top
    }
}

/// ============================================================================
/// ASSERTIONS
/// ============================================================================

/// Heap invariants hold: enumeration length, no marks, no dangling fields
#[track_caller]
pub fn assert_heap_consistent(vm: &Vm) {
    if let Err(e) = vm.heap().verify() {
        panic!("heap invariant violated: {}", e);
    }
}

/// Live count equals `expected`
#[track_caller]
pub fn assert_live(vm: &Vm, expected: usize) {
    assert_eq!(
        vm.num_objects(),
        expected,
        "expected {} live objects, heap has {}",
        expected,
        vm.num_objects()
    );
}

/// Every root names a live object
#[track_caller]
pub fn assert_roots_live(vm: &Vm) {
    for &root in vm.roots() {
        assert!(vm.heap().contains(root), "root {} was reclaimed", root);
    }
}

/// Objects reachable from the current roots, computed independently of
/// the collector
pub fn reachable_from_roots(vm: &Vm) -> HashSet<ObjectId> {
    let heap = vm.heap();
    let mut seen = HashSet::new();
    let mut pending: Vec<ObjectId> = vm.roots().to_vec();

    while let Some(id) = pending.pop() {
        if !seen.insert(id) {
            continue;
        }
        if let Ok((head, tail)) = heap.pair_fields(id) {
            pending.push(head);
            pending.push(tail);
        }
    }
    seen
}

/// Handles of every object currently on the heap
pub fn live_set(vm: &Vm) -> HashSet<ObjectId> {
    vm.heap().iter().map(|(id, _)| id).collect()
}
