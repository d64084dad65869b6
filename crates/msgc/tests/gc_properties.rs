//! GC Property Tests
//!
//! Randomized checks of the collector's contract:
//! - rooted objects are never reclaimed
//! - popped objects are reclaimed by the next collection
//! - a second collection with the same roots changes nothing
//! - the trigger point after S survivors is `2 * S`
//! - after any operation sequence, a collection leaves exactly the
//!   reachable set

mod common;

use common::{assert_heap_consistent, live_set, reachable_from_roots, VmFixture};
use msgc::config::DEFAULT_STACK_MAX;
use msgc::ObjectKind;
use proptest::prelude::*;

const PROP_CASES: u32 = 64;

#[derive(Debug, Clone)]
enum Op {
    PushInt(i32),
    PushPair,
    Pop,
    Dup(usize),
    SetHead(usize),
    SetTail(usize),
    Collect,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => any::<i32>().prop_map(Op::PushInt),
        3 => Just(Op::PushPair),
        3 => Just(Op::Pop),
        1 => (0usize..8).prop_map(Op::Dup),
        1 => (0usize..8).prop_map(Op::SetHead),
        1 => (0usize..8).prop_map(Op::SetTail),
        1 => Just(Op::Collect),
    ]
}

/// Apply `op`, skipping it when its precondition does not hold
fn apply(fixture: &mut VmFixture, op: &Op) {
    let vm = &mut fixture.vm;
    let depth = vm.stack_len();
    match *op {
        Op::PushInt(v) => {
            if depth < DEFAULT_STACK_MAX {
                vm.push_int(v).unwrap();
            }
        }
        Op::PushPair => {
            if depth >= 2 {
                vm.push_pair().unwrap();
            }
        }
        Op::Pop => {
            if depth >= 1 {
                vm.pop().unwrap();
            }
        }
        Op::Dup(distance) => {
            if distance < depth && depth < DEFAULT_STACK_MAX {
                let id = vm.peek(distance).unwrap();
                vm.push(id).unwrap();
            }
        }
        Op::SetHead(distance) | Op::SetTail(distance) => {
            if distance < depth && depth >= 1 {
                let pair = vm.peek(0).unwrap();
                let value = vm.peek(distance).unwrap();
                if vm.heap().kind(pair).unwrap() == ObjectKind::Pair {
                    match op {
                        Op::SetHead(_) => vm.set_head(pair, value).unwrap(),
                        _ => vm.set_tail(pair, value).unwrap(),
                    }
                }
            }
        }
        Op::Collect => {
            vm.gc().unwrap();
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(PROP_CASES))]

    #[test]
    fn prop_rooted_objects_preserved(values in prop::collection::vec(any::<i32>(), 0..200)) {
        let mut fixture = VmFixture::with_defaults();
        let ids: Vec<_> = values.iter().map(|&v| fixture.vm.push_int(v).unwrap()).collect();

        fixture.vm.gc().unwrap();

        prop_assert_eq!(fixture.vm.num_objects(), values.len());
        for (id, v) in ids.iter().zip(&values) {
            prop_assert_eq!(fixture.vm.heap().scalar_value(*id).unwrap(), Some(*v));
        }
    }

    #[test]
    fn prop_popped_objects_reclaimed(n in 1usize..150, popped_fraction in 0.0f64..=1.0) {
        let popped = ((n as f64) * popped_fraction) as usize;
        let mut fixture = VmFixture::with_defaults();
        let ids: Vec<_> = (0..n).map(|v| fixture.vm.push_int(v as i32).unwrap()).collect();
        let live_before = fixture.vm.num_objects();
        for _ in 0..popped {
            fixture.vm.pop().unwrap();
        }

        fixture.vm.gc().unwrap();

        prop_assert_eq!(live_before, n);
        prop_assert_eq!(fixture.vm.num_objects(), n - popped);
        for id in &ids[n - popped..] {
            prop_assert!(!fixture.vm.heap().contains(*id));
        }
    }

    #[test]
    fn prop_collection_idempotent(ops in prop::collection::vec(op_strategy(), 0..300)) {
        let mut fixture = VmFixture::with_defaults();
        for op in &ops {
            apply(&mut fixture, op);
        }

        let first = fixture.vm.gc().unwrap();
        let second = fixture.vm.gc().unwrap();

        prop_assert_eq!(first.live_after, second.live_after);
        prop_assert_eq!(second.reclaimed, 0);
        prop_assert_eq!(first.new_threshold, second.new_threshold);
    }

    #[test]
    fn prop_collection_keeps_exactly_reachable(ops in prop::collection::vec(op_strategy(), 0..300)) {
        let mut fixture = VmFixture::with_threshold(4);
        for op in &ops {
            apply(&mut fixture, op);
            // Nothing reachable is ever reclaimed, even by triggered collections
            for id in reachable_from_roots(&fixture.vm) {
                prop_assert!(fixture.vm.heap().contains(id), "reachable {} was reclaimed", id);
            }
        }

        fixture.vm.gc().unwrap();

        assert_heap_consistent(&fixture.vm);
        prop_assert_eq!(live_set(&fixture.vm), reachable_from_roots(&fixture.vm));
    }

    #[test]
    fn prop_threshold_is_twice_survivors(survivors in 0usize..100) {
        let mut fixture = VmFixture::with_threshold(1000);
        for v in 0..survivors {
            fixture.vm.push_int(v as i32).unwrap();
        }
        fixture.vm.push_int(-1).unwrap();
        fixture.vm.pop().unwrap();

        let report = fixture.vm.gc().unwrap();
        prop_assert_eq!(report.new_threshold, 2 * survivors);
        let cycles = fixture.vm.heap().cycle_count();

        // S more allocations fit under the threshold
        for v in 0..survivors {
            fixture.vm.push_int(v as i32).unwrap();
        }
        prop_assert_eq!(fixture.vm.heap().cycle_count(), cycles);

        // The next one collects first
        fixture.vm.push_int(0).unwrap();
        prop_assert_eq!(fixture.vm.heap().cycle_count(), cycles + 1);
    }
}
