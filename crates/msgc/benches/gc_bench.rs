//! MSGC Benchmarks
//!
//! Allocation and collection throughput for the mark-sweep collector.
//! Run with: `cargo bench --package msgc`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use msgc::{GcConfig, Vm};

fn create_vm() -> Vm {
    Vm::new(GcConfig::default()).unwrap()
}

/// Interpreter loop: 1000 rounds of 20 pushes and 20 pops
fn bench_push_pop_rounds(c: &mut Criterion) {
    let mut group = c.benchmark_group("push_pop_rounds");
    group.throughput(Throughput::Elements(20_000));

    group.bench_function("1000x20", |b| {
        b.iter(|| {
            let mut vm = create_vm();
            for i in 0..1000 {
                for _ in 0..20 {
                    vm.push_int(black_box(i)).unwrap();
                }
                for _ in 0..20 {
                    vm.pop().unwrap();
                }
            }
            black_box(vm.num_objects())
        })
    });

    group.finish();
}

fn bench_allocation(c: &mut Criterion) {
    let mut group = c.benchmark_group("allocation");

    group.bench_function("scalar_unrooted", |b| {
        let mut vm = create_vm();
        b.iter(|| {
            vm.push_int(black_box(7)).unwrap();
            vm.pop().unwrap();
        })
    });

    group.bench_function("pair_unrooted", |b| {
        let mut vm = create_vm();
        b.iter(|| {
            vm.push_int(1).unwrap();
            vm.push_int(2).unwrap();
            vm.push_pair().unwrap();
            vm.pop().unwrap();
        })
    });

    group.finish();
}

/// Build a list of `len` pairs rooted by one stack entry
fn build_list(vm: &mut Vm, len: usize) {
    vm.push_int(0).unwrap();
    for i in 0..len {
        vm.push_int(i as i32).unwrap();
        vm.push_pair().unwrap();
    }
}

fn bench_collect_live_list(c: &mut Criterion) {
    let mut group = c.benchmark_group("collect_live_list");

    for &len in &[100usize, 1_000, 10_000] {
        group.throughput(Throughput::Elements((2 * len + 1) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(len), &len, |b, &len| {
            let mut vm = create_vm();
            build_list(&mut vm, len);
            b.iter(|| black_box(vm.gc().unwrap()))
        });
    }

    group.finish();
}

fn bench_collect_garbage(c: &mut Criterion) {
    let mut group = c.benchmark_group("collect_garbage");

    for &len in &[100usize, 1_000, 10_000] {
        group.throughput(Throughput::Elements((2 * len + 1) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(len), &len, |b, &len| {
            b.iter_with_setup(
                || {
                    let mut vm = create_vm();
                    build_list(&mut vm, len);
                    vm.pop().unwrap();
                    vm
                },
                |mut vm| black_box(vm.gc().unwrap()),
            )
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_push_pop_rounds,
    bench_allocation,
    bench_collect_live_list,
    bench_collect_garbage
);

criterion_main!(benches);
