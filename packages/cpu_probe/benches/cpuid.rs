//! Benchmarking the CPUID probe and invocation.

#![allow(
    missing_docs,
    reason = "No need for API documentation in benchmark code"
)]

use std::hint::black_box;

use cpu_probe::{Cpuid, Selectors};
use criterion::{Criterion, criterion_group, criterion_main};

criterion_group!(benches, entrypoint);
criterion_main!(benches);

fn entrypoint(c: &mut Criterion) {
    let mut group = c.benchmark_group("cpuid");

    // Constant on 64-bit targets, a flags register round trip on 32-bit x86.
    group.bench_function("have_cpuid", |b| {
        b.iter(cpu_probe::have_cpuid);
    });

    // CPUID is a serializing instruction and traps to the hypervisor in virtual machines, so
    // expect this to be far slower than an ordinary instruction.
    if let Some(cpuid) = Cpuid::detect() {
        group.bench_function("query_leaf_0", |b| {
            b.iter(|| cpuid.query(black_box(Selectors::for_leaf(0))));
        });
    }

    group.finish();
}
