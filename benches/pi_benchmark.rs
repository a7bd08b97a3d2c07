// ============================================================================
// Pi Computation Benchmarks
// ============================================================================
//
// Benchmark Categories:
// 1. Full Pipeline - End-to-end computation at several digit counts
// 2. Worker Scaling - Reduction fan-out at a fixed digit count
// 3. Reference - Direct factorial series for comparison
// ============================================================================

use chudnovsky_pi::prelude::*;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;

fn benchmark_full_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_pipeline");

    for digits in [100u64, 1_000, 5_000].iter() {
        group.bench_with_input(BenchmarkId::new("digits", digits), digits, |b, &digits| {
            b.iter(|| black_box(compute_pi(digits, 4).unwrap()));
        });
    }

    group.finish();
}

fn benchmark_worker_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("worker_scaling");
    group.sample_size(20);

    for workers in [1usize, 2, 4, 8].iter() {
        group.bench_with_input(
            BenchmarkId::new("workers", workers),
            workers,
            |b, &workers| {
                b.iter(|| black_box(compute_pi(2_000, workers).unwrap()));
            },
        );
    }

    group.finish();
}

fn benchmark_reference_series(c: &mut Criterion) {
    let mut group = c.benchmark_group("reference_series");

    for digits in [100u64, 1_000].iter() {
        group.bench_with_input(BenchmarkId::new("digits", digits), digits, |b, &digits| {
            b.iter(|| black_box(direct_series_pi(digits).unwrap()));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_full_pipeline,
    benchmark_worker_scaling,
    benchmark_reference_series
);
criterion_main!(benches);
