//! Benchmark strip-mined kernels against the golden scalar references.
//!
//! Run with: `cargo bench --bench stripmine_benchmark`

#![allow(clippy::cast_precision_loss)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use stripmine_core::golden;
use stripmine_core::kernel::elementwise;
use stripmine_core::kernel::reduce::{self, ReduceMode};
use stripmine_core::kernel::transcendental;
use stripmine_core::simd;
use stripmine_core::VectorUnit;

fn generate_vector(dim: usize, seed: f32) -> Vec<f32> {
    (0..dim).map(|i| (seed + i as f32 * 0.1).sin()).collect()
}

/// Warmup function to stabilize CPU frequency and caches
fn warmup<F: Fn()>(f: F) {
    for _ in 0..3 {
        f();
    }
}

fn bench_dot(c: &mut Criterion) {
    simd::warmup();
    let unit = VectorUnit::detect();
    let mut group = c.benchmark_group("dot");

    for dim in &[128, 768, 1536, 4096] {
        let a = generate_vector(*dim, 0.0);
        let b = generate_vector(*dim, 1.0);

        group.bench_with_input(BenchmarkId::new("golden", dim), dim, |bencher, _| {
            warmup(|| {
                let _ = golden::dot(&a, &b);
            });
            bencher.iter(|| golden::dot(black_box(&a), black_box(&b)));
        });

        group.bench_with_input(BenchmarkId::new("ordered", dim), dim, |bencher, _| {
            warmup(|| {
                let _ = reduce::dot_f32(&unit, &a, &b, ReduceMode::Ordered);
            });
            bencher.iter(|| {
                reduce::dot_f32(&unit, black_box(&a), black_box(&b), ReduceMode::Ordered)
            });
        });

        group.bench_with_input(BenchmarkId::new("unordered", dim), dim, |bencher, _| {
            warmup(|| {
                let _ = reduce::dot_f32(&unit, &a, &b, ReduceMode::Unordered);
            });
            bencher.iter(|| {
                reduce::dot_f32(&unit, black_box(&a), black_box(&b), ReduceMode::Unordered)
            });
        });
    }

    group.finish();
}

fn bench_add(c: &mut Criterion) {
    simd::warmup();
    let unit = VectorUnit::detect();
    let mut group = c.benchmark_group("add");

    for dim in &[128, 768, 1536, 4096] {
        let a = generate_vector(*dim, 0.0);
        let b = generate_vector(*dim, 1.0);
        let mut out = vec![0.0_f32; *dim];

        group.bench_with_input(BenchmarkId::new("golden", dim), dim, |bencher, _| {
            bencher.iter(|| golden::add(black_box(&a), black_box(&b), black_box(&mut out)));
        });

        group.bench_with_input(BenchmarkId::new("stripmined", dim), dim, |bencher, _| {
            bencher.iter(|| {
                elementwise::add_f32(&unit, black_box(&a), black_box(&b), black_box(&mut out))
            });
        });
    }

    group.finish();
}

fn bench_exp(c: &mut Criterion) {
    let unit = VectorUnit::detect();
    let mut group = c.benchmark_group("exp");

    for dim in &[128, 768, 1536, 4096] {
        // Keep arguments inside the clamp range.
        let src: Vec<f32> = (0..*dim).map(|i| (i as f32 * 0.003).sin() * 60.0).collect();
        let mut out = vec![0.0_f32; *dim];

        group.bench_with_input(BenchmarkId::new("libm", dim), dim, |bencher, _| {
            bencher.iter(|| golden::exp_f32(black_box(&src), black_box(&mut out)));
        });

        group.bench_with_input(BenchmarkId::new("polynomial", dim), dim, |bencher, _| {
            bencher.iter(|| {
                transcendental::exp_f32_buf(&unit, black_box(&src), black_box(&mut out))
            });
        });
    }

    group.finish();
}

fn bench_sum_modes(c: &mut Criterion) {
    simd::warmup();
    let unit = VectorUnit::detect();
    let mut group = c.benchmark_group("sum");
    let dim = 4096;
    let values = generate_vector(dim, 0.5);

    for mode in [ReduceMode::Ordered, ReduceMode::Unordered] {
        group.bench_with_input(
            BenchmarkId::new("mode", format!("{mode:?}")),
            &mode,
            |bencher, &mode| {
                bencher.iter(|| reduce::sum_f32(&unit, black_box(&values), mode));
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_dot, bench_add, bench_exp, bench_sum_modes);
criterion_main!(benches);
