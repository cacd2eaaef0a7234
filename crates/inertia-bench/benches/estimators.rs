// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use inertia_core::FitMode;
use inertia_metrics::{compression_resistance, entropy, irreducibility};

const SIZES: [usize; 3] = [1_000, 10_000, 100_000];

fn lcg_next(state: &mut u64) -> u64 {
    *state = state
        .wrapping_mul(6364136223846793005)
        .wrapping_add(1442695040888963407);
    *state
}

fn noisy_sine(n: usize) -> Vec<f64> {
    let mut state = 0xfeed_f00d_dead_beef_u64;
    (0..n)
        .map(|idx| {
            let jitter = (lcg_next(&mut state) >> 11) as f64 / (1u64 << 53) as f64 - 0.5;
            (idx as f64 * 0.01).sin() + 0.5 * jitter
        })
        .collect()
}

fn benchmark_entropy(c: &mut Criterion) {
    let mut group = c.benchmark_group("entropy_bins50");
    for n in SIZES {
        let values = noisy_sine(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &values, |b, values| {
            b.iter(|| entropy(black_box(values), black_box(50)))
        });
    }
    group.finish();
}

fn benchmark_compression(c: &mut Criterion) {
    let mut group = c.benchmark_group("compression_resistance");
    group.sample_size(20);
    for effort in [0, 9] {
        let values = noisy_sine(10_000);
        group.bench_with_input(
            BenchmarkId::new("n1e4_effort", effort),
            &values,
            |b, values| {
                b.iter(|| {
                    compression_resistance(black_box(values), black_box(effort))
                        .expect("compression benchmark should succeed")
                })
            },
        );
    }
    group.finish();
}

fn benchmark_irreducibility(c: &mut Criterion) {
    let mut group = c.benchmark_group("irreducibility");
    for n in SIZES {
        let values = noisy_sine(n);
        group.bench_with_input(BenchmarkId::new("linear", n), &values, |b, values| {
            b.iter(|| irreducibility(black_box(values), FitMode::Linear, 1))
        });
        group.bench_with_input(BenchmarkId::new("poly_deg5", n), &values, |b, values| {
            b.iter(|| irreducibility(black_box(values), FitMode::Poly, 5))
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    benchmark_entropy,
    benchmark_compression,
    benchmark_irreducibility
);
criterion_main!(benches);
