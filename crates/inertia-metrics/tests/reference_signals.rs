// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use inertia_core::FitMode;
use inertia_metrics::{compression_resistance, entropy, irreducibility};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::StandardNormal;
use std::f64::consts::PI;

const N: usize = 2_000;
/// Effort steps spanning zstd levels 1, 3, 9, 19 and 22.
const EFFORTS: [i32; 5] = [0, 2, 5, 8, 9];

fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    let step = (stop - start) / (n - 1) as f64;
    (0..n).map(|i| start + step * i as f64).collect()
}

fn gaussian(rng: &mut ChaCha8Rng, n: usize) -> Vec<f64> {
    (0..n).map(|_| rng.sample::<f64, _>(StandardNormal)).collect()
}

struct Canonical {
    pure: Vec<f64>,
    mix: Vec<f64>,
    noise: Vec<f64>,
}

fn canonical(seed: u64) -> Canonical {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let t = linspace(0.0, 10.0 * PI, N);
    let pure: Vec<f64> = t.iter().map(|v| v.sin()).collect();
    let jitter = gaussian(&mut rng, N);
    let mix = pure
        .iter()
        .zip(&jitter)
        .map(|(s, e)| s + 0.5 * e)
        .collect();
    let noise = gaussian(&mut rng, N);
    Canonical { pure, mix, noise }
}

#[test]
fn compression_resistance_orders_pure_mix_noise() {
    for seed in [0, 1, 7] {
        let signals = canonical(seed);
        for effort in EFFORTS {
            let pure =
                compression_resistance(&signals.pure, effort).expect("pure should compress");
            let mix = compression_resistance(&signals.mix, effort).expect("mix should compress");
            let noise =
                compression_resistance(&signals.noise, effort).expect("noise should compress");
            assert!(pure > mix, "seed {seed} effort {effort}: pure={pure} mix={mix}");
            assert!(mix >= noise, "seed {seed} effort {effort}: mix={mix} noise={noise}");
            for value in [pure, mix, noise] {
                assert!((0.0..=1.0).contains(&value));
            }
        }
    }
}

#[test]
fn linear_ramp_is_fully_explained() {
    let ramp = linspace(-1.0, 1.0, N);
    let value = irreducibility(&ramp, FitMode::Linear, 5);
    assert!(value < 1e-6, "ramp I_bar should vanish, got {value}");
    assert!(value < 0.01);
}

#[test]
fn sine_over_many_periods_is_partly_explained_by_a_line() {
    // Baseline: a line removes ~2.4% of a 5-period sine's variance and
    // essentially none of white noise, so noise ranks above sine.
    let signals = canonical(0);
    let sine = irreducibility(&signals.pure, FitMode::Linear, 5);
    let noise = irreducibility(&signals.noise, FitMode::Linear, 5);
    assert!((sine - 0.9757).abs() < 1e-3, "sine I_bar drifted: {sine}");
    assert!(noise > 0.99, "noise I_bar should be near one, got {noise}");
    assert!(noise > sine);
}

#[test]
fn exact_polynomials_converge_once_degree_is_reached() {
    let t = linspace(0.0, 1.0, N);
    let quartic: Vec<f64> = t
        .iter()
        .map(|x| 2.0 * x.powi(4) - x.powi(3) + 0.5 * x - 1.0)
        .collect();
    for max_degree in 1..=3 {
        assert!(irreducibility(&quartic, FitMode::Poly, max_degree) > 1e-8);
    }
    for max_degree in 4..=6 {
        let value = irreducibility(&quartic, FitMode::Poly, max_degree);
        assert!(value < 1e-9, "max_degree {max_degree}: {value}");
    }
}

#[test]
fn noise_entropy_exceeds_narrow_sine_entropy() {
    let signals = canonical(3);
    let scaled_sine: Vec<f64> = signals.pure.iter().map(|v| 0.01 * v).collect();
    let h_noise = entropy(&signals.noise, 50);
    let h_sine = entropy(&scaled_sine, 50);
    assert!(h_noise.is_finite() && h_sine.is_finite());
    assert!(h_sine < 0.0, "narrow support gives negative entropy, got {h_sine}");
    assert!(h_noise > h_sine);
}
