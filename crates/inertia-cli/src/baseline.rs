// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use inertia_analyze::analyze_values;
use inertia_core::{AnalysisConfig, InertiaError};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::StandardNormal;
use serde::Serialize;
use std::f64::consts::PI;
use std::fmt::Write as _;

pub const DEFAULT_BASELINE_SEED: u64 = 0;
pub const DEFAULT_BASELINE_N: usize = 2_000;

/// Synthetic signals used for the golden baseline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CanonicalSignal {
    PureSin,
    Noise,
    Trend,
    TrendPlusSin,
    SinPlusNoise,
}

impl CanonicalSignal {
    pub const ALL: [Self; 5] = [
        Self::PureSin,
        Self::Noise,
        Self::Trend,
        Self::TrendPlusSin,
        Self::SinPlusNoise,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::PureSin => "PURE_SIN",
            Self::Noise => "NOISE",
            Self::Trend => "TREND",
            Self::TrendPlusSin => "TREND_PLUS_SIN",
            Self::SinPlusNoise => "SIN_PLUS_NOISE",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BaselineRow {
    pub name: &'static str,
    pub n: usize,
    pub i_bar: f64,
    pub i_comp: f64,
    pub entropy: f64,
}

fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    if n < 2 {
        return vec![start; n];
    }
    let step = (stop - start) / (n - 1) as f64;
    (0..n).map(|i| start + step * i as f64).collect()
}

/// Generates every canonical signal of length `n` from one seeded stream.
///
/// Noise draws happen in a fixed order (the NOISE signal first, then the
/// jitter of SIN_PLUS_NOISE), so a seed always reproduces the same set.
pub fn canonical_signals(seed: u64, n: usize) -> Vec<(CanonicalSignal, Vec<f64>)> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let t = linspace(0.0, 10.0 * PI, n);
    let pure_sin: Vec<f64> = t.iter().map(|v| v.sin()).collect();
    let noise: Vec<f64> = (0..n).map(|_| rng.sample::<f64, _>(StandardNormal)).collect();
    let trend = linspace(-1.0, 1.0, n);
    let trend_plus_sin = trend
        .iter()
        .zip(&pure_sin)
        .map(|(line, wave)| line + 0.2 * wave)
        .collect();
    let sin_plus_noise = pure_sin
        .iter()
        .map(|wave| wave + 0.25 * rng.sample::<f64, _>(StandardNormal))
        .collect();

    vec![
        (CanonicalSignal::PureSin, pure_sin),
        (CanonicalSignal::Noise, noise),
        (CanonicalSignal::Trend, trend),
        (CanonicalSignal::TrendPlusSin, trend_plus_sin),
        (CanonicalSignal::SinPlusNoise, sin_plus_noise),
    ]
}

pub fn baseline_rows(
    seed: u64,
    n: usize,
    config: &AnalysisConfig,
) -> Result<Vec<BaselineRow>, InertiaError> {
    canonical_signals(seed, n)
        .into_iter()
        .map(|(signal, values)| {
            let result = analyze_values(&values, config)?;
            Ok(BaselineRow {
                name: signal.name(),
                n: result.len(),
                i_bar: result.i_bar(),
                i_comp: result.i_comp(),
                entropy: result.entropy(),
            })
        })
        .collect()
}

pub fn format_baseline_table(rows: &[BaselineRow], seed: u64, n: usize, bins: usize) -> String {
    let mut out = String::from("=== Informational Inertia: golden baseline ===\n");
    let _ = writeln!(out, "seed={seed}  N={n}  bins={bins}");
    out.push('\n');
    for row in rows {
        let _ = writeln!(
            out,
            "{:<14}  I_bar={:>9.6}  I_comp={:>9.6}  H={:>9.6}",
            row.name, row.i_bar, row.i_comp, row.entropy
        );
    }
    out
}
