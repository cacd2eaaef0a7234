// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use crate::moments::population_variance;
use crate::polyfit::{PolynomialFit, positions};
use inertia_core::FitMode;

/// Added to the total variance so constant signals never divide by zero.
pub const TOTAL_VARIANCE_EPSILON: f64 = 1e-12;

/// Irreducibility fraction plus the degree search that produced it.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct IrreducibilityReport {
    pub fraction: f64,
    pub fit_mode: FitMode,
    pub requested_max_degree: usize,
    /// Upper bound actually searched after clamping to `n - 1`.
    pub effective_max_degree: usize,
    /// Degree with the smallest residual variance, `None` when nothing was fit.
    pub best_degree: Option<usize>,
    /// Degrees skipped because their fit was rank deficient or not finite.
    pub skipped_degrees: Vec<usize>,
    /// Set when the variance overflowed and the signal was divided by its
    /// largest magnitude before fitting.
    pub rescaled: bool,
}

impl IrreducibilityReport {
    pub fn degree_was_clamped(&self) -> bool {
        self.fit_mode == FitMode::Poly && self.effective_max_degree < self.requested_max_degree
    }
}

/// Fraction of variance left unexplained by the best polynomial trend.
///
/// See [`irreducibility_report`] for the search details.
pub fn irreducibility(values: &[f64], fit_mode: FitMode, max_degree: usize) -> f64 {
    irreducibility_report(values, fit_mode, max_degree).fraction
}

/// Fits trends against sample position and reports `min var(residual) / (var + ε)`.
///
/// `Linear` fits degree 1 only. `Poly` searches degrees
/// `1..=min(max_degree, n - 1)`; `max_degree` is clamped silently and `0`
/// is read as `1`. Signals shorter than two samples return `0.0`. If every
/// candidate degree is rank deficient the fraction is `1.0`. A signal whose
/// variance overflows `f64` is divided by its largest magnitude first; the
/// ratio is unchanged by that scaling apart from the epsilon term.
pub fn irreducibility_report(
    values: &[f64],
    fit_mode: FitMode,
    max_degree: usize,
) -> IrreducibilityReport {
    let n = values.len();
    let requested_max_degree = match fit_mode {
        FitMode::Linear => 1,
        FitMode::Poly => max_degree.max(1),
    };
    let effective_max_degree = requested_max_degree.min(n.saturating_sub(1));

    let mut report = IrreducibilityReport {
        fraction: 0.0,
        fit_mode,
        requested_max_degree,
        effective_max_degree,
        best_degree: None,
        skipped_degrees: vec![],
        rescaled: false,
    };
    if n < 2 {
        return report;
    }

    let scaled;
    let values = if population_variance(values).is_finite() {
        values
    } else {
        let scale = values.iter().fold(0.0f64, |acc, v| acc.max(v.abs()));
        scaled = values.iter().map(|v| v / scale).collect::<Vec<_>>();
        report.rescaled = true;
        scaled.as_slice()
    };

    let t = positions(n);
    let total_variance = population_variance(values) + TOTAL_VARIANCE_EPSILON;

    let mut best: Option<(usize, f64)> = None;
    for degree in 1..=effective_max_degree {
        let fit = match PolynomialFit::fit(&t, values, degree) {
            Ok(fit) => fit,
            Err(_) => {
                report.skipped_degrees.push(degree);
                continue;
            }
        };
        let residual_variance = population_variance(&fit.residuals(&t, values));
        if !residual_variance.is_finite() {
            report.skipped_degrees.push(degree);
            continue;
        }
        if best.is_none_or(|(_, current)| residual_variance < current) {
            best = Some((degree, residual_variance));
        }
    }

    match best {
        Some((degree, residual_variance)) => {
            report.best_degree = Some(degree);
            report.fraction = residual_variance / total_variance;
        }
        None => report.fraction = 1.0,
    }
    report
}
