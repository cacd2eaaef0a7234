// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

/// Density-normalized equal-width histogram over the observed range.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct HistogramDensity {
    /// `bins + 1` edges; the last bin is closed on the right.
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
    /// `count / (n * width)` per bin; integrates to one over the range.
    pub densities: Vec<f64>,
}

impl HistogramDensity {
    pub fn bins(&self) -> usize {
        self.counts.len()
    }

    pub fn range(&self) -> (f64, f64) {
        (self.edges[0], self.edges[self.edges.len() - 1])
    }
}

/// Builds the density histogram of `values` over `[min, max]`.
///
/// Returns `None` for an empty signal or a zero-range signal (or one too
/// narrow to partition), where no equal-width partition exists. `bins == 0` is
/// treated as one bin.
pub fn histogram_density(values: &[f64], bins: usize) -> Option<HistogramDensity> {
    if values.is_empty() {
        return None;
    }
    let bins = bins.max(1);
    let (lo, hi) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    if hi <= lo || !(hi - lo).is_finite() {
        return None;
    }

    let norm = bins as f64 / (hi - lo);
    if !norm.is_finite() {
        return None;
    }

    let step = (hi - lo) / bins as f64;
    let mut edges: Vec<f64> = (0..=bins).map(|i| lo + i as f64 * step).collect();
    edges[bins] = hi;

    let mut counts = vec![0usize; bins];
    for &value in values {
        if !value.is_finite() {
            continue;
        }
        let mut idx = (((value - lo) * norm) as usize).min(bins - 1);
        // Rounding in `norm` can land one bin off near an edge.
        if value < edges[idx] && idx > 0 {
            idx -= 1;
        } else if idx + 1 < bins && value >= edges[idx + 1] {
            idx += 1;
        }
        counts[idx] += 1;
    }

    let total = counts.iter().sum::<usize>() as f64;
    let densities = counts
        .iter()
        .enumerate()
        .map(|(i, &count)| {
            let width = edges[i + 1] - edges[i];
            if count == 0 || width <= 0.0 {
                0.0
            } else {
                count as f64 / (total * width)
            }
        })
        .collect();

    Some(HistogramDensity {
        edges,
        counts,
        densities,
    })
}

/// Histogram-density entropy proxy: `-sum(p * ln p)` over non-empty bins.
///
/// Not a calibrated differential entropy and may be negative. An empty
/// signal and a single-valued signal both return `0.0`, as does a range so
/// narrow that the sum overflows (see [`entropy_report`]).
pub fn entropy(values: &[f64], bins: usize) -> f64 {
    entropy_report(values, bins).value
}

/// Entropy value plus whether the density sum overflowed.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EntropyReport {
    pub value: f64,
    /// Set when `-sum(p * ln p)` was not finite; `value` is then `0.0`.
    pub overflowed: bool,
}

pub fn entropy_report(values: &[f64], bins: usize) -> EntropyReport {
    let Some(histogram) = histogram_density(values, bins) else {
        return EntropyReport {
            value: 0.0,
            overflowed: false,
        };
    };
    let value = -histogram
        .densities
        .iter()
        .filter(|&&density| density > 0.0)
        .map(|&density| density * density.ln())
        .sum::<f64>();
    if value.is_finite() {
        EntropyReport {
            value,
            overflowed: false,
        }
    } else {
        EntropyReport {
            value: 0.0,
            overflowed: true,
        }
    }
}
