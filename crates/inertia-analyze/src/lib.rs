// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

pub mod render;

pub use render::{RenderOptions, render_text};

use inertia_core::{AnalysisConfig, Diagnostics, InertiaError, InertiaResult, Signal, SignalView};
use inertia_metrics::{compressed_sizes, entropy_report, irreducibility_report};
#[cfg(feature = "rayon")]
use rayon::prelude::*;
use std::path::Path;
use std::time::Instant;

/// Loads `source` and computes its inertia metrics.
///
/// The configuration is validated before the source is read. Load and
/// format failures propagate unchanged; degenerate signals (length 0 or 1)
/// produce a complete result with each estimator's fallback value.
pub fn analyze(
    source: impl AsRef<Path>,
    config: &AnalysisConfig,
) -> Result<InertiaResult, InertiaError> {
    config.validate()?;
    let loaded = inertia_io::load_signal(source.as_ref())?;
    run(loaded.into_signal(), config)
}

/// Computes the metrics for an already-loaded signal.
pub fn analyze_signal(
    signal: &Signal,
    config: &AnalysisConfig,
) -> Result<InertiaResult, InertiaError> {
    config.validate()?;
    run(signal.clone(), config)
}

/// Computes the metrics for a borrowed f32 or f64 buffer.
pub fn analyze_view(
    view: &SignalView<'_>,
    config: &AnalysisConfig,
) -> Result<InertiaResult, InertiaError> {
    config.validate()?;
    run(view.to_signal()?, config)
}

/// Computes the metrics for a slice of samples; the slice is copied.
pub fn analyze_values(
    values: &[f64],
    config: &AnalysisConfig,
) -> Result<InertiaResult, InertiaError> {
    config.validate()?;
    run(Signal::from_slice(values)?, config)
}

/// Analyzes every source independently; one failure does not affect the others.
///
/// Runs on the rayon pool when the `rayon` feature is enabled. Output order
/// matches `sources`.
pub fn analyze_batch<P>(
    sources: &[P],
    config: &AnalysisConfig,
) -> Vec<Result<InertiaResult, InertiaError>>
where
    P: AsRef<Path> + Sync,
{
    #[cfg(feature = "rayon")]
    {
        sources
            .par_iter()
            .map(|source| analyze(source, config))
            .collect()
    }
    #[cfg(not(feature = "rayon"))]
    {
        sources
            .iter()
            .map(|source| analyze(source, config))
            .collect()
    }
}

fn run(signal: Signal, config: &AnalysisConfig) -> Result<InertiaResult, InertiaError> {
    let started_at = Instant::now();
    let n = signal.len();
    let span = tracing::info_span!("analyze", n, fit_mode = %config.fit_mode);
    let _guard = span.enter();

    let values = signal.values();
    let mut diagnostics = Diagnostics {
        n,
        fit_mode: config.fit_mode,
        raw_bytes: n * std::mem::size_of::<f64>(),
        ..Diagnostics::default()
    };

    let sizes = compressed_sizes(values, config.compression_effort)?;
    let compression = sizes.resistance();
    if n > 0 {
        diagnostics.compressed_bytes = Some(sizes.compressed_bytes);
    }
    if sizes.overhead_dominated() {
        diagnostics.warnings.push(format!(
            "compressed size {} exceeds raw size {}; I_comp floored at 0.0",
            sizes.compressed_bytes, sizes.raw_bytes
        ));
    }
    tracing::debug!(
        raw_bytes = sizes.raw_bytes,
        compressed_bytes = sizes.compressed_bytes,
        value = compression,
        "compression resistance"
    );

    let entropy = entropy_report(values, config.bins);
    let entropy_value = entropy.value;
    if let Some((lo, hi)) = observed_range(values) {
        diagnostics.histogram_range = Some((lo, hi));
        if hi <= lo {
            diagnostics
                .notes
                .push("zero-range histogram; entropy defined as 0.0".to_string());
        }
    }
    if entropy.overflowed {
        diagnostics.notes.push(
            "entropy sum overflowed for a near-zero range; entropy defined as 0.0".to_string(),
        );
    }
    tracing::debug!(bins = config.bins, value = entropy_value, "entropy");

    let report = irreducibility_report(values, config.fit_mode, config.max_degree);
    diagnostics.requested_max_degree = report.requested_max_degree;
    diagnostics.effective_max_degree = report.effective_max_degree;
    diagnostics.best_degree = report.best_degree;
    if n < 2 {
        diagnostics.notes.push(format!(
            "degenerate signal (n={n}); irreducibility defined as 0.0"
        ));
    } else if report.degree_was_clamped() {
        diagnostics.notes.push(format!(
            "max_degree clamped from {} to {} for n={n}",
            report.requested_max_degree, report.effective_max_degree
        ));
    }
    if report.rescaled {
        diagnostics
            .notes
            .push("variance overflowed; signal rescaled by its largest magnitude".to_string());
    }
    for degree in &report.skipped_degrees {
        diagnostics
            .warnings
            .push(format!("degree {degree} fit skipped: rank deficient or non-finite"));
    }
    tracing::debug!(
        effective_max_degree = report.effective_max_degree,
        best_degree = ?report.best_degree,
        value = report.fraction,
        "irreducibility"
    );

    tracing::info!(
        i_bar = report.fraction,
        i_comp = compression,
        entropy = entropy_value,
        elapsed_us = started_at.elapsed().as_micros() as u64,
        "analysis complete"
    );

    Ok(InertiaResult::new(
        report.fraction,
        compression,
        entropy_value,
        signal,
        *config,
        diagnostics,
    ))
}

fn observed_range(values: &[f64]) -> Option<(f64, f64)> {
    if values.is_empty() {
        return None;
    }
    Some(
        values
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            }),
    )
}

/// Orchestrator namespace.
pub fn crate_name() -> &'static str {
    let _ = (
        inertia_core::crate_name(),
        inertia_io::crate_name(),
        inertia_metrics::crate_name(),
    );
    "inertia-analyze"
}
