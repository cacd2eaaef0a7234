// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use crate::{AnalysisConfig, Diagnostics, Signal};
use std::fmt;

/// The three inertia metrics for one signal, plus the normalized samples.
///
/// Constructed once by the analysis orchestrator and never mutated.
/// Rendering lives outside this type and only reads its fields.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct InertiaResult {
    irreducible_fraction: f64,
    compression_resistance: f64,
    entropy: f64,
    values: Vec<f64>,
    config: AnalysisConfig,
    diagnostics: Diagnostics,
}

impl InertiaResult {
    pub fn new(
        irreducible_fraction: f64,
        compression_resistance: f64,
        entropy: f64,
        signal: Signal,
        config: AnalysisConfig,
        diagnostics: Diagnostics,
    ) -> Self {
        Self {
            irreducible_fraction,
            compression_resistance,
            entropy,
            values: signal.into_values(),
            config,
            diagnostics,
        }
    }

    /// Fraction of variance not explained by the selected trend fit (Ī).
    pub fn irreducible_fraction(&self) -> f64 {
        self.irreducible_fraction
    }

    pub fn i_bar(&self) -> f64 {
        self.irreducible_fraction
    }

    /// One minus the compressed-to-raw byte ratio.
    pub fn compression_resistance(&self) -> f64 {
        self.compression_resistance
    }

    pub fn i_comp(&self) -> f64 {
        self.compression_resistance
    }

    /// Histogram-density entropy proxy; may be negative.
    pub fn entropy(&self) -> f64 {
        self.entropy
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Plot title used by the text and matplotlib renderers.
    pub fn title(&self) -> String {
        format!("Informational Inertia Ī = {:.3}", self.irreducible_fraction)
    }
}

impl fmt::Display for InertiaResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | I_comp = {:.3} | H = {:.3} | n = {}",
            self.title(),
            self.compression_resistance,
            self.entropy,
            self.values.len()
        )
    }
}
