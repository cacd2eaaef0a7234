// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use crate::config::FitMode;

/// Diagnostics schema version for analysis run metadata.
pub const DIAGNOSTICS_SCHEMA_VERSION: u32 = 1;

/// Structured diagnostics captured while computing one result.
///
/// Every field is a deterministic function of the signal and configuration,
/// so two analyses of the same input compare equal.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct Diagnostics {
    pub n: usize,
    pub schema_version: u32,
    pub engine_version: Option<String>,
    pub fit_mode: FitMode,
    pub requested_max_degree: usize,
    pub effective_max_degree: usize,
    /// Degree with the smallest residual variance. Informational only.
    pub best_degree: Option<usize>,
    pub raw_bytes: usize,
    pub compressed_bytes: Option<usize>,
    pub histogram_range: Option<(f64, f64)>,
    pub notes: Vec<String>,
    pub warnings: Vec<String>,
}

impl Default for Diagnostics {
    fn default() -> Self {
        Self {
            n: 0,
            schema_version: DIAGNOSTICS_SCHEMA_VERSION,
            engine_version: Some(env!("CARGO_PKG_VERSION").to_string()),
            fit_mode: FitMode::Linear,
            requested_max_degree: 1,
            effective_max_degree: 0,
            best_degree: None,
            raw_bytes: 0,
            compressed_bytes: None,
            histogram_range: None,
            notes: vec![],
            warnings: vec![],
        }
    }
}
