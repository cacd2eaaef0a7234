// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use crate::InertiaError;
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_BINS: usize = 50;
pub const DEFAULT_MAX_DEGREE: usize = 5;
/// Compression effort steps; the highest step is the codec's maximum effort.
pub const MIN_COMPRESSION_EFFORT: i32 = 0;
pub const MAX_COMPRESSION_EFFORT: i32 = 9;
pub const DEFAULT_COMPRESSION_EFFORT: i32 = MAX_COMPRESSION_EFFORT;

/// Trend family used by the irreducibility estimator.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FitMode {
    /// Fixed degree-1 trend.
    #[default]
    Linear,
    /// Best fit over degrees `1..=max_degree`.
    Poly,
}

impl FitMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::Poly => "poly",
        }
    }
}

impl fmt::Display for FitMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FitMode {
    type Err = InertiaError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "linear" => Ok(Self::Linear),
            "poly" | "polynomial" => Ok(Self::Poly),
            _ => Err(InertiaError::invalid_config(format!(
                "unsupported fit_mode '{raw}'; expected one of: 'linear', 'poly'"
            ))),
        }
    }
}

/// Immutable analysis parameters. Unset fields take the documented defaults.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AnalysisConfig {
    pub bins: usize,
    pub fit_mode: FitMode,
    pub max_degree: usize,
    pub compression_effort: i32,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            bins: DEFAULT_BINS,
            fit_mode: FitMode::Linear,
            max_degree: DEFAULT_MAX_DEGREE,
            compression_effort: DEFAULT_COMPRESSION_EFFORT,
        }
    }
}

impl AnalysisConfig {
    pub fn with_bins(mut self, bins: usize) -> Self {
        self.bins = bins;
        self
    }

    pub fn with_fit_mode(mut self, fit_mode: FitMode) -> Self {
        self.fit_mode = fit_mode;
        self
    }

    pub fn with_max_degree(mut self, max_degree: usize) -> Self {
        self.max_degree = max_degree;
        self
    }

    pub fn with_compression_effort(mut self, effort: i32) -> Self {
        self.compression_effort = effort;
        self
    }

    /// Checks every field against its documented range.
    pub fn validate(&self) -> Result<(), InertiaError> {
        if self.bins == 0 {
            return Err(InertiaError::invalid_config("bins must be >= 1, got 0"));
        }
        if self.max_degree == 0 {
            return Err(InertiaError::invalid_config(
                "max_degree must be >= 1, got 0",
            ));
        }
        if !(MIN_COMPRESSION_EFFORT..=MAX_COMPRESSION_EFFORT).contains(&self.compression_effort) {
            return Err(InertiaError::invalid_config(format!(
                "compression_effort must be in {MIN_COMPRESSION_EFFORT}..={MAX_COMPRESSION_EFFORT}, got {}",
                self.compression_effort
            )));
        }
        Ok(())
    }
}
