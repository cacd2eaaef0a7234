// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod result;
pub mod signal;

pub use config::{
    AnalysisConfig, DEFAULT_BINS, DEFAULT_COMPRESSION_EFFORT, DEFAULT_MAX_DEGREE, FitMode,
    MAX_COMPRESSION_EFFORT, MIN_COMPRESSION_EFFORT,
};
pub use diagnostics::{DIAGNOSTICS_SCHEMA_VERSION, Diagnostics};
pub use error::InertiaError;
pub use result::InertiaResult;
pub use signal::{DTypeView, Signal, SignalView};

/// Core shared types for inertia-rs.
pub fn crate_name() -> &'static str {
    "inertia-core"
}
