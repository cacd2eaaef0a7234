// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

pub mod baseline;
pub mod logging;

pub use baseline::{
    BaselineRow, CanonicalSignal, DEFAULT_BASELINE_N, DEFAULT_BASELINE_SEED, baseline_rows,
    canonical_signals, format_baseline_table,
};
pub use logging::{init_logging, verbosity_directive};

/// CLI namespace.
pub fn crate_name() -> &'static str {
    let _ = (
        inertia_core::crate_name(),
        inertia_analyze::crate_name(),
        inertia_io::crate_name(),
    );
    "inertia-cli"
}
