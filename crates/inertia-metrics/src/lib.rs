// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

pub mod compression;
pub mod entropy;
pub mod irreducibility;
pub mod moments;
pub mod polyfit;

pub use compression::{
    ByteCompressor, CompressedSizes, ZstdCompressor, compressed_sizes, compression_resistance,
    compression_resistance_with, encode_f64_le, zstd_level,
};
pub use entropy::{EntropyReport, HistogramDensity, entropy, entropy_report, histogram_density};
pub use irreducibility::{
    IrreducibilityReport, TOTAL_VARIANCE_EPSILON, irreducibility, irreducibility_report,
};
pub use moments::{mean, population_variance};
pub use polyfit::PolynomialFit;

/// Estimator namespace.
pub fn crate_name() -> &'static str {
    let _ = inertia_core::crate_name();
    "inertia-metrics"
}
