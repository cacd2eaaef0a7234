// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use inertia_core::{InertiaError, MAX_COMPRESSION_EFFORT, MIN_COMPRESSION_EFFORT};

const BYTES_PER_SAMPLE: usize = std::mem::size_of::<f64>();

/// zstd level for each effort step `0..=9`. The last entry is the zstd maximum.
const ZSTD_LEVELS: [i32; 10] = [1, 2, 3, 5, 7, 9, 12, 16, 19, 22];

/// Maps an effort step onto a zstd level; efforts outside `0..=9` are rejected.
pub fn zstd_level(effort: i32) -> Result<i32, InertiaError> {
    usize::try_from(effort)
        .ok()
        .and_then(|step| ZSTD_LEVELS.get(step).copied())
        .ok_or_else(|| {
            InertiaError::invalid_config(format!(
                "compression_effort must be in {MIN_COMPRESSION_EFFORT}..={MAX_COMPRESSION_EFFORT}, got {effort}"
            ))
        })
}

/// General-purpose byte compressor with a tunable effort level.
///
/// Implementations must be deterministic for a fixed input, effort and
/// codec version, and must not keep state between calls.
pub trait ByteCompressor {
    fn name(&self) -> &'static str;

    fn compress(&self, raw: &[u8], effort: i32) -> Result<Vec<u8>, InertiaError>;
}

/// zstd single-frame compressor; `effort` is mapped through [`zstd_level`].
///
/// Uses the one-shot API so the codec sizes its tables from the known
/// input length instead of the level's streaming defaults.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ZstdCompressor;

impl ByteCompressor for ZstdCompressor {
    fn name(&self) -> &'static str {
        "zstd"
    }

    fn compress(&self, raw: &[u8], effort: i32) -> Result<Vec<u8>, InertiaError> {
        let level = zstd_level(effort)?;
        zstd::bulk::compress(raw, level).map_err(|err| {
            InertiaError::numerical_issue(format!("zstd level {level} encode failed: {err}"))
        })
    }
}

/// Raw and compressed byte counts for one signal.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CompressedSizes {
    pub raw_bytes: usize,
    pub compressed_bytes: usize,
}

impl CompressedSizes {
    /// `1 - compressed/raw`, floored at zero when framing overhead exceeds
    /// the savings. `0.0` for an empty payload.
    pub fn resistance(&self) -> f64 {
        if self.raw_bytes == 0 {
            return 0.0;
        }
        let ratio = self.compressed_bytes as f64 / self.raw_bytes as f64;
        (1.0 - ratio).clamp(0.0, 1.0)
    }

    /// True when the codec output was larger than its input.
    pub fn overhead_dominated(&self) -> bool {
        self.raw_bytes > 0 && self.compressed_bytes > self.raw_bytes
    }
}

/// Encodes every sample as 8 little-endian IEEE-754 bytes.
pub fn encode_f64_le(values: &[f64]) -> Vec<u8> {
    let mut out = Vec::with_capacity(values.len() * BYTES_PER_SAMPLE);
    for value in values {
        out.extend_from_slice(&value.to_le_bytes());
    }
    out
}

pub fn compressed_sizes(values: &[f64], effort: i32) -> Result<CompressedSizes, InertiaError> {
    compressed_sizes_with(&ZstdCompressor, values, effort)
}

fn compressed_sizes_with<C: ByteCompressor + ?Sized>(
    compressor: &C,
    values: &[f64],
    effort: i32,
) -> Result<CompressedSizes, InertiaError> {
    if values.is_empty() {
        return Ok(CompressedSizes {
            raw_bytes: 0,
            compressed_bytes: 0,
        });
    }
    let raw = encode_f64_le(values);
    let compressed = compressor.compress(&raw, effort)?;
    Ok(CompressedSizes {
        raw_bytes: raw.len(),
        compressed_bytes: compressed.len(),
    })
}

/// Compression-resistance proxy `I_comp` using zstd at effort step `effort`.
///
/// This is a heuristic: raw float streams compress poorly even for smooth
/// signals, and no quantization is applied to compensate.
pub fn compression_resistance(values: &[f64], effort: i32) -> Result<f64, InertiaError> {
    compression_resistance_with(&ZstdCompressor, values, effort)
}

/// Same as [`compression_resistance`] with a caller-supplied compressor.
pub fn compression_resistance_with<C: ByteCompressor + ?Sized>(
    compressor: &C,
    values: &[f64],
    effort: i32,
) -> Result<f64, InertiaError> {
    Ok(compressed_sizes_with(compressor, values, effort)?.resistance())
}

#[cfg(test)]
mod tests {
    use super::{
        ByteCompressor, CompressedSizes, compressed_sizes, compression_resistance,
        compression_resistance_with, encode_f64_le, zstd_level,
    };
    use inertia_core::{DEFAULT_COMPRESSION_EFFORT, InertiaError, MAX_COMPRESSION_EFFORT};

    struct HalvingCompressor;

    impl ByteCompressor for HalvingCompressor {
        fn name(&self) -> &'static str {
            "halving"
        }

        fn compress(&self, raw: &[u8], _effort: i32) -> Result<Vec<u8>, InertiaError> {
            Ok(raw[..raw.len() / 2].to_vec())
        }
    }

    struct FailingCompressor;

    impl ByteCompressor for FailingCompressor {
        fn name(&self) -> &'static str {
            "failing"
        }

        fn compress(&self, _raw: &[u8], effort: i32) -> Result<Vec<u8>, InertiaError> {
            Err(InertiaError::numerical_issue(format!("refused level {effort}")))
        }
    }

    #[test]
    fn empty_signal_has_zero_resistance() {
        assert_eq!(compression_resistance(&[], 9).expect("empty is defined"), 0.0);
        let sizes = compressed_sizes(&[], 9).expect("empty is defined");
        assert_eq!(sizes.raw_bytes, 0);
        assert_eq!(sizes.compressed_bytes, 0);
    }

    #[test]
    fn encoding_is_fixed_width_little_endian() {
        let bytes = encode_f64_le(&[1.0, -2.5]);
        assert_eq!(bytes.len(), 16);
        assert_eq!(&bytes[..8], &1.0f64.to_le_bytes());
        assert_eq!(&bytes[8..], &(-2.5f64).to_le_bytes());
    }

    #[test]
    fn constant_signal_is_highly_compressible() {
        let values = vec![0.75; 4_096];
        let value = compression_resistance(&values, 9).expect("zstd should compress");
        assert!(value > 0.95, "expected near-total compression, got {value}");
    }

    #[test]
    fn tiny_signal_overhead_is_floored_at_zero() {
        let sizes = compressed_sizes(&[0.123_456_789], 9).expect("zstd should compress");
        assert_eq!(sizes.raw_bytes, 8);
        assert!(sizes.overhead_dominated());
        assert_eq!(sizes.resistance(), 0.0);
    }

    #[test]
    fn resistance_uses_compressed_to_raw_ratio() {
        let value = compression_resistance_with(&HalvingCompressor, &[1.0, 2.0, 3.0, 4.0], 9)
            .expect("halving compressor never fails");
        assert_eq!(value, 0.5);

        let sizes = CompressedSizes {
            raw_bytes: 100,
            compressed_bytes: 75,
        };
        assert_eq!(sizes.resistance(), 0.25);
        assert!(!sizes.overhead_dominated());
    }

    #[test]
    fn codec_failure_is_propagated() {
        let err = compression_resistance_with(&FailingCompressor, &[1.0], 3)
            .expect_err("failing compressor should surface");
        assert_eq!(err.code(), "numerical_issue");
        assert_eq!(FailingCompressor.name(), "failing");
        assert_eq!(HalvingCompressor.name(), "halving");
    }

    #[test]
    fn repeated_calls_are_bit_identical() {
        let values: Vec<f64> = (0..2_000).map(|i| (i as f64 * 0.01).sin()).collect();
        for effort in [0, 4, 9] {
            let first = compression_resistance(&values, effort).expect("zstd should compress");
            let second = compression_resistance(&values, effort).expect("zstd should compress");
            assert_eq!(first.to_bits(), second.to_bits());
            assert!((0.0..=1.0).contains(&first));
        }
    }

    #[test]
    fn effort_steps_map_onto_increasing_zstd_levels() {
        let levels: Vec<i32> = (0..=MAX_COMPRESSION_EFFORT)
            .map(|effort| zstd_level(effort).expect("effort in range"))
            .collect();
        assert!(levels.windows(2).all(|pair| pair[0] < pair[1]));
        assert_eq!(levels[0], 1);
        assert_eq!(
            zstd_level(MAX_COMPRESSION_EFFORT).expect("maximum effort"),
            *zstd::compression_level_range().end()
        );
        for effort in [-1, 10, 22] {
            let err = zstd_level(effort).expect_err("effort outside 0..=9");
            assert_eq!(err.code(), "invalid_config");
        }
        let err = compression_resistance(&[1.0, 2.0], 22)
            .expect_err("a raw zstd level is not an effort step");
        assert_eq!(err.code(), "invalid_config");
    }

    #[test]
    fn default_effort_compresses_at_the_zstd_maximum() {
        let values: Vec<f64> = (0..2_000).map(|i| (i as f64 * 0.0157).sin()).collect();
        let sizes =
            compressed_sizes(&values, DEFAULT_COMPRESSION_EFFORT).expect("zstd should compress");
        let max_level = *zstd::compression_level_range().end();
        let direct = zstd::bulk::compress(&encode_f64_le(&values), max_level)
            .expect("zstd should compress at its maximum level");
        assert_eq!(sizes.compressed_bytes, direct.len());

        let lowest = compressed_sizes(&values, 0).expect("effort 0 is valid");
        assert_eq!(lowest.raw_bytes, sizes.raw_bytes);
        assert!(lowest.compressed_bytes > 0);
    }
}
