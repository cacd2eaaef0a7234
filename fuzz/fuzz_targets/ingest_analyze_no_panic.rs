// SPDX-License-Identifier: MIT OR Apache-2.0

#![no_main]

use inertia_analyze::analyze_values;
use inertia_core::{AnalysisConfig, FitMode};
use inertia_io::{Delimiter, parse_delimited, parse_npy_bytes};
use libfuzzer_sys::fuzz_target;

const MAX_SAMPLES: usize = 4_096;

fn build_config(selector: u8) -> AnalysisConfig {
    let fit_mode = if selector & 1 == 0 {
        FitMode::Linear
    } else {
        FitMode::Poly
    };
    AnalysisConfig::default()
        .with_bins(1 + usize::from(selector >> 2) % 64)
        .with_fit_mode(fit_mode)
        .with_max_degree(1 + usize::from(selector >> 1) % 8)
        .with_compression_effort(i32::from(selector % 10))
}

fn analyze_parsed(values: &[f64], config: &AnalysisConfig) {
    let values = &values[..values.len().min(MAX_SAMPLES)];
    if let Ok(result) = analyze_values(values, config) {
        assert!(result.i_comp() >= 0.0 && result.i_comp() <= 1.0);
        assert!(result.i_bar().is_finite() && result.i_bar() >= 0.0);
        assert!(result.entropy().is_finite());
        assert_eq!(result.len(), values.len());
    }
}

fuzz_target!(|data: &[u8]| {
    let Some((&selector, payload)) = data.split_first() else {
        return;
    };
    let config = build_config(selector);

    if let Ok((values, _)) = parse_npy_bytes(payload) {
        analyze_parsed(&values, &config);
    }

    if let Ok(text) = std::str::from_utf8(payload) {
        for delimiter in [Delimiter::Comma, Delimiter::Whitespace] {
            if let Ok((values, _)) = parse_delimited(text, delimiter) {
                analyze_parsed(&values, &config);
            }
        }
    }

    let raw: Vec<f64> = payload
        .chunks_exact(8)
        .take(MAX_SAMPLES)
        .filter_map(|chunk| chunk.try_into().ok().map(f64::from_le_bytes))
        .collect();
    analyze_parsed(&raw, &config);
});
