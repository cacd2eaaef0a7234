// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use inertia_core::InertiaResult;

const PLOT_GLYPH: char = '*';
const AXIS_LABEL_WIDTH: usize = 10;

/// Size of the ASCII plot area in character cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderOptions {
    pub width: usize,
    pub height: usize,
    pub show_legend: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: 72,
            height: 16,
            show_legend: true,
        }
    }
}

impl RenderOptions {
    fn clamped(&self) -> (usize, usize) {
        (self.width.max(1), self.height.max(2))
    }
}

/// Renders `values` as an ASCII line plot framed by the title and summary.
///
/// The output is a pure function of `result` and `options`.
pub fn render_text(result: &InertiaResult, options: &RenderOptions) -> String {
    let (width, height) = options.clamped();
    let mut lines = vec![result.title()];

    let values = result.values();
    if values.is_empty() {
        lines.push("(empty signal)".to_string());
    } else {
        let (lo, hi) = value_range(values);
        let columns = width.min(values.len());
        let mut grid = vec![vec![' '; columns]; height];

        for column in 0..columns {
            let start = column * values.len() / columns;
            let end = ((column + 1) * values.len() / columns).max(start + 1);
            let (col_lo, col_hi) = value_range(&values[start..end]);
            let top = row_for(col_hi, lo, hi, height);
            let bottom = row_for(col_lo, lo, hi, height);
            for row in grid.iter_mut().take(bottom + 1).skip(top) {
                row[column] = PLOT_GLYPH;
            }
        }

        for (row_idx, row) in grid.iter().enumerate() {
            let label = if row_idx == 0 {
                format!("{hi:>w$.3}", w = AXIS_LABEL_WIDTH)
            } else if row_idx == height - 1 {
                format!("{lo:>w$.3}", w = AXIS_LABEL_WIDTH)
            } else {
                " ".repeat(AXIS_LABEL_WIDTH)
            };
            let body: String = row.iter().collect();
            lines.push(format!("{label} |{}", body.trim_end()));
        }
        lines.push(format!(
            "{} +{}",
            " ".repeat(AXIS_LABEL_WIDTH),
            "-".repeat(columns)
        ));
        lines.push(format!(
            "{} 0{:>w$}",
            " ".repeat(AXIS_LABEL_WIDTH),
            values.len() - 1,
            w = columns.saturating_sub(1).max(1)
        ));
    }

    if options.show_legend {
        lines.push(format!("  {PLOT_GLYPH} signal"));
    }
    lines.push(result.to_string());
    lines.join("\n")
}

fn value_range(values: &[f64]) -> (f64, f64) {
    values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        })
}

fn row_for(value: f64, lo: f64, hi: f64, height: usize) -> usize {
    let last = height - 1;
    if hi <= lo {
        return last / 2;
    }
    let scaled = (hi - value) / (hi - lo) * last as f64;
    (scaled.round().max(0.0) as usize).min(last)
}
