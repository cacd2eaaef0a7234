// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use inertia_core::InertiaError;

/// Cell separator for delimited text input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Delimiter {
    Comma,
    Whitespace,
}

impl Delimiter {
    fn split<'a>(&self, row: &'a str) -> Vec<&'a str> {
        match self {
            Self::Comma => row.split(',').map(str::trim).collect(),
            Self::Whitespace => row.split_whitespace().collect(),
        }
    }
}

/// Parses rectangular numeric text into row-major values and `(rows, columns)`.
///
/// Blank lines and `#` comments are ignored. A single leading row of
/// non-numeric labels is skipped when the next row is fully numeric. Input
/// with no data rows yields an empty signal.
pub fn parse_delimited(
    raw: &str,
    delimiter: Delimiter,
) -> Result<(Vec<f64>, (usize, usize)), InertiaError> {
    let rows = raw
        .lines()
        .map(strip_comment)
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>();

    if rows.is_empty() {
        return Ok((vec![], (0, 0)));
    }

    match parse_rows(&rows, delimiter) {
        Ok(parsed) => Ok(parsed),
        Err(err) => {
            if rows.len() > 1 && first_row_looks_like_header(rows[0], rows[1], delimiter) {
                if let Ok(without_header) = parse_rows(&rows[1..], delimiter) {
                    return Ok(without_header);
                }
            }
            Err(err)
        }
    }
}

fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(idx) => &line[..idx],
        None => line,
    }
}

fn parse_rows(
    rows: &[&str],
    delimiter: Delimiter,
) -> Result<(Vec<f64>, (usize, usize)), InertiaError> {
    let mut values = Vec::<f64>::new();
    let mut expected_cols: Option<usize> = None;

    for (row_idx, row) in rows.iter().enumerate() {
        let cells = delimiter.split(row);

        if let Some(cols) = expected_cols {
            if cells.len() != cols {
                return Err(InertiaError::invalid_input(format!(
                    "row {} has {} columns but expected {}",
                    row_idx + 1,
                    cells.len(),
                    cols
                )));
            }
        } else {
            expected_cols = Some(cells.len());
        }

        for (col_idx, cell) in cells.iter().enumerate() {
            if cell.is_empty() {
                return Err(InertiaError::invalid_input(format!(
                    "row {} column {} is empty",
                    row_idx + 1,
                    col_idx + 1
                )));
            }
            let value = cell.parse::<f64>().map_err(|_| {
                InertiaError::invalid_input(format!(
                    "row {} column {} is not a valid float: '{}'",
                    row_idx + 1,
                    col_idx + 1,
                    cell
                ))
            })?;
            values.push(value);
        }
    }

    let cols = expected_cols.unwrap_or(0);
    Ok((values, (rows.len(), cols)))
}

fn first_row_looks_like_header(first_row: &str, second_row: &str, delimiter: Delimiter) -> bool {
    let first_cells = delimiter.split(first_row);
    let second_cells = delimiter.split(second_row);

    if first_cells.is_empty()
        || first_cells.len() != second_cells.len()
        || first_cells.iter().any(|cell| cell.is_empty())
        || second_cells.iter().any(|cell| cell.is_empty())
    {
        return false;
    }

    let first_all_non_numeric = first_cells.iter().all(|cell| cell.parse::<f64>().is_err());
    let second_all_numeric = second_cells.iter().all(|cell| cell.parse::<f64>().is_ok());

    first_all_non_numeric && second_all_numeric
}
