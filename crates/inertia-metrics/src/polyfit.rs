// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use inertia_core::InertiaError;

/// Relative pivot tolerance below which the design matrix is rank deficient.
const RANK_TOLERANCE: f64 = 1e-12;

/// Least-squares polynomial trend `y ≈ p(t)`.
///
/// The abscissa is mapped affinely onto `[-1, 1]` before the Vandermonde
/// matrix is built, and the system is solved with Householder QR. The
/// mapped basis spans the same polynomials, so fitted values match a fit
/// in raw `t`.
#[derive(Clone, Debug, PartialEq)]
pub struct PolynomialFit {
    degree: usize,
    center: f64,
    half_width: f64,
    /// Ascending-power coefficients in the mapped variable.
    coefficients: Vec<f64>,
}

impl PolynomialFit {
    /// Fits a degree-`degree` polynomial of `y` against `t`.
    pub fn fit(t: &[f64], y: &[f64], degree: usize) -> Result<Self, InertiaError> {
        if t.len() != y.len() {
            return Err(InertiaError::invalid_input(format!(
                "polynomial fit requires equal-length inputs: t has {}, y has {}",
                t.len(),
                y.len()
            )));
        }
        let n = y.len();
        let dim = degree + 1;
        if n < dim {
            return Err(InertiaError::invalid_input(format!(
                "polynomial degree {degree} requires at least {dim} samples, got {n}"
            )));
        }

        let (lo, hi) = t
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });
        let (center, half_width) = if hi > lo {
            (0.5 * (lo + hi), 0.5 * (hi - lo))
        } else if degree == 0 {
            (lo, 1.0)
        } else {
            return Err(InertiaError::numerical_issue(format!(
                "polynomial degree {degree} is ill-posed for a zero-width abscissa"
            )));
        };

        let mut columns = vec![vec![1.0; n]; dim];
        for (row, &t_row) in t.iter().enumerate() {
            let x = (t_row - center) / half_width;
            for p in 1..dim {
                columns[p][row] = columns[p - 1][row] * x;
            }
        }

        let coefficients = solve_least_squares_qr(columns, y.to_vec()).ok_or_else(|| {
            InertiaError::numerical_issue(format!(
                "polynomial degree {degree} is rank deficient for {n} samples"
            ))
        })?;

        Ok(Self {
            degree,
            center,
            half_width,
            coefficients,
        })
    }

    /// Fits against the implicit sample positions `0..n-1`.
    pub fn fit_positions(y: &[f64], degree: usize) -> Result<Self, InertiaError> {
        let t = positions(y.len());
        Self::fit(&t, y, degree)
    }

    pub fn degree(&self) -> usize {
        self.degree
    }

    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    pub fn evaluate(&self, t: f64) -> f64 {
        let x = (t - self.center) / self.half_width;
        self.coefficients
            .iter()
            .rev()
            .fold(0.0, |acc, coeff| acc * x + coeff)
    }

    /// `y - p(t)` for every sample.
    pub fn residuals(&self, t: &[f64], y: &[f64]) -> Vec<f64> {
        t.iter()
            .zip(y)
            .map(|(&t_row, &y_row)| y_row - self.evaluate(t_row))
            .collect()
    }
}

/// Integer sample positions `0..n-1` as reals.
pub(crate) fn positions(n: usize) -> Vec<f64> {
    (0..n).map(|idx| idx as f64).collect()
}

/// Solves `min ||A c - b||` for column-major `A` (n x p, n >= p).
fn solve_least_squares_qr(mut columns: Vec<Vec<f64>>, mut b: Vec<f64>) -> Option<Vec<f64>> {
    let p = columns.len();
    let n = b.len();
    let scale = columns
        .iter()
        .map(|col| col.iter().map(|v| v * v).sum::<f64>().sqrt())
        .fold(0.0f64, f64::max);
    if !scale.is_finite() || scale == 0.0 {
        return None;
    }

    for k in 0..p {
        let norm = columns[k][k..]
            .iter()
            .map(|v| v * v)
            .sum::<f64>()
            .sqrt();
        if !norm.is_finite() || norm <= RANK_TOLERANCE * scale {
            return None;
        }

        let alpha = if columns[k][k] >= 0.0 { -norm } else { norm };
        let mut v = columns[k][k..].to_vec();
        v[0] -= alpha;
        let v_norm_sq = v.iter().map(|x| x * x).sum::<f64>();
        if v_norm_sq == 0.0 {
            continue;
        }

        for column in columns.iter_mut().skip(k) {
            reflect(&v, v_norm_sq, &mut column[k..]);
        }
        reflect(&v, v_norm_sq, &mut b[k..n]);
    }

    let mut coefficients = vec![0.0; p];
    for row in (0..p).rev() {
        let mut acc = b[row];
        for col in (row + 1)..p {
            acc -= columns[col][row] * coefficients[col];
        }
        let pivot = columns[row][row];
        if pivot == 0.0 || !pivot.is_finite() {
            return None;
        }
        coefficients[row] = acc / pivot;
    }

    coefficients
        .iter()
        .all(|c| c.is_finite())
        .then_some(coefficients)
}

/// Applies `I - 2 v v^T / (v^T v)` in place.
fn reflect(v: &[f64], v_norm_sq: f64, target: &mut [f64]) {
    let dot = v.iter().zip(target.iter()).map(|(a, b)| a * b).sum::<f64>();
    let factor = 2.0 * dot / v_norm_sq;
    if factor == 0.0 {
        return;
    }
    for (slot, vi) in target.iter_mut().zip(v) {
        *slot -= factor * vi;
    }
}

#[cfg(test)]
mod tests {
    use super::{PolynomialFit, positions};

    fn assert_close(actual: f64, expected: f64, tol: f64) {
        assert!(
            (actual - expected).abs() <= tol,
            "expected {expected}, got {actual} (tol={tol})"
        );
    }

    #[test]
    fn linear_fit_recovers_exact_line() {
        let t = positions(50);
        let y: Vec<f64> = t.iter().map(|&x| 3.0 - 0.5 * x).collect();
        let fit = PolynomialFit::fit(&t, &y, 1).expect("line should fit");
        assert_eq!(fit.degree(), 1);
        for (&t_row, &y_row) in t.iter().zip(&y) {
            assert_close(fit.evaluate(t_row), y_row, 1e-10);
        }
    }

    #[test]
    fn quintic_fit_on_long_positions_stays_accurate() {
        let n = 2_000;
        let y: Vec<f64> = positions(n)
            .iter()
            .map(|&t| {
                let x = t / n as f64;
                1.0 - 2.0 * x + 0.5 * x.powi(2) + 4.0 * x.powi(3) - 3.0 * x.powi(4) + x.powi(5)
            })
            .collect();
        let fit = PolynomialFit::fit_positions(&y, 5).expect("quintic should fit");
        let residuals = fit.residuals(&positions(n), &y);
        let max_abs = residuals.iter().fold(0.0f64, |acc, r| acc.max(r.abs()));
        assert!(max_abs < 1e-9, "max residual too large: {max_abs}");
    }

    #[test]
    fn degree_zero_fit_is_the_mean() {
        let y = [1.0, 2.0, 6.0];
        let fit = PolynomialFit::fit_positions(&y, 0).expect("constant should fit");
        assert_close(fit.evaluate(0.0), 3.0, 1e-12);
        assert_close(fit.evaluate(7.0), 3.0, 1e-12);
    }

    #[test]
    fn exact_interpolation_when_degree_is_n_minus_one() {
        let y = [2.0, -1.0, 5.0, 0.5];
        let fit = PolynomialFit::fit_positions(&y, 3).expect("cubic through 4 points");
        for (idx, &value) in y.iter().enumerate() {
            assert_close(fit.evaluate(idx as f64), value, 1e-9);
        }
    }

    #[test]
    fn rejects_too_few_samples_and_mismatched_lengths() {
        let err = PolynomialFit::fit_positions(&[1.0, 2.0], 2).expect_err("underdetermined");
        assert_eq!(err.code(), "invalid_input");

        let err = PolynomialFit::fit(&[0.0, 1.0], &[1.0], 1).expect_err("length mismatch");
        assert!(err.to_string().contains("equal-length"));
    }

    #[test]
    fn repeated_abscissa_is_rank_deficient() {
        let err = PolynomialFit::fit(&[1.0, 1.0, 1.0], &[0.0, 1.0, 2.0], 1)
            .expect_err("zero-width abscissa");
        assert_eq!(err.code(), "numerical_issue");

        let err = PolynomialFit::fit(&[0.0, 0.0, 1.0, 1.0], &[0.0, 1.0, 2.0, 3.0], 2)
            .expect_err("two distinct abscissae cannot pin a quadratic");
        assert_eq!(err.code(), "numerical_issue");
    }
}
