//! Small dense linear systems
//!
//! Systems are passed in augmented form: each row holds the `n` coefficients
//! followed by the right-hand side.

use crate::error::{GeometryError, Result};
use nalgebra::{DMatrix, DVector};

use super::TOLERANCE15;

/// Solve the `n x n` system given as `n` augmented rows of length `n + 1`.
///
/// Fails with [`GeometryError::SingularSystem`] when a pivot of the LU
/// factorization is negligible relative to the largest one.
pub fn solve(rows: &[Vec<f64>]) -> Result<Vec<f64>> {
    let n = rows.len();
    if n == 0 {
        return Err(GeometryError::InvalidInput("empty linear system".to_string()));
    }
    if let Some(bad) = rows.iter().find(|r| r.len() != n + 1) {
        return Err(GeometryError::InvalidInput(format!(
            "augmented row of length {} in a {}x{} system",
            bad.len(),
            n,
            n
        )));
    }

    let a = DMatrix::from_fn(n, n, |i, j| rows[i][j]);
    let b = DVector::from_fn(n, |i, _| rows[i][n]);

    let lu = a.lu();
    let u = lu.u();
    let max_pivot = (0..n).map(|i| u[(i, i)].abs()).fold(0.0_f64, f64::max);
    let min_pivot = (0..n).map(|i| u[(i, i)].abs()).fold(f64::INFINITY, f64::min);
    if !max_pivot.is_finite() || max_pivot <= 0.0 || min_pivot <= TOLERANCE15 * max_pivot {
        return Err(GeometryError::SingularSystem);
    }

    let x = lu.solve(&b).ok_or(GeometryError::SingularSystem)?;
    if x.iter().any(|v| !v.is_finite()) {
        return Err(GeometryError::SingularSystem);
    }
    Ok(x.iter().copied().collect())
}
