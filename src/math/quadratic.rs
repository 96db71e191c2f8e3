//! General plane conic `a x^2 + b xy + c y^2 + d x + e y + f = 0`

use crate::error::{GeometryError, Result};
use crate::types::Vector2;
use nalgebra::{Matrix2, Vector2 as NVector2};
use std::fmt;

use super::TOLERANCE15;

/// A second-order curve stored as `p^T Q p + L^T p + f = 0`, with `Q` the
/// symmetric quadratic block, `L` the linear block and `f` the constant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quadratic {
    quad: Matrix2<f64>,
    linear: NVector2<f64>,
    constant: f64,
}

impl Quadratic {
    /// Build from `[a, b, c, d, e, f]` of `a x^2 + b xy + c y^2 + d x + e y + f = 0`
    pub fn new(coefficients: [f64; 6]) -> Self {
        let [a, b, c, d, e, f] = coefficients;
        Quadratic {
            quad: Matrix2::new(a, 0.5 * b, 0.5 * b, c),
            linear: NVector2::new(d, e),
            constant: f,
        }
    }

    /// Build from a slice, which must hold exactly six coefficients
    pub fn from_slice(coefficients: &[f64]) -> Result<Self> {
        let array: [f64; 6] = coefficients.try_into().map_err(|_| {
            GeometryError::InvalidInput(format!(
                "a conic needs 6 coefficients, got {}",
                coefficients.len()
            ))
        })?;
        Ok(Self::new(array))
    }

    /// Whether the second-order block is present
    pub fn is_quadratic(&self) -> bool {
        self.quad.iter().any(|v| v.abs() > TOLERANCE15)
    }

    /// Symmetric quadratic block
    pub fn quad(&self) -> &Matrix2<f64> {
        &self.quad
    }

    /// Linear block `(d, e)`
    pub fn linear(&self) -> &NVector2<f64> {
        &self.linear
    }

    /// Constant term `f`
    pub fn const_term(&self) -> f64 {
        self.constant
    }

    /// Coefficients `[a, b, c, d, e, f]`
    pub fn coefficients(&self) -> [f64; 6] {
        [
            self.quad[(0, 0)],
            2.0 * self.quad[(0, 1)],
            self.quad[(1, 1)],
            self.linear[0],
            self.linear[1],
            self.constant,
        ]
    }

    /// Evaluate the left-hand side at `p`
    pub fn evaluate(&self, p: Vector2) -> f64 {
        let v = NVector2::new(p.x, p.y);
        (v.transpose() * self.quad * v)[(0, 0)] + self.linear.dot(&v) + self.constant
    }

    /// Translate the curve by `offset`
    pub fn move_by(&self, offset: Vector2) -> Self {
        // substitute p -> p - v
        let v = NVector2::new(offset.x, offset.y);
        let qv = self.quad * v;
        Quadratic {
            quad: self.quad,
            linear: self.linear - qv * 2.0,
            constant: self.constant - self.linear.dot(&v) + v.dot(&qv),
        }
    }

    /// Rotate the curve around the origin by `angle`
    pub fn rotate(&self, angle: f64) -> Self {
        // substitute p -> R^T p
        let (s, c) = angle.sin_cos();
        let r = Matrix2::new(c, -s, s, c);
        Quadratic {
            quad: r * self.quad * r.transpose(),
            linear: r * self.linear,
            constant: self.constant,
        }
    }

    /// Apply the horizontal shear `x' = x + k y` to the curve
    pub fn shear(&self, k: f64) -> Self {
        // substitute p -> M p with M the inverse shear
        let m = Matrix2::new(1.0, -k, 0.0, 1.0);
        Quadratic {
            quad: m.transpose() * self.quad * m,
            linear: m.transpose() * self.linear,
            constant: self.constant,
        }
    }
}

impl fmt::Display for Quadratic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.coefficients();
        write!(f, "{a}*x^2 + {b}*xy + {c}*y^2 + {d}*x + {e}*y + {g} = 0")
    }
}
