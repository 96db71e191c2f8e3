//! Arc length
//!
//! With `k² = 1 − ratio²` the arc length element is
//! `a·sqrt(1 − k²·cos²θ) dθ`. Shifting by a quarter turn turns this into the
//! standard integrand of `E(k, φ)`, so the length between two parametric
//! angles is a difference of incomplete elliptic integrals plus `2·E(k)`
//! for every half turn in between.

use super::Ellipse;
use crate::math::angle::correct_angle;
use crate::math::elliptic::{complete_second_kind, incomplete_second_kind};
use crate::math::TOLERANCE_ANGLE;
use std::f64::consts::{FRAC_PI_2, PI, TAU};

impl Ellipse {
    /// Curve length from parametric angle `x1` counter-clockwise to `x2`.
    ///
    /// Both angles are folded into `[0, 2π)`; when `x2` does not lie ahead
    /// of `x1` a full turn is added, so equal angles measure the whole
    /// ellipse. Expects the normal form `ratio <= 1`.
    pub fn ellipse_length(&self, x1: f64, x2: f64) -> f64 {
        let a = self.major_radius();
        let ratio = self.data.ratio;
        let k = (1.0 - ratio * ratio).max(0.0).sqrt();

        let x1 = correct_angle(x1);
        let mut x2 = correct_angle(x2);
        if x2 < x1 + TOLERANCE_ANGLE {
            x2 += TAU;
        }

        let n1 = (x1 / PI).floor();
        let n2 = (x2 / PI).floor();
        let mut ret = if n2 > n1 {
            2.0 * (n2 - n1) * complete_second_kind(k)
        } else {
            0.0
        };
        let r1 = x1 - n1 * PI;
        let r2 = x2 - n2 * PI;
        if (r2 - r1).abs() > TOLERANCE_ANGLE {
            ret += incomplete_second_kind(k, r2 - FRAC_PI_2) - incomplete_second_kind(k, r1 - FRAC_PI_2);
        }
        a * ret
    }

    /// Curve length from the traversal start of the arc to parametric angle
    /// `x2`
    pub fn ellipse_length_from_start(&self, x2: f64) -> f64 {
        if self.data.reversed {
            self.ellipse_length(x2, self.data.angle1)
        } else {
            self.ellipse_length(self.data.angle1, x2)
        }
    }

    /// Cached length of the kept curve
    pub fn length(&self) -> f64 {
        self.derived.length
    }

    /// Refresh the cached length from a normalized raw copy
    pub(super) fn update_length(&mut self) {
        let mut e = self.raw_copy();
        if e.data.ratio > 1.0 {
            e.switch_major_minor();
        }
        if e.data.reversed {
            std::mem::swap(&mut e.data.angle1, &mut e.data.angle2);
            e.data.reversed = false;
        }
        self.derived.length = e.ellipse_length(e.data.angle1, e.data.angle2);
    }
}
