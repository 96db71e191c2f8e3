//! Bounding box and presentation angles

use super::Ellipse;
use crate::math::angle::{self, is_angle_between, periods_count, rad2deg};
use crate::math::TOLERANCE_ANGLE;
use crate::types::{BoundingBox2D, Vector2};
use std::f64::consts::PI;

impl Ellipse {
    /// Recompute every derived value from the defining parameters: the arc
    /// flag, the bounding box, the degree mirrors and the cached length.
    ///
    /// A start/end pair within the angular tolerance of zero is snapped to
    /// the exact whole-ellipse sentinel first.
    pub fn calculate_borders(&mut self) {
        if self.raw {
            return;
        }
        if self.data.angle1.abs() < TOLERANCE_ANGLE && self.data.angle2.abs() < TOLERANCE_ANGLE {
            self.data.angle1 = 0.0;
            self.data.angle2 = 0.0;
        }
        self.derived.is_arc = self.data.angle1.is_normal() || self.data.angle2.is_normal();

        let mut bounds = match self.start_point().zip(self.end_point()) {
            Some((start, end)) => BoundingBox2D::from_corners(start, end),
            None => BoundingBox2D::empty(),
        };

        let major = self.data.major_axis;
        let ratio = self.data.ratio;
        // x extremes lie along the first direction, y extremes along the second
        bounds = self.merge_extremes(bounds, Vector2::new(major.x, -ratio * major.y));
        bounds = self.merge_extremes(bounds, Vector2::new(major.y, ratio * major.x));
        self.derived.bounds = bounds;

        let (a1, a2, reversed) = (self.data.angle1, self.data.angle2, self.data.reversed);
        self.derived.angle_degrees = rad2deg(self.angle());
        self.derived.start_angle_degrees = rad2deg(if reversed { a2 } else { a1 });
        self.derived.other_angle_degrees = rad2deg(if reversed { a1 } else { a2 });
        self.derived.angular_length = rad2deg(angle::angle_difference(a1, a2, reversed));
        if self.derived.angular_length.abs() < TOLERANCE_ANGLE
            && (!self.derived.is_arc || periods_count(a1, a2, reversed) != 0)
        {
            self.derived.angular_length = 360.0;
        }

        self.update_length();
    }

    /// Merge the curve points at parametric `direction.angle()` and its
    /// opposite, where they lie on the kept arc
    fn merge_extremes(&self, bounds: BoundingBox2D, direction: Vector2) -> BoundingBox2D {
        let a = direction.angle();
        [a, a + PI]
            .into_iter()
            .filter(|t| is_angle_between(*t, self.data.angle1, self.data.angle2, self.data.reversed))
            .fold(bounds, |acc, t| acc.merge_point(self.ellipse_point(t)))
    }

    /// Axis-aligned bounding box of the kept curve
    pub fn bounds(&self) -> BoundingBox2D {
        self.derived.bounds
    }

    pub fn min_v(&self) -> Vector2 {
        self.derived.bounds.min
    }

    pub fn max_v(&self) -> Vector2 {
        self.derived.bounds.max
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, TAU};

    fn assert_close(a: Vector2, b: Vector2) {
        assert!(a.distance(&b) < 1e-9, "{a} != {b}");
    }

    #[test]
    fn test_whole_ellipse_bounds() {
        let e = Ellipse::from_center_axis(Vector2::ZERO, Vector2::new(10.0, 0.0), 0.5);
        assert_close(e.min_v(), Vector2::new(-10.0, -5.0));
        assert_close(e.max_v(), Vector2::new(10.0, 5.0));
    }

    #[test]
    fn test_rotated_bounds() {
        // a = 5 along 45 degrees, b = 3: half extents sqrt((25 + 9) / 2)
        let axis = Vector2::polar(5.0, PI / 4.0);
        let e = Ellipse::from_center_axis(Vector2::new(1.0, 1.0), axis, 0.6);
        let h = 17.0_f64.sqrt();
        assert_close(e.min_v(), Vector2::new(1.0 - h, 1.0 - h));
        assert_close(e.max_v(), Vector2::new(1.0 + h, 1.0 + h));
    }

    #[test]
    fn test_quarter_arc_bounds() {
        let e = Ellipse::arc(Vector2::ZERO, Vector2::new(10.0, 0.0), 0.5, 0.0, FRAC_PI_2, false);
        assert_close(e.min_v(), Vector2::ZERO);
        assert_close(e.max_v(), Vector2::new(10.0, 5.0));

        // the complementary reversed arc covers the other three quadrants
        let e = Ellipse::arc(Vector2::ZERO, Vector2::new(10.0, 0.0), 0.5, 0.0, FRAC_PI_2, true);
        assert_close(e.min_v(), Vector2::new(-10.0, -5.0));
        assert_close(e.max_v(), Vector2::new(10.0, 5.0));
    }

    #[test]
    fn test_near_zero_angles_snap_to_whole() {
        let e = Ellipse::arc(Vector2::ZERO, Vector2::new(10.0, 0.0), 0.5, 1e-12, -1e-12, false);
        assert!(!e.is_elliptic_arc());
        assert_eq!(e.angle1(), 0.0);
        assert_eq!(e.angle2(), 0.0);
    }

    #[test]
    fn test_full_period_angular_length() {
        let e = Ellipse::arc(Vector2::ZERO, Vector2::new(10.0, 0.0), 0.5, 1.0, 1.0 + TAU, false);
        assert!(e.is_elliptic_arc());
        assert!((e.draw_params().angular_length - 360.0).abs() < 1e-9);
        let whole = Ellipse::from_center_axis(Vector2::ZERO, Vector2::new(10.0, 0.0), 0.5);
        assert_eq!(whole.draw_params().angular_length, 360.0);
    }

    #[test]
    fn test_raw_copy_skips_refresh() {
        let e = Ellipse::from_center_axis(Vector2::ZERO, Vector2::new(10.0, 0.0), 0.5);
        let mut raw = e.raw_copy();
        raw.set_center(Vector2::new(100.0, 0.0));
        raw.calculate_borders();
        assert_eq!(raw.bounds(), e.bounds());
    }
}
