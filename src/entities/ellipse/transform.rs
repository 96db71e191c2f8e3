//! Affine transforms and grip editing

use super::Ellipse;
use crate::entities::Entity;
use crate::math::{TOLERANCE, TOLERANCE2, TOLERANCE_ANGLE};
use crate::types::{BoundingBox2D, Vector2};
use std::f64::consts::TAU;

impl Ellipse {
    /// Keep the sweep within one turn: the end angle is moved to within a
    /// turn of the start angle in traversal direction. Coincident angles of
    /// an arc mean a full turn.
    fn fold_angles(&mut self) {
        let reversed = self.data.reversed;
        let (first, second) = if reversed {
            (self.data.angle2, self.data.angle1)
        } else {
            (self.data.angle1, self.data.angle2)
        };
        let mut second = first + (second - first) % TAU;
        if (first - second).abs() < TOLERANCE_ANGLE && first.abs() > TOLERANCE_ANGLE {
            second += TAU;
        }
        if reversed {
            self.data.angle1 = second;
        } else {
            self.data.angle2 = second;
        }
    }

    /// Fold the arc angles so the sweep never exceeds a full turn
    pub fn correct_angles(&mut self) {
        self.fold_angles();
        self.calculate_borders();
    }

    /// Reproject arc endpoints onto the current curve after a transform
    fn reproject_endpoints(&mut self, endpoints: Option<(Vector2, Vector2)>) {
        if let Some((start, end)) = endpoints {
            self.data.angle1 = self.ellipse_angle(start);
            self.data.angle2 = self.ellipse_angle(end);
            self.fold_angles();
        }
    }

    /// Move the start of the arc to the curve point nearest in angle to `pos`
    pub fn move_startpoint(&mut self, pos: Vector2) {
        self.data.angle1 = self.ellipse_angle(pos);
        self.correct_angles();
    }

    /// Move the end of the arc to the curve point nearest in angle to `pos`
    pub fn move_endpoint(&mut self, pos: Vector2) {
        self.data.angle2 = self.ellipse_angle(pos);
        self.correct_angles();
    }

    /// Apply the horizontal shear `x' = x + k·y`.
    ///
    /// The sheared curve is refitted from its conic; arc endpoints follow
    /// the shear. A degenerate ellipse is left unchanged.
    pub fn shear(&mut self, k: f64) {
        let Some(q) = self.quadratic() else {
            log::warn!("cannot shear a degenerate ellipse");
            return;
        };
        let endpoints = self.start_point().zip(self.end_point());
        let mut sheared = self.clone();
        if let Err(err) = sheared.create_from_quadratic_functional(&q.shear(k)) {
            log::warn!("shear by {k} failed: {err}");
            return;
        }
        if let Some((start, end)) = endpoints {
            sheared.reproject_endpoints(Some((start.shear(k), end.shear(k))));
            sheared.calculate_borders();
        }
        *self = sheared;
    }

    /// Drag the grip at `reference` by `offset`.
    ///
    /// Arc endpoints move along the curve; the center translates the
    /// ellipse; a focus keeps the other focus and the major radius fixed;
    /// major and minor points resize their axis. Anything else is ignored.
    pub fn move_ref(&mut self, reference: Vector2, offset: Vector2) {
        let near = |p: Vector2| reference.distance_squared(&p) < TOLERANCE_ANGLE;

        if let Some((start, end)) = self.start_point().zip(self.end_point()) {
            if near(start) {
                self.move_startpoint(start + offset);
                return;
            }
            if near(end) {
                self.move_endpoint(end + offset);
                return;
            }
        }
        if near(self.data.center) {
            self.data.center += offset;
            self.calculate_borders();
            return;
        }

        if self.data.ratio > 1.0 {
            self.switch_major_minor();
        }
        let foci = self.foci();
        for i in 0..2 {
            if !near(foci[i]) {
                continue;
            }
            let moved = foci[i] + offset;
            let center = self.data.center + offset * 0.5;
            let mut major = if self.data.major_axis.dot(&(foci[i] - self.data.center)) >= 0.0 {
                moved - center
            } else {
                center - moved
            };
            let d = self.major_radius();
            let c = 0.5 * moved.distance(&foci[1 - i]);
            let k = major.length();
            if k < TOLERANCE2 || d < TOLERANCE || c >= d - TOLERANCE {
                return;
            }
            major = major * (d / k);
            self.data.center = center;
            self.data.major_axis = major;
            self.data.ratio = (d * d - c * c).sqrt() / d;
            self.fold_angles();
            self.normalize_ratio();
            return;
        }

        if near(self.major_point()) {
            let major = self.data.major_axis + offset;
            let r = major.length();
            if r < TOLERANCE {
                return;
            }
            self.data.ratio = self.minor_radius() / r;
            self.data.major_axis = major;
            self.normalize_ratio();
            return;
        }
        if near(self.minor_point()) {
            let minor = self.minor_point() + offset;
            let r2 = self.data.major_axis.length_squared();
            if r2 < TOLERANCE2 {
                return;
            }
            let relative = minor - self.data.center;
            let projected = self.data.major_axis * (self.data.major_axis.dot(&relative) / r2);
            let r = (relative - projected).length();
            if r < TOLERANCE {
                return;
            }
            self.data.ratio = r / self.major_radius();
            self.normalize_ratio();
        }
    }

    /// Swap axes when the ratio exceeds one, then refresh
    fn normalize_ratio(&mut self) {
        if self.data.ratio > 1.0 {
            self.switch_major_minor();
        } else {
            self.calculate_borders();
        }
    }
}

impl Entity for Ellipse {
    fn bounding_box(&self) -> BoundingBox2D {
        self.bounds()
    }

    fn move_by(&mut self, offset: Vector2) {
        self.data.center += offset;
        self.calculate_borders();
    }

    fn rotate_by_vector(&mut self, center: Vector2, angle_vector: Vector2) {
        self.data.center = self.data.center.rotate_around(center, angle_vector);
        self.data.major_axis = self.data.major_axis.rotate_by(angle_vector);
        self.calculate_borders();
    }

    /// Anisotropic scale. The image of an ellipse under an axis-aligned
    /// scale is an ellipse whose axes follow from the scaled quadratic form;
    /// each negative factor flips the traversal direction.
    fn scale(&mut self, center: Vector2, factor: Vector2) {
        let endpoints = self
            .start_point()
            .zip(self.end_point())
            .map(|(s, e)| (s.scale_around(center, factor), e.scale_around(center, factor)));
        self.data.center = self.data.center.scale_around(center, factor);

        let a = self.major_radius();
        if a < TOLERANCE {
            self.calculate_borders();
            return;
        }
        let unit = self.data.major_axis / a;
        let (ct, st) = (unit.x, unit.y);
        let ct2 = ct * ct;
        let st2 = 1.0 - ct2;
        let kx2 = factor.x * factor.x;
        let ky2 = factor.y * factor.y;
        let b = self.data.ratio * a;
        let c_a = 0.5 * a * a * (kx2 * ct2 + ky2 * st2);
        let c_b = 0.5 * b * b * (kx2 * st2 + ky2 * ct2);
        let c_c = a * b * ct * st * (ky2 - kx2);
        if factor.x < 0.0 {
            self.data.reversed = !self.data.reversed;
        }
        if factor.y < 0.0 {
            self.data.reversed = !self.data.reversed;
        }

        // parametric angle of the new major vertex on the old curve
        let vp = Vector2::new(c_a - c_b, c_c);
        let vertex = Vector2::new(a, b)
            .scale(Vector2::from_angle(0.5 * vp.angle()))
            .rotate_by(unit)
            .scale(factor);
        self.data.major_axis = vertex;
        let sum = c_a + c_b;
        let diff = vp.length();
        self.data.ratio = ((sum - diff).max(0.0) / (sum + diff)).sqrt();
        self.reproject_endpoints(endpoints);
        self.calculate_borders();
    }

    fn mirror(&mut self, axis1: Vector2, axis2: Vector2) {
        let endpoints = self
            .start_point()
            .zip(self.end_point())
            .map(|(s, e)| (s.mirror(axis1, axis2), e.mirror(axis1, axis2)));
        let center = self.data.center.mirror(axis1, axis2);
        let major_point = self.major_point().mirror(axis1, axis2);
        self.data.center = center;
        self.data.major_axis = major_point - center;
        self.data.reversed = !self.data.reversed;
        self.reproject_endpoints(endpoints);
        self.calculate_borders();
    }

    fn nearest_point_on_entity(&self, coord: Vector2, on_entity: bool) -> Option<(Vector2, f64)> {
        self.nearest_point(coord, on_entity)
    }

    fn entity_type(&self) -> &'static str {
        "ELLIPSE"
    }
}
