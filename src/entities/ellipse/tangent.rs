//! Tangents
//!
//! Scaling the minor axis by `1/ratio` maps the ellipse onto a circle of the
//! major radius and preserves tangency, so tangent points and directions are
//! computed on that circle and mapped back.

use super::Ellipse;
use crate::entities::circle;
use crate::math::angle::correct_angle;
use crate::math::TOLERANCE;
use crate::types::Vector2;

impl Ellipse {
    /// Point in the circle frame: centered, unrotated, minor axis stretched
    fn to_circle_frame(&self, point: Vector2) -> Vector2 {
        let local = (point - self.data.center).rotate(-self.angle());
        Vector2::new(local.x, local.y / self.data.ratio)
    }

    fn from_circle_frame(&self, vector: Vector2) -> Vector2 {
        Vector2::new(vector.x, vector.y * self.data.ratio).rotate(self.angle())
    }

    /// Points where tangent lines through `point` touch the whole ellipse.
    ///
    /// Two points for an outside `point`, the point itself when it is on the
    /// curve, none when inside or for a degenerate ellipse.
    pub fn tangent_points(&self, point: Vector2) -> Vec<Vector2> {
        let a = self.major_radius();
        if a < TOLERANCE || self.data.ratio < TOLERANCE {
            return Vec::new();
        }
        circle::tangent_points(a, self.to_circle_frame(point))
            .into_iter()
            .map(|p| self.from_circle_frame(p) + self.data.center)
            .collect()
    }

    /// Tangent direction at `point` (assumed on the curve), following the
    /// traversal direction of the arc
    pub fn tangent_direction(&self, point: Vector2) -> Option<Vector2> {
        let a = self.major_radius();
        if a < TOLERANCE || self.data.ratio < TOLERANCE {
            return None;
        }
        let direction = circle::tangent_direction(a, self.to_circle_frame(point))?;
        let direction = self.from_circle_frame(direction);
        Some(if self.data.reversed { -direction } else { direction })
    }

    /// Direction of the tangent at the start point, pointing into the arc
    pub fn direction1(&self) -> f64 {
        let (s, c) = self.data.angle1.sin_cos();
        let vp = if self.data.reversed {
            Vector2::new(s, -self.data.ratio * c)
        } else {
            Vector2::new(-s, self.data.ratio * c)
        };
        correct_angle(vp.angle() + self.angle())
    }

    /// Direction of the tangent at the end point, pointing back into the arc
    pub fn direction2(&self) -> f64 {
        let (s, c) = self.data.angle2.sin_cos();
        let vp = if self.data.reversed {
            Vector2::new(-s, self.data.ratio * c)
        } else {
            Vector2::new(s, -self.data.ratio * c)
        };
        correct_angle(vp.angle() + self.angle())
    }

    /// Tangent point of the line `u·x + v·y = 1`, given as `(u, v)`.
    ///
    /// Of the two points with a tangent parallel to the line, returns the
    /// one that satisfies the line equation best.
    pub fn dual_line_tangent_point(&self, line: Vector2) -> Vector2 {
        let rotation = self.angle();
        let uv = line.rotate(-rotation);
        let t = (self.data.ratio * uv.y).atan2(uv.x);
        let ra = self.major_radius();
        let vp = Vector2::new(ra * t.cos(), ra * self.data.ratio * t.sin()).rotate(rotation);

        let p0 = self.data.center + vp;
        let p1 = self.data.center - vp;
        let residual = |p: Vector2| (line.dot(&p) - 1.0).abs();
        if residual(p0) < residual(p1) {
            p0
        } else {
            p1
        }
    }
}
