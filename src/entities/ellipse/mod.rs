//! Ellipse and elliptic arc entity
//!
//! An ellipse is stored as a center, the vector from the center to the end
//! of the major axis, and the minor/major ratio. An arc additionally carries
//! two parametric angles: `θ` maps to
//! `center + rotate((a·cosθ, a·ratio·sinθ), angle)`, which is not the polar
//! angle seen from the center unless the ellipse is a circle. Both angles
//! exactly zero mean "whole ellipse".
//!
//! Bounding box, degree mirrors and arc length are derived state. Every
//! mutating method refreshes them before returning; the raw field setters
//! leave that to the caller, who batches writes and then calls
//! [`Ellipse::calculate_borders`].

mod borders;
mod construct;
mod length;
mod nearest;
mod tangent;
mod transform;
mod trim;

pub use construct::EllipseConstruction;
pub use trim::Ending;

use crate::math::angle::{self, correct_angle, is_angle_between};
use crate::math::{Quadratic, TOLERANCE, TOLERANCE2, TOLERANCE_ANGLE};
use crate::types::{BoundingBox2D, Vector2};
use std::f64::consts::{PI, TAU};
use std::fmt;

/// Defining parameters of an ellipse or elliptic arc
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EllipseData {
    /// Center point
    pub center: Vector2,
    /// Vector from the center to the major axis endpoint
    pub major_axis: Vector2,
    /// Minor radius divided by major radius
    pub ratio: f64,
    /// Parametric start angle
    pub angle1: f64,
    /// Parametric end angle
    pub angle2: f64,
    /// Traverse clockwise from `angle1` to `angle2`
    pub reversed: bool,
}

impl EllipseData {
    /// Create the parameters of an elliptic arc
    pub fn new(
        center: Vector2,
        major_axis: Vector2,
        ratio: f64,
        angle1: f64,
        angle2: f64,
        reversed: bool,
    ) -> Self {
        EllipseData {
            center,
            major_axis,
            ratio,
            angle1,
            angle2,
            reversed,
        }
    }

    /// Create the parameters of a whole ellipse
    pub fn whole(center: Vector2, major_axis: Vector2, ratio: f64) -> Self {
        Self::new(center, major_axis, ratio, 0.0, 0.0, false)
    }
}

impl Default for EllipseData {
    fn default() -> Self {
        Self::whole(Vector2::ZERO, Vector2::UNIT_X, 1.0)
    }
}

impl fmt::Display for EllipseData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({} {} {} {},{})",
            self.center, self.major_axis, self.ratio, self.angle1, self.angle2
        )
    }
}

/// Values recomputed from [`EllipseData`] by `calculate_borders`
#[derive(Debug, Clone, Copy, PartialEq, Default)]
struct DerivedState {
    is_arc: bool,
    angle_degrees: f64,
    start_angle_degrees: f64,
    other_angle_degrees: f64,
    angular_length: f64,
    bounds: BoundingBox2D,
    length: f64,
}

/// Everything a renderer needs to draw the entity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawParams {
    pub center: Vector2,
    pub major_radius: f64,
    pub ratio: f64,
    /// Rotation of the major axis in degrees
    pub angle_degrees: f64,
    /// Angle at which drawing starts, in degrees
    pub start_angle_degrees: f64,
    /// Angle at which drawing stops, in degrees
    pub other_angle_degrees: f64,
    /// Angular sweep in degrees
    pub angular_length: f64,
    pub reversed: bool,
    pub is_arc: bool,
}

/// An ellipse or elliptic arc
#[derive(Debug, Clone, PartialEq)]
pub struct Ellipse {
    data: EllipseData,
    derived: DerivedState,
    /// A raw copy never refreshes its derived state. Length computation works
    /// on one so that normalizing the copy cannot recurse into
    /// `calculate_borders`.
    raw: bool,
}

impl Ellipse {
    /// Create an ellipse from its parameters
    pub fn new(data: EllipseData) -> Self {
        let mut ellipse = Ellipse {
            data,
            derived: DerivedState::default(),
            raw: false,
        };
        ellipse.calculate_borders();
        ellipse
    }

    /// Create a whole ellipse
    pub fn from_center_axis(center: Vector2, major_axis: Vector2, ratio: f64) -> Self {
        Self::new(EllipseData::whole(center, major_axis, ratio))
    }

    /// Create an elliptic arc
    pub fn arc(
        center: Vector2,
        major_axis: Vector2,
        ratio: f64,
        angle1: f64,
        angle2: f64,
        reversed: bool,
    ) -> Self {
        Self::new(EllipseData::new(center, major_axis, ratio, angle1, angle2, reversed))
    }

    fn raw_copy(&self) -> Ellipse {
        Ellipse {
            raw: true,
            ..self.clone()
        }
    }

    pub fn data(&self) -> &EllipseData {
        &self.data
    }

    pub fn center(&self) -> Vector2 {
        self.data.center
    }

    pub fn major_axis(&self) -> Vector2 {
        self.data.major_axis
    }

    pub fn ratio(&self) -> f64 {
        self.data.ratio
    }

    pub fn angle1(&self) -> f64 {
        self.data.angle1
    }

    pub fn angle2(&self) -> f64 {
        self.data.angle2
    }

    pub fn is_reversed(&self) -> bool {
        self.data.reversed
    }

    pub fn set_center(&mut self, center: Vector2) {
        self.data.center = center;
    }

    pub fn set_major_axis(&mut self, major_axis: Vector2) {
        self.data.major_axis = major_axis;
    }

    pub fn set_ratio(&mut self, ratio: f64) {
        self.data.ratio = ratio;
    }

    pub fn set_angle1(&mut self, angle1: f64) {
        self.data.angle1 = angle1;
    }

    pub fn set_angle2(&mut self, angle2: f64) {
        self.data.angle2 = angle2;
    }

    pub fn set_reversed(&mut self, reversed: bool) {
        self.data.reversed = reversed;
    }

    /// Length of the major semi-axis
    pub fn major_radius(&self) -> f64 {
        self.data.major_axis.length()
    }

    /// Length of the minor semi-axis
    pub fn minor_radius(&self) -> f64 {
        self.major_radius() * self.data.ratio
    }

    /// Rotation of the major axis, in `[0, 2π)`
    pub fn angle(&self) -> f64 {
        self.data.major_axis.angle()
    }

    /// Whether the entity is an arc rather than a whole ellipse
    pub fn is_elliptic_arc(&self) -> bool {
        self.derived.is_arc
    }

    /// Point at parametric angle `theta`
    pub fn ellipse_point(&self, theta: f64) -> Vector2 {
        let ra = self.major_radius();
        Vector2::new(ra * theta.cos(), ra * self.data.ratio * theta.sin()).rotate(self.angle())
            + self.data.center
    }

    /// Parametric angle of `pos`, in `[0, 2π)`; inverse of
    /// [`ellipse_point`](Self::ellipse_point) for points on the curve
    pub fn ellipse_angle(&self, pos: Vector2) -> f64 {
        let mut m = (pos - self.data.center).rotate(-self.angle());
        m.x *= self.data.ratio;
        m.angle()
    }

    /// Start point of an arc
    pub fn start_point(&self) -> Option<Vector2> {
        self.is_elliptic_arc()
            .then(|| self.ellipse_point(self.data.angle1))
    }

    /// End point of an arc
    pub fn end_point(&self) -> Option<Vector2> {
        self.is_elliptic_arc()
            .then(|| self.ellipse_point(self.data.angle2))
    }

    /// End of the major axis
    pub fn major_point(&self) -> Vector2 {
        self.data.center + self.data.major_axis
    }

    /// End of the minor axis, a quarter turn counter-clockwise from the
    /// major point
    pub fn minor_point(&self) -> Vector2 {
        self.data.center + self.data.major_axis.perpendicular() * self.data.ratio
    }

    /// The two foci; they coincide with the center for a circle
    pub fn foci(&self) -> [Vector2; 2] {
        let mut e = self.raw_copy();
        if e.data.ratio > 1.0 {
            e.switch_major_minor();
        }
        let vp = e.data.major_axis * (1.0 - e.data.ratio * e.data.ratio).max(0.0).sqrt();
        [self.data.center + vp, self.data.center - vp]
    }

    /// Swap the naming of the major and minor axes, keeping the curve and
    /// its endpoints in place. Fails for a ratio of about zero.
    pub fn switch_major_minor(&mut self) -> bool {
        if self.data.ratio.abs() < TOLERANCE {
            return false;
        }
        let endpoints = self.start_point().zip(self.end_point());
        let vp = self.data.major_axis;
        self.data.major_axis = Vector2::new(-self.data.ratio * vp.y, self.data.ratio * vp.x);
        self.data.ratio = 1.0 / self.data.ratio;
        if let Some((start, end)) = endpoints {
            self.data.angle1 = self.ellipse_angle(start);
            self.data.angle2 = self.ellipse_angle(end);
        }
        self.calculate_borders();
        true
    }

    /// Points a user can grab: endpoints of an arc, center, foci, and the
    /// major and minor points
    pub fn ref_points(&self) -> Vec<Vector2> {
        let mut points = Vec::with_capacity(7);
        if let Some((start, end)) = self.start_point().zip(self.end_point()) {
            points.push(start);
            points.push(end);
        }
        points.push(self.data.center);
        points.extend(self.foci());
        points.push(self.major_point());
        points.push(self.minor_point());
        points
    }

    /// Whichever arc endpoint is nearer to `coord`, with its distance
    pub fn nearest_endpoint(&self, coord: Vector2) -> Option<(Vector2, f64)> {
        let (start, end) = self.start_point().zip(self.end_point())?;
        let d1 = start.distance_squared(&coord);
        let d2 = end.distance_squared(&coord);
        if d2 < d1 {
            Some((end, d2.sqrt()))
        } else {
            Some((start, d1.sqrt()))
        }
    }

    /// Whether `coord` lies on the kept part of the curve, with `tolerance`
    /// applied to the normalized implicit equation
    pub fn is_point_on_entity(&self, coord: Vector2, tolerance: f64) -> bool {
        let a = self.major_radius();
        let b = self.minor_radius();
        let vp = (coord - self.data.center).rotate(-self.angle());
        if a < TOLERANCE {
            return vp.x.abs() < TOLERANCE && vp.y.abs() < b;
        }
        if b < TOLERANCE {
            return vp.y.abs() < TOLERANCE && vp.x.abs() < a;
        }
        let vp = Vector2::new(vp.x / a, vp.y / b);
        if (vp.length_squared() - 1.0).abs() > tolerance.abs() {
            return false;
        }
        is_angle_between(vp.angle(), self.data.angle1, self.data.angle2, self.data.reversed)
    }

    /// Parametric sweep in radians; a full turn for a whole ellipse
    pub fn angle_length(&self) -> f64 {
        let (a, b) = if self.data.reversed {
            (self.data.angle2, self.data.angle1)
        } else {
            (self.data.angle1, self.data.angle2)
        };
        let sweep = correct_angle(b - a);
        if angle::remainder(sweep, TAU).abs() < TOLERANCE_ANGLE {
            TAU
        } else {
            sweep
        }
    }

    /// Polyline-style bulge of the sweep, negative when reversed
    pub fn bulge(&self) -> f64 {
        let bulge = (self.angle_length().abs() / 4.0).tan();
        if self.data.reversed {
            -bulge
        } else {
            bulge
        }
    }

    /// Line integral `∮ x dy` along the entity, for contour area by Green's
    /// theorem
    pub fn area_line_integral(&self) -> f64 {
        let a = self.major_radius();
        let b = self.minor_radius();
        let (Some(start), Some(end)) = (self.start_point(), self.end_point()) else {
            return PI * a * b;
        };
        let ab = a * b;
        let r2 = a * a + b * b;
        let rotation = self.angle();
        let (sin2r, cos2r) = (2.0 * rotation).sin_cos();
        // antiderivative without the term linear in t
        let periodic = |t: f64| -0.25 * r2 * sin2r * t.sin().powi(2) + 0.25 * ab * cos2r * (2.0 * t).sin();
        let cx = self.data.center.x;
        let f_start = cx * start.y + periodic(self.data.angle1);
        let f_end = cx * end.y + periodic(self.data.angle2);
        let linear = 0.5 * ab * self.angle_length();
        if self.data.reversed {
            f_end - f_start - linear
        } else {
            f_end - f_start + linear
        }
    }

    /// Swap the endpoints of an arc, keeping the same curve
    pub fn revert_direction(&mut self) {
        if self.is_elliptic_arc() {
            std::mem::swap(&mut self.data.angle1, &mut self.data.angle2);
            self.data.reversed = !self.data.reversed;
            self.calculate_borders();
        }
    }

    /// The whole ellipse as a general conic; `None` when an axis is degenerate
    pub fn quadratic(&self) -> Option<Quadratic> {
        let a2 = self.data.major_axis.length_squared();
        let b2 = self.data.ratio * self.data.ratio * a2;
        if a2 < TOLERANCE2 || b2 < TOLERANCE2 {
            return None;
        }
        Some(
            Quadratic::new([1.0 / a2, 0.0, 1.0 / b2, 0.0, 0.0, -1.0])
                .rotate(self.angle())
                .move_by(self.data.center),
        )
    }

    /// Rendering parameters
    pub fn draw_params(&self) -> DrawParams {
        DrawParams {
            center: self.data.center,
            major_radius: self.major_radius(),
            ratio: self.data.ratio,
            angle_degrees: self.derived.angle_degrees,
            start_angle_degrees: self.derived.start_angle_degrees,
            other_angle_degrees: self.derived.other_angle_degrees,
            angular_length: self.derived.angular_length,
            reversed: self.data.reversed,
            is_arc: self.derived.is_arc,
        }
    }
}

impl Default for Ellipse {
    fn default() -> Self {
        Self::new(EllipseData::default())
    }
}

impl fmt::Display for Ellipse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ellipse: {}", self.data)
    }
}
