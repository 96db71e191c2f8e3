//! Circle tangent computations
//!
//! The ellipse maps itself onto a circle of its major radius centered at the
//! origin and reuses these; there is no circle entity.

use crate::math::{TOLERANCE, TOLERANCE2};
use crate::types::Vector2;

/// Points where the tangents from `point` touch the origin-centered circle of
/// the given radius.
///
/// Empty for a degenerate circle or a point strictly inside; a point on the
/// circle is its own tangent point.
pub fn tangent_points(radius: f64, point: Vector2) -> Vec<Vector2> {
    let r2 = radius * radius;
    if r2 < TOLERANCE2 {
        return Vec::new();
    }
    let c2 = point.length_squared();
    if c2 < r2 - 2.0 * TOLERANCE * radius {
        return Vec::new();
    }
    if c2 > r2 + 2.0 * TOLERANCE * radius {
        let along = point * (r2 / c2);
        let across = point.perpendicular() * (radius * (c2 - r2).sqrt() / c2);
        return vec![along + across, along - across];
    }
    vec![point]
}

/// Counter-clockwise tangent direction of the origin-centered circle at
/// `point`; `None` for a degenerate circle
pub fn tangent_direction(radius: f64, point: Vector2) -> Option<Vector2> {
    if radius < TOLERANCE {
        return None;
    }
    Some(point.perpendicular())
}
