//! Ellipse fixtures used across integration tests.

#![allow(dead_code)]

use ellipse_kernel::{Ellipse, Line, Vector2};
use std::f64::consts::FRAC_PI_2;

/// The 10 x 5 reference ellipse at the origin
pub fn reference_ellipse() -> Ellipse {
    Ellipse::from_center_axis(Vector2::ZERO, Vector2::new(10.0, 0.0), 0.5)
}

/// First quadrant of the reference ellipse, counter-clockwise
pub fn quarter_arc() -> Ellipse {
    Ellipse::arc(Vector2::ZERO, Vector2::new(10.0, 0.0), 0.5, 0.0, FRAC_PI_2, false)
}

/// A rotated, off-center ellipse without special symmetry
pub fn skewed_ellipse() -> Ellipse {
    Ellipse::from_center_axis(Vector2::new(3.0, -2.0), Vector2::polar(7.0, 0.7), 0.35)
}

/// Evenly spaced parametric samples of the whole curve
pub fn samples(e: &Ellipse, count: usize) -> Vec<Vector2> {
    (0..count)
        .map(|i| e.ellipse_point(std::f64::consts::TAU * i as f64 / count as f64))
        .collect()
}

/// Tangent line of `e` at parametric angle `theta`
pub fn tangent_line(e: &Ellipse, theta: f64) -> Line {
    let p = e.ellipse_point(theta);
    // the conjugate radius is parallel to the tangent
    let d = e.ellipse_point(theta + std::f64::consts::FRAC_PI_2) - e.center();
    Line::new(p - d, p + d)
}

/// The four sides of a closed polygon given by its corners
pub fn sides(corners: [Vector2; 4]) -> [Line; 4] {
    [0, 1, 2, 3].map(|i| Line::new(corners[i], corners[(i + 1) % 4]))
}
