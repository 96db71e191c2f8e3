//! Tolerance-based assertions for scalars, points and ellipses.

#![allow(dead_code)]

use ellipse_kernel::{Ellipse, Line, Vector2};

/// Default tolerance for floating-point comparisons.
pub const TOL: f64 = 1e-9;

/// Check approximate equality of two f64 values within `tol`.
pub fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() < tol
}

/// Assert two f64 values are approximately equal.
pub fn assert_f64_eq(a: f64, b: f64, tol: f64) {
    assert!(
        approx_eq(a, b, tol),
        "f64 mismatch: {a} vs {b} (delta={}, tol={tol})",
        (a - b).abs()
    );
}

/// Assert two points are approximately equal.
pub fn assert_vec2_eq(a: Vector2, b: Vector2, tol: f64) {
    assert!(a.distance(&b) < tol, "Vector2 mismatch: {a} vs {b} tol={tol}");
}

/// Whether `p` satisfies the implicit equation of the whole ellipse
pub fn on_curve(e: &Ellipse, p: Vector2, tol: f64) -> bool {
    e.quadratic().map_or(false, |q| q.evaluate(p).abs() < tol)
}

/// Signed gap between the support distance of `e` along the normal of
/// `line` and the distance of the line itself; zero for a tangent line
pub fn tangency_error(e: &Ellipse, line: &Line) -> f64 {
    let d = line.direction().normalize();
    let n = d.perpendicular();
    let a = e.major_radius();
    let b = e.minor_radius();
    let u = e.major_axis().normalize();
    let v = u.perpendicular();
    let support = ((a * n.dot(&u)).powi(2) + (b * n.dot(&v)).powi(2)).sqrt();
    (line.start - e.center()).dot(&n).abs() - support
}
