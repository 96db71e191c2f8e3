//! Angle-domain helpers
//!
//! Angles are radians. Arc bounds are always given as a `(a1, a2)` pair plus
//! a `reversed` flag: unreversed arcs run counter-clockwise from `a1` to `a2`,
//! reversed arcs run clockwise.

use super::TOLERANCE_ANGLE;
use std::f64::consts::{PI, TAU};

/// IEEE style remainder: `x - n*y` with `n` the nearest integer to `x/y`
/// (ties to even), so the result lies in `[-y/2, y/2]`.
pub fn remainder(x: f64, y: f64) -> f64 {
    x - (x / y).round_ties_even() * y
}

/// Fold an angle into `[0, 2π)`
pub fn correct_angle(a: f64) -> f64 {
    let r = a.rem_euclid(TAU);
    if r >= TAU {
        0.0
    } else {
        r
    }
}

/// Counter-clockwise sweep from `a1` to `a2` in `[0, 2π)`; clockwise when
/// `reversed`
pub fn angle_difference(a1: f64, a2: f64, reversed: bool) -> f64 {
    if reversed {
        correct_angle(a1 - a2)
    } else {
        correct_angle(a2 - a1)
    }
}

/// Unsigned smallest separation between two directions, in `[0, π]`
pub fn angle_difference_unsigned(a1: f64, a2: f64) -> f64 {
    remainder(a1 - a2, TAU).abs()
}

/// Whether `a` lies on the arc from `a1` to `a2`.
///
/// Coincident bounds describe a full turn, so every angle is inside.
pub fn is_angle_between(a: f64, a1: f64, a2: f64, reversed: bool) -> bool {
    let (a1, a2) = if reversed { (a2, a1) } else { (a1, a2) };
    if angle_difference_unsigned(a2, a1) < TOLERANCE_ANGLE {
        return true;
    }
    let tol = 0.5 * TOLERANCE_ANGLE;
    let sweep = correct_angle(a2 - a1) + tol;
    sweep >= correct_angle(a - a1) || sweep >= correct_angle(a2 - a)
}

/// Whether two angles point the same way within `tolerance`
pub fn is_same_direction(a1: f64, a2: f64, tolerance: f64) -> bool {
    angle_difference_unsigned(a1, a2) < tolerance
}

/// Number of whole turns separating `a1` from `a2` in traversal direction
pub fn periods_count(a1: f64, a2: f64, reversed: bool) -> i32 {
    let span = if reversed { a1 - a2 } else { a2 - a1 };
    ((span + TOLERANCE_ANGLE) / TAU).floor() as i32
}

pub fn rad2deg(a: f64) -> f64 {
    a * 180.0 / PI
}

pub fn deg2rad(a: f64) -> f64 {
    a * PI / 180.0
}
