//! Concrete ellipse scenarios: measurements, snapping, fitting and editing
//! against known reference values

mod common;

use common::builders::*;
use common::comparison::*;
use ellipse_kernel::math::elliptic::complete_second_kind;
use ellipse_kernel::{Ellipse, Ending, Entity, GeometryError, Line, Vector2};
use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

// ===========================================================================
// Geometry model
// ===========================================================================

#[test]
fn test_whole_reference_ellipse() {
    common::init_logging();
    let e = reference_ellipse();
    assert!(!e.is_elliptic_arc());
    assert_f64_eq(e.major_radius(), 10.0, TOL);
    assert_f64_eq(e.minor_radius(), 5.0, TOL);
    assert_vec2_eq(e.min_v(), Vector2::new(-10.0, -5.0), TOL);
    assert_vec2_eq(e.max_v(), Vector2::new(10.0, 5.0), TOL);

    let c = 75.0_f64.sqrt();
    let [f1, f2] = e.foci();
    assert_vec2_eq(f1, Vector2::new(c, 0.0), TOL);
    assert_vec2_eq(f2, Vector2::new(-c, 0.0), TOL);
    assert_f64_eq(f1.x, 8.660254037844386, 1e-12);

    assert!(e.start_point().is_none());
    assert!(e.end_point().is_none());
    assert!(e.middle_point().is_none());
}

#[test]
fn test_quarter_arc() {
    let arc = quarter_arc();
    assert!(arc.is_elliptic_arc());
    assert_vec2_eq(arc.start_point().unwrap(), Vector2::new(10.0, 0.0), TOL);
    assert_vec2_eq(arc.end_point().unwrap(), Vector2::new(0.0, 5.0), TOL);
    assert_vec2_eq(arc.min_v(), Vector2::ZERO, TOL);
    assert_vec2_eq(arc.max_v(), Vector2::new(10.0, 5.0), TOL);

    let params = arc.draw_params();
    assert!(params.is_arc);
    assert_f64_eq(params.start_angle_degrees, 0.0, TOL);
    assert_f64_eq(params.other_angle_degrees, 90.0, TOL);
    assert_f64_eq(params.angular_length, 90.0, TOL);
}

#[test]
fn test_rotated_bounds() {
    let e = Ellipse::from_center_axis(Vector2::new(1.0, 1.0), Vector2::polar(10.0, FRAC_PI_4), 0.5);
    let half = 62.5_f64.sqrt();
    assert_vec2_eq(e.min_v(), Vector2::new(1.0 - half, 1.0 - half), 1e-9);
    assert_vec2_eq(e.max_v(), Vector2::new(1.0 + half, 1.0 + half), 1e-9);
}

// ===========================================================================
// Arc length
// ===========================================================================

#[test]
fn test_reference_lengths() {
    let e = reference_ellipse();
    assert_f64_eq(e.length(), 48.4422411027384, 1e-10);
    assert_f64_eq(e.length(), 40.0 * complete_second_kind(0.75_f64.sqrt()), 1e-10);
    assert_f64_eq(quarter_arc().length(), 12.1105602756846, 1e-10);
    assert_f64_eq(e.ellipse_length(0.0, 0.3), 1.56389480895273, 1e-10);
    assert_f64_eq(e.ellipse_length(0.5, 2.0), 13.533474298987, 1e-9);
}

#[test]
fn test_whole_length_independent_of_start() {
    let e = reference_ellipse();
    for start in [0.0, 0.4, 1.7, 3.0, 5.5] {
        assert_f64_eq(e.ellipse_length(start, start), e.length(), 1e-9);
    }
}

// ===========================================================================
// Snapping
// ===========================================================================

#[test]
fn test_nearest_point_inside_evolute() {
    let e = reference_ellipse();
    let (p, d) = e.nearest_point_on_entity(Vector2::new(3.0, 0.0), false).unwrap();
    assert_f64_eq(d, 4.69041575982343, 1e-9);
    assert_f64_eq(p.x, 4.0, 1e-9);
    assert!(on_curve(&e, p, 1e-9));
}

#[test]
fn test_nearest_point_on_arc_clamps_to_endpoint() {
    let arc = quarter_arc();
    let (p, d) = arc.nearest_point_on_entity(Vector2::new(5.0, -10.0), true).unwrap();
    assert_vec2_eq(p, Vector2::new(10.0, 0.0), TOL);
    assert_f64_eq(d, Vector2::new(5.0, -10.0).distance(&Vector2::new(10.0, 0.0)), TOL);
}

#[test]
fn test_nearest_dist_never_extrapolates() {
    let arc = quarter_arc();
    let total = arc.length();
    let near_start = Vector2::new(11.0, 0.0);
    let (p, _) = arc.nearest_dist(total + 3.0, near_start).unwrap();
    assert_vec2_eq(p, Vector2::new(10.0, 0.0), TOL);
    let (p, _) = arc.nearest_dist(total, Vector2::new(0.0, 6.0)).unwrap();
    assert_vec2_eq(p, Vector2::new(0.0, 5.0), TOL);
    assert!(arc.nearest_dist(-(total + 1.0), near_start).is_none());
}

#[test]
fn test_nearest_dist_trims_by_length() {
    let arc = quarter_arc();
    let (p, _) = arc.nearest_dist(-2.0, Vector2::new(11.0, 0.0)).unwrap();
    let theta = arc.ellipse_angle(p);
    assert_f64_eq(arc.ellipse_length(0.0, theta), 2.0, 1e-9);
}

#[test]
fn test_middle_and_center_snaps() {
    let arc = quarter_arc();
    let mid = arc.middle_point().unwrap();
    assert!(arc.is_point_on_entity(mid, 1e-9));
    // halfway by polar angle, not by length
    assert_f64_eq(mid.x, mid.y, TOL);

    let e = reference_ellipse();
    let (focus, _) = e.nearest_center(Vector2::new(9.0, 1.0));
    assert_vec2_eq(focus, Vector2::new(75.0_f64.sqrt(), 0.0), TOL);
}

#[test]
fn test_orthogonal_snap() {
    let e = reference_ellipse();
    let normal = Line::new(Vector2::new(0.0, 20.0), Vector2::new(1.0, 20.0));
    // tangents perpendicular to a horizontal line touch at (±10, 0)
    let p = e.nearest_orth_tan(Vector2::new(12.0, 0.0), &normal, false).unwrap();
    assert_vec2_eq(p, Vector2::new(10.0, 0.0), TOL);
}

// ===========================================================================
// Fitting
// ===========================================================================

#[test]
fn test_four_point_round_trip() {
    common::init_logging();
    let target = Ellipse::from_center_axis(Vector2::new(1.0, 2.0), Vector2::new(4.0, 0.0), 0.5);
    let points = [0.3, 1.4, 2.9, 4.4].map(|t| target.ellipse_point(t));
    let mut e = Ellipse::default();
    e.create_from_4p(&points).unwrap();
    assert_vec2_eq(e.center(), Vector2::new(1.0, 2.0), 1e-9);
    assert_f64_eq(e.major_radius(), 4.0, 1e-9);
    assert_f64_eq(e.minor_radius(), 2.0, 1e-9);
}

#[test]
fn test_center_three_points_skewed() {
    let target = skewed_ellipse();
    let points = [0.2, 2.2, 4.0].map(|t| target.ellipse_point(t));
    let mut e = Ellipse::default();
    e.create_from_center_3_points(target.center(), &points).unwrap();
    for p in samples(&target, 16) {
        assert!(on_curve(&e, p, 1e-8));
    }
}

#[test]
fn test_inscribed_quadrilateral_tangency() {
    common::init_logging();
    let target = skewed_ellipse();
    let lines = [0.5, 1.8, 3.3, 4.9].map(|t| tangent_line(&target, t));
    let mut e = Ellipse::default();
    let touching = e.create_inscribe_quadrilateral(&lines).unwrap();
    assert!(!touching.is_empty());
    for line in &lines {
        assert!(tangency_error(&e, line).abs() < 1e-7);
    }
}

#[test]
fn test_inscribed_rhombus_is_centered() {
    let corners = [
        Vector2::new(0.0, -3.0),
        Vector2::new(5.0, 0.0),
        Vector2::new(0.0, 3.0),
        Vector2::new(-5.0, 0.0),
    ];
    let lines = sides(corners);
    let mut e = Ellipse::default();
    e.create_inscribe_quadrilateral(&lines).unwrap();
    assert_vec2_eq(e.center(), Vector2::ZERO, 1e-9);
    for line in &lines {
        assert!(tangency_error(&e, line).abs() < 1e-7);
    }
}

#[test]
fn test_failed_fit_keeps_entity() {
    let mut e = quarter_arc();
    let before = e.clone();
    let collinear = [0.0, 1.0, 2.0, 3.0].map(|x| Vector2::new(x, 0.0));
    assert!(e.create_from_4p(&collinear).is_err());
    assert_eq!(e.create_from_quadratic([1.0, 0.0, -1.0]), Err(GeometryError::NotAnEllipse));
    assert_eq!(e, before);
}

// ===========================================================================
// Editing
// ===========================================================================

#[test]
fn test_trim_whole_ellipse_to_arc() {
    let mut e = reference_ellipse();
    let candidates = [e.ellipse_point(FRAC_PI_2), e.ellipse_point(PI)];
    e.prepare_trim(e.ellipse_point(2.0), &candidates).unwrap();
    assert!(e.is_elliptic_arc());
    assert_f64_eq(e.angle1(), FRAC_PI_2, 1e-9);
    assert_f64_eq(e.angle2(), PI, 1e-9);
    assert_eq!(e.trim_point(e.ellipse_point(1.7)), Ending::Start);
}

#[test]
fn test_transform_sequence_keeps_length() {
    let mut arc = Ellipse::arc(Vector2::new(2.0, 1.0), Vector2::polar(6.0, 0.3), 0.4, 0.5, 2.5, false);
    let length = arc.length();
    arc.move_by(Vector2::new(-4.0, 7.0));
    arc.rotate_around(Vector2::new(1.0, 1.0), 1.1);
    arc.mirror(Vector2::ZERO, Vector2::new(1.0, 2.0));
    arc.revert_direction();
    assert_f64_eq(arc.length(), length, 1e-9);
    assert!(arc.ratio() > 0.0 && arc.ratio() <= 1.0);

    arc.scale_uniform(Vector2::ZERO, 3.0);
    assert_f64_eq(arc.length(), 3.0 * length, 1e-8);
}

#[test]
fn test_grip_points() {
    let arc = quarter_arc();
    let refs = arc.ref_points();
    assert_eq!(refs.len(), 7);
    assert_vec2_eq(refs[0], Vector2::new(10.0, 0.0), TOL);
    assert_vec2_eq(refs[6], Vector2::new(0.0, 5.0), TOL);

    let mut arc = arc;
    arc.move_ref(Vector2::ZERO, Vector2::new(2.0, 3.0));
    assert_vec2_eq(arc.center(), Vector2::new(2.0, 3.0), TOL);
    assert_vec2_eq(arc.start_point().unwrap(), Vector2::new(12.0, 3.0), TOL);
}
