//! Property tests for invariants that hold for every valid ellipse

mod common;

use common::comparison::approx_eq;
use ellipse_kernel::math::elliptic::complete_second_kind;
use ellipse_kernel::math::TOLERANCE_ANGLE;
use ellipse_kernel::{Ellipse, Entity, Vector2};
use proptest::prelude::*;
use std::f64::consts::TAU;

fn ellipse_strategy() -> impl Strategy<Value = Ellipse> {
    (
        -50.0..50.0f64,
        -50.0..50.0f64,
        0.5..20.0f64,
        0.0..TAU,
        0.1..1.0f64,
    )
        .prop_map(|(x, y, a, rot, ratio)| {
            Ellipse::from_center_axis(Vector2::new(x, y), Vector2::polar(a, rot), ratio)
        })
}

fn arc_strategy() -> impl Strategy<Value = Ellipse> {
    (ellipse_strategy(), 0.0..TAU, 0.1..6.0f64, any::<bool>()).prop_map(|(e, a1, sweep, reversed)| {
        let a2 = if reversed { a1 - sweep } else { a1 + sweep };
        Ellipse::arc(e.center(), e.major_axis(), e.ratio(), a1, a2, reversed)
    })
}

#[derive(Debug, Clone)]
enum Mutation {
    Move(f64, f64),
    Rotate(f64),
    Scale(f64, f64),
    Mirror(f64),
    Shear(f64),
    Revert,
}

fn mutation_strategy() -> impl Strategy<Value = Mutation> {
    prop_oneof![
        (-10.0..10.0f64, -10.0..10.0f64).prop_map(|(x, y)| Mutation::Move(x, y)),
        (0.0..TAU).prop_map(Mutation::Rotate),
        (0.5..2.0f64, -2.0..-0.5f64).prop_map(|(x, y)| Mutation::Scale(x, y)),
        (0.5..2.0f64, 0.5..2.0f64).prop_map(|(x, y)| Mutation::Scale(x, y)),
        (0.0..TAU).prop_map(Mutation::Mirror),
        (-1.0..1.0f64).prop_map(Mutation::Shear),
        Just(Mutation::Revert),
    ]
}

fn apply(e: &mut Ellipse, mutation: &Mutation) {
    match *mutation {
        Mutation::Move(x, y) => e.move_by(Vector2::new(x, y)),
        Mutation::Rotate(a) => e.rotate_around(Vector2::new(1.0, -2.0), a),
        Mutation::Scale(x, y) => e.scale(Vector2::new(0.5, 0.5), Vector2::new(x, y)),
        Mutation::Mirror(a) => e.mirror(Vector2::ZERO, Vector2::from_angle(a)),
        Mutation::Shear(k) => e.shear(k),
        Mutation::Revert => e.revert_direction(),
    }
}

proptest! {
    #[test]
    fn ratio_stays_normalized(e in arc_strategy(), mutations in prop::collection::vec(mutation_strategy(), 1..8)) {
        let mut e = e;
        for m in &mutations {
            apply(&mut e, m);
            prop_assert!(e.ratio() > 0.0 && e.ratio() <= 1.0, "ratio {} after {:?}", e.ratio(), m);
        }
    }

    #[test]
    fn parametric_angle_round_trip(e in ellipse_strategy(), theta in 0.0..TAU) {
        let back = e.ellipse_angle(e.ellipse_point(theta));
        let diff = (back - theta).abs();
        prop_assert!(diff < TOLERANCE_ANGLE || (TAU - diff) < TOLERANCE_ANGLE, "{theta} -> {back}");
    }

    #[test]
    fn focal_distance_sum(e in ellipse_strategy(), theta in 0.0..TAU) {
        let p = e.ellipse_point(theta);
        let [f1, f2] = e.foci();
        let sum = p.distance(&f1) + p.distance(&f2);
        prop_assert!(approx_eq(sum, 2.0 * e.major_radius(), 1e-9 * e.major_radius().max(1.0)));
    }

    #[test]
    fn whole_length_is_complete_integral(e in ellipse_strategy(), start in 0.0..TAU) {
        let k = (1.0 - e.ratio() * e.ratio()).sqrt();
        let expected = 4.0 * e.major_radius() * complete_second_kind(k);
        prop_assert!(approx_eq(e.length(), expected, 1e-9 * expected));
        prop_assert!(approx_eq(e.ellipse_length(start, start), expected, 1e-9 * expected));
    }

    #[test]
    fn nearest_point_of_curve_point_is_itself(e in ellipse_strategy(), theta in 0.0..TAU) {
        let p = e.ellipse_point(theta);
        let (q, d) = e.nearest_point_on_entity(p, false).unwrap();
        let scale = e.major_radius();
        prop_assert!(q.distance(&p) < 1e-6 * scale, "{p} snapped to {q}");
        prop_assert!(d < 1e-6 * scale);
    }

    #[test]
    fn bounds_contain_arc_samples(e in arc_strategy()) {
        let bounds = e.bounds();
        let sweep = if e.is_reversed() { -e.angle_length() } else { e.angle_length() };
        let tol = 1e-9 * e.major_radius().max(1.0);
        for i in 0..=1000 {
            let p = e.ellipse_point(e.angle1() + sweep * i as f64 / 1000.0);
            prop_assert!(bounds.contains_with_tolerance(p, tol), "{p} outside {bounds}");
        }
    }

    #[test]
    fn four_point_round_trip(
        x in -20.0..20.0f64,
        y in -20.0..20.0f64,
        a in 1.0..10.0f64,
        ratio in 0.2..1.0f64,
        tall in any::<bool>(),
    ) {
        let major = if tall { Vector2::new(0.0, a) } else { Vector2::new(a, 0.0) };
        let target = Ellipse::from_center_axis(Vector2::new(x, y), major, ratio);
        let points = [0.3, 1.9, 3.4, 5.1].map(|t| target.ellipse_point(t));
        let mut e = Ellipse::default();
        prop_assert!(e.create_from_4p(&points).is_ok());
        prop_assert!(e.center().distance(&target.center()) < 1e-7 * a);
        prop_assert!(approx_eq(e.major_radius(), a, 1e-7 * a));
        prop_assert!(approx_eq(e.minor_radius(), a * ratio, 1e-7 * a));
    }
}
