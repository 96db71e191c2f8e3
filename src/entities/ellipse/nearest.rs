//! Snapping queries: nearest point, point at a distance along the arc,
//! equidistant subdivision points and orthogonal tangents

use super::Ellipse;
use crate::entities::Line;
use crate::math::angle::{correct_angle, is_angle_between};
use crate::math::halley::halley_iterate;
use crate::math::quartic::solve_quartic;
use crate::math::{MAX_DOUBLE, NEWTON_MAX_ITERATIONS, TOLERANCE, TOLERANCE15, TOLERANCE2, TOLERANCE_ANGLE};
use crate::types::Vector2;
use std::f64::consts::{PI, TAU};

/// Root of `d(dist²)/dθ` for a nearly circular ellipse, by Newton iteration
/// seeded at the polar angle of the query point
fn closest_theta_near_circular(a: f64, b: f64, point: Vector2) -> f64 {
    let c2 = b * b - a * a;
    let ax2 = 2.0 * a * point.x;
    let by2 = 2.0 * b * point.y;
    let mut theta = point.y.atan2(point.x);
    for _ in 0..NEWTON_MAX_ITERATIONS {
        let (s, c) = theta.sin_cos();
        let d1 = c2 * (2.0 * theta).sin() + ax2 * s - by2 * c;
        let d2 = 2.0 * c2 * (2.0 * theta).cos() + ax2 * c + by2 * s;
        if d1.abs() < TOLERANCE || d2.abs() < TOLERANCE {
            break;
        }
        theta -= d1 / d2;
    }
    theta
}

/// Newton polish of a foot point angle on `(a²−b²)·sinθ·cosθ − a·x·sinθ +
/// b·y·cosθ = 0`, the stationarity condition in θ itself. Its roots are
/// simple where the quartic in `cos θ` has double ones, which happens for
/// queries on an axis.
fn refine_foot_angle(a: f64, b: f64, point: Vector2, theta: f64) -> f64 {
    let c2 = a * a - b * b;
    let ax = a * point.x;
    let by = b * point.y;
    let mut theta = theta;
    for _ in 0..2 {
        let (s, c) = theta.sin_cos();
        let g = c2 * s * c - ax * s + by * c;
        let dg = c2 * (c * c - s * s) - ax * c - by * s;
        let step = g / dg;
        // polish only, never hop to a neighbouring root
        if dg.abs() < TOLERANCE || step.abs() > 1e-4 {
            break;
        }
        theta -= step;
    }
    theta
}

impl Ellipse {
    /// Nearest point on the curve to `coord` and its distance.
    ///
    /// In the frame of the ellipse the stationary points of the squared
    /// distance satisfy a quartic in `cos θ`. Each real root is tried with
    /// both signs of the sine; maxima are discarded by the sign of the second
    /// derivative and the closest remaining point wins. Nearly circular
    /// ellipses and queries at the center make the quartic degenerate and
    /// are handled by Newton iteration instead.
    ///
    /// With `on_entity`, a foot point off the kept arc is replaced by the
    /// nearest endpoint.
    pub(super) fn nearest_point(&self, coord: Vector2, on_entity: bool) -> Option<(Vector2, f64)> {
        if !coord.is_finite() {
            return None;
        }
        let local = (coord - self.data.center).rotate(-self.angle());
        let (x, y) = (local.x, local.y);
        let a = self.major_radius();
        let b = a * self.data.ratio;

        let twoa2b2 = 2.0 * (a * a - b * b);
        let twoax = 2.0 * a * x;
        let twoby = 2.0 * b * y;
        let a0 = twoa2b2 * twoa2b2;

        // (cos θ, sin θ) candidates
        let mut candidates: Vec<(f64, f64)> = Vec::with_capacity(8);
        if a0 > TOLERANCE
            && (self.data.ratio - 1.0).abs() > TOLERANCE
            && local.length_squared() > TOLERANCE2
        {
            let c0 = -2.0 * twoax / twoa2b2;
            let roots = solve_quartic([c0, (twoax * twoax + twoby * twoby) / a0 - 1.0, -c0, -twoax * twoax / a0]);
            for root in roots {
                let c = root.clamp(-1.0, 1.0);
                let s = (1.0 - c * c).sqrt();
                candidates.push((c, s));
                candidates.push((c, -s));
            }
        } else {
            let theta = closest_theta_near_circular(a, b, local);
            let (s, c) = theta.sin_cos();
            // the stationary point found may be the farthest one; at the
            // center the minima sit a quarter turn away from the seed
            candidates.extend([(c, s), (-c, -s), (-s, c), (s, -c)]);
        }

        if candidates.is_empty() {
            log::error!(
                "no stationary point for ({x}, {y}) on ellipse a={a} b={b}; returning the query point"
            );
            return Some((coord, MAX_DOUBLE));
        }

        let mut best: Option<((f64, f64), f64)> = None;
        for (c, s) in candidates {
            // second derivative of the squared distance, up to a positive factor
            let d2 = twoa2b2 + (twoax - 2.0 * c * twoa2b2) * c + twoby * s;
            if d2 < 0.0 {
                continue;
            }
            let dist2 = Vector2::new(a * c, b * s).distance_squared(&local);
            if best.map_or(true, |(_, d)| dist2 < d) {
                best = Some(((c, s), dist2));
            }
        }

        let Some(((c, s), _)) = best else {
            log::error!("no distance minimum for ({x}, {y}) on ellipse a={a} b={b}");
            return Some((coord, MAX_DOUBLE));
        };
        let theta = refine_foot_angle(a, b, local, s.atan2(c));
        let vp = Vector2::new(a * theta.cos(), b * theta.sin());
        let dist2 = vp.distance_squared(&local);
        let point = vp.rotate(self.angle()) + self.data.center;
        if on_entity
            && !is_angle_between(
                self.ellipse_angle(point),
                self.data.angle1,
                self.data.angle2,
                self.data.reversed,
            )
        {
            if let Some(endpoint) = self.nearest_endpoint(coord) {
                return Some(endpoint);
            }
        }
        Some((point, dist2.sqrt()))
    }

    /// Distance from `coord` to the kept curve
    pub fn distance_to_point(&self, coord: Vector2) -> f64 {
        self.nearest_point(coord, true).map_or(MAX_DOUBLE, |(_, d)| d)
    }

    /// New endpoint after changing the arc length by `distance` at the end
    /// nearer to `coord`: a positive distance extends the arc, a negative
    /// one trims it. Also returns the distance from the point to `coord`.
    ///
    /// Extending by the whole length or more yields the nearest endpoint;
    /// trimming by more than the whole length is undefined.
    pub fn nearest_dist(&self, distance: f64, coord: Vector2) -> Option<(Vector2, f64)> {
        if !self.is_elliptic_arc() {
            return None;
        }
        let mut e = self.clone();
        if e.data.ratio > 1.0 {
            e.switch_major_minor();
        }
        if e.data.reversed {
            std::mem::swap(&mut e.data.angle1, &mut e.data.angle2);
            e.data.reversed = false;
            e.calculate_borders();
        }

        let ra = e.major_radius();
        if ra < TOLERANCE {
            return None;
        }
        if self.data.ratio < TOLERANCE {
            let line = Line::new(e.min_v(), e.max_v());
            return Some(line.nearest_dist(distance, coord));
        }

        let x1 = e.data.angle1;
        let total = e.ellipse_length(x1, e.data.angle2);
        if -distance > total + TOLERANCE {
            return None;
        }
        if distance > total - TOLERANCE {
            return self.nearest_endpoint(coord);
        }

        let (start, end) = e.start_point().zip(e.end_point())?;
        let whole = e.ellipse_length(0.0, 0.0);
        let target = if coord.distance_squared(&start) <= coord.distance_squared(&end) {
            if distance > 0.0 {
                whole - distance
            } else {
                -distance
            }
        } else {
            total + distance
        };

        let k2 = 1.0 - e.data.ratio * e.data.ratio;
        let k2ra = k2 * ra;
        let sol = halley_iterate(
            |z: f64| {
                let (sz, cz) = z.sin_cos();
                let d = (1.0 - k2 * cz * cz).sqrt();
                (e.ellipse_length(x1, z) - target, ra * d, k2ra * sz * cz / d)
            },
            x1 + PI,
            x1,
            x1 + TAU - TOLERANCE_ANGLE,
            f64::MANTISSA_DIGITS,
        );
        let point = e.ellipse_point(sol);
        Some((point, point.distance(&coord)))
    }

    /// Subdivision point of the arc nearest to `coord`, dividing the arc into
    /// `middle_points + 1` equal polar-angle steps. Endpoints are never
    /// returned when there is at least one interior subdivision.
    ///
    /// The steps are equal in polar angle seen from the center, not in arc
    /// length.
    pub fn nearest_middle(&self, coord: Vector2, middle_points: usize) -> Option<(Vector2, f64)> {
        if !self.is_elliptic_arc() {
            return None;
        }
        let ra = self.major_radius();
        let rb = self.minor_radius();
        let center = self.data.center;
        if ra < TOLERANCE || rb < TOLERANCE {
            return Some((center, center.distance(&coord)));
        }
        let (start, end) = self.start_point().zip(self.end_point())?;
        let (mut amin, mut amax) = (center.angle_to(&start), center.angle_to(&end));
        if self.data.reversed {
            std::mem::swap(&mut amin, &mut amax);
        }
        let mut da = (amax - amin + TAU) % TAU;
        if da < TOLERANCE {
            da = TAU;
        }
        let (vp, _) = self.nearest_point(coord, true)?;
        let a = center.angle_to(&vp);
        let counts = middle_points + 1;
        let i = (((a - amin + TAU) % TAU) / da * counts as f64 + 0.5) as usize;
        let i = i.max(1).min(counts - 1);

        let a = amin + da * (i as f64 / counts as f64) - self.angle();
        let dir = Vector2::from_angle(a);
        let scaled = Vector2::new(dir.x / ra, dir.y / rb);
        let point = (dir / scaled.length()).rotate(self.angle()) + center;
        Some((point, point.distance(&coord)))
    }

    /// Middle of the arc by polar angle
    pub fn middle_point(&self) -> Option<Vector2> {
        self.nearest_middle(self.data.center, 1).map(|(p, _)| p)
    }

    /// Point where a tangent perpendicular to `normal` touches the curve.
    ///
    /// Of the two such points the one on the side of `coord` is preferred;
    /// with `on_entity` only points on the kept arc qualify.
    pub fn nearest_orth_tan(&self, coord: Vector2, normal: &Line, on_entity: bool) -> Option<Vector2> {
        if !coord.is_finite() {
            return None;
        }
        let direction = normal.direction();
        if direction.length_squared() < TOLERANCE15 {
            return None;
        }
        let rotation = self.angle();
        let local = direction.rotate(-rotation);
        let mut angle = Vector2::new(local.x, local.y * self.data.ratio).angle();
        let ra = self.major_radius();
        let tangent = Vector2::new(ra * angle.cos(), self.data.ratio * ra * angle.sin());

        let mut solutions: Vec<Vector2> = Vec::with_capacity(2);
        for candidate in [tangent, -tangent] {
            if !on_entity || is_angle_between(angle, self.data.angle1, self.data.angle2, self.data.reversed) {
                solutions.push(candidate.rotate(rotation));
            }
            angle = correct_angle(angle + PI);
        }

        let vp = match solutions.as_slice() {
            [] => return None,
            [_, second] if second.dot(&(coord - self.data.center)) > 0.0 => *second,
            [first, ..] => *first,
        };
        Some(self.data.center + vp)
    }

    /// The center or a focus, whichever is nearest to `coord`
    pub fn nearest_center(&self, coord: Vector2) -> (Vector2, f64) {
        let center = self.data.center;
        let mut best = (center, coord.distance(&center));
        for focus in self.foci() {
            let d = coord.distance(&focus);
            if d < best.1 {
                best = (focus, d);
            }
        }
        best
    }
}
