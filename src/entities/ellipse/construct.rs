//! Constructing an ellipse from points, conics and tangent lines
//!
//! Every fitter solves for a whole, axis-normalized ellipse without touching
//! the target; the result is committed only on success.

use super::Ellipse;
use crate::entities::{quadrilateral, Line};
use crate::error::{GeometryError, Result};
use crate::math::linear::solve;
use crate::math::{Quadratic, INSCRIBE_SYMMETRY_TOLERANCE, INSCRIBE_TRAPEZOID_TOLERANCE, TOLERANCE, TOLERANCE15, TOLERANCE2};
use crate::types::Vector2;

/// The ways an ellipse can be constructed
#[derive(Debug, Clone, PartialEq)]
pub enum EllipseConstruction {
    /// Axis-aligned ellipse through four points
    FourPoints([Vector2; 4]),
    /// Ellipse with the given center through three points; when the last two
    /// points coincide, an axis-aligned ellipse through the first two
    CenterThreePoints { center: Vector2, points: [Vector2; 3] },
    /// `[a, b, c]` of `a x² + b xy + c y² = 1`, relative to the current center
    Quadratic([f64; 3]),
    /// A general conic that must be a real ellipse
    QuadraticFunctional(Quadratic),
    /// Ellipse tangent to the four sides of the quadrilateral the lines bound
    InscribedQuadrilateral([Line; 4]),
}

/// Parameters of a fitted whole ellipse
#[derive(Debug, Clone, PartialEq)]
struct Fit {
    center: Vector2,
    major_axis: Vector2,
    ratio: f64,
    /// Points of tangency, for the inscribed construction
    tangents: Vec<Vector2>,
}

impl Fit {
    fn new(center: Vector2, (major_axis, ratio): (Vector2, f64)) -> Self {
        Fit {
            center,
            major_axis,
            ratio,
            tangents: Vec::new(),
        }
    }
}

impl EllipseConstruction {
    fn solve(&self, current_center: Vector2) -> Result<Fit> {
        match self {
            EllipseConstruction::FourPoints(points) => fit_four_points(points),
            EllipseConstruction::CenterThreePoints { center, points } => fit_center_three_points(*center, points),
            EllipseConstruction::Quadratic(dn) => Ok(Fit::new(current_center, fit_quadratic_form(*dn)?)),
            EllipseConstruction::QuadraticFunctional(q) => fit_quadratic_functional(q),
            EllipseConstruction::InscribedQuadrilateral(lines) => fit_inscribed_quadrilateral(lines),
        }
    }
}

/// `c0 x² + c1 x + c2 y² + c3 y = 1` through four points
fn fit_four_points(points: &[Vector2; 4]) -> Result<Fit> {
    let rows: Vec<Vec<f64>> = points
        .iter()
        .map(|p| vec![p.x * p.x, p.x, p.y * p.y, p.y, 1.0])
        .collect();
    let dn = solve(&rows)?;
    let d = 1.0 + 0.25 * (dn[1] * dn[1] / dn[0] + dn[3] * dn[3] / dn[2]);
    if dn[0].abs() < TOLERANCE15
        || dn[2].abs() < TOLERANCE15
        || d / dn[0] < TOLERANCE15
        || d / dn[2] < TOLERANCE15
    {
        return Err(GeometryError::NotAnEllipse);
    }
    let center = Vector2::new(-0.5 * dn[1] / dn[0], -0.5 * dn[3] / dn[2]);
    let major_axis = Vector2::new((d / dn[0]).sqrt(), 0.0);
    Ok(Fit::new(center, (major_axis, (dn[0] / dn[2]).sqrt())))
}

fn fit_center_three_points(center: Vector2, points: &[Vector2; 3]) -> Result<Fit> {
    if points[2].distance_squared(&points[1]) < TOLERANCE15 {
        // a x² + b y² = 1 through the two distinct points
        let rows: Vec<Vec<f64>> = points[..2]
            .iter()
            .map(|p| {
                let v = *p - center;
                vec![v.x * v.x, v.y * v.y, 1.0]
            })
            .collect();
        let dn = solve(&rows)?;
        if dn[0] < TOLERANCE15 || dn[1] < TOLERANCE15 {
            return Err(GeometryError::NotAnEllipse);
        }
        let major_axis = Vector2::new(1.0 / dn[0].sqrt(), 0.0);
        return Ok(Fit::new(center, (major_axis, (dn[0] / dn[1]).sqrt())));
    }

    let rows: Vec<Vec<f64>> = points
        .iter()
        .map(|p| {
            let v = *p - center;
            vec![v.x * v.x, v.x * v.y, v.y * v.y, 1.0]
        })
        .collect();
    let dn = solve(&rows)?;
    Ok(Fit::new(center, fit_quadratic_form([dn[0], dn[1], dn[2]])?))
}

/// Major axis and ratio of the centered ellipse `a x² + c xy + b y² = 1`,
/// from the eigen-decomposition of its symmetric matrix
fn fit_quadratic_form(dn: [f64; 3]) -> Result<(Vector2, f64)> {
    let [a, c, b] = dn;
    let d = a - b;
    let s = d.hypot(c);
    // both eigenvalues (a + b ± s) / 2 must be positive
    if s >= a + b {
        return Err(GeometryError::NotAnEllipse);
    }
    let direction = if a >= b {
        Vector2::from_angle((d + s).atan2(-c))
    } else {
        Vector2::from_angle((-c).atan2(s - d))
    };
    let major_axis = direction / (0.5 * (a + b - s)).sqrt();
    Ok((major_axis, ((a + b - s) / (a + b + s)).sqrt()))
}

fn fit_quadratic_functional(q: &Quadratic) -> Result<Fit> {
    if !q.is_quadratic() {
        return Err(GeometryError::InvalidInput("conic has no second order terms".to_string()));
    }
    let [mut a, mut c, mut b, mut d, mut e, mut f] = q.coefficients();
    // the conic is the same with all signs flipped
    if a + b < 0.0 {
        [a, c, b, d, e, f] = [-a, -c, -b, -d, -e, -f];
    }
    let determinant = c * c - 4.0 * a * b;
    if determinant >= -f64::EPSILON {
        return Err(GeometryError::NotAnEllipse);
    }
    // gradient zero: 2a x + c y = -d, c x + 2b y = -e
    let center = Vector2::new(2.0 * b * d - e * c, 2.0 * a * e - d * c) / determinant;
    let centered = Quadratic::new([a, c, b, d, e, f]).move_by(-center);
    if centered.const_term() >= -f64::EPSILON {
        return Err(GeometryError::NotAnEllipse);
    }
    let factor = -1.0 / centered.const_term();
    let quad = centered.quad();
    let form = [quad[(0, 0)] * factor, 2.0 * quad[(0, 1)] * factor, quad[(1, 1)] * factor];
    Ok(Fit::new(center, fit_quadratic_form(form)?))
}

fn fit_inscribed_quadrilateral(lines: &[Line; 4]) -> Result<Fit> {
    let s0 = quadrilateral(lines)
        .ok_or_else(|| GeometryError::InvalidQuadrilateral("lines do not bound a quadrilateral".to_string()))?;
    let quad: [Line; 4] = std::array::from_fn(|i| Line::new(s0[i], s0[(i + 1) % 4]));

    // image of the center of the square the quadrilateral is a projection of
    let center_projection = Line::new(s0[0], s0[2])
        .intersection(&Line::new(s0[1], s0[3]))
        .ok_or_else(|| GeometryError::InvalidQuadrilateral("diagonals do not intersect".to_string()))?;

    let mut tangents: Vec<Vector2> = Vec::with_capacity(4);
    let mut parallel = 0;
    let mut parallel_index = 0;
    for i in 0..2 {
        let direction = match quad[i].intersection(&quad[i + 2]) {
            Some(vanishing) => vanishing - center_projection,
            None => {
                parallel += 1;
                parallel_index = i;
                quad[i].direction()
            }
        };
        let through = Line::new(center_projection, center_projection + direction);
        for k in [1, 3] {
            if let Some(p) = through.intersection(&quad[(i + k) % 4]) {
                tangents.push(p);
            }
        }
    }
    if tangents.len() < 3 {
        return Err(GeometryError::InvalidQuadrilateral("fewer than three tangent points".to_string()));
    }

    let ellipse_center = Line::new(s0[2], (tangents[0] + tangents[2]) * 0.5)
        .intersection(&Line::new(s0[3], (tangents[1] + tangents[2]) * 0.5))
        .ok_or_else(|| GeometryError::InvalidQuadrilateral("ellipse center not found".to_string()))?;

    if parallel == 1 {
        log::debug!("inscribing in a trapezoid");
        let l0 = quad[parallel_index];
        let l1 = quad[parallel_index + 2];
        let center = (l0.middle_point() + l1.middle_point()) * 0.5;
        if (center.distance(&l0.start) - center.distance(&l0.end)).abs() > INSCRIBE_TRAPEZOID_TOLERANCE {
            return Err(GeometryError::InvalidQuadrilateral(
                "no inscribed ellipse for a non isosceles trapezoid".to_string(),
            ));
        }
        let d = l0.nearest_point(center, false).1;
        let l = (l0.length() + l1.length()) * 0.25;
        let k = 4.0 * d / (l0.length() - l1.length()).abs();
        let theta = d / (l * k);
        if theta >= 1.0 || d < TOLERANCE {
            return Err(GeometryError::Degenerate("trapezoid admits no inscribed ellipse".to_string()));
        }
        let a = d / (k * theta.asin().tan());
        let major_axis = Vector2::new(a, 0.0).rotate(l0.angle());
        return Ok(Fit {
            center,
            major_axis,
            ratio: d / a,
            tangents,
        });
    }

    let relative: Vec<Vector2> = tangents.iter().map(|t| *t - ellipse_center).collect();
    // tangent points symmetric about the center give the same row
    let mut rows: Vec<Vec<f64>> = Vec::with_capacity(4);
    for v in &relative {
        let row = [v.x * v.x, v.x * v.y, v.y * v.y];
        let norm = row.iter().map(|x| x * x).sum::<f64>().sqrt();
        let duplicate = rows.iter().any(|r| {
            let diff = (0..3).map(|j| (r[j] - row[j]).powi(2)).sum::<f64>().sqrt();
            diff < INSCRIBE_SYMMETRY_TOLERANCE * norm
        });
        if !duplicate {
            rows.push(vec![row[0], row[1], row[2], 1.0]);
        }
    }

    let (major_axis, ratio) = match rows.len() {
        2 => {
            log::debug!("inscribing in a parallelogram");
            let major = relative[0];
            let dx = major.length();
            if dx < TOLERANCE2 {
                return Err(GeometryError::Degenerate("zero size ellipse".to_string()));
            }
            let rotation = major.angle();
            let minor = relative[2].rotate(-rotation);
            if minor.y.abs() < TOLERANCE || minor.length_squared() < TOLERANCE2 {
                return Err(GeometryError::Degenerate("zero size ellipse".to_string()));
            }
            // unshear x' = x - y·minor.x/minor.y of x'²/dx² + y²/minor.y² = 1
            let ia2 = 1.0 / (dx * dx);
            let ib2 = 1.0 / (minor.y * minor.y);
            let form = [ia2, -2.0 * ia2 * minor.x / minor.y, ib2 * ia2 * minor.x * minor.x + ib2];
            let (major_axis, ratio) = fit_quadratic_form(form)?;
            (major_axis.rotate(rotation), ratio)
        }
        4 => {
            rows.truncate(3);
            let dn = solve(&rows)?;
            fit_quadratic_form([dn[0], dn[1], dn[2]])?
        }
        _ => {
            log::warn!("no inscribed ellipse for a non isosceles trapezoid");
            return Err(GeometryError::InvalidQuadrilateral(
                "no inscribed ellipse for a non isosceles trapezoid".to_string(),
            ));
        }
    };

    Ok(Fit {
        center: ellipse_center,
        major_axis,
        ratio,
        tangents,
    })
}

impl Ellipse {
    fn apply_construction(&mut self, construction: &EllipseConstruction) -> Result<Vec<Vector2>> {
        let fit = construction.solve(self.data.center)?;
        let mut work = self.clone();
        work.data.center = fit.center;
        work.data.major_axis = fit.major_axis;
        work.data.ratio = fit.ratio;
        work.data.angle1 = 0.0;
        work.data.angle2 = 0.0;
        work.data.reversed = false;
        if work.data.ratio > 1.0 {
            work.switch_major_minor();
        }
        work.calculate_borders();
        *self = work;
        Ok(fit.tangents)
    }

    /// Replace this entity with a whole ellipse built by `construction`.
    ///
    /// On failure the entity is left unchanged.
    pub fn construct(&mut self, construction: EllipseConstruction) -> Result<()> {
        self.apply_construction(&construction).map(|_| ())
    }

    /// Axis-aligned ellipse through four points
    pub fn create_from_4p(&mut self, points: &[Vector2; 4]) -> Result<()> {
        self.construct(EllipseConstruction::FourPoints(*points))
    }

    /// Ellipse with `center` through `points`
    pub fn create_from_center_3_points(&mut self, center: Vector2, points: &[Vector2; 3]) -> Result<()> {
        self.construct(EllipseConstruction::CenterThreePoints {
            center,
            points: *points,
        })
    }

    /// Ellipse `dn[0] x² + dn[1] xy + dn[2] y² = 1` around the current center
    pub fn create_from_quadratic(&mut self, dn: [f64; 3]) -> Result<()> {
        self.construct(EllipseConstruction::Quadratic(dn))
    }

    /// Ellipse described by a general conic
    pub fn create_from_quadratic_functional(&mut self, q: &Quadratic) -> Result<()> {
        self.construct(EllipseConstruction::QuadraticFunctional(*q))
    }

    /// Ellipse inscribed in the quadrilateral bounded by four lines; returns
    /// the points where it touches the sides
    pub fn create_inscribe_quadrilateral(&mut self, lines: &[Line; 4]) -> Result<Vec<Vector2>> {
        self.apply_construction(&EllipseConstruction::InscribedQuadrilateral(*lines))
    }
}
