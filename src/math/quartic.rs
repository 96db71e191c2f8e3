//! Real roots of monic cubic and quartic polynomials
//!
//! The quartic is reduced to depressed form and factored into two real
//! quadratics through a positive root of the resolvent cubic (Ferrari).
//! Every root is then polished with a few Newton steps on the original
//! polynomial, which recovers the precision lost near double roots.

const POLISH_STEPS: usize = 4;

/// Relative slack under which a slightly negative discriminant is treated
/// as a double root rather than a complex pair
const DISCRIMINANT_SLACK: f64 = 1.0e-9;

/// Real roots of `x^4 + c[0] x^3 + c[1] x^2 + c[2] x + c[3] = 0`.
///
/// Returns between zero and four roots in no particular order; double
/// roots may appear twice.
pub fn solve_quartic(c: [f64; 4]) -> Vec<f64> {
    let [b, c2, d, e] = c;
    if !(b.is_finite() && c2.is_finite() && d.is_finite() && e.is_finite()) {
        return Vec::new();
    }

    // x = y - b/4
    let shift = -0.25 * b;
    let b2 = b * b;
    let p = c2 - 0.375 * b2;
    let q = d - 0.5 * b * c2 + 0.125 * b2 * b;
    let r = e - 0.25 * b * d + 0.0625 * b2 * c2 - 3.0 / 256.0 * b2 * b2;
    let scale = 1.0 + p.abs() + q.abs().sqrt() + r.abs().sqrt();

    let mut ys = Vec::with_capacity(4);
    if q.abs() <= 1.0e-14 * scale * scale * scale {
        // biquadratic: z = y^2
        for z in solve_quadratic(p, r) {
            if z >= 0.0 {
                let y = z.sqrt();
                ys.push(y);
                ys.push(-y);
            } else if z > -DISCRIMINANT_SLACK * scale {
                ys.push(0.0);
            }
        }
    } else {
        let m = largest_cubic_root(p, 0.25 * p * p - r, -0.125 * q * q);
        let m = match m {
            Some(m) if m > 0.0 => m,
            _ => return polish_all(Vec::new(), c),
        };
        let s = (2.0 * m).sqrt();
        let t = q / (2.0 * s);
        ys.extend(solve_quadratic(s, 0.5 * p + m - t));
        ys.extend(solve_quadratic(-s, 0.5 * p + m + t));
    }

    polish_all(ys.into_iter().map(|y| y + shift).collect(), c)
}

/// Real roots of `x^2 + b x + c = 0`, accepting near-zero negative
/// discriminants as a double root
pub fn solve_quadratic(b: f64, c: f64) -> Vec<f64> {
    let disc = b * b - 4.0 * c;
    let slack = DISCRIMINANT_SLACK * (b * b + c.abs() + 1.0);
    if disc < -slack {
        return Vec::new();
    }
    if disc <= 0.0 {
        return vec![-0.5 * b, -0.5 * b];
    }
    // avoid cancellation in the smaller root
    let sq = disc.sqrt();
    let q = -0.5 * (b + b.signum() * sq);
    if q == 0.0 {
        return vec![0.0, 0.0];
    }
    vec![q, c / q]
}

/// Largest real root of `x^3 + a x^2 + b x + c = 0`
pub fn largest_cubic_root(a: f64, b: f64, c: f64) -> Option<f64> {
    let q = (a * a - 3.0 * b) / 9.0;
    let r = (2.0 * a * a * a - 9.0 * a * b + 27.0 * c) / 54.0;
    let q3 = q * q * q;

    let root = if r * r < q3 {
        // three real roots; this branch of the trigonometric form is the largest
        let theta = (r / q3.sqrt()).clamp(-1.0, 1.0).acos();
        let sq = q.sqrt();
        -2.0 * sq * ((theta + std::f64::consts::TAU) / 3.0).cos() - a / 3.0
    } else {
        let big_a = -r.signum() * (r.abs() + (r * r - q3).sqrt()).cbrt();
        let big_b = if big_a != 0.0 { q / big_a } else { 0.0 };
        big_a + big_b - a / 3.0
    };
    if !root.is_finite() {
        return None;
    }

    let f = |x: f64| ((x + a) * x + b) * x + c;
    let df = |x: f64| (3.0 * x + 2.0 * a) * x + b;
    let mut x = root;
    for _ in 0..POLISH_STEPS {
        let d = df(x);
        if d == 0.0 {
            break;
        }
        let next = x - f(x) / d;
        if !next.is_finite() {
            break;
        }
        x = next;
    }
    Some(x)
}

fn polish_all(roots: Vec<f64>, c: [f64; 4]) -> Vec<f64> {
    let f = |x: f64| (((x + c[0]) * x + c[1]) * x + c[2]) * x + c[3];
    let df = |x: f64| ((4.0 * x + 3.0 * c[0]) * x + 2.0 * c[1]) * x + c[2];
    roots
        .into_iter()
        .map(|mut x| {
            for _ in 0..POLISH_STEPS {
                let d = df(x);
                if d.abs() < f64::EPSILON {
                    break;
                }
                let next = x - f(x) / d;
                // a diverging step only happens next to a multiple root
                if !next.is_finite() || f(next).abs() > f(x).abs() {
                    break;
                }
                x = next;
            }
            x
        })
        .filter(|x| x.is_finite())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(mut v: Vec<f64>) -> Vec<f64> {
        v.sort_by(|a, b| a.partial_cmp(b).unwrap());
        v
    }

    fn assert_roots(got: Vec<f64>, expected: &[f64]) {
        let got = sorted(got);
        assert_eq!(got.len(), expected.len(), "roots: {:?}", got);
        for (g, e) in got.iter().zip(expected) {
            assert!((g - e).abs() < 1e-7, "got {g}, expected {e}");
        }
    }

    #[test]
    fn test_four_distinct_roots() {
        // (x-1)(x+1)(x-2)(x+3) = x^4 + x^3 - 7x^2 - x + 6
        assert_roots(solve_quartic([1.0, -7.0, -1.0, 6.0]), &[-3.0, -1.0, 1.0, 2.0]);
    }

    #[test]
    fn test_biquadratic() {
        // (x^2-1)(x^2-4)
        assert_roots(solve_quartic([0.0, -5.0, 0.0, 4.0]), &[-2.0, -1.0, 1.0, 2.0]);
    }

    #[test]
    fn test_double_root() {
        // (x^2 - 1)(x - 0.4)^2 = x^4 - 0.8x^3 - 0.84x^2 + 0.8x - 0.16
        assert_roots(solve_quartic([-0.8, -0.84, 0.8, -0.16]), &[-1.0, 0.4, 0.4, 1.0]);
    }

    #[test]
    fn test_no_real_roots() {
        // x^4 + 1
        assert!(solve_quartic([0.0, 0.0, 0.0, 1.0]).is_empty());
    }

    #[test]
    fn test_two_real_roots() {
        // (x^2 + 1)(x - 2)(x + 0.5) = x^4 - 1.5x^3 + 0x^2 - 1.5x - 1
        assert_roots(solve_quartic([-1.5, 0.0, -1.5, -1.0]), &[-0.5, 2.0]);
    }

    #[test]
    fn test_largest_cubic_root() {
        // (x-1)(x-2)(x-3) = x^3 - 6x^2 + 11x - 6
        let r = largest_cubic_root(-6.0, 11.0, -6.0).unwrap();
        assert!((r - 3.0).abs() < 1e-10);
        // x^3 - 8
        let r = largest_cubic_root(0.0, 0.0, -8.0).unwrap();
        assert!((r - 2.0).abs() < 1e-10);
    }

    #[test]
    fn test_quadratic() {
        assert_roots(solve_quadratic(-3.0, 2.0), &[1.0, 2.0]);
        assert!(solve_quadratic(0.0, 1.0).is_empty());
    }
}
