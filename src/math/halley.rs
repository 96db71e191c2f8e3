//! Bracketed second-order (Halley) root finding

use super::HALLEY_MAX_ITERATIONS;

/// Find a root of `f` inside `[min, max]` starting from `guess`.
///
/// `f` returns the value and its first two derivatives. Iteration stops once
/// successive iterates agree to `digits` binary digits or the iteration cap
/// is reached; in the latter case the last iterate is returned as is.
pub fn halley_iterate<F>(f: F, guess: f64, min: f64, max: f64, digits: u32) -> f64
where
    F: Fn(f64) -> (f64, f64, f64),
{
    let factor = 2.0_f64.powi(1 - digits.clamp(1, f64::MANTISSA_DIGITS) as i32);
    let mut x = guess.clamp(min, max);

    for _ in 0..HALLEY_MAX_ITERATIONS {
        let (f0, f1, f2) = f(x);
        if f0 == 0.0 {
            break;
        }

        let delta = if f1 == 0.0 {
            // flat spot: step halfway towards the bound the value points at
            if (f0 > 0.0) == (f2 >= 0.0) {
                0.5 * (x - min)
            } else {
                0.5 * (x - max)
            }
        } else {
            let denom = 2.0 * f1 * f1 - f0 * f2;
            let newton = f0 / f1;
            if denom == 0.0 {
                newton
            } else {
                let halley = 2.0 * f0 * f1 / denom;
                // a Halley step against the Newton direction is not trusted
                if halley * newton < 0.0 {
                    newton
                } else {
                    halley
                }
            }
        };

        let mut next = x - delta;
        if next < min {
            next = 0.5 * (x + min);
        } else if next > max {
            next = 0.5 * (x + max);
        }
        if !next.is_finite() {
            break;
        }

        let converged = (next - x).abs() <= factor * next.abs().max(f64::MIN_POSITIVE);
        x = next;
        if converged {
            break;
        }
    }
    x
}
