//! Numeric primitives and tolerance constants
//!
//! Every geometric predicate in the kernel is expressed against the fixed
//! absolute and angular tolerances below. The tuning constants at the end
//! govern the iterative solvers and the quadrilateral fitter.

pub mod angle;
pub mod elliptic;
pub mod halley;
pub mod linear;
pub mod quadratic;
pub mod quartic;

pub use quadratic::Quadratic;

/// General absolute tolerance
pub const TOLERANCE: f64 = 1.0e-10;

/// Tolerance for near-singular coefficients
pub const TOLERANCE15: f64 = 1.5e-15;

/// Tolerance for squared quantities
pub const TOLERANCE2: f64 = 1.0e-20;

/// Angular tolerance in radians
pub const TOLERANCE_ANGLE: f64 = 1.0e-8;

/// Stand-in for "no distance" in distance outputs
pub const MAX_DOUBLE: f64 = 1.0e10;

/// Iteration cap for the near-circular nearest-point search
pub const NEWTON_MAX_ITERATIONS: usize = 16;

/// Iteration cap for the Halley root finder
pub const HALLEY_MAX_ITERATIONS: usize = 64;

/// Relative tolerance under which two tangent points of an inscribed
/// quadrilateral are considered images of each other under the 180 degree
/// point symmetry about the ellipse center
pub const INSCRIBE_SYMMETRY_TOLERANCE: f64 = 20.0 * TOLERANCE;

/// Absolute tolerance for the isosceles check of an inscribed trapezoid
pub const INSCRIBE_TRAPEZOID_TOLERANCE: f64 = TOLERANCE;
