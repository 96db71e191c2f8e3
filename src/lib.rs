//! # ellipse-kernel
//!
//! Analytic ellipse and elliptic-arc geometry for 2D CAD.
//!
//! The kernel measures, snaps to, fits, trims and transforms ellipses while
//! keeping a cached bounding box, presentation angles and arc length
//! consistent with the defining parameters.
//!
//! ## Features
//!
//! - Exact arc length through incomplete elliptic integrals
//! - Nearest point, point at a given distance along the arc, middle points,
//!   tangent and orthogonal snapping
//! - Fitting from four points, center and three points, quadratic forms,
//!   or an inscribed quadrilateral
//! - Move, rotate, scale (including anisotropic), mirror, shear and grip
//!   editing
//!
//! ## Quick Start
//!
//! ```rust
//! use ellipse_kernel::{Ellipse, Entity, Vector2};
//!
//! let mut ellipse = Ellipse::from_center_axis(Vector2::ZERO, Vector2::new(10.0, 0.0), 0.5);
//! let (foot, distance) = ellipse
//!     .nearest_point_on_entity(Vector2::new(3.0, 0.0), false)
//!     .unwrap();
//! assert!((distance - 4.69041575982343).abs() < 1e-9);
//! assert!((foot.x - 4.0).abs() < 1e-9);
//!
//! ellipse.rotate(std::f64::consts::FRAC_PI_2);
//! assert!((ellipse.bounds().max.y - 10.0).abs() < 1e-9);
//! ```
//!
//! ## Architecture
//!
//! - [`Entity`] - Trait for planar entities (bounds, transforms, snapping)
//! - [`Ellipse`] - The ellipse entity and its derived state
//! - [`math`] - Tolerances, angle helpers and the numeric solvers

#![allow(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod entities;
pub mod error;
pub mod math;
pub mod types;

// Re-export commonly used types
pub use error::{GeometryError, Result};
pub use math::Quadratic;
pub use types::{BoundingBox2D, Vector2};

// Re-export entity types
pub use entities::{DrawParams, Ellipse, EllipseConstruction, EllipseData, Ending, Entity, Line};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
