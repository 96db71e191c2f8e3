//! Error types for the ellipse kernel

use thiserror::Error;

/// Main error type for construction and solver operations
///
/// Queries that simply have no answer (the start point of a whole ellipse,
/// a tangent from a point inside the curve) return `Option` instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    /// Wrong number or shape of input values
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Linear system with a singular or near-singular matrix
    #[error("Singular linear system")]
    SingularSystem,

    /// Quadratic form is hyperbolic, parabolic or otherwise not an ellipse
    #[error("Quadratic form is not an ellipse")]
    NotAnEllipse,

    /// Input collapses to a zero-size or otherwise degenerate ellipse
    #[error("Degenerate geometry: {0}")]
    Degenerate(String),

    /// Four lines that admit no inscribed ellipse
    #[error("Invalid quadrilateral: {0}")]
    InvalidQuadrilateral(String),

    /// Generic error with custom message
    #[error("{0}")]
    Custom(String),
}

/// Result type alias for kernel operations
pub type Result<T> = std::result::Result<T, GeometryError>;

impl From<String> for GeometryError {
    fn from(s: String) -> Self {
        GeometryError::Custom(s)
    }
}

impl From<&str> for GeometryError {
    fn from(s: &str) -> Self {
        GeometryError::Custom(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = GeometryError::InvalidInput("expected 4 points, got 3".to_string());
        assert_eq!(err.to_string(), "Invalid input: expected 4 points, got 3");
    }

    #[test]
    fn test_unit_variants() {
        assert_eq!(GeometryError::SingularSystem.to_string(), "Singular linear system");
        assert_eq!(GeometryError::NotAnEllipse.to_string(), "Quadratic form is not an ellipse");
    }

    #[test]
    fn test_string_conversion() {
        let err: GeometryError = "no inscribed ellipse".into();
        assert!(matches!(err, GeometryError::Custom(_)));
        let err: GeometryError = String::from("boom").into();
        assert_eq!(err.to_string(), "boom");
    }
}
