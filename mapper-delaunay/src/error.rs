//! Error types for mapper-delaunay
//!
//! Degenerate point sets are not errors: they produce an empty cell list.
//! Only input that no tetrahedralization can make sense of is reported here.

use thiserror::Error;

/// Errors from tetrahedralization
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DelaunayError {
    /// A coordinate is NaN or infinite
    #[error("Point {index} has a non-finite coordinate")]
    NonFiniteCoordinate { index: usize },

    /// Coincidence tolerance must be finite and non-negative
    #[error("Invalid coincidence tolerance: {0}")]
    InvalidTolerance(f64),
}

/// Result type alias for DelaunayError
pub type Result<T> = std::result::Result<T, DelaunayError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_finite_display() {
        let err = DelaunayError::NonFiniteCoordinate { index: 7 };
        assert!(err.to_string().contains("Point 7"));
        assert!(err.to_string().contains("non-finite"));
    }

    #[test]
    fn test_invalid_tolerance_display() {
        let err = DelaunayError::InvalidTolerance(-1.0);
        assert!(err.to_string().contains("-1"));
    }

    #[test]
    fn test_error_clone_eq() {
        let err = DelaunayError::NonFiniteCoordinate { index: 3 };
        assert_eq!(err.clone(), err);
    }
}
