//! Error types for mmult operations.
//!
//! Kernels themselves panic on malformed input (they are hot paths with no
//! error channel). These errors are for the checked entry points and the
//! harness: shape validation, allocation, and configuration.

use std::fmt;

/// Errors that can occur before a multiplication starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatmulError {
    /// A buffer's length doesn't match the declared dimensions.
    DimensionMismatch {
        /// Which operand was wrong ("A", "B" or "C").
        operand: &'static str,
        /// Element count implied by the dimensions.
        expected: usize,
        /// Element count actually provided.
        actual: usize,
    },
    /// An operand's element count doesn't fit in `usize`.
    DimensionOverflow {
        /// Which operand overflowed ("A", "B" or "C").
        operand: &'static str,
        rows: usize,
        cols: usize,
    },
    /// Tile edge length of zero.
    InvalidTile {
        /// The edge length that was rejected.
        edge: usize,
    },
    /// Matrix storage couldn't be allocated.
    AllocationError {
        /// Number of elements that was requested.
        elements: usize,
        /// Human-readable error message.
        message: String,
    },
    /// Kernel selector outside the known set.
    UnknownVariant {
        /// The selector that was given.
        index: u32,
    },
    /// The worker pool couldn't be built.
    ThreadPool {
        /// Human-readable error message.
        message: String,
    },
}

impl fmt::Display for MatmulError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatmulError::DimensionMismatch {
                operand,
                expected,
                actual,
            } => write!(
                f,
                "{}: expected {} elements, got {}",
                operand, expected, actual
            ),
            MatmulError::DimensionOverflow {
                operand,
                rows,
                cols,
            } => write!(
                f,
                "{}: {}x{} elements overflows the address space",
                operand, rows, cols
            ),
            MatmulError::InvalidTile { edge } => {
                write!(f, "Invalid tile edge length: {} (must be at least 1)", edge)
            }
            MatmulError::AllocationError { elements, message } => write!(
                f,
                "Matrix allocation failed: {} (requested {} elements)",
                message, elements
            ),
            MatmulError::UnknownVariant { index } => {
                write!(f, "Invalid index: {} (expected 1-3)", index)
            }
            MatmulError::ThreadPool { message } => {
                write!(f, "Worker pool error: {}", message)
            }
        }
    }
}

impl std::error::Error for MatmulError {}

/// Result type alias for mmult operations.
pub type Result<T> = std::result::Result<T, MatmulError>;

/// Creates a dimension mismatch error.
pub fn dimension_mismatch(operand: &'static str, expected: usize, actual: usize) -> MatmulError {
    MatmulError::DimensionMismatch {
        operand,
        expected,
        actual,
    }
}

/// Creates an allocation error.
pub fn allocation_error(elements: usize, message: impl Into<String>) -> MatmulError {
    MatmulError::AllocationError {
        elements,
        message: message.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimension_mismatch_display() {
        let error = dimension_mismatch("B", 12, 10);
        let display = error.to_string();
        assert!(display.contains("B"));
        assert!(display.contains("expected 12"));
        assert!(display.contains("got 10"));
    }

    #[test]
    fn test_dimension_overflow_display() {
        let error = MatmulError::DimensionOverflow {
            operand: "A",
            rows: usize::MAX,
            cols: 2,
        };
        let display = error.to_string();
        assert!(display.starts_with("A: "));
        assert!(display.contains(&format!("{}x2", usize::MAX)));
    }

    #[test]
    fn test_unknown_variant_display() {
        let error = MatmulError::UnknownVariant { index: 7 };
        assert_eq!(error.to_string(), "Invalid index: 7 (expected 1-3)");
    }

    #[test]
    fn test_allocation_error_display() {
        let error = allocation_error(1 << 40, "capacity overflow");
        let display = error.to_string();
        assert!(display.contains("Matrix allocation failed"));
        assert!(display.contains("capacity overflow"));
    }

    #[test]
    fn test_error_trait_implementation() {
        let error = MatmulError::InvalidTile { edge: 0 };
        let _: &dyn std::error::Error = &error;
        assert!(std::error::Error::source(&error).is_none());
    }
}
