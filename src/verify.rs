//! Element-wise check of a kernel's output against the reference.

use crate::matrix::buffer::Matrix;
use crate::matrix::element::Element;
use std::fmt;

/// Why a candidate output didn't match the reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerifyError<T> {
    /// The two matrices aren't even the same shape.
    ShapeMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
    },
    /// First element (in row-major order) that differs.
    ElementMismatch {
        row: usize,
        col: usize,
        expected: T,
        actual: T,
    },
}

impl<T: fmt::Display> fmt::Display for VerifyError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VerifyError::ShapeMismatch { expected, actual } => write!(
                f,
                "shape mismatch: expected {}x{}, got {}x{}",
                expected.0, expected.1, actual.0, actual.1
            ),
            VerifyError::ElementMismatch {
                row,
                col,
                expected,
                actual,
            } => write!(
                f,
                "mismatch at ({}, {}): expected {}, got {}",
                row, col, expected, actual
            ),
        }
    }
}

impl<T: fmt::Debug + fmt::Display> std::error::Error for VerifyError<T> {}

/// Compares `candidate` against `reference` element by element.
///
/// Stops at the first difference. A mismatch means a kernel bug, so
/// callers shouldn't try to carry on past it.
pub fn verify<T: Element>(
    reference: &Matrix<T>,
    candidate: &Matrix<T>,
) -> Result<(), VerifyError<T>> {
    let expected = (reference.rows(), reference.cols());
    let actual = (candidate.rows(), candidate.cols());
    if expected != actual {
        return Err(VerifyError::ShapeMismatch { expected, actual });
    }

    let cols = reference.cols();
    match reference
        .as_slice()
        .iter()
        .zip(candidate.as_slice())
        .position(|(r, c)| r != c)
    {
        None => Ok(()),
        Some(idx) => Err(VerifyError::ElementMismatch {
            row: idx / cols,
            col: idx % cols,
            expected: reference.as_slice()[idx],
            actual: candidate.as_slice()[idx],
        }),
    }
}

/// Panicking form of [`verify`].
///
/// # Panics
///
/// Panics with the first mismatch if the matrices differ.
#[track_caller]
pub fn assert_verified<T: Element>(reference: &Matrix<T>, candidate: &Matrix<T>) {
    if let Err(e) = verify(reference, candidate) {
        panic!("verification failed: {e}");
    }
}
