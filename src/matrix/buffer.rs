//! Flat row-major matrix storage.

use crate::error::{Result, allocation_error, dimension_mismatch};
use crate::matrix::element::Element;
use rand::Rng;
use rand::distr::{Distribution, StandardUniform};

/// An R×C matrix stored as one contiguous row-major buffer.
///
/// Element (r, c) lives at offset `r * cols + c`. The buffer is allocated
/// once and never resized; kernels only ever borrow it through
/// [`Matrix::as_slice`] / [`Matrix::as_mut_slice`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Matrix<T = i32> {
    data: Vec<T>,
    rows: usize,
    cols: usize,
}

impl<T: Element> Matrix<T> {
    /// Allocates a zero-filled matrix.
    ///
    /// Allocation goes through `try_reserve_exact`, so running out of memory
    /// comes back as an error instead of aborting the process.
    pub fn zeros(rows: usize, cols: usize) -> Result<Self> {
        let len = rows
            .checked_mul(cols)
            .ok_or_else(|| allocation_error(usize::MAX, "element count overflows usize"))?;

        let mut data = Vec::new();
        data.try_reserve_exact(len)
            .map_err(|e| allocation_error(len, e.to_string()))?;
        data.resize(len, T::zero());

        Ok(Self { data, rows, cols })
    }

    /// Wraps an existing row-major buffer.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<T>) -> Result<Self> {
        if data.len() != rows * cols {
            return Err(dimension_mismatch("matrix", rows * cols, data.len()));
        }
        Ok(Self { data, rows, cols })
    }

    /// Allocates a matrix and fills it with uniform values over `T`'s
    /// whole range.
    pub fn random<R>(rows: usize, cols: usize, rng: &mut R) -> Result<Self>
    where
        R: Rng + ?Sized,
        StandardUniform: Distribution<T>,
    {
        let mut matrix = Self::zeros(rows, cols)?;
        for x in matrix.data.iter_mut() {
            *x = rng.random();
        }
        Ok(matrix)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Element at (r, c). Panics if out of range.
    #[inline]
    pub fn get(&self, r: usize, c: usize) -> T {
        self.data[r * self.cols + c]
    }

    /// Row `r` as a slice.
    pub fn row(&self, r: usize) -> &[T] {
        &self.data[r * self.cols..(r + 1) * self.cols]
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }
}
