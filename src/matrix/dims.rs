//! Problem dimensions shared by every kernel.

use crate::error::{MatmulError, Result, dimension_mismatch};

/// Dimensions of one multiplication: A is m×k, B is k×n, C is m×n.
///
/// Kernels take these explicitly instead of reading global constants, and
/// clamp every tile against the bounds passed in here.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Dims {
    /// Rows of A and C
    pub m: usize,
    /// Columns of A, rows of B (the reduction dimension)
    pub k: usize,
    /// Columns of B and C
    pub n: usize,
}

impl Dims {
    pub const fn new(m: usize, k: usize, n: usize) -> Self {
        Self { m, k, n }
    }

    /// Element count of A, saturating at `usize::MAX`.
    ///
    /// No real slice has `usize::MAX` elements, so a saturated length never
    /// matches a buffer.
    pub const fn a_len(&self) -> usize {
        self.m.saturating_mul(self.k)
    }

    pub const fn b_len(&self) -> usize {
        self.k.saturating_mul(self.n)
    }

    pub const fn c_len(&self) -> usize {
        self.m.saturating_mul(self.n)
    }

    /// Multiply-add count, used for sizing thread counts and reporting.
    pub const fn ops(&self) -> usize {
        self.m.saturating_mul(self.k).saturating_mul(self.n)
    }

    /// Exact element counts of A, B and C.
    fn checked_lens(&self) -> Result<[usize; 3]> {
        let len = |operand, rows: usize, cols: usize| {
            rows.checked_mul(cols)
                .ok_or(MatmulError::DimensionOverflow {
                    operand,
                    rows,
                    cols,
                })
        };
        Ok([
            len("A", self.m, self.k)?,
            len("B", self.k, self.n)?,
            len("C", self.m, self.n)?,
        ])
    }

    /// Checks slice lengths and tile edge, returning an error instead of
    /// panicking.
    pub fn validate<T>(&self, a: &[T], b: &[T], c: &[T], tile: usize) -> Result<()> {
        let lens = self.checked_lens()?;
        for ((operand, expected), actual) in ["A", "B", "C"]
            .into_iter()
            .zip(lens)
            .zip([a.len(), b.len(), c.len()])
        {
            if actual != expected {
                return Err(dimension_mismatch(operand, expected, actual));
            }
        }
        if tile == 0 {
            return Err(MatmulError::InvalidTile { edge: tile });
        }
        Ok(())
    }

    /// Panicking form of [`Dims::validate`] used at kernel entry.
    ///
    /// # Panics
    ///
    /// Panics if the slice sizes don't match m, k, n.
    #[track_caller]
    pub fn assert_operands<T>(&self, a: &[T], b: &[T], c: &[T]) {
        let [a_len, b_len, c_len] = match self.checked_lens() {
            Ok(lens) => lens,
            Err(e) => panic!("{e}"),
        };
        let (m, k, n) = (self.m, self.k, self.n);
        assert_eq!(a.len(), a_len, "A: expected {}x{}={} elements", m, k, a_len);
        assert_eq!(b.len(), b_len, "B: expected {}x{}={} elements", k, n, b_len);
        assert_eq!(c.len(), c_len, "C: expected {}x{}={} elements", m, n, c_len);
    }
}

impl std::fmt::Display for Dims {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{} * {}x{}", self.m, self.k, self.k, self.n)
    }
}
