//! Element types the kernels can multiply.

use num::traits::{WrappingAdd, WrappingMul};
use num::{PrimInt, Signed};
use std::fmt::{Debug, Display};

/// A fixed-width signed integer that kernels can accumulate in.
///
/// Every kernel multiplies and adds with `wrapping_mul` / `wrapping_add`,
/// so overflow wraps (two's complement) in debug and release builds alike.
/// That makes the optimized kernels bit-identical to the reference for any
/// input, not just inputs small enough to avoid overflow.
///
/// Implemented for every primitive signed integer (`i8` through `i128`).
pub trait Element:
    PrimInt + Signed + WrappingAdd + WrappingMul + Send + Sync + Debug + Display + 'static
{
    /// `acc + x * y`, wrapping on overflow.
    #[inline(always)]
    fn mul_add_wrapping(self, x: Self, y: Self) -> Self {
        self.wrapping_add(&x.wrapping_mul(&y))
    }
}

impl<T> Element for T where
    T: PrimInt + Signed + WrappingAdd + WrappingMul + Send + Sync + Debug + Display + 'static
{
}
