use crate::matrix::dims::Dims;
use crate::matrix::element::Element;

/// Reference matrix multiplication using i-j-k loop order: C = A * B.
///
/// This is the textbook triple loop. The innermost loop walks B with
/// stride `n` (down a column), so it misses cache on nearly every
/// iteration. It's the ground truth the tiled kernels are checked
/// against, never the fast path.
///
/// Every element of C is written exactly once; whatever C held before is
/// discarded.
///
/// # Arguments
///
/// * `a` - Matrix A (m × k), row-major
/// * `b` - Matrix B (k × n), row-major
/// * `c` - Matrix C (m × n), row-major, overwritten
/// * `dims` - m, k, n
///
/// # Panics
///
/// Panics if the slice sizes don't match `dims`.
pub fn matmul_naive_ijk<T: Element>(a: &[T], b: &[T], c: &mut [T], dims: Dims) {
    dims.assert_operands(a, b, c);
    let Dims { m, k, n } = dims;

    for i in 0..m {
        for j in 0..n {
            let mut acc = T::zero();
            for z in 0..k {
                acc = acc.mul_add_wrapping(a[i * k + z], b[z * n + j]);
            }
            c[i * n + j] = acc;
        }
    }
}
