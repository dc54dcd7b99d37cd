//! Matrix storage and the reference kernel.
//!
//! The reference kernel provides the correctness baseline every tiled
//! kernel is verified against.

pub mod buffer;
pub mod dims;
pub mod element;
pub mod naive_ijk;

pub use buffer::Matrix;
pub use dims::Dims;
pub use element::Element;
