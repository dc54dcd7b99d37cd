//! Kernel selection.

use crate::error::MatmulError;
use std::fmt;

/// The optimized kernels the harness can run against the reference.
///
/// The numeric index is what the command line takes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Variant {
    /// 1: row/column tiling, full dot product per element
    TiledEager,
    /// 2: row/column tiling, zeroed tile, z streamed outside (i, j)
    TiledStream,
    /// 3: rows × columns × reduction tiling
    Tiled3d,
}

impl Variant {
    pub const ALL: [Variant; 3] = [Variant::TiledEager, Variant::TiledStream, Variant::Tiled3d];

    pub fn index(self) -> u32 {
        match self {
            Variant::TiledEager => 1,
            Variant::TiledStream => 2,
            Variant::Tiled3d => 3,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Variant::TiledEager => "tiled (eager accumulate)",
            Variant::TiledStream => "tiled (streaming accumulate)",
            Variant::Tiled3d => "tiled (3-level blocking)",
        }
    }
}

impl TryFrom<u32> for Variant {
    type Error = MatmulError;

    fn try_from(index: u32) -> Result<Self, Self::Error> {
        match index {
            1 => Ok(Variant::TiledEager),
            2 => Ok(Variant::TiledStream),
            3 => Ok(Variant::Tiled3d),
            _ => Err(MatmulError::UnknownVariant { index }),
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.index(), self.name())
    }
}
