//! Rotation kinds - pure transforms on a cell's offset from the pivot

/// How a piece turns its cells around the pivot
///
/// Every shape fixes one kind for "rotate left" and one for "rotate right".
/// The square uses `Identity` for both, so rotating it always succeeds and
/// never moves a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RotationKind {
    /// (x, y) -> (x, y)
    Identity,
    /// (x, y) -> (y, -x), clockwise
    Rotate90,
    /// (x, y) -> (-y, x), counter-clockwise
    Rotate270,
    /// (x, y) -> (y, x), mirror along the diagonal
    SwapAxes,
}

impl RotationKind {
    /// Transform an offset
    #[inline]
    pub fn apply(&self, x: i32, y: i32) -> (i32, i32) {
        match self {
            RotationKind::Identity => (x, y),
            RotationKind::Rotate90 => (y, -x),
            RotationKind::Rotate270 => (-y, x),
            RotationKind::SwapAxes => (y, x),
        }
    }
}
