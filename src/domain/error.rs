//! Error types for grid construction and checked cell access.

/// Errors that can occur when building a grid or addressing cells directly.
/// Neighbor counting and evolution never fail; wraparound keeps every
/// internal lookup in range.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    /// A caller-supplied seed grid is not rectangular.
    #[error("seed row {row} has {found} cells, expected {expected}")]
    InvalidDimension {
        /// Index of the offending row.
        row: usize,
        /// Width established by the first row.
        expected: usize,
        /// Actual length of the offending row.
        found: usize,
    },

    /// A checked access addressed a cell outside the grid.
    #[error("coordinate ({x}, {y}) out of range for {width}x{height} grid")]
    CoordinateOutOfRange {
        /// Requested column.
        x: usize,
        /// Requested row.
        y: usize,
        /// Grid width.
        width: usize,
        /// Grid height.
        height: usize,
    },
}
