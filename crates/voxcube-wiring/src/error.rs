//! Wiring table validation errors.

use thiserror::Error;
use voxcube_core::Axis;

/// A wiring table does not cover, or maps outside of, the cube.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum WiringError {
    /// The table has fewer rows than the driving axis is long.
    #[error("{axis} wiring table has {rows} rows, cube needs {needed}")]
    MissingRow {
        /// Axis the table remaps.
        axis: Axis,
        /// Rows present.
        rows: usize,
        /// Rows required.
        needed: usize,
    },
    /// A table row is shorter than the remapped axis.
    #[error("{axis} wiring table row {row} has {len} entries, cube needs {needed}")]
    MissingColumn {
        /// Axis the table remaps.
        axis: Axis,
        /// Offending row (driving-axis index).
        row: usize,
        /// Entries present.
        len: usize,
        /// Entries required.
        needed: usize,
    },
    /// A table entry points outside the cube.
    #[error("{axis} wiring table maps [{row}][{col}] to {value}, outside length {len}")]
    MappedOutOfRange {
        /// Axis the table remaps.
        axis: Axis,
        /// Driving-axis index.
        row: usize,
        /// Target-axis index.
        col: usize,
        /// The mapped coordinate.
        value: usize,
        /// Length of the cube along `axis`.
        len: usize,
    },
}
