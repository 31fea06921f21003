//! Error types for cube construction and voxel addressing.

use thiserror::Error;

use crate::axis::Axis;
use crate::cube::CubeDims;

/// Errors from cube construction or out-of-range addressing.
///
/// Addressing errors are caller defects. The contract methods on
/// [`VoxelCube`](crate::VoxelCube) panic with these messages; the `try_*`
/// methods return them.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CubeError {
    /// A voxel coordinate lies outside the cube.
    #[error("voxel ({x}, {y}, {z}) out of range for {dims} cube")]
    OutOfRange {
        /// Requested X.
        x: usize,
        /// Requested Y.
        y: usize,
        /// Requested Z.
        z: usize,
        /// Dimensions of the addressed cube.
        dims: CubeDims,
    },
    /// A plane index lies outside the cube along its axis.
    #[error("plane {index} on axis {axis} out of range (length {len})")]
    PlaneOutOfRange {
        /// Axis the plane is perpendicular to.
        axis: Axis,
        /// Requested plane index.
        index: usize,
        /// Length of the cube along `axis`.
        len: usize,
    },
    /// A dimension was zero.
    #[error("cube length along {axis} must be at least 1")]
    EmptyDimension {
        /// The empty axis.
        axis: Axis,
    },
    /// The X length does not fit in one storage word.
    #[error("x length {x_len} exceeds the {max}-bit row word")]
    RowTooWide {
        /// Requested X length.
        x_len: usize,
        /// Maximum supported X length.
        max: usize,
    },
}
