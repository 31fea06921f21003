//! Core types for the voxcube LED cube driver.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! binary voxel store ([`VoxelCube`]), the six axis-aligned directions
//! ([`AxisVector`]) used to translate it, and the error type shared by
//! every cube operation.
//!
//! # Storage model
//!
//! Each logical `(y, z)` row of the cube is one `u64` word whose bit `x`
//! is the voxel at `(x, y, z)`. Rows live in a single flat buffer indexed
//! by storage row and storage column, with both the Y and Z axes stored in
//! reverse order relative to logical coordinates.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod axis;
pub mod cube;
pub mod error;

pub use axis::{Axis, AxisVector, Direction};
pub use cube::{CubeDims, VoxelCube, MAX_X_LEN};
pub use error::CubeError;
