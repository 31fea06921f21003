//! Logical-to-physical coordinate remapping for voxcube LED cubes.
//!
//! Hand-soldered cubes rarely wire their anodes and cathodes in logical
//! order. A [`WiringMap`] describes the translation from the logical
//! `(x, y, z)` a scene draws at to the physical `(x', y', z')` the shift
//! registers address, as three lookup tables:
//!
//! - `x' = x_map[z][x]`
//! - `y' = y_map[x][y]`
//! - `z' = z_map[x][z]`
//!
//! An absent table is the identity on its axis. Maps are immutable once
//! built and are validated against the cube dimensions before use.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod map;

pub use error::WiringError;
pub use map::{AxisTable, WiringMap};
