//! Encoding and transmission errors.

use std::io;

use thiserror::Error;
use voxcube_core::{Axis, CubeDims};
use voxcube_wiring::WiringError;

/// The encoder cannot drive a cube of this shape.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum FrameError {
    /// The wiring tables do not fit the cube.
    #[error("invalid wiring: {0}")]
    Wiring(#[from] WiringError),
    /// An axis is longer than one wire byte can address.
    #[error("{dims} cube is too long on {axis} for the wire format (max {max})")]
    AxisTooLong {
        /// Cube dimensions.
        dims: CubeDims,
        /// Offending axis.
        axis: Axis,
        /// Longest supported axis.
        max: usize,
    },
}

/// A single row transmission failed.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The underlying device reported an error.
    #[error("transport i/o error: {0}")]
    Io(#[from] io::Error),
    /// The device accepted fewer bytes than the row holds.
    #[error("short write: {written} of {expected} bytes")]
    ShortWrite {
        /// Bytes accepted.
        written: usize,
        /// Bytes in the row.
        expected: usize,
    },
    /// The transport has been shut down.
    #[error("transport closed")]
    Closed,
}

/// A frame refresh was abandoned part-way.
#[derive(Debug, Error)]
pub enum RefreshError {
    /// Transmitting layer `row` failed; later layers were not sent.
    #[error("transmission of layer {row} failed")]
    TransmissionFailure {
        /// Y layer whose transmission failed.
        row: usize,
        /// What the transport reported.
        #[source]
        source: TransportError,
    },
}
