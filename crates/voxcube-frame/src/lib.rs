//! Wire-frame encoding and transports for voxcube shift-register boards.
//!
//! A refresh sends one transmission per Y layer. Each transmission is
//! `1 + z_len` bytes:
//!
//! | Byte | Meaning |
//! |------|---------|
//! | 0 | Layer select, `1 << y` |
//! | `1 + z` | X bitmap of row `(y, z)`, bit `x` set when voxel `x` is lit |
//!
//! Coordinates on the wire are physical: the [`FrameEncoder`] applies the
//! board's [`WiringMap`](voxcube_wiring::WiringMap) before packing.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod encoder;
pub mod error;
pub mod transport;

pub use encoder::{Frame, FrameEncoder, TransmitRow, MAX_WIRE_LEN};
pub use error::{FrameError, RefreshError, TransportError};
pub use transport::{Transport, WriteTransport};
