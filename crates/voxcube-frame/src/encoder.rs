//! Cube-to-wire encoding.

use smallvec::SmallVec;
use voxcube_core::{Axis, CubeDims, VoxelCube};
use voxcube_wiring::WiringMap;

use crate::error::{FrameError, RefreshError};
use crate::transport::Transport;

/// Longest X or Y axis the wire format can address: X is packed into one
/// byte per row and the layer select is a one-hot byte.
pub const MAX_WIRE_LEN: usize = u8::BITS as usize;

/// One encoded layer. Inline for cubes up to 8 deep.
pub type TransmitRow = SmallVec<[u8; 9]>;

/// A fully encoded refresh: one [`TransmitRow`] per Y layer, ascending.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    rows: Vec<TransmitRow>,
}

impl Frame {
    /// All layers, `y = 0` first.
    pub fn rows(&self) -> &[TransmitRow] {
        &self.rows
    }

    /// The encoded layer `y`, if present.
    pub fn row(&self, y: usize) -> Option<&[u8]> {
        self.rows.get(y).map(|r| r.as_slice())
    }

    /// Number of layers.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the frame has no layers.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Send every layer in ascending order, stopping at the first failure.
    ///
    /// # Errors
    ///
    /// Returns [`RefreshError::TransmissionFailure`] naming the layer that
    /// failed. Layers after it are not sent.
    pub fn transmit(&self, transport: &mut dyn Transport) -> Result<(), RefreshError> {
        for (row, bytes) in self.rows.iter().enumerate() {
            transport
                .transmit(bytes)
                .map_err(|source| RefreshError::TransmissionFailure { row, source })?;
        }
        Ok(())
    }
}

/// Encodes logical cubes into physical wire frames.
///
/// Holds a scratch cube for the remapped image so repeated encodes do not
/// allocate a cube per refresh.
#[derive(Clone, Debug)]
pub struct FrameEncoder {
    wiring: WiringMap,
    scratch: VoxelCube,
}

impl FrameEncoder {
    /// Build an encoder for cubes of shape `dims` wired as `wiring`.
    ///
    /// # Errors
    ///
    /// Returns [`FrameError::Wiring`] if the tables do not fit `dims`, or
    /// [`FrameError::AxisTooLong`] if X or Y exceeds [`MAX_WIRE_LEN`].
    pub fn new(dims: CubeDims, wiring: WiringMap) -> Result<Self, FrameError> {
        for axis in [Axis::X, Axis::Y] {
            if dims.axis_len(axis) > MAX_WIRE_LEN {
                return Err(FrameError::AxisTooLong {
                    dims,
                    axis,
                    max: MAX_WIRE_LEN,
                });
            }
        }
        wiring.validate(dims)?;
        Ok(Self {
            wiring,
            scratch: VoxelCube::with_dims(dims),
        })
    }

    /// Shape this encoder accepts.
    pub fn dims(&self) -> CubeDims {
        self.scratch.dims()
    }

    /// The board wiring.
    pub fn wiring(&self) -> &WiringMap {
        &self.wiring
    }

    /// Apply the wiring to `cube` and return the physical image.
    ///
    /// # Panics
    ///
    /// Panics if `cube` does not have this encoder's dimensions.
    #[track_caller]
    pub fn remap(&mut self, cube: &VoxelCube) -> &VoxelCube {
        assert_eq!(
            cube.dims(),
            self.scratch.dims(),
            "cube does not match encoder dimensions"
        );
        if self.wiring.is_identity() {
            self.scratch.clone_from(cube);
        } else {
            self.scratch.clear();
            for (x, y, z) in cube.lit_voxels() {
                let (px, py, pz) = self.wiring.remap(x, y, z);
                self.scratch.set_voxel(px, py, pz);
            }
        }
        &self.scratch
    }

    /// Encode `cube` into a [`Frame`]. The cube is not modified.
    ///
    /// # Panics
    ///
    /// Panics if `cube` does not have this encoder's dimensions.
    #[track_caller]
    pub fn encode(&mut self, cube: &VoxelCube) -> Frame {
        let physical = self.remap(cube);
        let dims = physical.dims();
        let rows = (0..dims.y())
            .map(|y| {
                let mut row = TransmitRow::with_capacity(1 + dims.z());
                row.push(1u8 << y);
                // x_len <= 8, so the row word fits in one byte.
                row.extend((0..dims.z()).map(|z| physical.row_bits(y, z) as u8));
                row
            })
            .collect();
        Frame { rows }
    }
}
