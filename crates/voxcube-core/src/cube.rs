//! The binary voxel store.

use std::fmt;

use crate::axis::{Axis, AxisVector, Direction};
use crate::error::CubeError;

/// Maximum X length: each `(y, z)` row is a single `u64` word.
pub const MAX_X_LEN: usize = u64::BITS as usize;

/// Validated cube dimensions.
///
/// Every axis is at least 1 long and the X axis fits in one storage word.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CubeDims {
    x: usize,
    y: usize,
    z: usize,
}

impl CubeDims {
    /// Validate a rectangular prism of `x * y * z` voxels.
    ///
    /// Returns `Err(CubeError::EmptyDimension)` if any length is 0, or
    /// `Err(CubeError::RowTooWide)` if `x` exceeds [`MAX_X_LEN`].
    pub fn new(x: usize, y: usize, z: usize) -> Result<Self, CubeError> {
        for (axis, len) in [(Axis::X, x), (Axis::Y, y), (Axis::Z, z)] {
            if len == 0 {
                return Err(CubeError::EmptyDimension { axis });
            }
        }
        if x > MAX_X_LEN {
            return Err(CubeError::RowTooWide {
                x_len: x,
                max: MAX_X_LEN,
            });
        }
        Ok(Self { x, y, z })
    }

    /// A cube with `size` voxels along every axis.
    pub fn cube(size: usize) -> Result<Self, CubeError> {
        Self::new(size, size, size)
    }

    /// Length along X.
    pub fn x(&self) -> usize {
        self.x
    }

    /// Length along Y.
    pub fn y(&self) -> usize {
        self.y
    }

    /// Length along Z.
    pub fn z(&self) -> usize {
        self.z
    }

    /// Length along `axis`.
    pub fn axis_len(&self, axis: Axis) -> usize {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    /// Total number of voxels.
    pub fn voxel_count(&self) -> usize {
        self.x * self.y * self.z
    }

    /// Whether `(x, y, z)` addresses a voxel inside these dimensions.
    pub fn contains(&self, x: usize, y: usize, z: usize) -> bool {
        x < self.x && y < self.y && z < self.z
    }

    /// Bits `0..x` set.
    fn row_mask(&self) -> u64 {
        if self.x == MAX_X_LEN {
            u64::MAX
        } else {
            (1u64 << self.x) - 1
        }
    }
}

impl Default for CubeDims {
    /// The 8x8x8 reference cube.
    fn default() -> Self {
        Self { x: 8, y: 8, z: 8 }
    }
}

impl fmt::Display for CubeDims {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}x{}", self.x, self.y, self.z)
    }
}

/// Unwraps an addressing result, panicking at the caller on violation.
#[track_caller]
fn in_range<T>(result: Result<T, CubeError>) -> T {
    match result {
        Ok(v) => v,
        Err(e) => panic!("{e}"),
    }
}

/// A binary voxel store of fixed dimensions.
///
/// Storage is one flat buffer of `y * z` row words. Logical row `(y, z)`
/// lives at storage row `y_len - 1 - y`, storage column `z_len - 1 - z`;
/// bit `x` of the word is the voxel at `(x, y, z)`. Only bits below
/// `x_len` are ever set.
///
/// # Examples
///
/// ```
/// use voxcube_core::{AxisVector, VoxelCube};
///
/// let mut cube = VoxelCube::new(8).unwrap();
/// cube.set_voxel(7, 0, 0);
/// cube.shift(AxisVector::POS_X);
/// assert_eq!(cube.lit_count(), 0);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VoxelCube {
    dims: CubeDims,
    rows: Vec<u64>,
}

impl VoxelCube {
    /// A blank cube with `size` voxels along every axis.
    pub fn new(size: usize) -> Result<Self, CubeError> {
        Ok(Self::with_dims(CubeDims::cube(size)?))
    }

    /// A blank rectangular prism.
    pub fn new_custom(x_len: usize, y_len: usize, z_len: usize) -> Result<Self, CubeError> {
        Ok(Self::with_dims(CubeDims::new(x_len, y_len, z_len)?))
    }

    /// A blank cube of already-validated dimensions.
    pub fn with_dims(dims: CubeDims) -> Self {
        Self {
            dims,
            rows: vec![0; dims.y * dims.z],
        }
    }

    /// Dimensions of this cube.
    pub fn dims(&self) -> CubeDims {
        self.dims
    }

    /// Length along X.
    pub fn x_len(&self) -> usize {
        self.dims.x
    }

    /// Length along Y.
    pub fn y_len(&self) -> usize {
        self.dims.y
    }

    /// Length along Z.
    pub fn z_len(&self) -> usize {
        self.dims.z
    }

    fn storage_index(&self, y: usize, z: usize) -> usize {
        (self.dims.y - 1 - y) * self.dims.z + (self.dims.z - 1 - z)
    }

    fn check(&self, x: usize, y: usize, z: usize) -> Result<(), CubeError> {
        if self.dims.contains(x, y, z) {
            Ok(())
        } else {
            Err(CubeError::OutOfRange {
                x,
                y,
                z,
                dims: self.dims,
            })
        }
    }

    /// Light the voxel at `(x, y, z)`.
    pub fn try_set_voxel(&mut self, x: usize, y: usize, z: usize) -> Result<(), CubeError> {
        self.check(x, y, z)?;
        let i = self.storage_index(y, z);
        self.rows[i] |= 1u64 << x;
        Ok(())
    }

    /// Light the voxel at `(x, y, z)`.
    ///
    /// # Panics
    ///
    /// Panics if any coordinate is outside the cube.
    #[track_caller]
    pub fn set_voxel(&mut self, x: usize, y: usize, z: usize) {
        in_range(self.try_set_voxel(x, y, z));
    }

    /// Whether the voxel at `(x, y, z)` is lit.
    pub fn try_get_voxel(&self, x: usize, y: usize, z: usize) -> Result<bool, CubeError> {
        self.check(x, y, z)?;
        Ok(self.rows[self.storage_index(y, z)] & (1u64 << x) != 0)
    }

    /// Whether the voxel at `(x, y, z)` is lit.
    ///
    /// # Panics
    ///
    /// Panics if any coordinate is outside the cube.
    #[track_caller]
    pub fn get_voxel(&self, x: usize, y: usize, z: usize) -> bool {
        in_range(self.try_get_voxel(x, y, z))
    }

    /// X bitmap of logical row `(y, z)`, with `x = 0` in the least
    /// significant bit.
    ///
    /// # Panics
    ///
    /// Panics if `y` or `z` is outside the cube.
    #[track_caller]
    pub fn row_bits(&self, y: usize, z: usize) -> u64 {
        in_range(self.check(0, y, z));
        self.rows[self.storage_index(y, z)]
    }

    /// Turn every voxel off.
    pub fn clear(&mut self) {
        self.rows.fill(0);
    }

    /// Light every voxel on the plane perpendicular to `axis` at `index`.
    pub fn try_set_plane(&mut self, axis: Axis, index: usize) -> Result<(), CubeError> {
        let len = self.dims.axis_len(axis);
        if index >= len {
            return Err(CubeError::PlaneOutOfRange { axis, index, len });
        }
        let full = self.dims.row_mask();
        let (y_len, z_len) = (self.dims.y, self.dims.z);
        match axis {
            Axis::X => {
                for word in &mut self.rows {
                    *word |= 1u64 << index;
                }
            }
            Axis::Y => {
                let start = (y_len - 1 - index) * z_len;
                self.rows[start..start + z_len].fill(full);
            }
            Axis::Z => {
                let col = z_len - 1 - index;
                for row in self.rows.chunks_exact_mut(z_len) {
                    row[col] = full;
                }
            }
        }
        Ok(())
    }

    /// Light every voxel on the plane perpendicular to `axis` at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is outside the cube along `axis`.
    #[track_caller]
    pub fn set_plane(&mut self, axis: Axis, index: usize) {
        in_range(self.try_set_plane(axis, index));
    }

    /// Translate the whole pattern one voxel along `vector`.
    ///
    /// Voxels pushed past the boundary are lost and the vacated plane is
    /// left dark. Nothing wraps.
    pub fn shift(&mut self, vector: AxisVector) {
        let z_len = self.dims.z;
        let len = self.rows.len();
        // Storage runs against the logical Y and Z axes, so a positive
        // logical shift moves words towards lower storage indices.
        match (vector.axis, vector.direction) {
            (Axis::X, Direction::Positive) => {
                let mask = self.dims.row_mask();
                for word in &mut self.rows {
                    *word = (*word << 1) & mask;
                }
            }
            (Axis::X, Direction::Negative) => {
                for word in &mut self.rows {
                    *word >>= 1;
                }
            }
            (Axis::Y, Direction::Positive) => {
                self.rows.copy_within(z_len.., 0);
                self.rows[len - z_len..].fill(0);
            }
            (Axis::Y, Direction::Negative) => {
                self.rows.copy_within(..len - z_len, z_len);
                self.rows[..z_len].fill(0);
            }
            (Axis::Z, Direction::Positive) => {
                for row in self.rows.chunks_exact_mut(z_len) {
                    row.copy_within(1.., 0);
                    row[z_len - 1] = 0;
                }
            }
            (Axis::Z, Direction::Negative) => {
                for row in self.rows.chunks_exact_mut(z_len) {
                    row.copy_within(..z_len - 1, 1);
                    row[0] = 0;
                }
            }
        }
    }

    /// Number of lit voxels.
    pub fn lit_count(&self) -> usize {
        self.rows.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Whether no voxel is lit.
    pub fn is_blank(&self) -> bool {
        self.rows.iter().all(|&w| w == 0)
    }

    /// Logical coordinates of every lit voxel, ordered by `y`, then `z`,
    /// then `x`.
    pub fn lit_voxels(&self) -> impl Iterator<Item = (usize, usize, usize)> + '_ {
        let (y_len, z_len) = (self.dims.y, self.dims.z);
        (0..y_len).flat_map(move |y| {
            (0..z_len).flat_map(move |z| {
                let word = self.rows[self.storage_index(y, z)];
                (0..self.dims.x)
                    .filter(move |x| word & (1u64 << x) != 0)
                    .map(move |x| (x, y, z))
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn cube8() -> VoxelCube {
        VoxelCube::new(8).unwrap()
    }

    // ── Construction ────────────────────────────────────────────

    #[test]
    fn new_is_blank() {
        let c = cube8();
        assert_eq!(c.dims(), CubeDims::cube(8).unwrap());
        assert_eq!(c.dims(), CubeDims::default());
        assert!(c.is_blank());
        assert_eq!(c.lit_count(), 0);
    }

    #[test]
    fn rejects_empty_dimension() {
        assert_eq!(
            VoxelCube::new_custom(4, 0, 4).unwrap_err(),
            CubeError::EmptyDimension { axis: Axis::Y }
        );
    }

    #[test]
    fn rejects_wide_rows() {
        assert_eq!(
            VoxelCube::new_custom(65, 2, 2).unwrap_err(),
            CubeError::RowTooWide { x_len: 65, max: 64 }
        );
        assert!(VoxelCube::new_custom(64, 2, 2).is_ok());
    }

    #[test]
    fn axis_len_matches_each_dimension() {
        let dims = CubeDims::new(5, 3, 7).unwrap();
        assert_eq!(dims.axis_len(Axis::X), 5);
        assert_eq!(dims.axis_len(Axis::Y), 3);
        assert_eq!(dims.axis_len(Axis::Z), 7);
        assert_eq!(dims.voxel_count(), 105);
    }

    // ── Addressing ──────────────────────────────────────────────

    #[test]
    fn storage_is_reversed_on_y_and_z() {
        let mut c = VoxelCube::new_custom(8, 3, 4).unwrap();
        c.set_voxel(5, 0, 0);
        // Logical (y=0, z=0) is the last storage row, last column.
        assert_eq!(c.rows[2 * 4 + 3], 1 << 5);
        assert_eq!(c.row_bits(0, 0), 1 << 5);
    }

    #[test]
    fn try_set_out_of_range_reports_coordinate() {
        let mut c = cube8();
        let err = c.try_set_voxel(8, 0, 0).unwrap_err();
        assert_eq!(
            err,
            CubeError::OutOfRange {
                x: 8,
                y: 0,
                z: 0,
                dims: c.dims()
            }
        );
        assert!(c.try_get_voxel(0, 0, 9).is_err());
        assert!(c.is_blank());
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn set_voxel_out_of_range_panics() {
        cube8().set_voxel(0, 8, 0);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn get_voxel_out_of_range_panics() {
        cube8().get_voxel(0, 0, 8);
    }

    #[test]
    fn clear_is_idempotent() {
        let mut c = cube8();
        c.set_plane(Axis::Z, 3);
        c.clear();
        assert!(c.is_blank());
        c.clear();
        assert!(c.is_blank());
    }

    // ── Planes ──────────────────────────────────────────────────

    #[test]
    fn set_plane_y0_lights_64_voxels_on_floor() {
        let mut c = cube8();
        c.set_plane(Axis::Y, 0);
        assert_eq!(c.lit_count(), 64);
        assert!(c.lit_voxels().all(|(_, y, _)| y == 0));
    }

    #[test]
    fn set_plane_spans_prism_extent() {
        let mut c = VoxelCube::new_custom(5, 3, 7).unwrap();
        c.set_plane(Axis::X, 4);
        assert_eq!(c.lit_count(), 3 * 7);
        assert!(c.lit_voxels().all(|(x, _, _)| x == 4));

        c.clear();
        c.set_plane(Axis::Z, 6);
        assert_eq!(c.lit_count(), 5 * 3);
        assert!(c.lit_voxels().all(|(_, _, z)| z == 6));
    }

    #[test]
    fn set_plane_out_of_range() {
        let mut c = cube8();
        assert_eq!(
            c.try_set_plane(Axis::X, 8).unwrap_err(),
            CubeError::PlaneOutOfRange {
                axis: Axis::X,
                index: 8,
                len: 8
            }
        );
    }

    // ── Shifts ──────────────────────────────────────────────────

    #[test]
    fn shift_pos_x_drops_far_edge() {
        let mut c = cube8();
        c.set_voxel(7, 0, 0);
        c.shift(AxisVector::POS_X);
        assert!(c.is_blank());
        c.shift(AxisVector::NEG_X);
        assert!(c.is_blank(), "lost voxels do not come back");
    }

    #[test]
    fn shift_pos_x_does_not_grow_past_x_len() {
        let mut c = VoxelCube::new_custom(3, 1, 1).unwrap();
        c.set_voxel(2, 0, 0);
        c.shift(AxisVector::POS_X);
        assert_eq!(c.row_bits(0, 0), 0);
    }

    #[test]
    fn shift_full_width_row() {
        let mut c = VoxelCube::new_custom(64, 1, 1).unwrap();
        c.set_voxel(63, 0, 0);
        c.set_voxel(0, 0, 0);
        c.shift(AxisVector::POS_X);
        assert_eq!(c.lit_voxels().collect::<Vec<_>>(), vec![(1, 0, 0)]);
    }

    #[test]
    fn each_direction_moves_one_voxel() {
        let cases = [
            (AxisVector::POS_X, (4, 3, 3)),
            (AxisVector::NEG_X, (2, 3, 3)),
            (AxisVector::POS_Y, (3, 4, 3)),
            (AxisVector::NEG_Y, (3, 2, 3)),
            (AxisVector::POS_Z, (3, 3, 4)),
            (AxisVector::NEG_Z, (3, 3, 2)),
        ];
        for (vector, expected) in cases {
            let mut c = cube8();
            c.set_voxel(3, 3, 3);
            c.shift(vector);
            assert_eq!(
                c.lit_voxels().collect::<Vec<_>>(),
                vec![expected],
                "shift {vector}"
            );
        }
    }

    #[test]
    fn shift_neg_y_vacates_top_row() {
        let mut c = cube8();
        c.set_plane(Axis::Y, 7);
        c.shift(AxisVector::NEG_Y);
        assert_eq!(c.lit_count(), 64);
        assert!(c.lit_voxels().all(|(_, y, _)| y == 6));
    }

    #[test]
    fn shift_neg_z_clears_every_layer() {
        let mut c = cube8();
        c.set_plane(Axis::Z, 0);
        c.shift(AxisVector::NEG_Z);
        assert!(c.is_blank());

        c.set_plane(Axis::Z, 0);
        c.shift(AxisVector::POS_Z);
        assert_eq!(c.lit_count(), 64);
        assert!(c.lit_voxels().all(|(_, _, z)| z == 1));
    }

    #[test]
    fn shift_on_single_layer_prism() {
        let mut c = VoxelCube::new_custom(4, 1, 1).unwrap();
        c.set_voxel(1, 0, 0);
        c.shift(AxisVector::POS_Y);
        assert!(c.is_blank());
    }

    // ── Properties ──────────────────────────────────────────────

    fn arb_vector() -> impl Strategy<Value = AxisVector> {
        (0usize..6).prop_map(|i| AxisVector::ALL[i])
    }

    proptest! {
        #[test]
        fn set_then_get_affects_only_target(
            x_len in 1usize..=64, y_len in 1usize..6, z_len in 1usize..6,
            x in 0usize..64, y in 0usize..6, z in 0usize..6,
        ) {
            let (x, y, z) = (x % x_len, y % y_len, z % z_len);
            let mut c = VoxelCube::new_custom(x_len, y_len, z_len).unwrap();
            c.set_voxel(x, y, z);
            prop_assert!(c.get_voxel(x, y, z));
            prop_assert_eq!(c.lit_voxels().collect::<Vec<_>>(), vec![(x, y, z)]);
        }

        #[test]
        fn shift_never_sets_bits_beyond_x_len(
            x_len in 1usize..=64,
            seeds in proptest::collection::vec((0usize..64, 0usize..4, 0usize..4), 0..20),
            vectors in proptest::collection::vec(arb_vector(), 0..12),
        ) {
            let mut c = VoxelCube::new_custom(x_len, 4, 4).unwrap();
            for (x, y, z) in seeds {
                c.set_voxel(x % x_len, y, z);
            }
            for v in vectors {
                let before = c.lit_count();
                c.shift(v);
                prop_assert!(c.lit_count() <= before);
            }
            let mask = c.dims().row_mask();
            prop_assert!(c.rows.iter().all(|w| w & !mask == 0));
        }

        #[test]
        fn shift_and_back_restores_interior(
            v in arb_vector(),
            x in 1usize..7, y in 1usize..7, z in 1usize..7,
        ) {
            let mut c = VoxelCube::new(8).unwrap();
            c.set_voxel(x, y, z);
            let before = c.clone();
            c.shift(v);
            c.shift(v.reversed());
            prop_assert_eq!(c, before);
        }
    }
}
