//! [`WiringMap`] and its per-axis lookup tables.

use voxcube_core::{Axis, CubeDims};

use crate::error::WiringError;

/// A 2D lookup table `table[driver][target] -> physical`.
///
/// `driver` indexes the axis the wiring varies along; `target` is the
/// logical coordinate being remapped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AxisTable {
    rows: Vec<Vec<usize>>,
}

impl AxisTable {
    /// Wrap raw table rows.
    pub fn new(rows: Vec<Vec<usize>>) -> Self {
        Self { rows }
    }

    /// The physical coordinate for `target` when the driving axis is at
    /// `driver`.
    ///
    /// # Panics
    ///
    /// Panics if the table does not cover `(driver, target)`. Call
    /// [`WiringMap::validate`] first.
    pub fn get(&self, driver: usize, target: usize) -> usize {
        self.rows[driver][target]
    }

    /// Raw table rows.
    pub fn rows(&self) -> &[Vec<usize>] {
        &self.rows
    }

    fn validate(&self, axis: Axis, drivers: usize, len: usize) -> Result<(), WiringError> {
        if self.rows.len() < drivers {
            return Err(WiringError::MissingRow {
                axis,
                rows: self.rows.len(),
                needed: drivers,
            });
        }
        for (row, entries) in self.rows.iter().take(drivers).enumerate() {
            if entries.len() < len {
                return Err(WiringError::MissingColumn {
                    axis,
                    row,
                    len: entries.len(),
                    needed: len,
                });
            }
            if let Some((col, &value)) = entries
                .iter()
                .take(len)
                .enumerate()
                .find(|&(_, &v)| v >= len)
            {
                return Err(WiringError::MappedOutOfRange {
                    axis,
                    row,
                    col,
                    value,
                    len,
                });
            }
        }
        Ok(())
    }
}

/// Translation from logical cube coordinates to physical addressing.
///
/// Built with [`identity()`](WiringMap::identity) and the `with_*_map`
/// methods:
///
/// ```
/// use voxcube_core::CubeDims;
/// use voxcube_wiring::WiringMap;
///
/// // Odd Z rows are wired right-to-left.
/// let x_map = (0..4)
///     .map(|z| if z % 2 == 0 { vec![0, 1, 2, 3] } else { vec![3, 2, 1, 0] })
///     .collect();
/// let wiring = WiringMap::identity().with_x_map(x_map);
/// wiring.validate(CubeDims::cube(4).unwrap()).unwrap();
///
/// assert_eq!(wiring.remap(0, 2, 0), (0, 2, 0));
/// assert_eq!(wiring.remap(0, 2, 1), (3, 2, 1));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WiringMap {
    x_map: Option<AxisTable>,
    y_map: Option<AxisTable>,
    z_map: Option<AxisTable>,
}

impl WiringMap {
    /// The identity mapping on all three axes.
    pub fn identity() -> Self {
        Self::default()
    }

    /// Set the X table: `x' = x_map[z][x]`.
    pub fn with_x_map(mut self, x_map: Vec<Vec<usize>>) -> Self {
        self.x_map = Some(AxisTable::new(x_map));
        self
    }

    /// Set the Y table: `y' = y_map[x][y]`.
    pub fn with_y_map(mut self, y_map: Vec<Vec<usize>>) -> Self {
        self.y_map = Some(AxisTable::new(y_map));
        self
    }

    /// Set the Z table: `z' = z_map[x][z]`.
    pub fn with_z_map(mut self, z_map: Vec<Vec<usize>>) -> Self {
        self.z_map = Some(AxisTable::new(z_map));
        self
    }

    /// Whether no table is set.
    pub fn is_identity(&self) -> bool {
        self.x_map.is_none() && self.y_map.is_none() && self.z_map.is_none()
    }

    /// The table remapping `axis`, if one is set.
    pub fn table(&self, axis: Axis) -> Option<&AxisTable> {
        match axis {
            Axis::X => self.x_map.as_ref(),
            Axis::Y => self.y_map.as_ref(),
            Axis::Z => self.z_map.as_ref(),
        }
    }

    /// Check that every table covers `dims` and maps inside it.
    pub fn validate(&self, dims: CubeDims) -> Result<(), WiringError> {
        if let Some(t) = &self.x_map {
            t.validate(Axis::X, dims.z(), dims.x())?;
        }
        if let Some(t) = &self.y_map {
            t.validate(Axis::Y, dims.x(), dims.y())?;
        }
        if let Some(t) = &self.z_map {
            t.validate(Axis::Z, dims.x(), dims.z())?;
        }
        Ok(())
    }

    /// Physical coordinates for logical `(x, y, z)`.
    ///
    /// Every table reads the logical coordinates; the remapped axes do not
    /// feed into each other.
    ///
    /// # Panics
    ///
    /// Panics if a table does not cover the coordinate. Maps that passed
    /// [`validate`](WiringMap::validate) never panic for in-range input.
    pub fn remap(&self, x: usize, y: usize, z: usize) -> (usize, usize, usize) {
        let px = self.x_map.as_ref().map_or(x, |t| t.get(z, x));
        let py = self.y_map.as_ref().map_or(y, |t| t.get(x, y));
        let pz = self.z_map.as_ref().map_or(z, |t| t.get(x, z));
        (px, py, pz)
    }
}
