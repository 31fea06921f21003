//! The [`Scene`] trait.

use std::time::Duration;

use voxcube_core::VoxelCube;

/// A stateful animation advanced one tick at a time.
///
/// # Contract
///
/// - `step()` mutates the lent cube in place and returns the minimum delay
///   before the next call. Calling sooner is wasted work, not an error.
/// - A scene keeps no reference to the cube between steps; switching
///   scenes means constructing a new one, not resetting a shared one.
///
/// # Object safety
///
/// This trait is object-safe; drivers hold the active scene as
/// `Box<dyn Scene>`.
///
/// # Examples
///
/// A scene that lights the whole floor and holds it:
///
/// ```
/// use std::time::Duration;
/// use voxcube_core::{Axis, VoxelCube};
/// use voxcube_scene::Scene;
///
/// struct Floor;
///
/// impl Scene for Floor {
///     fn name(&self) -> &str { "floor" }
///
///     fn step(&mut self, cube: &mut VoxelCube) -> Duration {
///         cube.clear();
///         cube.set_plane(Axis::Y, 0);
///         Duration::from_secs(1)
///     }
/// }
///
/// let mut cube = VoxelCube::new(4).unwrap();
/// assert_eq!(Floor.step(&mut cube), Duration::from_secs(1));
/// assert_eq!(cube.lit_count(), 16);
/// ```
pub trait Scene: Send + 'static {
    /// Name for logging and registry lookup.
    fn name(&self) -> &str;

    /// Advance `cube` by one tick and return the delay until the next one.
    fn step(&mut self, cube: &mut VoxelCube) -> Duration;
}
