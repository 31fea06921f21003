//! Reusable scene fixtures.
//!
//! - [`ScriptedScene`]: lights a fixed voxel sequence, one per step.
//! - [`PlaneScene`]: lights one Y plane and holds it.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use voxcube_core::{Axis, VoxelCube};
use voxcube_scene::Scene;

/// Clears the cube and lights the next scripted voxel on every step,
/// cycling through the script.
///
/// The step counter is shared between clones so a test can watch a scene
/// that has been moved into a driver.
#[derive(Clone, Debug)]
pub struct ScriptedScene {
    pub name: String,
    pub script: Vec<(usize, usize, usize)>,
    pub delay: Duration,
    steps: Arc<AtomicUsize>,
}

impl ScriptedScene {
    pub fn new(
        name: impl Into<String>,
        script: Vec<(usize, usize, usize)>,
        delay: Duration,
    ) -> Self {
        Self {
            name: name.into(),
            script,
            delay,
            steps: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Steps taken so far.
    pub fn steps(&self) -> usize {
        self.steps.load(Ordering::Relaxed)
    }
}

impl Scene for ScriptedScene {
    fn name(&self) -> &str {
        &self.name
    }

    fn step(&mut self, cube: &mut VoxelCube) -> Duration {
        let n = self.steps.fetch_add(1, Ordering::Relaxed);
        cube.clear();
        if !self.script.is_empty() {
            let (x, y, z) = self.script[n % self.script.len()];
            cube.set_voxel(x, y, z);
        }
        self.delay
    }
}

/// Lights the Y plane `y` and holds it.
#[derive(Clone, Debug)]
pub struct PlaneScene {
    pub y: usize,
    pub delay: Duration,
}

impl Scene for PlaneScene {
    fn name(&self) -> &str {
        "plane"
    }

    fn step(&mut self, cube: &mut VoxelCube) -> Duration {
        cube.clear();
        cube.set_plane(Axis::Y, self.y);
        self.delay
    }
}
