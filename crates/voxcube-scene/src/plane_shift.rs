//! Sweeping-plane scene.
//!
//! A full plane is lit on a random face of a random axis, then shifted one
//! layer per tick towards the opposite face. On arrival it bounces back
//! once; when it returns to its starting face the scene reloads with a
//! fresh random axis and face.
//!
//! On a cube with `n` layers along the chosen axis a cycle takes
//! `2 * (n - 1)` ticks.
//!
//! Constructed via the builder pattern: [`PlaneShift::builder`].

use std::time::Duration;

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use voxcube_core::{Axis, AxisVector, Direction, VoxelCube};

use crate::error::SceneError;
use crate::scene::Scene;

/// Default delay between ticks.
pub const DEFAULT_STEP_DELAY: Duration = Duration::from_millis(100);

/// Where a [`PlaneShift`] is in its cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SweepPhase {
    /// The next step picks a new axis and face.
    Loading,
    /// The plane is moving.
    Sweeping {
        /// Direction of travel.
        vector: AxisVector,
        /// Current layer index along `vector.axis`.
        position: usize,
        /// Whether the plane has already bounced this cycle.
        looped: bool,
    },
}

/// The sweeping-plane scene.
///
/// Generic over its random source so tests can inject a scripted one;
/// [`PlaneShiftBuilder::build`] seeds a [`ChaCha8Rng`].
#[derive(Debug)]
pub struct PlaneShift<R = ChaCha8Rng> {
    rng: R,
    delay: Duration,
    phase: SweepPhase,
}

/// Builder for [`PlaneShift`].
#[derive(Clone, Debug)]
pub struct PlaneShiftBuilder {
    seed: u64,
    delay: Duration,
}

impl PlaneShift {
    /// Create a new builder for configuring a `PlaneShift` scene.
    pub fn builder() -> PlaneShiftBuilder {
        PlaneShiftBuilder {
            seed: 0,
            delay: DEFAULT_STEP_DELAY,
        }
    }
}

impl<R: RngCore> PlaneShift<R> {
    /// Current phase of the sweep cycle.
    pub fn phase(&self) -> SweepPhase {
        self.phase
    }

    /// Whether the next step starts a new cycle.
    pub fn is_loading(&self) -> bool {
        self.phase == SweepPhase::Loading
    }

    /// Delay returned from every step.
    pub fn step_delay(&self) -> Duration {
        self.delay
    }

    /// Clear the cube and light a plane on a random face. The plane moves
    /// away from the face it starts on.
    fn load(&mut self, cube: &mut VoxelCube) -> (AxisVector, usize) {
        cube.clear();
        let axis = Axis::ALL[self.rng.gen_range(0..Axis::ALL.len())];
        let far = cube.dims().axis_len(axis) - 1;
        let position = self.rng.gen_range(0..2usize) * far;
        cube.set_plane(axis, position);
        let direction = if position == 0 {
            Direction::Positive
        } else {
            Direction::Negative
        };
        (axis.towards(direction), position)
    }
}

impl PlaneShiftBuilder {
    /// Set the RNG seed (default: 0).
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the delay returned from each step (default: 100 ms). Must be
    /// non-zero.
    pub fn step_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Build the scene with a [`ChaCha8Rng`] seeded from the configured seed.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::InvalidParameter`] if the step delay is zero.
    pub fn build(self) -> Result<PlaneShift, SceneError> {
        let rng = ChaCha8Rng::seed_from_u64(self.seed);
        self.build_with_rng(rng)
    }

    /// Build the scene around a caller-supplied random source. The
    /// configured seed is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::InvalidParameter`] if the step delay is zero.
    pub fn build_with_rng<R: RngCore>(self, rng: R) -> Result<PlaneShift<R>, SceneError> {
        if self.delay.is_zero() {
            return Err(SceneError::InvalidParameter {
                reason: "plane_shift step delay must be non-zero".to_string(),
            });
        }
        Ok(PlaneShift {
            rng,
            delay: self.delay,
            phase: SweepPhase::Loading,
        })
    }
}

impl<R: RngCore + Send + 'static> Scene for PlaneShift<R> {
    fn name(&self) -> &str {
        "plane_shift"
    }

    fn step(&mut self, cube: &mut VoxelCube) -> Duration {
        let (vector, mut position, looped) = match self.phase {
            SweepPhase::Loading => {
                let (vector, position) = self.load(cube);
                (vector, position, false)
            }
            SweepPhase::Sweeping {
                vector,
                position,
                looped,
            } => (vector, position, looped),
        };

        cube.shift(vector);
        let far = cube.dims().axis_len(vector.axis) - 1;
        let arrived = if vector.is_positive() {
            position += 1;
            position >= far
        } else {
            position = position.saturating_sub(1);
            position == 0
        };

        self.phase = match (arrived, looped) {
            (false, _) => SweepPhase::Sweeping {
                vector,
                position,
                looped,
            },
            (true, false) => SweepPhase::Sweeping {
                vector: vector.reversed(),
                position,
                looped: true,
            },
            (true, true) => SweepPhase::Loading,
        };
        self.delay
    }
}
