//! Falling-droplet scene.
//!
//! Each tick shifts the whole cube one layer down (`-y`) and lights up to
//! `max_drops` random voxels on the top layer. Droplets leave through the
//! floor. The cube is cleared once, on the first tick.

use std::time::Duration;

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use voxcube_core::{AxisVector, VoxelCube};

use crate::error::SceneError;
use crate::scene::Scene;

/// Default delay between ticks.
pub const DEFAULT_STEP_DELAY: Duration = Duration::from_millis(60);

/// Default upper bound on new droplets per tick.
pub const DEFAULT_MAX_DROPS: usize = 4;

/// Whether a [`Rain`] scene has started.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RainPhase {
    /// The next step clears the cube first.
    Loading,
    /// Steady state.
    Raining,
}

/// The falling-droplet scene.
#[derive(Debug)]
pub struct Rain<R = ChaCha8Rng> {
    rng: R,
    delay: Duration,
    max_drops: usize,
    phase: RainPhase,
}

/// Builder for [`Rain`].
#[derive(Clone, Debug)]
pub struct RainBuilder {
    seed: u64,
    delay: Duration,
    max_drops: usize,
}

impl Rain {
    /// Create a new builder for configuring a `Rain` scene.
    pub fn builder() -> RainBuilder {
        RainBuilder {
            seed: 0,
            delay: DEFAULT_STEP_DELAY,
            max_drops: DEFAULT_MAX_DROPS,
        }
    }
}

impl<R: RngCore> Rain<R> {
    /// Current phase.
    pub fn phase(&self) -> RainPhase {
        self.phase
    }

    /// Upper bound on droplets added per step.
    pub fn max_drops(&self) -> usize {
        self.max_drops
    }
}

impl RainBuilder {
    /// Set the RNG seed (default: 0).
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the delay returned from each step (default: 60 ms). Must be
    /// non-zero.
    pub fn step_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Set the maximum droplets per tick (default: 4). Each tick draws
    /// uniformly from `0..=max_drops`.
    pub fn max_drops(mut self, max_drops: usize) -> Self {
        self.max_drops = max_drops;
        self
    }

    /// Build the scene with a [`ChaCha8Rng`] seeded from the configured seed.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::InvalidParameter`] if the step delay is zero.
    pub fn build(self) -> Result<Rain, SceneError> {
        let rng = ChaCha8Rng::seed_from_u64(self.seed);
        self.build_with_rng(rng)
    }

    /// Build the scene around a caller-supplied random source.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::InvalidParameter`] if the step delay is zero.
    pub fn build_with_rng<R: RngCore>(self, rng: R) -> Result<Rain<R>, SceneError> {
        if self.delay.is_zero() {
            return Err(SceneError::InvalidParameter {
                reason: "rain step delay must be non-zero".to_string(),
            });
        }
        Ok(Rain {
            rng,
            delay: self.delay,
            max_drops: self.max_drops,
            phase: RainPhase::Loading,
        })
    }
}

impl<R: RngCore + Send + 'static> Scene for Rain<R> {
    fn name(&self) -> &str {
        "rain"
    }

    fn step(&mut self, cube: &mut VoxelCube) -> Duration {
        if self.phase == RainPhase::Loading {
            cube.clear();
            self.phase = RainPhase::Raining;
        }

        cube.shift(AxisVector::NEG_Y);

        let top = cube.y_len() - 1;
        let drops = self.rng.gen_range(0..=self.max_drops);
        for _ in 0..drops {
            let x = self.rng.gen_range(0..cube.x_len());
            let z = self.rng.gen_range(0..cube.z_len());
            cube.set_voxel(x, top, z);
        }
        self.delay
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::mock::StepRng;
    use std::collections::BTreeSet;

    fn layer(cube: &VoxelCube, y: usize) -> BTreeSet<(usize, usize)> {
        cube.lit_voxels()
            .filter(|&(_, vy, _)| vy == y)
            .map(|(x, _, z)| (x, z))
            .collect()
    }

    #[test]
    fn first_step_clears_and_seeds_top_layer() {
        let mut cube = VoxelCube::new(8).unwrap();
        cube.set_plane(voxcube_core::Axis::Y, 3);
        let mut scene = Rain::builder().seed(1).build().unwrap();
        assert_eq!(scene.phase(), RainPhase::Loading);

        assert_eq!(scene.step(&mut cube), DEFAULT_STEP_DELAY);
        assert_eq!(scene.phase(), RainPhase::Raining);
        assert!(cube.lit_count() <= DEFAULT_MAX_DROPS);
        assert!(cube.lit_voxels().all(|(_, y, _)| y == 7));
    }

    #[test]
    fn droplets_fall_one_layer_per_step() {
        let mut cube = VoxelCube::new(8).unwrap();
        let mut scene = Rain::builder().seed(3).build().unwrap();
        let mut history: Vec<BTreeSet<(usize, usize)>> = Vec::new();
        for _ in 0..40 {
            scene.step(&mut cube);
            for (age, drops) in history.iter().rev().take(7).enumerate() {
                assert_eq!(&layer(&cube, 6 - age), drops);
            }
            history.push(layer(&cube, 7));
        }
        // 40 draws from 0..=4 are not all zero for a fixed seed.
        assert!(history.iter().any(|d| !d.is_empty()));
    }

    #[test]
    fn later_steps_do_not_clear() {
        let mut cube = VoxelCube::new(8).unwrap();
        let mut scene = Rain::builder().seed(0).build().unwrap();
        scene.step(&mut cube);
        cube.set_voxel(0, 7, 0);
        scene.step(&mut cube);
        assert!(cube.get_voxel(0, 6, 0));
    }

    #[test]
    fn zero_draws_light_nothing() {
        // StepRng(0, 0) always draws zero droplets.
        let mut cube = VoxelCube::new(8).unwrap();
        let mut scene = Rain::builder()
            .build_with_rng(StepRng::new(0, 0))
            .unwrap();
        for _ in 0..10 {
            scene.step(&mut cube);
        }
        assert!(cube.is_blank());
    }

    #[test]
    fn max_drops_zero_is_dry() {
        let mut cube = VoxelCube::new(4).unwrap();
        let mut scene = Rain::builder().max_drops(0).seed(5).build().unwrap();
        for _ in 0..10 {
            scene.step(&mut cube);
        }
        assert!(cube.is_blank());
    }

    #[test]
    fn zero_delay_rejected() {
        assert!(Rain::builder().step_delay(Duration::ZERO).build().is_err());
    }

    proptest! {
        #[test]
        fn new_layer_never_exceeds_max_drops(seed in any::<u64>(), max in 0usize..6) {
            let mut cube = VoxelCube::new_custom(5, 6, 7).unwrap();
            let mut scene = Rain::builder().seed(seed).max_drops(max).build().unwrap();
            for _ in 0..12 {
                scene.step(&mut cube);
                prop_assert!(layer(&cube, 5).len() <= max);
            }
        }
    }
}
