//! Synchronous cube driver.
//!
//! [`CubeDriver`] owns the cube, the active scene, the encoder and the
//! transport. Each [`render_at()`](CubeDriver::render_at) call performs one
//! refresh: rotate the playlist if the hold expired, step the scene if its
//! delay elapsed, then encode and transmit every layer.
//!
//! # Ownership model
//!
//! `CubeDriver` is [`Send`] but not [`Sync`]. Scene steps and encodes
//! mutate or read the one cube through `&mut self`, so they are serialized
//! by the borrow checker rather than by a lock. To drive it from a
//! background thread, hand it to
//! [`RealtimeDriver`](crate::realtime::RealtimeDriver).
//!
//! # Time
//!
//! The caller supplies `now`. Scene delays and playlist holds are
//! deadlines relative to the `now` of the render that set them, which
//! keeps the driver deterministic under test.

use std::fmt;
use std::time::{Duration, Instant};

use tracing::{info, trace, warn};
use voxcube_core::VoxelCube;
use voxcube_frame::{FrameEncoder, RefreshError, Transport};
use voxcube_scene::{Scene, SceneError, SceneRegistry};

use crate::config::{ConfigError, DriverConfig};
use crate::metrics::RefreshMetrics;

// Fails to compile if any field is !Send.
const _: () = {
    #[allow(dead_code)]
    fn assert_send<T: Send>() {}
    #[allow(dead_code)]
    fn check() {
        assert_send::<CubeDriver>();
    }
};

/// Single-owner refresh driver.
pub struct CubeDriver {
    cube: VoxelCube,
    encoder: FrameEncoder,
    transport: Box<dyn Transport>,
    registry: SceneRegistry,
    playlist: Vec<String>,
    playlist_pos: usize,
    scene: Box<dyn Scene>,
    scene_hold: Duration,
    refresh_budget: Duration,
    seed: u64,
    swap_count: u64,
    /// `None` means the scene is due on the next render.
    next_step: Option<Instant>,
    /// `None` until the first render starts the hold clock.
    next_swap: Option<Instant>,
    metrics: RefreshMetrics,
}

impl CubeDriver {
    /// Validate `config`, build the encoder and start the first playlist
    /// entry.
    pub fn new(
        config: DriverConfig,
        registry: SceneRegistry,
        transport: Box<dyn Transport>,
    ) -> Result<Self, ConfigError> {
        config.validate(&registry)?;
        let refresh_budget = config.refresh_budget();
        let first = config.playlist.first().ok_or(ConfigError::EmptyPlaylist)?;
        let scene = registry.build(first, config.seed)?;
        let encoder = FrameEncoder::new(config.dims, config.wiring)?;
        info!(
            dims = %config.dims,
            scene = scene.name(),
            playlist = ?config.playlist,
            "cube driver ready"
        );
        Ok(Self {
            cube: VoxelCube::with_dims(config.dims),
            encoder,
            transport,
            registry,
            playlist: config.playlist,
            playlist_pos: 0,
            scene,
            scene_hold: config.scene_hold,
            refresh_budget,
            seed: config.seed,
            swap_count: 0,
            next_step: None,
            next_swap: None,
            metrics: RefreshMetrics::default(),
        })
    }

    /// One refresh at the current wall-clock time.
    pub fn render(&mut self) -> Result<(), RefreshError> {
        self.render_at(Instant::now())
    }

    /// One refresh at `now`.
    ///
    /// # Errors
    ///
    /// Returns [`RefreshError::TransmissionFailure`] if the transport
    /// rejects a layer. The rest of that frame is dropped; the next call
    /// starts again from layer 0.
    pub fn render_at(&mut self, now: Instant) -> Result<(), RefreshError> {
        let next_swap = *self.next_swap.get_or_insert(now + self.scene_hold);
        if now >= next_swap {
            self.rotate();
            self.next_swap = Some(now + self.scene_hold);
        }

        if self.next_step.map_or(true, |due| now >= due) {
            let delay = self.scene.step(&mut self.cube);
            self.metrics.scene_steps += 1;
            self.next_step = Some(now + delay);
            trace!(scene = self.scene.name(), ?delay, "scene step");
        }

        self.refresh()
    }

    /// Replace the active scene with a fresh `name`, due on the next
    /// render. The playlist resumes after `name` if it is listed, and the
    /// hold clock restarts.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::UnknownScene`] if `name` is not registered;
    /// the active scene is kept.
    pub fn set_scene(&mut self, name: &str) -> Result<(), SceneError> {
        self.start_scene(name)?;
        if let Some(pos) = self.playlist.iter().position(|n| n == name) {
            self.playlist_pos = pos;
        }
        self.next_swap = None;
        Ok(())
    }

    /// Blank the cube and push one blank frame.
    pub fn halt(&mut self) -> Result<(), RefreshError> {
        info!("blanking cube");
        self.cube.clear();
        self.refresh()
    }

    /// The logical cube as last stepped.
    pub fn cube(&self) -> &VoxelCube {
        &self.cube
    }

    /// Name of the active scene.
    pub fn scene_name(&self) -> &str {
        self.scene.name()
    }

    /// Scene names in rotation order.
    pub fn playlist(&self) -> &[String] {
        &self.playlist
    }

    /// Counters and last timings.
    pub fn metrics(&self) -> &RefreshMetrics {
        &self.metrics
    }

    /// Base seed.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Scenes replaced since construction.
    pub fn swap_count(&self) -> u64 {
        self.swap_count
    }

    /// Wall-clock budget for one refresh.
    pub fn refresh_budget(&self) -> Duration {
        self.refresh_budget
    }

    fn rotate(&mut self) {
        let pos = (self.playlist_pos + 1) % self.playlist.len();
        let name = self.playlist[pos].clone();
        match self.start_scene(&name) {
            Ok(()) => self.playlist_pos = pos,
            Err(error) => {
                warn!(%error, scene = %name, "scene swap failed, keeping current scene")
            }
        }
    }

    fn start_scene(&mut self, name: &str) -> Result<(), SceneError> {
        let seed = self.seed ^ (self.swap_count + 1);
        let scene = self.registry.build(name, seed)?;
        info!(from = self.scene.name(), to = scene.name(), seed, "scene swap");
        self.scene = scene;
        self.swap_count += 1;
        self.metrics.scene_swaps += 1;
        self.next_step = None;
        Ok(())
    }

    fn refresh(&mut self) -> Result<(), RefreshError> {
        let started = Instant::now();
        let frame = self.encoder.encode(&self.cube);
        let encoded = Instant::now();
        let result = frame.transmit(self.transport.as_mut());
        self.metrics.last_encode_us = encoded.duration_since(started).as_micros() as u64;
        self.metrics.last_transmit_us = encoded.elapsed().as_micros() as u64;
        result?;
        self.metrics.frames += 1;
        Ok(())
    }
}

impl fmt::Debug for CubeDriver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CubeDriver")
            .field("dims", &self.cube.dims())
            .field("scene", &self.scene.name())
            .field("playlist", &self.playlist)
            .field("seed", &self.seed)
            .field("swap_count", &self.swap_count)
            .field("frames", &self.metrics.frames)
            .finish()
    }
}
