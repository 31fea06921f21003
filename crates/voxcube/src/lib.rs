//! Voxcube: drive bit-serial LED voxel cubes with procedurally animated
//! scenes.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all voxcube sub-crates. For most users, adding `voxcube` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use std::time::Instant;
//! use voxcube::prelude::*;
//!
//! // Render one refresh of the default playlist into a byte buffer.
//! let transport = WriteTransport::new(Vec::new());
//! let mut driver = CubeDriver::new(
//!     DriverConfig::default(),
//!     SceneRegistry::builtin(),
//!     Box::new(transport),
//! )
//! .unwrap();
//! driver.render_at(Instant::now()).unwrap();
//!
//! assert_eq!(driver.scene_name(), "plane_shift");
//! assert_eq!(driver.cube().lit_count(), 64);
//! assert_eq!(driver.metrics().frames, 1);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`cube`] | `voxcube-core` | `VoxelCube`, dimensions, axes and directions |
//! | [`wiring`] | `voxcube-wiring` | Logical-to-physical coordinate tables |
//! | [`scene`] | `voxcube-scene` | `Scene` trait, built-in animations, registry |
//! | [`frame`] | `voxcube-frame` | Wire encoding and the `Transport` trait |
//! | [`engine`] | `voxcube-engine` | Configuration, synchronous and threaded drivers |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Voxel storage and geometry (`voxcube-core`).
pub use voxcube_core as cube;

/// Board wiring tables (`voxcube-wiring`).
///
/// A [`wiring::WiringMap`] remaps logical coordinates to the physical
/// positions the board's traces actually reach.
pub use voxcube_wiring as wiring;

/// Scenes and the scene registry (`voxcube-scene`).
///
/// Implement [`scene::Scene`] to add an animation, then register a factory
/// for it in a [`scene::SceneRegistry`].
pub use voxcube_scene as scene;

/// Wire encoding and transports (`voxcube-frame`).
pub use voxcube_frame as frame;

/// Drivers and configuration (`voxcube-engine`).
///
/// [`engine::CubeDriver`] for caller-driven refreshes,
/// [`engine::RealtimeDriver`] for a background render thread.
pub use voxcube_engine as engine;

/// Common imports for typical voxcube usage.
///
/// ```rust
/// use voxcube::prelude::*;
/// ```
pub mod prelude {
    // Cube
    pub use voxcube_core::{Axis, AxisVector, CubeDims, CubeError, Direction, VoxelCube};

    // Wiring
    pub use voxcube_wiring::WiringMap;

    // Scenes
    pub use voxcube_scene::{PlaneShift, Rain, Scene, SceneError, SceneRegistry};

    // Frames and transports
    pub use voxcube_frame::{Frame, FrameEncoder, RefreshError, Transport, WriteTransport};

    // Engine
    pub use voxcube_engine::{
        ConfigError, CubeDriver, DriverConfig, FileConfig, RealtimeDriver, RefreshMetrics,
        ShutdownReport,
    };
}
