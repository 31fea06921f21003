//! Scene trait and built-in animations for voxcube LED cubes.
//!
//! A [`Scene`] advances a [`VoxelCube`](voxcube_core::VoxelCube) by one
//! animation tick and reports how long the driver should wait before the
//! next tick. Scenes own their animation state but never the cube: the
//! driver lends the cube for the duration of each step.
//!
//! # Built-in scenes
//!
//! - [`PlaneShift`]: a full plane sweeps from one face to the opposite
//!   face and back, then restarts on a random axis and face.
//! - [`Rain`]: droplets appear on the top layer and fall one layer per tick.
//!
//! Scenes are looked up by name through a [`SceneRegistry`], which the
//! driver uses to rotate through a playlist.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod plane_shift;
pub mod rain;
pub mod registry;
pub mod scene;

pub use error::SceneError;
pub use plane_shift::{PlaneShift, PlaneShiftBuilder, SweepPhase};
pub use rain::{Rain, RainBuilder, RainPhase};
pub use registry::{SceneFactory, SceneRegistry};
pub use scene::Scene;
