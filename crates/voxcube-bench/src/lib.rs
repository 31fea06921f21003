//! Benchmark profiles and utilities for voxcube.
//!
//! Provides the reference 8x8x8 board and deterministic test cubes:
//!
//! - [`reference_wiring`]: the serpentine-X, pair-swapped-Z board
//! - [`reference_config`]: a [`DriverConfig`] for that board
//! - [`random_cube`]: a cube with a seeded random fill

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use voxcube_core::{CubeDims, VoxelCube};
use voxcube_engine::DriverConfig;
use voxcube_wiring::WiringMap;

/// Wiring of the reference 8x8x8 board.
///
/// X runs left-to-right on even Z rows and right-to-left on odd ones; Y is
/// straight; Z rows are wired in swapped pairs.
pub fn reference_wiring() -> WiringMap {
    let forward: Vec<usize> = (0..8).collect();
    let backward: Vec<usize> = (0..8).rev().collect();
    let x_map = (0..8)
        .map(|z| if z % 2 == 0 { forward.clone() } else { backward.clone() })
        .collect();
    let y_map = vec![forward; 8];
    let z_map = vec![vec![1, 0, 3, 2, 5, 4, 7, 6]; 8];
    WiringMap::identity()
        .with_x_map(x_map)
        .with_y_map(y_map)
        .with_z_map(z_map)
}

/// Driver configuration for the reference board with the default playlist.
pub fn reference_config(seed: u64) -> DriverConfig {
    DriverConfig {
        wiring: reference_wiring(),
        seed,
        ..DriverConfig::default()
    }
}

/// A cube of shape `dims` with each voxel lit with probability `density`.
pub fn random_cube(dims: CubeDims, density: f64, seed: u64) -> VoxelCube {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut cube = VoxelCube::with_dims(dims);
    for y in 0..dims.y() {
        for z in 0..dims.z() {
            for x in 0..dims.x() {
                if rng.gen_bool(density) {
                    cube.set_voxel(x, y, z);
                }
            }
        }
    }
    cube
}
