//! Driver configuration, TOML loading, and error types.
//!
//! [`DriverConfig`] is the builder-input for constructing a
//! [`CubeDriver`](crate::driver::CubeDriver).
//! [`validate()`](DriverConfig::validate) checks every invariant at startup
//! so the refresh loop itself never meets a configuration error.
//!
//! [`FileConfig`] is the on-disk TOML form; every key is optional and
//! falls back to the [`DriverConfig`] defaults.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use voxcube_core::{CubeDims, CubeError};
use voxcube_frame::{FrameEncoder, FrameError};
use voxcube_scene::{SceneError, SceneRegistry};
use voxcube_wiring::WiringMap;

// ── Defaults ──────────────────────────────────────────────────────

/// Edge length of the default cube.
pub const DEFAULT_CUBE_SIZE: usize = 8;

/// Default refresh rate: full frames pushed per second.
pub const DEFAULT_REFRESH_RATE_HZ: f64 = 1000.0;

/// Default time each playlist entry stays on screen.
pub const DEFAULT_SCENE_HOLD: Duration = Duration::from_secs(30);

/// Scenes played when no playlist is configured.
pub const DEFAULT_PLAYLIST: [&str; 2] = ["plane_shift", "rain"];

// ── ConfigError ───────────────────────────────────────────────────

/// Errors detected while loading or validating a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The cube dimensions are invalid.
    #[error("invalid cube: {0}")]
    Cube(#[from] CubeError),
    /// The wiring or dimensions cannot be encoded.
    #[error(transparent)]
    Frame(#[from] FrameError),
    /// A playlist entry or scene parameter is invalid.
    #[error("invalid scene: {0}")]
    Scene(#[from] SceneError),
    /// The playlist has no entries.
    #[error("playlist is empty")]
    EmptyPlaylist,
    /// `refresh_rate_hz` is NaN, infinite, zero, or negative.
    #[error("refresh rate must be finite and positive, got {value}")]
    InvalidRefreshRate {
        /// The invalid value.
        value: f64,
    },
    /// `scene_hold` is zero.
    #[error("scene hold must be non-zero")]
    ZeroSceneHold,
    /// The config file could not be read.
    #[error("cannot read config file {}", path.display())]
    Read {
        /// File that failed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },
    /// The config file is not valid TOML for [`FileConfig`].
    #[error("cannot parse config: {0}")]
    Parse(#[from] toml::de::Error),
    /// The render thread could not be spawned.
    #[error("failed to spawn render thread: {reason}")]
    ThreadSpawnFailed {
        /// OS error text.
        reason: String,
    },
}

// ── DriverConfig ──────────────────────────────────────────────────

/// Everything a [`CubeDriver`](crate::driver::CubeDriver) needs apart from
/// the scene registry and the transport.
#[derive(Clone, Debug)]
pub struct DriverConfig {
    /// Cube shape.
    pub dims: CubeDims,
    /// Board wiring.
    pub wiring: WiringMap,
    /// Scene names played in order, wrapping around.
    pub playlist: Vec<String>,
    /// How long each playlist entry runs before the next one starts.
    pub scene_hold: Duration,
    /// Full-frame refreshes per second.
    pub refresh_rate_hz: f64,
    /// Base seed; each scene is seeded with `seed ^ swap_count`.
    pub seed: u64,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            dims: CubeDims::default(),
            wiring: WiringMap::identity(),
            playlist: DEFAULT_PLAYLIST.iter().map(|s| s.to_string()).collect(),
            scene_hold: DEFAULT_SCENE_HOLD,
            refresh_rate_hz: DEFAULT_REFRESH_RATE_HZ,
            seed: 0,
        }
    }
}

impl DriverConfig {
    /// Check every structural invariant against `registry`.
    ///
    /// Called by the driver constructor; exposed so front ends can report
    /// configuration problems before opening a device.
    pub fn validate(&self, registry: &SceneRegistry) -> Result<(), ConfigError> {
        FrameEncoder::new(self.dims, self.wiring.clone())?;

        if self.playlist.is_empty() {
            return Err(ConfigError::EmptyPlaylist);
        }
        if let Some(name) = self.playlist.iter().find(|n| !registry.contains(n)) {
            return Err(SceneError::UnknownScene { name: name.clone() }.into());
        }

        let hz = self.refresh_rate_hz;
        // 1/hz must also be representable as a Duration.
        if !hz.is_finite() || hz <= 0.0 || Duration::try_from_secs_f64(1.0 / hz).is_err() {
            return Err(ConfigError::InvalidRefreshRate { value: hz });
        }
        if self.scene_hold.is_zero() {
            return Err(ConfigError::ZeroSceneHold);
        }
        Ok(())
    }

    /// Wall-clock budget for one refresh.
    ///
    /// Only meaningful after [`validate`](Self::validate) succeeded.
    pub fn refresh_budget(&self) -> Duration {
        Duration::try_from_secs_f64(1.0 / self.refresh_rate_hz).unwrap_or(Duration::ZERO)
    }
}

// ── FileConfig ────────────────────────────────────────────────────

/// `[cube]` table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CubeSection {
    /// X length (row width).
    pub x: usize,
    /// Y length (layers).
    pub y: usize,
    /// Z length (rows per layer).
    pub z: usize,
}

impl Default for CubeSection {
    fn default() -> Self {
        Self {
            x: DEFAULT_CUBE_SIZE,
            y: DEFAULT_CUBE_SIZE,
            z: DEFAULT_CUBE_SIZE,
        }
    }
}

/// `[wiring]` table. Absent tables mean identity on that axis.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WiringSection {
    /// `x' = x_map[z][x]`.
    pub x_map: Option<Vec<Vec<usize>>>,
    /// `y' = y_map[x][y]`.
    pub y_map: Option<Vec<Vec<usize>>>,
    /// `z' = z_map[x][z]`.
    pub z_map: Option<Vec<Vec<usize>>>,
}

/// On-disk configuration.
///
/// ```
/// use voxcube_engine::config::FileConfig;
///
/// let cfg = FileConfig::from_toml_str(r#"
///     seed = 7
///     playlist = ["rain"]
///
///     [cube]
///     x = 4
///     y = 4
///     z = 4
/// "#).unwrap();
/// let driver = cfg.into_driver_config().unwrap();
/// assert_eq!(driver.dims.to_string(), "4x4x4");
/// assert_eq!(driver.playlist, ["rain"]);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    /// Base RNG seed.
    pub seed: u64,
    /// Full-frame refreshes per second.
    pub refresh_rate_hz: f64,
    /// Milliseconds each playlist entry runs.
    pub scene_hold_ms: u64,
    /// Scene names played in order.
    pub playlist: Vec<String>,
    /// Output device; the command line may override it.
    pub device: Option<PathBuf>,
    /// Cube shape.
    pub cube: CubeSection,
    /// Board wiring.
    pub wiring: WiringSection,
}

impl Default for FileConfig {
    fn default() -> Self {
        let base = DriverConfig::default();
        Self {
            seed: base.seed,
            refresh_rate_hz: base.refresh_rate_hz,
            scene_hold_ms: base.scene_hold.as_millis() as u64,
            playlist: base.playlist,
            device: None,
            cube: CubeSection::default(),
            wiring: WiringSection::default(),
        }
    }
}

impl FileConfig {
    /// Parse TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Read and parse a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Convert to a [`DriverConfig`]. Only the cube shape is checked here;
    /// call [`DriverConfig::validate`] for the rest.
    pub fn into_driver_config(self) -> Result<DriverConfig, ConfigError> {
        let dims = CubeDims::new(self.cube.x, self.cube.y, self.cube.z)?;

        let mut wiring = WiringMap::identity();
        if let Some(t) = self.wiring.x_map {
            wiring = wiring.with_x_map(t);
        }
        if let Some(t) = self.wiring.y_map {
            wiring = wiring.with_y_map(t);
        }
        if let Some(t) = self.wiring.z_map {
            wiring = wiring.with_z_map(t);
        }

        Ok(DriverConfig {
            dims,
            wiring,
            playlist: self.playlist,
            scene_hold: Duration::from_millis(self.scene_hold_ms),
            refresh_rate_hz: self.refresh_rate_hz,
            seed: self.seed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use voxcube_core::Axis;

    fn registry() -> SceneRegistry {
        SceneRegistry::builtin()
    }

    #[test]
    fn default_config_is_valid() {
        let cfg = DriverConfig::default();
        cfg.validate(&registry()).unwrap();
        assert_eq!(cfg.dims, CubeDims::cube(8).unwrap());
        assert_eq!(cfg.playlist, ["plane_shift", "rain"]);
        assert_eq!(cfg.refresh_budget(), Duration::from_millis(1));
    }

    #[test]
    fn empty_playlist_fails() {
        let cfg = DriverConfig {
            playlist: Vec::new(),
            ..DriverConfig::default()
        };
        assert!(matches!(cfg.validate(&registry()), Err(ConfigError::EmptyPlaylist)));
    }

    #[test]
    fn unregistered_scene_fails() {
        let cfg = DriverConfig {
            playlist: vec!["rain".into(), "snow".into()],
            ..DriverConfig::default()
        };
        match cfg.validate(&registry()) {
            Err(ConfigError::Scene(SceneError::UnknownScene { name })) => {
                assert_eq!(name, "snow")
            }
            other => panic!("expected UnknownScene, got {other:?}"),
        }
    }

    #[test]
    fn bad_refresh_rates_fail() {
        for value in [0.0, -1.0, f64::NAN, f64::INFINITY, 1e-320] {
            let cfg = DriverConfig {
                refresh_rate_hz: value,
                ..DriverConfig::default()
            };
            assert!(
                matches!(cfg.validate(&registry()), Err(ConfigError::InvalidRefreshRate { .. })),
                "{value} accepted"
            );
        }
    }

    #[test]
    fn zero_hold_fails() {
        let cfg = DriverConfig {
            scene_hold: Duration::ZERO,
            ..DriverConfig::default()
        };
        assert!(matches!(cfg.validate(&registry()), Err(ConfigError::ZeroSceneHold)));
    }

    #[test]
    fn oversized_cube_fails() {
        let cfg = DriverConfig {
            dims: CubeDims::new(16, 8, 8).unwrap(),
            ..DriverConfig::default()
        };
        assert!(matches!(
            cfg.validate(&registry()),
            Err(ConfigError::Frame(FrameError::AxisTooLong { axis: Axis::X, .. }))
        ));
    }

    #[test]
    fn bad_wiring_fails() {
        let cfg = DriverConfig {
            wiring: WiringMap::identity().with_z_map(vec![vec![9; 8]; 8]),
            ..DriverConfig::default()
        };
        assert!(matches!(
            cfg.validate(&registry()),
            Err(ConfigError::Frame(FrameError::Wiring(_)))
        ));
    }

    // ── FileConfig ───────────────────────────────────────────

    #[test]
    fn empty_file_gives_defaults() {
        let cfg = FileConfig::from_toml_str("").unwrap();
        assert_eq!(cfg, FileConfig::default());
        let driver = cfg.into_driver_config().unwrap();
        assert_eq!(driver.scene_hold, DEFAULT_SCENE_HOLD);
        assert!(driver.wiring.is_identity());
    }

    #[test]
    fn wiring_tables_are_read() {
        let cfg = FileConfig::from_toml_str(
            r#"
            scene_hold_ms = 500
            refresh_rate_hz = 250.0
            device = "/dev/spidev0.1"

            [cube]
            x = 2
            y = 2
            z = 2

            [wiring]
            x_map = [[1, 0], [0, 1]]
            "#,
        )
        .unwrap();
        assert_eq!(cfg.device, Some(PathBuf::from("/dev/spidev0.1")));
        let driver = cfg.into_driver_config().unwrap();
        driver.validate(&registry()).unwrap();
        assert_eq!(driver.scene_hold, Duration::from_millis(500));
        assert_eq!(driver.refresh_budget(), Duration::from_millis(4));
        assert_eq!(driver.wiring.remap(0, 0, 0), (1, 0, 0));
        assert!(driver.wiring.table(Axis::Y).is_none());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(matches!(
            FileConfig::from_toml_str("refresh_hz = 5"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn zero_dimension_is_a_cube_error() {
        let cfg = FileConfig::from_toml_str("[cube]\nx = 0").unwrap();
        assert!(matches!(cfg.into_driver_config(), Err(ConfigError::Cube(_))));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = FileConfig::load("/nonexistent/voxcube.toml").unwrap_err();
        match err {
            ConfigError::Read { path, .. } => {
                assert_eq!(path, PathBuf::from("/nonexistent/voxcube.toml"))
            }
            other => panic!("expected Read, got {other:?}"),
        }
    }

    proptest! {
        #[test]
        fn positive_rates_validate(hz in 0.01f64..100_000.0) {
            let cfg = DriverConfig {
                refresh_rate_hz: hz,
                ..DriverConfig::default()
            };
            prop_assert!(cfg.validate(&registry()).is_ok());
            let budget = cfg.refresh_budget().as_secs_f64();
            prop_assert!((budget - 1.0 / hz).abs() < 1e-8);
        }
    }
}
