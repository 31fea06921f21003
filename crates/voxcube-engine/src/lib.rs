//! Refresh driver orchestrating voxcube scenes, encoding and transport.
//!
//! Provides [`CubeDriver`], which owns one cube and performs a complete
//! refresh per call, and [`RealtimeDriver`], which runs a `CubeDriver` on
//! a background render thread at a fixed refresh rate. Configuration comes
//! from [`DriverConfig`] or its TOML form [`FileConfig`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod driver;
pub mod metrics;
pub mod realtime;
mod render_thread;

pub use config::{ConfigError, DriverConfig, FileConfig};
pub use driver::CubeDriver;
pub use metrics::RefreshMetrics;
pub use realtime::{RealtimeDriver, ShutdownReport, SubmitError};
