//! Command-line front end: load a board configuration, open the bus
//! device, and run the playlist until told to stop.

use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::thread;
use std::time::{Duration, Instant};

use clap::Parser;
use thiserror::Error;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use voxcube::engine::{ConfigError, CubeDriver, FileConfig, RealtimeDriver, SubmitError};
use voxcube::frame::{RefreshError, Transport, WriteTransport};
use voxcube::scene::SceneRegistry;

/// How often the main thread checks the deadline and the render loop.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

#[derive(Parser, Debug)]
#[command(version, about = "Animate an LED voxel cube")]
struct Args {
    /// Board configuration (TOML)
    #[arg(long, short = 'c')]
    config: PathBuf,

    /// Bus device to write rows to; overrides `device` in the config
    #[arg(long, short = 'd')]
    device: Option<PathBuf>,

    /// Encode and discard frames instead of opening a device
    #[arg(long)]
    dry_run: bool,

    /// Stop after this many seconds; runs until the render loop fails otherwise
    #[arg(long)]
    run_for_secs: Option<u64>,

    /// Start with this scene instead of the first playlist entry
    #[arg(long)]
    scene: Option<String>,
}

#[derive(Debug, Error)]
enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("no device given; pass --device, set `device` in the config, or use --dry-run")]
    NoDevice,
    #[error("cannot open device {}: {source}", path.display())]
    OpenDevice {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot switch scene: {0}")]
    Scene(#[from] SubmitError),
    #[error(transparent)]
    Refresh(#[from] RefreshError),
}

fn open_transport(args: &Args, file: &FileConfig) -> Result<Box<dyn Transport>, RunError> {
    if args.dry_run {
        info!("dry run, frames are discarded");
        return Ok(Box::new(WriteTransport::new(io::sink())));
    }
    let path = args
        .device
        .clone()
        .or_else(|| file.device.clone())
        .ok_or(RunError::NoDevice)?;
    let device = OpenOptions::new()
        .write(true)
        .open(&path)
        .map_err(|source| RunError::OpenDevice {
            path: path.clone(),
            source,
        })?;
    info!(device = %path.display(), "device opened");
    Ok(Box::new(WriteTransport::new(device)))
}

fn run(args: &Args) -> Result<(), RunError> {
    let file = FileConfig::load(&args.config)?;
    let transport = open_transport(args, &file)?;
    let config = file.into_driver_config()?;
    let driver = CubeDriver::new(config, SceneRegistry::builtin(), transport)?;

    let realtime = RealtimeDriver::spawn(driver)?;
    if let Some(name) = &args.scene {
        realtime.set_scene(name)?;
    }

    let deadline = args
        .run_for_secs
        .map(|secs| Instant::now() + Duration::from_secs(secs));
    while realtime.is_running() {
        if deadline.is_some_and(|d| Instant::now() >= d) {
            break;
        }
        thread::sleep(POLL_INTERVAL);
    }

    let (report, _) = realtime.shutdown();
    if let Some(metrics) = &report.metrics {
        info!(
            frames = metrics.frames,
            steps = metrics.scene_steps,
            swaps = metrics.scene_swaps,
            "run finished"
        );
    }
    match report.failure {
        Some(failure) => Err(failure.into()),
        None => Ok(()),
    }
}

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "voxcube stopped");
            ExitCode::FAILURE
        }
    }
}
