//! User-facing `RealtimeDriver` API and shutdown.
//!
//! The [`CubeDriver`] runs on a dedicated render thread at the configured
//! refresh rate. User threads switch scenes through a bounded command
//! channel and never touch the cube directly.
//!
//! # Architecture
//!
//! ```text
//! User Thread(s)                    Render Thread
//!     |                                  |
//!     |--set_scene()-------------------->| cmd_rx.try_recv()
//!     |   [cmd_tx: bounded(16)] + unpark | driver.set_scene()
//!     |<--result via reply_tx------------|
//!     |                                  | driver.render_at(now)
//!     |                                  |   step scene if due
//!     |                                  |   encode + transmit
//!     |                                  | park(budget - elapsed)
//!     |                                  |
//!     |--shutdown()--------------------->| flag + unpark
//!     |<--RenderExit via join------------| halt (blank frame)
//!     |<--stopped_rx disconnects---------| drop stopped_tx
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, TrySendError};
use thiserror::Error;
use tracing::info;
use voxcube_frame::RefreshError;
use voxcube_scene::SceneError;

use crate::config::ConfigError;
use crate::driver::CubeDriver;
use crate::metrics::RefreshMetrics;
use crate::render_thread::{DriverCommand, RenderExit, RenderThreadState};

/// Capacity of the scene-switch command channel.
const COMMAND_CAPACITY: usize = 16;

// ── Error types ──────────────────────────────────────────────────

/// Error sending a command to the render thread.
#[derive(Debug, PartialEq, Eq, Error)]
pub enum SubmitError {
    /// The render thread has stopped.
    #[error("render thread has shut down")]
    Shutdown,
    /// The command channel is full (back-pressure).
    #[error("command channel full")]
    ChannelFull,
    /// The render thread rejected the command.
    #[error(transparent)]
    Scene(#[from] SceneError),
}

// ── ShutdownReport ───────────────────────────────────────────────

/// Report from [`RealtimeDriver::shutdown`].
#[derive(Debug)]
pub struct ShutdownReport {
    /// Time spent stopping and joining the render thread.
    pub total_ms: u64,
    /// Whether the render thread was joined successfully.
    pub render_joined: bool,
    /// Final counters, if the driver was recovered.
    pub metrics: Option<RefreshMetrics>,
    /// The refresh failure that stopped the loop early, if any.
    pub failure: Option<RefreshError>,
}

// ── RealtimeDriver ───────────────────────────────────────────────

/// Runs a [`CubeDriver`] on a background render thread.
///
/// The thread stops on [`shutdown()`](Self::shutdown), on drop, or by
/// itself when a refresh fails; [`is_running()`](Self::is_running) reports
/// the latter.
pub struct RealtimeDriver {
    cmd_tx: Option<Sender<DriverCommand>>,
    shutdown_flag: Arc<AtomicBool>,
    render_stopped: Arc<AtomicBool>,
    /// Never carries a message; disconnects when the render loop exits.
    stopped_rx: Receiver<()>,
    render_thread: Option<JoinHandle<RenderExit>>,
}

impl RealtimeDriver {
    /// Move `driver` onto a new render thread named `voxcube-render`.
    pub fn spawn(driver: CubeDriver) -> Result<Self, ConfigError> {
        let shutdown_flag = Arc::new(AtomicBool::new(false));
        let render_stopped = Arc::new(AtomicBool::new(false));
        let (cmd_tx, cmd_rx) = crossbeam_channel::bounded(COMMAND_CAPACITY);
        let (stopped_tx, stopped_rx) = crossbeam_channel::bounded(0);

        let state = RenderThreadState::new(
            driver,
            cmd_rx,
            Arc::clone(&shutdown_flag),
            Arc::clone(&render_stopped),
            stopped_tx,
        );
        let render_thread = thread::Builder::new()
            .name("voxcube-render".into())
            .spawn(move || state.run())
            .map_err(|e| ConfigError::ThreadSpawnFailed {
                reason: e.to_string(),
            })?;

        Ok(Self {
            cmd_tx: Some(cmd_tx),
            shutdown_flag,
            render_stopped,
            stopped_rx,
            render_thread: Some(render_thread),
        })
    }

    /// Switch the active scene.
    ///
    /// Wakes the render thread and blocks until it applies the switch,
    /// which happens before its next refresh.
    pub fn set_scene(&self, name: &str) -> Result<(), SubmitError> {
        let cmd_tx = self.cmd_tx.as_ref().ok_or(SubmitError::Shutdown)?;

        let (reply_tx, reply_rx) = crossbeam_channel::bounded(1);
        let cmd = DriverCommand::SetScene {
            name: name.to_string(),
            reply: reply_tx,
        };
        cmd_tx.try_send(cmd).map_err(|e| match e {
            TrySendError::Full(_) => SubmitError::ChannelFull,
            TrySendError::Disconnected(_) => SubmitError::Shutdown,
        })?;
        if let Some(handle) = &self.render_thread {
            handle.thread().unpark();
        }

        // The render thread drops the command unanswered if it stops first.
        let result = reply_rx.recv().map_err(|_| SubmitError::Shutdown)?;
        result.map_err(SubmitError::from)
    }

    /// Whether the render loop is still running.
    pub fn is_running(&self) -> bool {
        self.render_thread.is_some() && !self.render_stopped.load(Ordering::Acquire)
    }

    /// Block until the render loop stops on its own or `timeout` elapses.
    /// Returns whether it stopped.
    pub fn wait_stopped(&self, timeout: Duration) -> bool {
        if !self.is_running() {
            return true;
        }
        match self.stopped_rx.recv_timeout(timeout) {
            Ok(()) | Err(RecvTimeoutError::Disconnected) => true,
            Err(RecvTimeoutError::Timeout) => false,
        }
    }

    /// Stop the render thread, blank the cube, and recover the driver.
    ///
    /// Returns `None` for the driver if the render thread panicked.
    pub fn shutdown(mut self) -> (ShutdownReport, Option<CubeDriver>) {
        self.stop()
    }

    fn stop(&mut self) -> (ShutdownReport, Option<CubeDriver>) {
        let start = Instant::now();
        self.shutdown_flag.store(true, Ordering::Release);
        self.cmd_tx.take();

        let exit = self.render_thread.take().map(|handle| {
            // Wake the thread if it is parked in a budget sleep.
            handle.thread().unpark();
            handle.join()
        });

        let (render_joined, driver, failure) = match exit {
            Some(Ok(RenderExit { driver, failure })) => (true, Some(driver), failure),
            Some(Err(_)) => (false, None, None),
            None => (true, None, None),
        };

        let report = ShutdownReport {
            total_ms: start.elapsed().as_millis() as u64,
            render_joined,
            metrics: driver.as_ref().map(|d| d.metrics().clone()),
            failure,
        };
        info!(
            total_ms = report.total_ms,
            joined = report.render_joined,
            failed = report.failure.is_some(),
            "realtime driver shut down"
        );
        (report, driver)
    }
}

impl Drop for RealtimeDriver {
    fn drop(&mut self) {
        if self.render_thread.is_some() {
            self.stop();
        }
    }
}

impl std::fmt::Debug for RealtimeDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RealtimeDriver")
            .field("running", &self.is_running())
            .finish()
    }
}
