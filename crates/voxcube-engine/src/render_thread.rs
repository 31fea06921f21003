//! Render loop for [`RealtimeDriver`](crate::realtime::RealtimeDriver).
//!
//! The render thread owns the [`CubeDriver`] exclusively (moved in via
//! `thread::spawn`). Scene switches arrive over a bounded crossbeam
//! channel and are applied between refreshes, so the cube is never
//! touched by two threads.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, Sender};
use tracing::{debug, error, info, warn};
use voxcube_frame::RefreshError;
use voxcube_scene::SceneError;

use crate::driver::CubeDriver;

/// A request from a user thread, applied before the next refresh.
pub(crate) enum DriverCommand {
    /// Switch to the named scene; the outcome goes back on `reply`.
    SetScene {
        name: String,
        reply: Sender<Result<(), SceneError>>,
    },
}

/// What the render thread hands back when it exits.
pub(crate) struct RenderExit {
    pub driver: CubeDriver,
    pub failure: Option<RefreshError>,
}

/// State held by the render thread's main loop.
pub(crate) struct RenderThreadState {
    driver: CubeDriver,
    cmd_rx: Receiver<DriverCommand>,
    shutdown_flag: Arc<AtomicBool>,
    render_stopped: Arc<AtomicBool>,
    /// Dropped on exit; disconnects the owner's `stopped_rx`.
    stopped_tx: Sender<()>,
    budget: Duration,
}

impl RenderThreadState {
    pub fn new(
        driver: CubeDriver,
        cmd_rx: Receiver<DriverCommand>,
        shutdown_flag: Arc<AtomicBool>,
        render_stopped: Arc<AtomicBool>,
        stopped_tx: Sender<()>,
    ) -> Self {
        let budget = driver.refresh_budget();
        Self {
            driver,
            cmd_rx,
            shutdown_flag,
            render_stopped,
            stopped_tx,
            budget,
        }
    }

    /// Main render loop. Runs until `shutdown_flag` is set or a refresh
    /// fails.
    ///
    /// Consumes self and returns the driver so the owner can recover it
    /// via `JoinHandle<RenderExit>`.
    pub fn run(mut self) -> RenderExit {
        debug!(budget = ?self.budget, "render thread started");
        let mut failure = None;

        loop {
            if self.shutdown_flag.load(Ordering::Acquire) {
                break;
            }

            let frame_start = Instant::now();

            // 1. Apply pending scene switches.
            self.drain_command_channel();

            // 2. Step if due, encode, transmit.
            if let Err(e) = self.driver.render_at(frame_start) {
                let RefreshError::TransmissionFailure { row, source } = &e;
                error!(row, error = %source, "refresh failed, stopping render loop");
                failure = Some(e);
                break;
            }

            // 3. Sleep for the remaining budget. `shutdown` and
            //    `set_scene` unpark us.
            if let Some(remaining) = self.budget.checked_sub(frame_start.elapsed()) {
                thread::park_timeout(remaining);
            }
        }

        // Leave the cube dark on a clean stop. After a transport failure
        // there is nothing to send it through.
        if failure.is_none() {
            if let Err(e) = self.driver.halt() {
                warn!(error = %e, "could not blank cube on shutdown");
            }
        }

        info!(
            frames = self.driver.metrics().frames,
            swaps = self.driver.metrics().scene_swaps,
            "render thread stopped"
        );
        self.render_stopped.store(true, Ordering::Release);
        drop(self.stopped_tx);
        RenderExit {
            driver: self.driver,
            failure,
        }
    }

    fn drain_command_channel(&mut self) {
        while let Ok(cmd) = self.cmd_rx.try_recv() {
            match cmd {
                DriverCommand::SetScene { name, reply } => {
                    let result = self.driver.set_scene(&name);
                    // Best-effort reply; caller may have dropped their receiver.
                    let _ = reply.send(result);
                }
            }
        }
    }
}
