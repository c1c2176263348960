//! Wiring of catalog, solver, scheduler thread and render loop

use crate::io::catalog::TileCatalog;
use crate::io::configuration::{FRAME_RATE_WINDOW, VisualizerConfig};
use crate::io::error::{Result, VisualizerError, invalid_parameter};
use crate::io::progress::RunProgress;
use crate::render::frame::{Frame, FrameSink};
use crate::render::layout::GridLayout;
use crate::render::renderer::SnapshotRenderer;
use crate::run::clock::FrameClock;
use crate::run::feed::{Snapshot, SnapshotFeed};
use crate::run::pacing::Pacing;
use crate::run::scheduler::{CollapseScheduler, SchedulerSettings};
use crate::run::signal::StopSignal;
use crate::wave::constraint::Constraint;
use crate::wave::solver::{Solver, Wave};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Instant;

/// When the render loop should stop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunLimit {
    /// Stop once this many runs have finished (collapsed or stalled)
    pub finished_runs: Option<u64>,
    /// Stop after presenting this many frames
    pub frames: Option<u64>,
}

impl RunLimit {
    /// Render until the sink closes
    pub const fn unlimited() -> Self {
        Self {
            finished_runs: None,
            frames: None,
        }
    }

    /// Render until `runs` runs have finished
    pub const fn runs(runs: u64) -> Self {
        Self {
            finished_runs: Some(runs),
            frames: None,
        }
    }

    fn reached(&self, frame: &Frame, presented: u64) -> bool {
        self.finished_runs
            .is_some_and(|runs| frame.finished_runs >= runs)
            || self.frames.is_some_and(|frames| presented >= frames)
    }
}

/// Owns the shared feed and renderer, and runs the scheduler on its own thread
///
/// Solver and renderer are both built from the same [`VisualizerConfig`], so
/// the grid the solver fills always matches the grid the renderer lays out.
pub struct Coordinator {
    config: VisualizerConfig,
    feed: SnapshotFeed,
    renderer: SnapshotRenderer,
    stop: StopSignal,
    clock: FrameClock,
    progress: RunProgress,
    solver: Option<Box<dyn Solver>>,
    worker: Option<JoinHandle<Box<dyn Solver>>>,
}

impl Coordinator {
    /// Build the solver over `catalog` and the renderer from one configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid
    pub fn new(
        config: VisualizerConfig,
        catalog: Arc<TileCatalog>,
        constraint: &Constraint,
    ) -> Result<Self> {
        config.validate()?;
        let wave = Wave::from_catalog(&catalog, config.grid_width, config.grid_height, constraint)?;
        Self::with_solver(config, catalog, Box::new(wave))
    }

    /// Wire an externally built solver
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the solver grid
    /// is not `config.grid_width × config.grid_height`
    pub fn with_solver(
        config: VisualizerConfig,
        catalog: Arc<TileCatalog>,
        solver: Box<dyn Solver>,
    ) -> Result<Self> {
        config.validate()?;
        let state = solver.state();
        if (state.width(), state.height()) != (config.grid_width, config.grid_height) {
            return Err(invalid_parameter(
                "solver",
                &format!("{}x{}", state.width(), state.height()),
                &format!(
                    "grid must match the configured {}x{}",
                    config.grid_width, config.grid_height
                ),
            ));
        }

        let layout = GridLayout::from_config(&config);
        Ok(Self {
            config,
            feed: SnapshotFeed::new(Snapshot::initial(config.grid_width, config.grid_height)),
            renderer: SnapshotRenderer::new(layout, catalog),
            stop: StopSignal::new(),
            clock: FrameClock::new(FRAME_RATE_WINDOW),
            progress: RunProgress::hidden(),
            solver: Some(solver),
            worker: None,
        })
    }

    /// Report run progress to `progress`
    #[must_use]
    pub fn with_progress(mut self, progress: RunProgress) -> Self {
        self.progress = progress;
        self
    }

    /// Configuration both solver and renderer were built from
    pub const fn config(&self) -> &VisualizerConfig {
        &self.config
    }

    /// Feed the scheduler publishes to
    pub const fn feed(&self) -> &SnapshotFeed {
        &self.feed
    }

    /// Signal that halts the scheduler
    pub const fn stop_signal(&self) -> &StopSignal {
        &self.stop
    }

    /// Solver, while the scheduler thread is not running
    pub fn solver(&self) -> Option<&dyn Solver> {
        self.solver.as_deref()
    }

    /// Renderer used for every tick
    pub const fn renderer(&self) -> &SnapshotRenderer {
        &self.renderer
    }

    /// Spawn the scheduler thread; does nothing if it is already running
    ///
    /// # Errors
    ///
    /// Returns an error if the thread cannot be spawned or was already shut down
    pub fn start(&mut self) -> Result<()> {
        if self.worker.is_some() {
            return Ok(());
        }
        if self.stop.is_stopped() {
            return Err(VisualizerError::Scheduler {
                reason: "scheduler has already been shut down".to_string(),
            });
        }
        let solver = self.solver.take().ok_or_else(|| VisualizerError::Scheduler {
            reason: "scheduler has already been shut down".to_string(),
        })?;

        let settings = SchedulerSettings {
            pacing: Pacing::new(self.config.check_delay, self.config.max_step_delay),
            dwell: self.config.dwell,
            first_seed: self.config.first_seed,
        };
        let scheduler =
            CollapseScheduler::new(solver, self.feed.clone(), settings, self.stop.clone())
                .with_progress(self.progress.clone());

        let worker = std::thread::Builder::new()
            .name("collapse".to_string())
            .spawn(move || scheduler.run_forever())
            .map_err(|e| VisualizerError::Scheduler {
                reason: format!("failed to spawn scheduler thread: {e}"),
            })?;
        self.worker = Some(worker);
        Ok(())
    }

    /// Render the latest published snapshot and count the tick
    pub fn render_frame(&mut self) -> Frame {
        self.clock.tick(Instant::now());
        let snapshot = self.feed.latest();
        self.renderer.render(&snapshot, self.clock.fps())
    }

    /// Start the scheduler and present frames at the configured rate until `limit`
    ///
    /// The scheduler is stopped and joined before returning, on success and
    /// on error alike.
    ///
    /// # Errors
    ///
    /// Returns the first sink error, or an error if the scheduler thread
    /// cannot be started or panicked
    pub fn run(&mut self, sink: &mut dyn FrameSink, limit: RunLimit) -> Result<()> {
        self.start()?;
        let result = self.render_loop(sink, limit);
        let shutdown = self.shutdown();
        self.progress.finish();
        result.and(shutdown).and_then(|()| sink.finish())
    }

    fn render_loop(&mut self, sink: &mut dyn FrameSink, limit: RunLimit) -> Result<()> {
        let interval = self.config.frame_interval();
        let mut presented = 0;

        while sink.is_open() {
            let started = Instant::now();
            let frame = self.render_frame();
            sink.present(&frame)?;
            presented += 1;

            if limit.reached(&frame, presented) {
                break;
            }
            if self.worker.as_ref().is_some_and(JoinHandle::is_finished) {
                return Err(VisualizerError::Scheduler {
                    reason: "scheduler thread exited unexpectedly".to_string(),
                });
            }

            if let Some(remaining) = interval.checked_sub(started.elapsed()) {
                std::thread::sleep(remaining);
            }
        }
        Ok(())
    }

    /// Stop the scheduler and wait for its thread
    ///
    /// The solver is handed back and can be inspected through [`Coordinator::solver`].
    ///
    /// # Errors
    ///
    /// Returns an error if the scheduler thread panicked
    pub fn shutdown(&mut self) -> Result<()> {
        self.stop.stop();
        let Some(worker) = self.worker.take() else {
            return Ok(());
        };
        let solver = worker.join().map_err(|_panic| VisualizerError::Scheduler {
            reason: "scheduler thread panicked".to_string(),
        })?;
        self.solver = Some(solver);
        Ok(())
    }
}

impl Drop for Coordinator {
    fn drop(&mut self) {
        self.stop.stop();
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}
