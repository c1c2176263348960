//! Background driver advancing the solver through repeated runs
//!
//! Lifecycle per run:
//!
//! ```text
//! Reseeding -> Running -> Collapsed -(dwell)-> Reseeding
//!                     \-> Stalled   -(dwell)-> Reseeding
//! ```
//!
//! A contradiction ends the run just like completion does. The scheduler
//! shows it for the dwell interval and then reseeds, so an unsatisfiable
//! configuration can never spin the thread.

use crate::io::progress::RunProgress;
use crate::run::feed::{RunPhase, Snapshot, SnapshotFeed};
use crate::run::pacing::Pacing;
use crate::run::seed::SeedSource;
use crate::run::signal::StopSignal;
use crate::wave::solver::{Solver, StepOutcome};
use std::sync::Arc;
use std::time::Duration;

/// Timing and seeding knobs of the scheduler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulerSettings {
    /// Pause after each step
    pub pacing: Pacing,
    /// How long a finished or stalled run stays up before reseeding
    pub dwell: Duration,
    /// Seed of the first run; later runs draw fresh seeds
    pub first_seed: Option<u64>,
}

/// Owns the solver and publishes a snapshot after every state change
pub struct CollapseScheduler<S: Solver> {
    solver: S,
    feed: SnapshotFeed,
    settings: SchedulerSettings,
    stop: StopSignal,
    seeds: SeedSource,
    progress: Option<RunProgress>,
    phase: RunPhase,
    seed: u64,
    run: u64,
    steps: u64,
    finished_runs: u64,
}

impl<S: Solver> CollapseScheduler<S> {
    /// Scheduler that will start its first run on the first tick
    pub const fn new(
        solver: S,
        feed: SnapshotFeed,
        settings: SchedulerSettings,
        stop: StopSignal,
    ) -> Self {
        Self {
            solver,
            feed,
            seeds: SeedSource::new(settings.first_seed),
            settings,
            stop,
            progress: None,
            phase: RunPhase::Reseeding,
            seed: 0,
            run: 0,
            steps: 0,
            finished_runs: 0,
        }
    }

    /// Report every published snapshot to a progress bar
    #[must_use]
    pub fn with_progress(mut self, progress: RunProgress) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Current lifecycle phase
    pub const fn phase(&self) -> RunPhase {
        self.phase
    }

    /// Seed of the current run
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Current run number, 0 before the first run
    pub const fn run(&self) -> u64 {
        self.run
    }

    /// Runs that reached a terminal phase
    pub const fn finished_runs(&self) -> u64 {
        self.finished_runs
    }

    /// Solver being driven
    pub const fn solver(&self) -> &S {
        &self.solver
    }

    /// Tick until the stop signal is raised, then hand the solver back
    pub fn run_forever(mut self) -> S {
        while !self.stop.is_stopped() {
            self.tick();
        }
        self.solver
    }

    /// Advance the state machine by one transition
    ///
    /// While running this requests exactly one solver step. In a terminal
    /// phase it waits out the dwell interval (cut short by a stop) and then
    /// reseeds.
    pub fn tick(&mut self) -> RunPhase {
        match self.phase {
            RunPhase::Reseeding => self.start_run(),
            RunPhase::Running => self.advance(),
            RunPhase::Collapsed | RunPhase::Stalled { .. } => {
                if !self.stop.wait(self.settings.dwell) {
                    self.phase = RunPhase::Reseeding;
                    self.start_run();
                }
            }
        }
        self.phase
    }

    fn advance(&mut self) {
        if self.solver.is_fully_collapsed() {
            self.finish_run(RunPhase::Collapsed);
            return;
        }

        let outcome = self.solver.step();
        self.steps += 1;

        match outcome {
            StepOutcome::Progressed { checks, .. } => {
                // A finished grid is published as Collapsed, never as a running frame
                if self.solver.is_fully_collapsed() {
                    self.finish_run(RunPhase::Collapsed);
                    return;
                }
                self.publish();
                let pause = self.settings.pacing.delay_for(checks);
                if !pause.is_zero() {
                    self.stop.wait(pause);
                }
            }
            StepOutcome::Contradiction { x, y, .. } => {
                self.finish_run(RunPhase::Stalled { x, y });
            }
            StepOutcome::Complete => self.finish_run(RunPhase::Collapsed),
        }
    }

    fn start_run(&mut self) {
        self.seed = self.seeds.next_seed();
        self.solver.reinitialize(self.seed);
        self.run += 1;
        self.steps = 0;
        self.phase = RunPhase::Running;
        self.publish();
    }

    fn finish_run(&mut self, phase: RunPhase) {
        self.phase = phase;
        self.finished_runs += 1;
        let snapshot = self.publish();
        if let Some(progress) = &self.progress {
            progress.run_finished(&snapshot);
        }
    }

    fn publish(&self) -> Arc<Snapshot> {
        let snapshot = Snapshot {
            wave: self.solver.state(),
            phase: self.phase,
            seed: self.seed,
            run: self.run,
            steps: self.steps,
            finished_runs: self.finished_runs,
        };
        let snapshot = self.feed.publish(snapshot);
        if let Some(progress) = &self.progress {
            progress.update(&snapshot);
        }
        snapshot
    }
}
