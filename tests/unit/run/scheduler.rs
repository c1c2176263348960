//! Tests for the run lifecycle state machine

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::{Duration, Instant};
    use wavescope::io::progress::RunProgress;
    use wavescope::run::CollapseScheduler;
    use wavescope::run::feed::{RunPhase, Snapshot, SnapshotFeed};
    use wavescope::run::pacing::Pacing;
    use wavescope::run::scheduler::SchedulerSettings;
    use wavescope::run::signal::StopSignal;
    use wavescope::wave::constraint::{Constraint, always};
    use wavescope::wave::module::{Direction, ModuleId};
    use wavescope::wave::{Solver, StepOutcome, Wave, WaveState};

    // Wave that counts how often it is stepped
    struct CountingSolver {
        inner: Wave,
        steps: Arc<AtomicUsize>,
    }

    impl Solver for CountingSolver {
        fn step(&mut self) -> StepOutcome {
            self.steps.fetch_add(1, Ordering::SeqCst);
            self.inner.step()
        }

        fn reinitialize(&mut self, seed: u64) {
            self.inner.reinitialize(seed);
        }

        fn is_fully_collapsed(&self) -> bool {
            self.inner.is_fully_collapsed()
        }

        fn state(&self) -> WaveState {
            self.inner.state()
        }
    }

    fn settings(dwell: Duration) -> SchedulerSettings {
        SchedulerSettings {
            pacing: Pacing::unthrottled(),
            dwell,
            first_seed: Some(9),
        }
    }

    fn scheduler(
        width: usize,
        height: usize,
        constraint: &Constraint,
        dwell: Duration,
    ) -> (CollapseScheduler<Wave>, SnapshotFeed, StopSignal) {
        let wave = Wave::new(3, width, height, constraint).unwrap();
        let feed = SnapshotFeed::new(Snapshot::initial(width, height));
        let stop = StopSignal::new();
        let scheduler = CollapseScheduler::new(wave, feed.clone(), settings(dwell), stop.clone());
        (scheduler, feed, stop)
    }

    // Tests a run goes Reseeding -> Running -> Collapsed -> Running with a new seed
    // Verified by reusing the previous seed on reseed
    #[test]
    fn test_full_lifecycle() {
        let (mut scheduler, feed, _stop) = scheduler(2, 2, &always(), Duration::ZERO);
        assert_eq!(scheduler.phase(), RunPhase::Reseeding);
        assert_eq!(scheduler.run(), 0);

        assert_eq!(scheduler.tick(), RunPhase::Running);
        assert_eq!(scheduler.seed(), 9);
        assert_eq!(feed.latest().run, 1);
        assert!(feed.latest().wave.history().is_empty());

        for step in 1..=3 {
            assert_eq!(scheduler.tick(), RunPhase::Running);
            assert_eq!(feed.latest().wave.history().len(), step);
            assert_eq!(feed.latest().steps, step as u64);
        }

        // The step that fills the last slot ends the run
        assert_eq!(scheduler.tick(), RunPhase::Collapsed);
        assert_eq!(scheduler.finished_runs(), 1);
        let finished = feed.latest();
        assert_eq!(finished.phase, RunPhase::Collapsed);
        assert!(finished.wave.is_fully_collapsed());
        assert_eq!(finished.seed, 9);

        assert_eq!(scheduler.tick(), RunPhase::Running);
        assert_eq!(scheduler.run(), 2);
        assert_ne!(scheduler.seed(), 9);
        let restarted = feed.latest();
        assert!(restarted.wave.history().is_empty());
        assert_eq!(restarted.wave.remaining_candidates(), 4 * 3);
        assert_eq!(restarted.finished_runs, 1);
    }

    // Tests a contradiction ends the run as stalled and is followed by a reseed
    // Verified by retrying the step after a contradiction
    #[test]
    fn test_contradiction_stalls_then_reseeds() {
        let never: Constraint = Arc::new(|_: ModuleId, _: ModuleId, _: Direction| false);
        let (mut scheduler, feed, _stop) = scheduler(2, 1, &never, Duration::ZERO);

        scheduler.tick();
        let phase = scheduler.tick();
        assert!(matches!(phase, RunPhase::Stalled { y: 0, .. }));
        assert_eq!(feed.latest().phase, phase);
        assert!(feed.latest().wave.contradiction().is_some());
        assert_eq!(scheduler.finished_runs(), 1);

        assert_eq!(scheduler.tick(), RunPhase::Running);
        assert_eq!(scheduler.run(), 2);
        assert!(feed.latest().wave.contradiction().is_none());
    }

    // Tests a stop during the dwell keeps the finished run on screen
    #[test]
    fn test_stop_interrupts_dwell() {
        let (mut scheduler, feed, stop) = scheduler(1, 1, &always(), Duration::from_secs(30));

        scheduler.tick();
        assert_eq!(scheduler.tick(), RunPhase::Collapsed);

        stop.stop();
        assert_eq!(scheduler.tick(), RunPhase::Collapsed);
        assert_eq!(feed.latest().phase, RunPhase::Collapsed);
        assert_eq!(scheduler.run(), 1);
    }

    // Tests the thread loop returns the solver once stopped
    // Verified by ignoring the stop flag in run_forever
    #[test]
    fn test_run_forever_returns_on_stop() {
        let (scheduler, feed, stop) = scheduler(3, 3, &always(), Duration::from_millis(5));
        let scheduler = scheduler.with_progress(RunProgress::hidden());

        let worker = std::thread::spawn(move || scheduler.run_forever());
        std::thread::sleep(Duration::from_millis(50));
        stop.stop();
        let wave = worker.join().unwrap();

        assert_eq!(wave.width(), 3);
        assert!(feed.latest().finished_runs >= 1);
    }

    #[test]
    fn test_publishes_progress() {
        let progress = RunProgress::hidden();
        let (scheduler, _feed, _stop) = scheduler(2, 2, &always(), Duration::ZERO);
        let mut scheduler = scheduler.with_progress(progress.clone());

        scheduler.tick();
        scheduler.tick();
        scheduler.tick();
        assert_eq!(progress.position(), 2);
        assert_eq!(scheduler.solver().state().collapsed_count(), 2);
    }

    // Tests a fully collapsed grid is never published as running, even when paced
    // Verified by publishing before checking for completion
    #[test]
    fn test_collapsed_grid_never_published_as_running() {
        let wave = Wave::new(3, 3, 2, &always()).unwrap();
        let feed = SnapshotFeed::new(Snapshot::initial(3, 2));
        let paced = SchedulerSettings {
            pacing: Pacing::new(Duration::from_micros(100), Duration::from_millis(2)),
            dwell: Duration::ZERO,
            first_seed: Some(4),
        };
        let mut scheduler = CollapseScheduler::new(wave, feed.clone(), paced, StopSignal::new());

        for _ in 0..30 {
            scheduler.tick();
            let snapshot = feed.latest();
            if snapshot.wave.is_fully_collapsed() {
                assert_eq!(snapshot.phase, RunPhase::Collapsed);
            }
        }
        assert!(scheduler.finished_runs() >= 2);
    }

    // Tests a stalled run is held for the dwell without stepping the solver
    // Verified by retrying the step during the dwell
    #[test]
    fn test_stalled_run_waits_out_dwell_without_stepping() {
        let never: Constraint = Arc::new(|_: ModuleId, _: ModuleId, _: Direction| false);
        let steps = Arc::new(AtomicUsize::new(0));
        let solver = CountingSolver {
            inner: Wave::new(2, 2, 1, &never).unwrap(),
            steps: Arc::clone(&steps),
        };
        let feed = SnapshotFeed::new(Snapshot::initial(2, 1));
        let dwell = Duration::from_millis(60);
        let mut scheduler =
            CollapseScheduler::new(solver, feed.clone(), settings(dwell), StopSignal::new());

        scheduler.tick();
        assert!(matches!(scheduler.tick(), RunPhase::Stalled { .. }));
        assert_eq!(steps.load(Ordering::SeqCst), 1);

        let started = Instant::now();
        assert_eq!(scheduler.tick(), RunPhase::Running);
        let held = started.elapsed();

        assert!(held >= dwell);
        assert!(held < dwell + Duration::from_secs(5));
        assert_eq!(steps.load(Ordering::SeqCst), 1);
        assert_eq!(scheduler.run(), 2);
        assert!(feed.latest().wave.contradiction().is_none());
    }
}
