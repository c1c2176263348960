//! Terminal progress and run log for the collapse scheduler

use crate::run::feed::{RunPhase, Snapshot};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::LazyLock;

static RUN_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("run {prefix} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Progress bar tracking collapsed slots of the current run
///
/// Clones drive the same bar, so the scheduler thread can report while the
/// render loop owns the original. Finished runs are logged above the bar.
#[derive(Debug, Clone)]
pub struct RunProgress {
    bar: ProgressBar,
}

impl RunProgress {
    /// Visible bar over `slot_count` slots
    pub fn new(slot_count: usize) -> Self {
        let bar = ProgressBar::new(slot_count as u64);
        bar.set_style(RUN_STYLE.clone());
        Self { bar }
    }

    /// Bar that never draws, for quiet mode and tests
    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
        }
    }

    /// Reflect a freshly published snapshot
    pub fn update(&self, snapshot: &Snapshot) {
        self.bar.set_prefix(snapshot.run.to_string());
        self.bar.set_length(snapshot.wave.slots().len() as u64);
        self.bar.set_position(snapshot.wave.collapsed_count() as u64);
        self.bar.set_message(phase_message(snapshot));
    }

    /// Log a run that reached a terminal phase
    pub fn run_finished(&self, snapshot: &Snapshot) {
        self.bar.println(format!(
            "run {} {} after {} steps",
            snapshot.run,
            phase_message(snapshot),
            snapshot.steps
        ));
    }

    /// Remove the bar from the terminal
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }

    /// Current bar position, the number of collapsed slots last reported
    pub fn position(&self) -> u64 {
        self.bar.position()
    }
}

/// Short description of a snapshot's phase
pub fn phase_message(snapshot: &Snapshot) -> String {
    match snapshot.phase {
        RunPhase::Running => format!("running seed 0x{:X}", snapshot.seed),
        RunPhase::Collapsed => format!("collapsed seed 0x{:X}", snapshot.seed),
        RunPhase::Stalled { x, y } => {
            format!("stalled at ({x}, {y}) seed 0x{:X}", snapshot.seed)
        }
        RunPhase::Reseeding => "reseeding".to_string(),
    }
}
