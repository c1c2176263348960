//! Copy-on-write publication of wave snapshots
//!
//! The scheduler replaces the published `Arc<Snapshot>` after every state
//! change; readers clone the pointer and render from an immutable value. The
//! lock is held only for the pointer swap or copy.

use crate::wave::state::WaveState;
use std::sync::{Arc, PoisonError, RwLock};

/// Lifecycle phase of the current run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    /// Steps are being requested from the solver
    Running,
    /// Every slot collapsed; dwelling before the next run
    Collapsed,
    /// A slot ran out of candidates; dwelling before the next run
    Stalled {
        /// Column of the emptied slot
        x: usize,
        /// Row of the emptied slot
        y: usize,
    },
    /// The solver is being reset for a fresh seed
    Reseeding,
}

impl RunPhase {
    /// Collapsed or stalled: the run is over and waiting out its dwell
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Collapsed | Self::Stalled { .. })
    }
}

/// Everything a frame is rendered from
#[derive(Debug, Clone)]
pub struct Snapshot {
    /// Grid and history at publication time
    pub wave: WaveState,
    /// Lifecycle phase at publication time
    pub phase: RunPhase,
    /// Seed of the run this snapshot belongs to
    pub seed: u64,
    /// Run number, starting at 1 for the first run
    pub run: u64,
    /// Solver steps taken in this run
    pub steps: u64,
    /// Runs that have reached a terminal phase so far, this one included
    pub finished_runs: u64,
}

impl Snapshot {
    /// Placeholder published before the first run starts
    pub const fn initial(width: usize, height: usize) -> Self {
        Self {
            wave: WaveState::empty(width, height),
            phase: RunPhase::Reseeding,
            seed: 0,
            run: 0,
            steps: 0,
            finished_runs: 0,
        }
    }
}

/// Shared slot holding the latest published snapshot
#[derive(Debug, Clone)]
pub struct SnapshotFeed {
    latest: Arc<RwLock<Arc<Snapshot>>>,
}

impl SnapshotFeed {
    /// Feed starting at `initial`
    pub fn new(initial: Snapshot) -> Self {
        Self {
            latest: Arc::new(RwLock::new(Arc::new(initial))),
        }
    }

    /// Replace the published snapshot, returning the shared handle to it
    pub fn publish(&self, snapshot: Snapshot) -> Arc<Snapshot> {
        let snapshot = Arc::new(snapshot);
        let mut latest = self.latest.write().unwrap_or_else(PoisonError::into_inner);
        *latest = Arc::clone(&snapshot);
        snapshot
    }

    /// Latest published snapshot
    pub fn latest(&self) -> Arc<Snapshot> {
        Arc::clone(&self.latest.read().unwrap_or_else(PoisonError::into_inner))
    }
}
