//! Step-wise collapse solver driven by the scheduler
//!
//! The solver performs no pacing of its own. Each step reports how many
//! adjacency checks it performed so the caller can slow the run down to a
//! watchable speed.

use crate::io::catalog::TileCatalog;
use crate::io::configuration::MAX_GRID_DIMENSION;
use crate::io::error::{Result, invalid_parameter};
use crate::wave::bitset::CandidateSet;
use crate::wave::constraint::{AdjacencyRules, Constraint};
use crate::wave::module::{Direction, ModuleId};
use crate::wave::state::{HistoryEntry, Slot, WaveState};
use ndarray::Array2;
use rand::{Rng, SeedableRng, rngs::StdRng};

/// Result of one unit of solver work
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// A slot was collapsed and its consequences propagated
    Progressed {
        /// Slots reduced to one candidate during this step, including the chosen one
        newly_collapsed: usize,
        /// Adjacency checks performed while propagating
        checks: usize,
    },
    /// Propagation emptied a slot; the run cannot be completed
    Contradiction {
        /// Column of the emptied slot
        x: usize,
        /// Row of the emptied slot
        y: usize,
        /// Adjacency checks performed before the contradiction surfaced
        checks: usize,
    },
    /// Every slot was already collapsed; nothing was done
    Complete,
}

impl StepOutcome {
    /// Adjacency checks reported by the step
    pub const fn checks(&self) -> usize {
        match self {
            Self::Progressed { checks, .. } | Self::Contradiction { checks, .. } => *checks,
            Self::Complete => 0,
        }
    }
}

/// Operations the scheduler needs from a solver
pub trait Solver: Send {
    /// Perform one collapse step
    fn step(&mut self) -> StepOutcome;

    /// Reset every slot to full superposition, clear history and reseed
    fn reinitialize(&mut self, seed: u64);

    /// True iff every slot holds exactly one candidate
    fn is_fully_collapsed(&self) -> bool;

    /// Immutable copy of the current grid and history
    fn state(&self) -> WaveState;
}

impl<S: Solver + ?Sized> Solver for Box<S> {
    fn step(&mut self) -> StepOutcome {
        (**self).step()
    }

    fn reinitialize(&mut self, seed: u64) {
        (**self).reinitialize(seed);
    }

    fn is_fully_collapsed(&self) -> bool {
        (**self).is_fully_collapsed()
    }

    fn state(&self) -> WaveState {
        (**self).state()
    }
}

/// Minimum-entropy solver over a fixed grid
///
/// Each step picks an undecided slot with the fewest candidates (ties broken
/// at random), collapses it to a random candidate and propagates the
/// adjacency rules outward until the grid is stable or a slot empties.
pub struct Wave {
    width: usize,
    height: usize,
    module_count: usize,
    rules: AdjacencyRules,
    // Indexed [y, x]
    slots: Array2<CandidateSet>,
    history: Vec<HistoryEntry>,
    rng: StdRng,
    seed: u64,
}

impl Wave {
    /// Build a wave with every slot in full superposition
    ///
    /// # Errors
    ///
    /// Returns an error if there are no modules or the grid dimensions are
    /// zero or exceed the supported maximum
    pub fn new(
        module_count: usize,
        width: usize,
        height: usize,
        constraint: &Constraint,
    ) -> Result<Self> {
        if module_count == 0 {
            return Err(invalid_parameter(
                "module_count",
                &module_count,
                &"at least one module is required",
            ));
        }
        validate_dimension("width", width)?;
        validate_dimension("height", height)?;

        let seed = 0;
        Ok(Self {
            width,
            height,
            module_count,
            rules: AdjacencyRules::build(module_count, constraint),
            slots: Array2::from_elem((height, width), CandidateSet::all(module_count)),
            history: Vec::with_capacity(width * height),
            rng: StdRng::seed_from_u64(seed),
            seed,
        })
    }

    /// Build a wave over every module in a catalog
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog is empty or the dimensions are invalid
    pub fn from_catalog(
        catalog: &TileCatalog,
        width: usize,
        height: usize,
        constraint: &Constraint,
    ) -> Result<Self> {
        Self::new(catalog.len(), width, height, constraint)
    }

    /// Grid width in cells
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Grid height in cells
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Seed of the current run
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Candidates at `(x, y)`
    pub fn candidates(&self, x: usize, y: usize) -> Option<&CandidateSet> {
        self.slots.get((y, x))
    }

    /// Module chosen at `(x, y)` once that slot has collapsed
    pub fn collapsed_module(&self, x: usize, y: usize) -> Option<ModuleId> {
        self.candidates(x, y).and_then(CandidateSet::collapsed)
    }

    // Lowest-entropy undecided slot; ties are broken uniformly at random
    fn select_slot(&mut self) -> Option<(usize, usize)> {
        let mut lowest = usize::MAX;
        let mut ties = Vec::new();

        for ((y, x), set) in self.slots.indexed_iter() {
            let count = set.count();
            if count <= 1 {
                continue;
            }
            if count < lowest {
                lowest = count;
                ties.clear();
            }
            if count == lowest {
                ties.push((x, y));
            }
        }

        if ties.is_empty() {
            return None;
        }
        let pick = self.rng.random_range(0..ties.len());
        ties.get(pick).copied()
    }

    fn propagate(&mut self, origin: (usize, usize)) -> StepOutcome {
        let mut newly_collapsed = 1;
        let mut checks = 0;
        let mut pending = vec![origin];

        while let Some((x, y)) = pending.pop() {
            let Some(source) = self.slots.get((y, x)).cloned() else {
                continue;
            };

            for direction in Direction::ALL {
                let Some((nx, ny)) = direction.step(x, y, self.width, self.height) else {
                    continue;
                };
                let support = self.rules.support(&source, direction);
                let Some(neighbor) = self.slots.get_mut((ny, nx)) else {
                    continue;
                };

                checks += source.count() * neighbor.count();
                let was_open = neighbor.count() > 1;
                if !neighbor.intersect_with(&support) {
                    continue;
                }

                if neighbor.is_empty() {
                    return StepOutcome::Contradiction {
                        x: nx,
                        y: ny,
                        checks,
                    };
                }
                if was_open && neighbor.count() == 1 {
                    self.history.push(HistoryEntry { x: nx, y: ny });
                    newly_collapsed += 1;
                }
                pending.push((nx, ny));
            }
        }

        StepOutcome::Progressed {
            newly_collapsed,
            checks,
        }
    }
}

impl Solver for Wave {
    fn step(&mut self) -> StepOutcome {
        let Some((x, y)) = self.select_slot() else {
            return StepOutcome::Complete;
        };

        let Some(candidates) = self.slots.get((y, x)).map(CandidateSet::to_vec) else {
            return StepOutcome::Complete;
        };
        let pick = self.rng.random_range(0..candidates.len());
        let Some(&chosen) = candidates.get(pick) else {
            return StepOutcome::Complete;
        };

        if let Some(slot) = self.slots.get_mut((y, x)) {
            *slot = CandidateSet::single(self.module_count, chosen);
        }
        self.history.push(HistoryEntry { x, y });

        self.propagate((x, y))
    }

    fn reinitialize(&mut self, seed: u64) {
        self.slots.fill(CandidateSet::all(self.module_count));
        self.history.clear();
        self.rng = StdRng::seed_from_u64(seed);
        self.seed = seed;
    }

    fn is_fully_collapsed(&self) -> bool {
        self.slots.iter().all(|set| set.count() == 1)
    }

    fn state(&self) -> WaveState {
        let slots = self
            .slots
            .indexed_iter()
            .map(|((y, x), set)| Slot {
                x,
                y,
                superposition: set.to_vec(),
            })
            .collect();
        WaveState::new(self.width, self.height, slots, self.history.clone())
    }
}

fn validate_dimension(parameter: &'static str, value: usize) -> Result<()> {
    if value == 0 || value > MAX_GRID_DIMENSION {
        return Err(invalid_parameter(
            parameter,
            &value,
            &format!("must be between 1 and {MAX_GRID_DIMENSION}"),
        ));
    }
    Ok(())
}
