//! Immutable wave snapshots shared between the scheduler and the renderer

use crate::wave::module::ModuleId;

/// One grid cell and the modules still possible there
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    /// Column in `[0, width)`
    pub x: usize,
    /// Row in `[0, height)`
    pub y: usize,
    /// Remaining candidates in ascending catalog order
    pub superposition: Vec<ModuleId>,
}

impl Slot {
    /// Exactly one candidate remains
    pub fn is_collapsed(&self) -> bool {
        self.superposition.len() == 1
    }

    /// No candidate remains
    pub fn is_contradiction(&self) -> bool {
        self.superposition.is_empty()
    }
}

/// A slot that was reduced to one candidate; its position in the history is the step index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HistoryEntry {
    /// Column of the collapsed slot
    pub x: usize,
    /// Row of the collapsed slot
    pub y: usize,
}

/// Full grid snapshot plus collapse history
///
/// Values are never mutated after construction. The solver builds a fresh
/// one on request and the scheduler publishes it behind an `Arc`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaveState {
    width: usize,
    height: usize,
    slots: Vec<Slot>,
    history: Vec<HistoryEntry>,
}

impl WaveState {
    /// Assemble a snapshot from row-major slots
    pub const fn new(
        width: usize,
        height: usize,
        slots: Vec<Slot>,
        history: Vec<HistoryEntry>,
    ) -> Self {
        Self {
            width,
            height,
            slots,
            history,
        }
    }

    /// Snapshot of an empty grid, used before the first run publishes
    pub const fn empty(width: usize, height: usize) -> Self {
        Self::new(width, height, Vec::new(), Vec::new())
    }

    /// Grid width in cells
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Grid height in cells
    pub const fn height(&self) -> usize {
        self.height
    }

    /// All slots in row-major order
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Collapse order
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// Slot at `(x, y)`
    pub fn slot(&self, x: usize, y: usize) -> Option<&Slot> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.slots.get(y * self.width + x)
    }

    /// True iff every slot holds exactly one candidate
    pub fn is_fully_collapsed(&self) -> bool {
        !self.slots.is_empty() && self.slots.iter().all(Slot::is_collapsed)
    }

    /// First slot with no candidates left
    pub fn contradiction(&self) -> Option<&Slot> {
        self.slots.iter().find(|slot| slot.is_contradiction())
    }

    /// Sum of superposition lengths across the grid
    pub fn remaining_candidates(&self) -> usize {
        self.slots.iter().map(|slot| slot.superposition.len()).sum()
    }

    /// Number of slots holding exactly one candidate
    pub fn collapsed_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_collapsed()).count()
    }
}
