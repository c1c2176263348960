//! Wave data structures and the step-wise solver
//!
//! This module contains:
//! - Module handles and grid directions
//! - Bitset candidate sets
//! - Adjacency constraints
//! - Immutable wave snapshots
//! - The solver seam and its minimum-entropy implementation

/// Bitset candidate sets
pub mod bitset;
/// Adjacency predicates and rule tables
pub mod constraint;
/// Module handles and directions
pub mod module;
/// Step-wise solver
pub mod solver;
/// Immutable wave snapshots
pub mod state;

pub use solver::{Solver, StepOutcome, Wave};
pub use state::WaveState;
