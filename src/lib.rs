//! Live visualizer for wave function collapse tile solving
//!
//! A background scheduler drives a solver one collapse step at a time and
//! publishes immutable snapshots; a render loop turns the latest snapshot into
//! frames showing every cell's remaining candidates, the collapse order and
//! the run status. Finished and contradicted runs are held on screen, then
//! reseeded and run again.

#![forbid(unsafe_code)]

/// Asset loading, configuration, errors, progress and frame export
pub mod io;
/// Frame layout, texture caching and snapshot rendering
pub mod render;
/// Scheduler lifecycle, snapshot publication and the render loop
pub mod run;
/// Candidate sets, adjacency constraints and the step-wise solver
pub mod wave;

pub use io::error::{Result, VisualizerError};
