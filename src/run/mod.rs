//! Concurrent collapse-and-render coordination

/// Rolling frame-rate measurement
pub mod clock;
/// Scheduler thread and render loop wiring
pub mod coordinator;
/// Copy-on-write snapshot publication
pub mod feed;
/// Per-step pause computation
pub mod pacing;
/// Run lifecycle state machine
pub mod scheduler;
/// Run seed generation
pub mod seed;
/// Cooperative stop flag
pub mod signal;

pub use coordinator::{Coordinator, RunLimit};
pub use scheduler::CollapseScheduler;
