//! Rendering of published snapshots into frames

/// Module-to-texture memoization
pub mod cache;
/// Frames and frame sinks
pub mod frame;
/// Bitmap font for overlay text
pub mod glyphs;
/// Cell and candidate sub-grid geometry
pub mod layout;
/// Snapshot-to-frame projection
pub mod renderer;

pub use renderer::SnapshotRenderer;
