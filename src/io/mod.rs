//! Input/output operations and error handling

/// Tile catalog loading from asset stores
pub mod catalog;
/// Command-line interface and top-level driver
pub mod cli;
/// Constants and validated runtime configuration
pub mod configuration;
/// Error types
pub mod error;
/// PNG frame export
pub mod image;
/// Terminal progress reporting
pub mod progress;
/// Animated GIF recording
pub mod visualization;
