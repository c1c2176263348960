//! Visualizer constants and runtime configuration defaults

use crate::io::error::{Result, invalid_parameter};
use std::time::Duration;

// Grid and layout defaults
/// Default grid width in cells
pub const DEFAULT_GRID_WIDTH: usize = 8;
/// Default grid height in cells
pub const DEFAULT_GRID_HEIGHT: usize = 8;
/// Default edge length of one cell in pixels
pub const DEFAULT_CELL_SIZE: u32 = 40;

// Safety limit to prevent excessive memory allocation
/// Maximum allowed grid dimension
pub const MAX_GRID_DIMENSION: usize = 1_000;
/// Maximum allowed cell edge in pixels
pub const MAX_CELL_SIZE: u32 = 512;
/// Maximum pixels in one rendered frame (64 MiB per frame at 4 bytes a pixel)
pub const MAX_FRAME_PIXELS: u64 = 4096 * 4096;

// Lifecycle pacing
/// How long a finished or stalled run stays on screen before reseeding
pub const DEFAULT_DWELL_MS: u64 = 3_000;
/// Delay charged per adjacency check the solver performs
pub const DEFAULT_CHECK_DELAY_US: u64 = 100;
/// Upper bound on the pause after a single step
pub const DEFAULT_MAX_STEP_DELAY_MS: u64 = 250;

// Render loop
/// Render ticks per second
pub const DEFAULT_FRAME_RATE: u32 = 60;
/// Number of recent frames averaged for the FPS readout
pub const FRAME_RATE_WINDOW: usize = 60;
/// Finished runs to watch before exiting
pub const DEFAULT_RUNS: u64 = 1;

// Drawing
/// Fill color of cells already in the collapse history
pub const HISTORY_COLOR: [u8; 4] = [227, 188, 61, 255];
/// Frame background color
pub const BACKGROUND_COLOR: [u8; 4] = [24, 24, 28, 255];
/// Fill color of contradicted cells
pub const CONTRADICTION_COLOR: [u8; 4] = [178, 34, 34, 255];
/// Color of overlay text
pub const TEXT_COLOR: [u8; 4] = [255, 255, 255, 255];
/// Backdrop behind overlay text
pub const TEXT_BACKDROP: [u8; 4] = [0, 0, 0, 160];
/// Inset of candidate sub-grids from the cell origin, in pixels
pub const SUBCELL_MARGIN: u32 = 2;
/// Integer scale of the bitmap font
pub const TEXT_SCALE: u32 = 1;

// Constraint defaults
/// Pixels sampled along each tile edge for edge matching
pub const DEFAULT_EDGE_SAMPLES: usize = 2;

// Output settings
/// Delay between GIF animation frames
pub const GIF_FRAME_DELAY_MS: u32 = 50;
/// Frames a GIF recording buffers before it stops adding new ones
pub const MAX_GIF_FRAMES: usize = 2_000;

/// Validated runtime settings shared by the solver, scheduler and renderer
///
/// The grid dimensions here are the single source for both the solver grid
/// and the renderer layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisualizerConfig {
    /// Grid width in cells
    pub grid_width: usize,
    /// Grid height in cells
    pub grid_height: usize,
    /// Cell edge length in pixels
    pub cell_size: u32,
    /// Seed of the first run; later runs draw fresh seeds
    pub first_seed: Option<u64>,
    /// Pause on a finished or stalled run before reseeding
    pub dwell: Duration,
    /// Pause charged per adjacency check
    pub check_delay: Duration,
    /// Upper bound on the pause after a single step
    pub max_step_delay: Duration,
    /// Render ticks per second
    pub frame_rate: u32,
}

impl Default for VisualizerConfig {
    fn default() -> Self {
        Self {
            grid_width: DEFAULT_GRID_WIDTH,
            grid_height: DEFAULT_GRID_HEIGHT,
            cell_size: DEFAULT_CELL_SIZE,
            first_seed: None,
            dwell: Duration::from_millis(DEFAULT_DWELL_MS),
            check_delay: Duration::from_micros(DEFAULT_CHECK_DELAY_US),
            max_step_delay: Duration::from_millis(DEFAULT_MAX_STEP_DELAY_MS),
            frame_rate: DEFAULT_FRAME_RATE,
        }
    }
}

impl VisualizerConfig {
    /// Check every field against its allowed range
    ///
    /// # Errors
    ///
    /// Returns an `InvalidParameter` error naming the first offending field
    pub fn validate(&self) -> Result<()> {
        if self.grid_width == 0 || self.grid_width > MAX_GRID_DIMENSION {
            return Err(invalid_parameter(
                "grid_width",
                &self.grid_width,
                &format!("must be between 1 and {MAX_GRID_DIMENSION}"),
            ));
        }
        if self.grid_height == 0 || self.grid_height > MAX_GRID_DIMENSION {
            return Err(invalid_parameter(
                "grid_height",
                &self.grid_height,
                &format!("must be between 1 and {MAX_GRID_DIMENSION}"),
            ));
        }
        if self.cell_size == 0 || self.cell_size > MAX_CELL_SIZE {
            return Err(invalid_parameter(
                "cell_size",
                &self.cell_size,
                &format!("must be between 1 and {MAX_CELL_SIZE}"),
            ));
        }
        let (width, height) = self.frame_size();
        let pixels = u64::from(width) * u64::from(height);
        if pixels > MAX_FRAME_PIXELS {
            return Err(invalid_parameter(
                "frame_size",
                &format!("{width}x{height}"),
                &format!("frame must not exceed {MAX_FRAME_PIXELS} pixels"),
            ));
        }
        if self.frame_rate == 0 {
            return Err(invalid_parameter(
                "frame_rate",
                &self.frame_rate,
                &"must be positive",
            ));
        }
        Ok(())
    }

    /// Frame size in pixels as `(width, height)`
    pub const fn frame_size(&self) -> (u32, u32) {
        (
            self.grid_width as u32 * self.cell_size,
            self.grid_height as u32 * self.cell_size,
        )
    }

    /// Time budget of one render tick
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs(1) / self.frame_rate.max(1)
    }

    /// Number of slots in the grid
    pub const fn slot_count(&self) -> usize {
        self.grid_width * self.grid_height
    }
}
