//! Command-line interface for watching collapse runs over a tile folder

use crate::io::catalog::TileCatalog;
use crate::io::configuration::{
    DEFAULT_CELL_SIZE, DEFAULT_CHECK_DELAY_US, DEFAULT_DWELL_MS, DEFAULT_EDGE_SAMPLES,
    DEFAULT_FRAME_RATE, DEFAULT_GRID_HEIGHT, DEFAULT_GRID_WIDTH, DEFAULT_MAX_STEP_DELAY_MS,
    DEFAULT_RUNS, GIF_FRAME_DELAY_MS, VisualizerConfig,
};
use crate::io::error::{Result, invalid_parameter};
use crate::io::image::PngSink;
use crate::io::progress::RunProgress;
use crate::io::visualization::GifRecorder;
use crate::render::frame::FrameSink;
use crate::run::coordinator::{Coordinator, RunLimit};
use crate::wave::constraint::edge_matching;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "wavescope")]
#[command(
    author,
    version,
    about = "Watch wave function collapse fill a grid with tiles"
)]
/// Command-line arguments for the visualizer
pub struct Cli {
    /// Folder of tile images
    #[arg(value_name = "TILES")]
    pub tiles: PathBuf,

    /// Grid width in cells
    #[arg(short = 'W', long, default_value_t = DEFAULT_GRID_WIDTH)]
    pub width: usize,

    /// Grid height in cells
    #[arg(short = 'H', long, default_value_t = DEFAULT_GRID_HEIGHT)]
    pub height: usize,

    /// Cell edge length in pixels
    #[arg(short, long, default_value_t = DEFAULT_CELL_SIZE)]
    pub cell_size: u32,

    /// Seed of the first run (later runs are random)
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Milliseconds a finished run stays on screen before reseeding
    #[arg(short, long, default_value_t = DEFAULT_DWELL_MS)]
    pub dwell_ms: u64,

    /// Microseconds of pause charged per adjacency check
    #[arg(long, default_value_t = DEFAULT_CHECK_DELAY_US)]
    pub check_delay_us: u64,

    /// Upper bound in milliseconds on the pause after one step
    #[arg(long, default_value_t = DEFAULT_MAX_STEP_DELAY_MS)]
    pub max_step_delay_ms: u64,

    /// Render ticks per second
    #[arg(short, long, default_value_t = DEFAULT_FRAME_RATE)]
    pub fps: u32,

    /// Finished runs to watch before exiting (0 watches forever)
    #[arg(short, long, default_value_t = DEFAULT_RUNS)]
    pub runs: u64,

    /// Stop after this many frames
    #[arg(long)]
    pub max_frames: Option<u64>,

    /// Pixels sampled along each tile edge to decide adjacency
    #[arg(short, long, default_value_t = DEFAULT_EDGE_SAMPLES)]
    pub edge_samples: usize,

    /// Record the session as an animated GIF
    #[arg(short, long, value_name = "PATH")]
    pub gif: Option<PathBuf>,

    /// Keep every n-th frame in the GIF
    #[arg(long, default_value_t = 3)]
    pub gif_stride: usize,

    /// Save the last frame as a PNG
    #[arg(short, long, value_name = "PATH")]
    pub png: Option<PathBuf>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Runtime configuration described by the arguments
    pub fn config(&self) -> VisualizerConfig {
        VisualizerConfig {
            grid_width: self.width,
            grid_height: self.height,
            cell_size: self.cell_size,
            first_seed: self.seed,
            dwell: Duration::from_millis(self.dwell_ms),
            check_delay: Duration::from_micros(self.check_delay_us),
            max_step_delay: Duration::from_millis(self.max_step_delay_ms),
            frame_rate: self.fps,
        }
    }

    /// When to stop rendering
    pub const fn limit(&self) -> RunLimit {
        RunLimit {
            finished_runs: if self.runs == 0 {
                None
            } else {
                Some(self.runs)
            },
            frames: self.max_frames,
        }
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }
}

/// Loads the tiles, runs the coordinator and writes the requested outputs
pub struct Visualizer {
    cli: Cli,
}

impl Visualizer {
    /// Create a visualizer for the given arguments
    pub const fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Load, watch and export according to the arguments
    ///
    /// # Errors
    ///
    /// Returns an error if the arguments are invalid, the tiles cannot be
    /// loaded, the scheduler fails or an output cannot be written
    // Allow print for user feedback on the loaded tile set
    #[allow(clippy::print_stderr)]
    pub fn run(&self) -> Result<()> {
        if self.cli.edge_samples == 0 {
            return Err(invalid_parameter(
                "edge_samples",
                &self.cli.edge_samples,
                &"must be positive",
            ));
        }
        let config = self.cli.config();
        config.validate()?;

        let catalog = Arc::new(TileCatalog::from_dir(&self.cli.tiles)?);
        let constraint = edge_matching(&catalog, self.cli.edge_samples);
        if self.cli.should_show_progress() {
            eprintln!(
                "Loaded {} tiles from {}",
                catalog.len(),
                self.cli.tiles.display()
            );
        }

        let progress = if self.cli.should_show_progress() {
            RunProgress::new(config.slot_count())
        } else {
            RunProgress::hidden()
        };
        let mut coordinator =
            Coordinator::new(config, catalog, &constraint)?.with_progress(progress);

        let mut sinks = self.sinks();
        coordinator.run(&mut sinks, self.cli.limit())
    }

    fn sinks(&self) -> Vec<Box<dyn FrameSink>> {
        let mut sinks: Vec<Box<dyn FrameSink>> = Vec::new();
        if let Some(path) = &self.cli.gif {
            sinks.push(Box::new(GifRecorder::new(
                path.clone(),
                GIF_FRAME_DELAY_MS,
                self.cli.gif_stride,
            )));
        }
        if let Some(path) = &self.cli.png {
            sinks.push(Box::new(PngSink::new(path.clone())));
        }
        sinks
    }
}
