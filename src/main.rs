//! CLI entry point for the wave function collapse visualizer

use clap::Parser;
use wavescope::io::cli::{Cli, Visualizer};

fn main() -> wavescope::Result<()> {
    let cli = Cli::parse();
    Visualizer::new(cli).run()
}
