use std::path::PathBuf;

use clap::Parser;

use crate::klotski::prelude::*;

/// Command-line options for one solve run.
#[derive(Clone, Debug, Parser)]
#[command(name = "klotski", about = "A shortest-slide solver for Klotski-family puzzles.")]
pub struct SolverOptions {
    /// Grid file with the starting placement of every tile.
    pub puzzle: PathBuf,

    /// Grid file pinning the final position of each goal tile.
    pub goal: PathBuf,

    #[arg(short, long)]
    pub log_level: Option<String>,

    /// Deepest layer the sweep will expand, in single-cell slides.
    #[arg(short, long, default_value_t = DEFAULT_MAX_DEPTH)]
    pub max_depth: usize,

    /// Write one grayscale image per solution step.
    #[arg(short, long, default_value_t = false)]
    pub render: bool,

    /// Edge length of one board cell in rendered images, in pixels.
    #[arg(short, long, default_value_t = DEFAULT_CELL_PIXELS)]
    pub cell_pixels: usize,

    /// Where rendered images go.
    #[arg(short, long, default_value = ".")]
    pub output_dir: PathBuf,
}
