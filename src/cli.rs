// cli.rs - Command-line interface configuration
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

#[derive(Parser, Debug, Clone)]
#[command(name = "pixsync")]
#[command(about = "Draw into a buffered surface and push it to an SDL window", long_about = None)]
pub struct Cli {
    /// Identifier the window is registered and looked up under
    #[arg(long, default_value = "screen")]
    pub id: String,

    /// Window title
    #[arg(long, default_value = "pixsync")]
    pub title: String,

    #[arg(long, default_value_t = pixsync::DEFAULT_WIDTH)]
    pub width: u32,

    #[arg(long, default_value_t = pixsync::DEFAULT_HEIGHT)]
    pub height: u32,

    /// What to draw
    #[arg(long, value_enum, default_value_t = Pattern::Test)]
    pub pattern: Pattern,

    /// Exit after this many frames instead of waiting for the window to close
    #[arg(long)]
    pub frames: Option<u64>,

    /// Save a PNG of the window contents after the first synchronize
    #[arg(long)]
    pub output: Option<PathBuf>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    /// Green bottom-right quadrant
    Test,
    /// Background grid with a magenta rectangle
    Grid,
    /// 16-bit horizontal/vertical color ramp
    Gradient,
}
