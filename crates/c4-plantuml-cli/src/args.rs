//! Command-line argument definitions for the C4-PlantUML CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, configuration file
//! selection, per-run layout overrides, and logging verbosity.

use clap::Parser;

/// Command-line arguments for the C4-PlantUML diagram tool
#[derive(Parser, Debug, Default)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input workspace file (TOML)
    #[arg(help = "Path to the input workspace file")]
    pub input: String,

    /// Directory the `<view key>.puml` files are written to
    #[arg(short, long, default_value = ".")]
    pub output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Render only the view with this key
    #[arg(long)]
    pub view: Option<String>,

    /// Render in sketch mode
    #[arg(long)]
    pub sketch: bool,

    /// Leave the legend out
    #[arg(long)]
    pub no_legend: bool,

    /// Layout direction (none, top-down, left-right)
    #[arg(long)]
    pub direction: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
