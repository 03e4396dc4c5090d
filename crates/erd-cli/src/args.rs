//! Command-line argument definitions for the ERD CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, configuration file
//! selection, debug dumps and logging verbosity.

use clap::Parser;

/// Command-line arguments for the ERD renderer
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the datamodel JSON file
    #[arg(help = "Path to the datamodel JSON file")]
    pub input: String,

    /// Path to the output SVG file
    #[arg(short, long, default_value = "ERD.svg")]
    pub output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Directory receiving intermediate dumps (datamodel and SVG)
    #[arg(long)]
    pub debug_dir: Option<String>,
}
