//! Command-line argument definitions for the abgraph CLI.
//!
//! [`Args`] is parsed from the command line with [`clap`]. Arguments select the
//! antibody description to read, where the report goes, an optional
//! configuration file and the logging verbosity.

use clap::Parser;

/// Command-line arguments for the abgraph layering tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the antibody description (TOML)
    #[arg(help = "Path to the antibody description file")]
    pub input: String,

    /// Path to the layer report, `-` for standard output
    #[arg(short, long, default_value = "out.txt")]
    pub output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
