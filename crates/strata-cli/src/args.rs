//! Command-line argument definitions for the Strata CLI.
//!
//! [`Args`] is parsed with [`clap`] and selects the model document, the
//! layout output path, an optional configuration file, a direction override
//! and the logging verbosity.

use clap::Parser;

/// Command-line arguments for the Strata layout tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input model document (TOML)
    #[arg(help = "Path to the input model")]
    pub input: String,

    /// Path to the output layout JSON file
    #[arg(short, long, default_value = "out.json")]
    pub output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Root layout direction (LR, RL, TB, BT); overrides config and model
    #[arg(short, long)]
    pub direction: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
