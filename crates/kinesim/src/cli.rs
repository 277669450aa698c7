//! Command-line interface for `kinesim`.
//!
//! # Examples
//!
//! ```bash
//! # Play a description to the end and print the final readout
//! kinesim run problem.json
//!
//! # Play the second solution step, printing a readout every 10 frames
//! kinesim run problem.json --step 1 --every 10 --json
//!
//! # Write the last frame as a PPM image
//! kinesim run problem.json --export last.ppm
//!
//! # Show what a legacy payload normalizes to
//! kinesim normalize legacy.json
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Headless runner for kinematics animations.
#[derive(Parser, Debug, Clone)]
#[command(name = "kinesim", author, version, about)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    ///
    /// `RUST_LOG` takes precedence when set.
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true, env = "KINESIM_LOG_JSON")]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Play a description headless and print readouts
    Run(RunArgs),

    /// Print the normalized description JSON
    Normalize {
        /// Description or legacy payload (JSON)
        file: PathBuf,
    },

    /// Print the analytic facts of the described model
    Summary {
        /// Description or legacy payload (JSON)
        file: PathBuf,
    },
}

/// Arguments for the `run` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct RunArgs {
    /// Description or legacy payload (JSON)
    pub file: PathBuf,

    /// TOML settings file
    #[arg(long, short = 'c', env = "KINESIM_CONFIG")]
    pub config: Option<PathBuf>,

    /// Frames per second (1-240)
    #[arg(long)]
    pub fps: Option<u32>,

    /// Stop after this much animation time even if still playing
    #[arg(long)]
    pub max_seconds: Option<f64>,

    /// Play only the window of this solution step (0-based)
    #[arg(long)]
    pub step: Option<usize>,

    /// Surface width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Surface height in pixels
    #[arg(long)]
    pub height: Option<u32>,

    /// Write the last frame to this path
    #[arg(long, short = 'o')]
    pub export: Option<PathBuf>,

    /// Print a readout every N frames
    #[arg(long, value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..))]
    pub every: Option<usize>,

    /// Print readouts as JSON
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Default log filter for the verbosity count.
    pub const fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}
