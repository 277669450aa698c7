#![forbid(unsafe_code)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

//! # Kinesim
//!
//! Headless host for the kinematics animation engine.
//!
//! - [`cli`] - clap definitions for `run`, `normalize` and `summary`
//! - [`config`] - run settings layered from defaults, a TOML file and flags
//! - [`commands`] - the subcommands, writing their reports to any writer

pub mod cli;
pub mod commands;
pub mod config;

use std::io::Write;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Command};

/// Installs the stderr log subscriber. `RUST_LOG` overrides the
/// verbosity flags.
pub fn init_logging(cli: &Cli) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_level()));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    // A subscriber may already be installed when embedded in tests.
    let _ = if cli.log_json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
}

/// Runs the parsed command, writing its report to `out`.
pub fn execute(cli: &Cli, out: &mut impl Write) -> Result<()> {
    match &cli.command {
        Command::Run(args) => commands::run(args, out),
        Command::Normalize { file } => commands::normalize_file(file, out),
        Command::Summary { file } => commands::summary(file, out),
    }
}
