#![forbid(unsafe_code)]

//! # Kinesim CLI
//!
//! Plays kinematics animation descriptions without a display.
//!
//! ## Usage
//!
//! ```bash
//! kinesim run problem.json --json
//! kinesim normalize legacy.json
//! kinesim summary problem.json
//! ```

use clap::Parser;
use kinesim::cli::Cli;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    kinesim::init_logging(&cli);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    kinesim::execute(&cli, &mut out)
}
