//! Interactive course planner.
//!
//! Loads a course catalogue and answers listing and lookup requests from a
//! menu on the terminal.

use clap::Parser;

mod cli;

fn main() -> anyhow::Result<()> {
    cli::Cli::parse().run()
}
