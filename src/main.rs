//! # Modmatch CLI
//!
//! This is the binary entry point for the `modmatch` command-line tool.
//!
//! Its primary responsibilities are:
//! - Parsing command-line arguments using `clap`.
//! - Installing the logger and executing the selected command.
//! - Handling top-level application errors and translating them into user-friendly
//!   output.
//!
//! The matching itself lives in the `modmatch` library crate; the binary is a
//! thin wrapper that loads files and prints results.

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli.execute()
}
