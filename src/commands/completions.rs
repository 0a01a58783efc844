//! # Completions Command Implementation
//!
//! Prints a shell completion script for `modmatch` to stdout, generated by
//! `clap_complete` from the same `Cli` definition the binary parses with.
//!
//! ```bash
//! modmatch completions bash > ~/.local/share/bash-completion/completions/modmatch
//! modmatch completions zsh > ~/.zfunc/_modmatch
//! modmatch completions fish > ~/.config/fish/completions/modmatch.fish
//! ```

use anyhow::Result;
use clap::{Args, CommandFactory};
use clap_complete::{generate, Shell};
use std::io::{self, Write};

use crate::cli::Cli;

/// Generate shell completion scripts
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// The shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Writes the completion script for `shell` into `out`.
fn write_completions(shell: Shell, out: &mut dyn Write) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, out);
}

/// Execute the `completions` command.
pub fn execute(args: CompletionsArgs) -> Result<()> {
    let mut stdout = io::stdout().lock();
    write_completions(args.shell, &mut stdout);
    stdout.flush()?;
    Ok(())
}
