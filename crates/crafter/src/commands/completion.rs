//! `crafter completion` -- print a shell completion script.

use std::io::Write;

use anyhow::{Context, Result};
use clap::CommandFactory;
use clap_complete::{Shell, generate};

use crate::cli::{Cli, CompletionArgs, CompletionCommands};
use crate::context::RuntimeContext;

/// Binary name the scripts complete for.
const BIN_NAME: &str = "crafter";

fn shell(command: &CompletionCommands) -> Shell {
    match command {
        CompletionCommands::Bash => Shell::Bash,
        CompletionCommands::Zsh => Shell::Zsh,
        CompletionCommands::Fish => Shell::Fish,
        CompletionCommands::Powershell => Shell::PowerShell,
    }
}

/// Renders the completion script for `shell` into memory.
fn render(shell: Shell) -> Vec<u8> {
    let mut script = Vec::new();
    generate(shell, &mut Cli::command(), BIN_NAME, &mut script);
    script
}

/// Execute the `crafter completion` command.
pub fn run(_ctx: &RuntimeContext, args: &CompletionArgs) -> Result<()> {
    let script = render(shell(&args.command));
    std::io::stdout()
        .lock()
        .write_all(&script)
        .context("failed to write completion script")?;
    Ok(())
}
