//! Shell completion generation command.

use crate::cli::Cli;
use crate::error::CliError;
use crate::utils::GlobalOptions;
use clap::{CommandFactory, Parser};
use clap_complete::{generate, Shell};
use std::io;

const BIN_NAME: &str = "wpcodecept";

/// Generate shell completion scripts
#[derive(Parser)]
pub struct CompletionsCommand {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

impl CompletionsCommand {
    /// Execute the completions command.
    pub fn execute(&self, global: &GlobalOptions) -> Result<(), CliError> {
        let mut cmd = Cli::command();

        let hint = match self.shell {
            Shell::Bash => Some("wpcodecept completions bash > ~/.local/share/bash-completion/completions/wpcodecept"),
            Shell::Zsh => Some("wpcodecept completions zsh > ~/.zsh/completions/_wpcodecept"),
            Shell::Fish => Some("wpcodecept completions fish > ~/.config/fish/completions/wpcodecept.fish"),
            Shell::PowerShell => Some("wpcodecept completions powershell > $PROFILE"),
            _ => None,
        };
        if let Some(hint) = hint {
            global.logger.info(&format!("Install with: {hint}"));
        }

        generate(self.shell, &mut cmd, BIN_NAME, &mut io::stdout());

        Ok(())
    }
}
