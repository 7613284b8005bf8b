//! Main entry point for the wpcodecept CLI.
//!
//! Reads `codecept-docker.json`, validates it, and prints what the Docker
//! test environment for the project looks like:
//! - `validate`: Check the configuration and report every error
//! - `create-config`: Write a default configuration file
//! - `show`: Print the derived runtime configuration
//! - `plan`: Print the docker commands for a lifecycle step
//! - `env-testing`: Render `.env.testing`

mod cli;
mod commands;
mod error;
mod utils;

use clap::Parser;
use cli::Cli;
use utils::GlobalOptions;

fn main() {
    let cli = Cli::parse();

    let logger = wpcodecept::init_logger(cli.verbose, cli.quiet, cli.no_color);

    let global = GlobalOptions {
        config: cli.config,
        logger,
    };

    let result = match cli.command {
        cli::Command::Validate(cmd) => cmd.execute(&global),
        cli::Command::CreateConfig(cmd) => cmd.execute(&global),
        cli::Command::Show(cmd) => cmd.execute(&global),
        cli::Command::Plan(cmd) => cmd.execute(&global),
        cli::Command::EnvTesting(cmd) => cmd.execute(&global),
        cli::Command::Completions(cmd) => cmd.execute(&global),
    };

    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            if !e.is_reported() {
                eprintln!("Error: {e}");
            }
            std::process::exit(e.exit_code());
        }
    }
}
