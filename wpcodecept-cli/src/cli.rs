//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use crate::commands::{
    CompletionsCommand, CreateConfigCommand, EnvTestingCommand, PlanCommand, ShowCommand,
    ValidateCommand,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Provision Docker-based WordPress environments for Codeception tests.
#[derive(Parser)]
#[command(name = "wpcodecept")]
#[command(
    version,
    about = "Provision Docker-based WordPress environments for Codeception tests",
    long_about = None
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Path to codecept-docker.json
    #[arg(
        long,
        value_name = "PATH",
        global = true,
        env = "WPCODECEPT_CONFIG",
        default_value = wpcodecept::config::CONFIG_FILENAME
    )]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Validate codecept-docker.json
    Validate(ValidateCommand),

    /// Write a default codecept-docker.json
    CreateConfig(CreateConfigCommand),

    /// Print the runtime configuration
    Show(ShowCommand),

    /// Print the docker commands for a lifecycle step
    Plan(PlanCommand),

    /// Render the .env.testing file for Codeception
    EnvTesting(EnvTestingCommand),

    /// Generate shell completion scripts
    Completions(CompletionsCommand),
}
