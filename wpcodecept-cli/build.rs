//! Build script for wpcodecept-cli.
//!
//! Generates the man page at build time using clap_mangen and places it in
//! OUT_DIR for inclusion in release builds.
//!
//! Build scripts cannot depend on the crate being built, so the command
//! structure is declared here by hand.

use clap::{Arg, Command};
use clap_mangen::Man;
use std::fs;
use std::path::PathBuf;

/// Build the CLI command structure for man page generation.
///
/// Keep this in sync with src/cli.rs.
fn build_cli() -> Command {
    Command::new("wpcodecept")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Provision Docker-based WordPress environments for Codeception tests")
        .long_about(
            "Validate codecept-docker.json and describe the Docker containers, network \
             and Codeception environment file for a WordPress plugin or theme",
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Enable verbose output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .help("Suppress non-essential output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("no-color")
                .long("no-color")
                .help("Disable colored output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .help("Path to codecept-docker.json")
                .value_name("PATH")
                .global(true)
                .env("WPCODECEPT_CONFIG")
                .default_value("codecept-docker.json"),
        )
        .subcommands(vec![
            Command::new("validate")
                .about("Validate codecept-docker.json")
                .long_about("Check every configuration rule and report all errors at once"),
            Command::new("create-config")
                .about("Write a default codecept-docker.json")
                .long_about("Create a configuration file for a plugin, theme or other project"),
            Command::new("show")
                .about("Print the runtime configuration")
                .long_about("Print the validated configuration with derived container names"),
            Command::new("plan")
                .about("Print the docker commands for a lifecycle step")
                .long_about("Print the docker invocations for up, start, stop, down or network"),
            Command::new("env-testing")
                .about("Render the .env.testing file for Codeception")
                .long_about("Print or write the WPBrowser environment file for the test containers"),
            Command::new("completions")
                .about("Generate shell completion scripts")
                .long_about("Generate shell completion scripts for bash, zsh, fish, or PowerShell"),
        ])
}

fn main() -> std::io::Result<()> {
    let out_dir = PathBuf::from(std::env::var("OUT_DIR").map_err(std::io::Error::other)?);
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir)?;

    let man = Man::new(build_cli());
    let mut buffer = Vec::new();
    man.render(&mut buffer)?;

    fs::write(man_dir.join("wpcodecept.1"), buffer)?;

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=src/commands/");
    Ok(())
}
