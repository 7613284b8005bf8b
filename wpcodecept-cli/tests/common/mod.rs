//! Common test utilities for CLI integration tests.
//!
//! Each test runs the `wpcodecept` binary inside its own project directory
//! so that configuration files never leak between tests.

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A minimal valid configuration.
#[allow(dead_code)]
pub const MINIMAL_CONFIG: &str = r#"{"namespace": "demo", "projectType": "plugin"}"#;

/// Test environment rooted at a temporary project directory.
pub struct TestEnv {
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Project root (`<tmp>/my-plugin`).
    pub project: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create an empty project directory named `my-plugin`.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let project = temp_dir.path().join("my-plugin");
        fs::create_dir_all(&project).expect("Failed to create project dir");

        Self { temp_dir, project }
    }

    /// Create a project with `contents` as its `codecept-docker.json`.
    pub fn with_config(contents: &str) -> Self {
        let env = Self::new();
        env.write_config(contents);
        env
    }

    /// Path of the project's configuration file.
    pub fn config_path(&self) -> PathBuf {
        self.project.join("codecept-docker.json")
    }

    /// Overwrite the configuration file.
    pub fn write_config(&self, contents: &str) {
        fs::write(self.config_path(), contents).expect("Failed to write config");
    }

    /// Write a file relative to the project root.
    pub fn write_file(&self, relative: &str, contents: &str) -> PathBuf {
        let path = self.project.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dir");
        }
        fs::write(&path, contents).expect("Failed to write file");
        path
    }

    /// Binary with no flags, run from the project root.
    pub fn command_bare(&self) -> Command {
        let mut cmd = Command::cargo_bin("wpcodecept").expect("Failed to find wpcodecept binary");
        cmd.current_dir(&self.project)
            .env_remove("WPCODECEPT_CONFIG")
            .env_remove("WPCODECEPT_LOG_MODE");
        cmd
    }

    /// Binary with colors disabled and the config path set explicitly.
    pub fn command(&self) -> Command {
        let mut cmd = self.command_bare();
        cmd.arg("--no-color").arg("--config").arg(self.config_path());
        cmd
    }

    /// Project root.
    pub fn path(&self) -> &Path {
        &self.project
    }

    /// Run a command that must succeed and return its stdout.
    pub fn stdout_of(&self, args: &[&str]) -> String {
        let output = self
            .command()
            .args(args)
            .output()
            .expect("Failed to run wpcodecept");

        assert!(
            output.status.success(),
            "wpcodecept {args:?} failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );

        String::from_utf8(output.stdout).expect("Invalid UTF-8 in output")
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}
