//! Utility functions for CLI operations.
//!
//! Path resolution and configuration loading shared by the commands.

use crate::error::CliError;
use std::path::{Path, PathBuf};
use wpcodecept::config::{ConfigLoader, ConfigNormalizer, RuntimeConfig, ValidatedConfig};
use wpcodecept::{Error as LibError, Logger};

/// Global CLI options shared across all commands.
#[derive(Debug, Clone)]
pub struct GlobalOptions {
    /// Path of `codecept-docker.json`.
    pub config: PathBuf,

    /// Logger built from the verbosity and color flags.
    pub logger: Logger,
}

impl GlobalOptions {
    /// Directory holding the configuration file; the project root.
    pub fn project_dir(&self) -> PathBuf {
        project_dir(&self.config)
    }

    /// Load and validate the configuration.
    ///
    /// Validation failures are printed as a report before returning
    /// [`CliError::InvalidConfig`]. Validation warnings go to the logger.
    pub fn load_validated(&self) -> Result<ValidatedConfig, CliError> {
        self.logger
            .info(&format!("Loading {}", self.config.display()));
        let valid = ConfigLoader::load_validated(&self.config).map_err(|e| self.report(e))?;
        for warning in &valid.warnings {
            self.logger.warn(warning);
        }
        Ok(valid)
    }

    /// Load, validate and normalize the configuration.
    pub fn load_runtime(&self) -> Result<RuntimeConfig, CliError> {
        let valid = self.load_validated()?;
        Ok(ConfigNormalizer::normalize(&valid))
    }

    fn report(&self, error: LibError) -> CliError {
        match error {
            LibError::InvalidConfiguration(errors) => {
                self.logger.config_error(&self.config, &errors);
                CliError::InvalidConfig(errors)
            }
            other => CliError::from(other),
        }
    }
}

/// Directory containing `config`, or `.` for a bare file name.
pub fn project_dir(config: &Path) -> PathBuf {
    match config.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
