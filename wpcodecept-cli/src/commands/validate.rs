//! Command to validate `codecept-docker.json`.

use crate::error::CliError;
use crate::utils::GlobalOptions;
use clap::Args;
use serde::Serialize;
use wpcodecept::ConfigErrors;

/// Validate codecept-docker.json.
#[derive(Args)]
pub struct ValidateCommand {
    /// Print the result as JSON instead of a report
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct ValidationReport<'a> {
    valid: bool,
    errors: &'a ConfigErrors,
}

impl ValidateCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        if !self.json {
            global.load_validated()?;
            global.logger.success("Configuration is valid");
            return Ok(());
        }

        let raw = wpcodecept::ConfigLoader::load_file(&global.config)?;
        let base_dir = crate::utils::project_dir(&global.config);
        let (valid, errors) = match wpcodecept::ConfigValidator::validate(&raw, &base_dir) {
            Ok(_) => (true, ConfigErrors::new()),
            Err(errors) => (false, errors),
        };

        let report = ValidationReport {
            valid,
            errors: &errors,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);

        if valid {
            Ok(())
        } else {
            Err(CliError::InvalidConfig(errors))
        }
    }
}
