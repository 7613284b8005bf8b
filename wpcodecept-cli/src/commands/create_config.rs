//! Command to write a default `codecept-docker.json`.

use crate::error::CliError;
use crate::utils::GlobalOptions;
use clap::Args;
use wpcodecept::config::{default_namespace, ConfigTemplate, ProjectType};
use wpcodecept::Error as LibError;

/// Write a default codecept-docker.json.
#[derive(Args)]
pub struct CreateConfigCommand {
    /// Project type
    #[arg(long = "type", value_enum, value_name = "TYPE")]
    pub project_type: ProjectType,

    /// Container name prefix (defaults to the project directory name)
    #[arg(long)]
    pub namespace: Option<String>,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

impl CreateConfigCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let namespace = match self.namespace {
            Some(namespace) => namespace,
            None => {
                let dir = global.project_dir().canonicalize()?;
                let namespace = default_namespace(&dir).ok_or_else(|| {
                    CliError::InvalidArguments(format!(
                        "cannot derive a namespace from {}; pass --namespace",
                        dir.display()
                    ))
                })?;
                global.logger.warn(
                    "no \"namespace\" field provided, defaulting to project directory name",
                );
                namespace
            }
        };

        let template = ConfigTemplate::new(namespace, self.project_type);

        template
            .write(&global.config, self.force)
            .map_err(|e| match e {
                LibError::ConfigExists { path } => CliError::SemanticFailure(format!(
                    "{} already exists (use --force to overwrite)",
                    path.display()
                )),
                other => CliError::from(other),
            })?;

        global
            .logger
            .success(&format!("Created {}", global.config.display()));
        Ok(())
    }
}
