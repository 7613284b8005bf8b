//! Command to render `.env.testing`.

use crate::error::CliError;
use crate::utils::GlobalOptions;
use clap::Args;
use wpcodecept::docker::{render_env_testing, write_env_testing, ENV_TESTING_FILENAME};

/// Render the .env.testing file for Codeception.
#[derive(Args)]
pub struct EnvTestingCommand {
    /// Write the file next to codecept-docker.json instead of printing it
    #[arg(long)]
    pub write: bool,
}

impl EnvTestingCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let runtime = global.load_runtime()?;

        if self.write {
            let dir = global.project_dir();
            write_env_testing(&runtime, &dir)?;
            global.logger.success(&format!(
                "Created {}",
                dir.join(ENV_TESTING_FILENAME).display()
            ));
        } else {
            print!("{}", render_env_testing(&runtime));
        }
        Ok(())
    }
}
