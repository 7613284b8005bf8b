//! Command to print the runtime configuration.

use crate::error::CliError;
use crate::utils::GlobalOptions;
use clap::{Args, ValueEnum};

/// Output format for `show`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ShowFormat {
    /// Pretty-printed JSON
    Json,
    /// YAML
    Yaml,
}

/// Print the runtime configuration.
#[derive(Args)]
pub struct ShowCommand {
    /// Output format
    #[arg(long, value_enum, default_value = "json")]
    pub format: ShowFormat,

    /// Print FTP passwords instead of masking them
    #[arg(long)]
    pub show_secrets: bool,
}

impl ShowCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let mut runtime = global.load_runtime()?;
        if !self.show_secrets {
            runtime = runtime.redacted();
        }

        let output = match self.format {
            ShowFormat::Json => serde_json::to_string_pretty(&runtime)?,
            ShowFormat::Yaml => serde_yaml::to_string(&runtime)?,
        };
        println!("{}", output.trim_end());
        Ok(())
    }
}
