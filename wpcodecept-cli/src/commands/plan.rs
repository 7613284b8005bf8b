//! Command to print the docker commands for a lifecycle step.

use crate::error::CliError;
use crate::utils::GlobalOptions;
use clap::Args;
use wpcodecept::docker::{CommandPlan, PlanKind, ProjectLayout};

/// Print the docker commands for a lifecycle step.
#[derive(Args)]
pub struct PlanCommand {
    /// Lifecycle step
    #[arg(value_enum)]
    pub kind: PlanKind,

    /// Print the plan as JSON argument vectors
    #[arg(long)]
    pub json: bool,
}

impl PlanCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let runtime = global.load_runtime()?;
        let layout = ProjectLayout::discover(&global.project_dir())?;
        let plan = CommandPlan::build(self.kind, &runtime, &layout);

        global.logger.info(&plan.description);
        for warning in &plan.warnings {
            global.logger.warn(warning);
        }

        if self.json {
            println!("{}", serde_json::to_string_pretty(&plan)?);
        } else {
            for command in &plan.commands {
                println!("{command}");
            }
        }
        Ok(())
    }
}
