//! Command implementations for the wpcodecept CLI.
//!
//! Every command receives the [`GlobalOptions`](crate::utils::GlobalOptions)
//! built in `main` and loads the configuration itself when it needs one.

pub mod completions;
pub mod create_config;
pub mod env_testing;
pub mod plan;
pub mod show;
pub mod validate;

pub use completions::CompletionsCommand;
pub use create_config::CreateConfigCommand;
pub use env_testing::EnvTestingCommand;
pub use plan::PlanCommand;
pub use show::ShowCommand;
pub use validate::ValidateCommand;
