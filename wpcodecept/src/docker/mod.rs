//! Docker command plans and generated test environment files.
//!
//! Nothing in this module spawns a process. Plans are argument vectors the
//! CLI prints; callers that execute them pass each vector to the OS as is.

pub mod command;
pub mod env_testing;
pub mod plan;

pub use command::DockerCommand;
pub use env_testing::{render_env_testing, write_env_testing, ENV_TESTING_FILENAME};
pub use plan::{container_env, CommandPlan, PlanKind, ProjectLayout};
