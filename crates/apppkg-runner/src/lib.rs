mod cli;
mod run;

pub use cli::{BuildCommand, Cli, Commands, DeployCommand};
pub use run::{execute_build, execute_deploy, execute_deploy_with, RunnerError};
