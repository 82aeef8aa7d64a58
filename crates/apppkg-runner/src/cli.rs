use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "apppkg")]
#[command(about = "Build CWL workflows from algorithm configs and register OGC application packages")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Generate a CWL workflow from an algorithm configuration file.
    Build(BuildCommand),
    /// Register an application package pointing at a published CWL file.
    Deploy(DeployCommand),
}

#[derive(Debug, Clone, clap::Args)]
pub struct BuildCommand {
    #[arg(long)]
    pub yaml_file: PathBuf,
    #[arg(long, default_value = "cwl_workflows")]
    pub workflow_output_dir: PathBuf,
    #[arg(long, default_value = "templates/process.v1_2.cwl")]
    pub cwl_template_file: PathBuf,
}

#[derive(Debug, Clone, clap::Args)]
pub struct DeployCommand {
    #[arg(long)]
    pub process_cwl_url: String,
    #[arg(long)]
    pub app_pack_register_endpoint: Option<String>,
    #[arg(long, default_value = "templates/ogcapppkg.yml")]
    pub app_pack_template_file: PathBuf,
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
