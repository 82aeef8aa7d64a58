use crate::cli::{BuildCommand, DeployCommand};
use apppkg_cwl::{build_workflow_file, BuildEnvironment, BuildError, BuildRequest};
use apppkg_deploy::{
    deploy_app_pack, DeployEnvironment, DeployError, DeployRequest, RegistryTransport,
    ReqwestRegistryTransport, SubmitOutcome,
};

#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    #[error("workflow build failed: {0}")]
    Build(#[from] BuildError),
    #[error("app pack deployment failed: {0}")]
    Deploy(#[from] DeployError),
    #[error("registry endpoint is required: pass `--app-pack-register-endpoint <url>`")]
    MissingRegistryEndpoint,
    #[error("registry client setup failed: {0}")]
    Transport(String),
}

pub fn execute_build(command: &BuildCommand) -> Result<String, RunnerError> {
    let report = build_workflow_file(
        &BuildRequest {
            config_path: command.yaml_file.clone(),
            output_dir: command.workflow_output_dir.clone(),
            template_path: command.cwl_template_file.clone(),
        },
        &BuildEnvironment::from_env(),
    )?;
    // Issues were already logged where they were raised.
    Ok(format!("CWL workflow saved to {}", report.workflow_path.display()))
}

pub fn execute_deploy(command: &DeployCommand) -> Result<String, RunnerError> {
    let transport = ReqwestRegistryTransport::new().map_err(RunnerError::Transport)?;
    execute_deploy_with(command, &DeployEnvironment::from_env(), &transport)
}

pub fn execute_deploy_with(
    command: &DeployCommand,
    environment: &DeployEnvironment,
    transport: &dyn RegistryTransport,
) -> Result<String, RunnerError> {
    let registry_endpoint = command
        .app_pack_register_endpoint
        .clone()
        .filter(|endpoint| !endpoint.is_empty())
        .ok_or(RunnerError::MissingRegistryEndpoint)?;

    let outcome = deploy_app_pack(
        &DeployRequest {
            process_cwl_url: command.process_cwl_url.clone(),
            registry_endpoint,
            template_path: command.app_pack_template_file.clone(),
        },
        environment,
        transport,
    )?;

    Ok(match outcome {
        SubmitOutcome::Created => format!("process registered from {}", command.process_cwl_url),
        SubmitOutcome::Updated { process_id } => {
            format!("process `{process_id}` updated from {}", command.process_cwl_url)
        }
    })
}

#[cfg(test)]
#[path = "run_test.rs"]
mod tests;
