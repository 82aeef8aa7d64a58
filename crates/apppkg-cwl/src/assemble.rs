use crate::config::{load_algorithm_config, load_workflow_template, AlgorithmConfig, ConfigError};
use crate::environment::BuildEnvironment;
use crate::mapping::apply_field_mappings;
use crate::project::{project_parameters, ProjectionError};
use apppkg_core::PathSegment::{self, Index, Key};
use apppkg_core::{assign_path, AssignError, StructuredIssue};
use chrono::{Local, NaiveDate};
use serde_yaml::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

pub const SOFTWARE_VERSION: &str = "1.0.0";

const WORKFLOW_INPUTS: &[PathSegment<'static>] = &[Key("$graph"), Index(0), Key("inputs")];
const WORKFLOW_OUTPUTS: &[PathSegment<'static>] = &[Key("$graph"), Index(0), Key("outputs")];
const STEP_INPUTS: &[PathSegment<'static>] =
    &[Key("$graph"), Index(0), Key("steps"), Key("process"), Key("in")];
const STEP_OUTPUTS: &[PathSegment<'static>] =
    &[Key("$graph"), Index(0), Key("steps"), Key("process"), Key("out")];
const PROCESS_INPUTS: &[PathSegment<'static>] = &[Key("$graph"), Index(1), Key("inputs")];
const PROCESS_OUTPUTS: &[PathSegment<'static>] = &[Key("$graph"), Index(1), Key("outputs")];
const DOCKER_PULL: &[PathSegment<'static>] = &[
    Key("$graph"),
    Index(1),
    Key("requirements"),
    Key("DockerRequirement"),
    Key("dockerPull"),
];
const DATE_CREATED: &[PathSegment<'static>] = &[Key("s:dateCreated")];
const SOFTWARE_VERSION_PATH: &[PathSegment<'static>] = &[Key("s:softwareVersion")];
const COMMIT_HASH: &[PathSegment<'static>] = &[Key("s:commitHash")];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildRequest {
    pub config_path: PathBuf,
    pub output_dir: PathBuf,
    pub template_path: PathBuf,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssembledWorkflow {
    pub document: Value,
    pub issues: Vec<StructuredIssue>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BuildReport {
    pub workflow_path: PathBuf,
    pub issues: Vec<StructuredIssue>,
}

#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("algorithm config load failed: {0}")]
    Config(#[source] ConfigError),
    #[error("workflow template load failed: {0}")]
    Template(#[source] ConfigError),
    #[error("create output directory failed `{path}`: {source}")]
    CreateOutputDir {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("workflow template is missing a destination: {0}")]
    Assign(#[from] AssignError),
    #[error(transparent)]
    Projection(#[from] ProjectionError),
    #[error("yaml encode failed: {0}")]
    Encode(#[from] serde_yaml::Error),
    #[error("write file failed `{path}`: {source}")]
    WriteFile {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Fills `template` from `config` and stamps the build metadata.
pub fn assemble_workflow(
    config: &AlgorithmConfig,
    mut template: Value,
    environment: &BuildEnvironment,
    date_created: NaiveDate,
) -> Result<AssembledWorkflow, BuildError> {
    let mut issues = apply_field_mappings(&config.fields, &mut template)?;

    let projection = project_parameters(&config.inputs, &config.outputs)?;
    issues.extend(projection.issues);

    assign_path(&mut template, WORKFLOW_INPUTS, Value::Mapping(projection.workflow_inputs))?;
    assign_path(&mut template, PROCESS_INPUTS, Value::Mapping(projection.process_inputs))?;
    assign_path(&mut template, STEP_INPUTS, Value::Mapping(projection.step_inputs))?;
    assign_path(&mut template, WORKFLOW_OUTPUTS, Value::Mapping(projection.workflow_outputs))?;
    assign_path(&mut template, PROCESS_OUTPUTS, Value::Mapping(projection.process_outputs))?;
    assign_path(&mut template, STEP_OUTPUTS, Value::Sequence(projection.step_outputs))?;

    assign_path(
        &mut template,
        DATE_CREATED,
        Value::String(date_created.format("%Y-%m-%d").to_string()),
    )?;
    assign_path(&mut template, SOFTWARE_VERSION_PATH, Value::from(SOFTWARE_VERSION))?;
    assign_path(&mut template, DOCKER_PULL, optional_text(environment.docker_tag.as_deref()))?;
    assign_path(&mut template, COMMIT_HASH, optional_text(environment.git_commit_hash.as_deref()))?;

    Ok(AssembledWorkflow {
        document: template,
        issues,
    })
}

/// Loads the config and template, builds the workflow and writes it to
/// `<output_dir>/<workflow_file_name>`.
pub fn build_workflow_file(
    request: &BuildRequest,
    environment: &BuildEnvironment,
) -> Result<BuildReport, BuildError> {
    let config = load_algorithm_config(&request.config_path).map_err(BuildError::Config)?;
    let template = load_workflow_template(&request.template_path).map_err(BuildError::Template)?;

    fs::create_dir_all(&request.output_dir).map_err(|source| BuildError::CreateOutputDir {
        path: request.output_dir.display().to_string(),
        source,
    })?;

    let assembled = assemble_workflow(&config, template, environment, Local::now().date_naive())?;

    let workflow_path = request.output_dir.join(&environment.workflow_file_name);
    write_workflow(&assembled.document, &workflow_path)?;
    info!(path = %workflow_path.display(), "CWL workflow saved");

    Ok(BuildReport {
        workflow_path,
        issues: assembled.issues,
    })
}

/// Block-style YAML in document order.
pub fn render_workflow(document: &Value) -> Result<String, BuildError> {
    Ok(serde_yaml::to_string(document)?)
}

fn write_workflow(document: &Value, path: &Path) -> Result<(), BuildError> {
    let rendered = render_workflow(document)?;
    fs::write(path, rendered).map_err(|source| BuildError::WriteFile {
        path: path.display().to_string(),
        source,
    })
}

fn optional_text(value: Option<&str>) -> Value {
    value.map(Value::from).unwrap_or(Value::Null)
}

#[cfg(test)]
#[path = "assemble_test.rs"]
mod tests;
