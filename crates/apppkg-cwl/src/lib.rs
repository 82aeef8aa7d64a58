mod assemble;
mod config;
mod defaults;
mod environment;
mod mapping;
mod normalize;
mod project;

pub use assemble::{
    assemble_workflow, build_workflow_file, render_workflow, AssembledWorkflow, BuildError,
    BuildReport, BuildRequest, SOFTWARE_VERSION,
};
pub use config::{
    load_algorithm_config, load_workflow_template, AlgorithmConfig, ConfigError, InputRecord,
    OutputRecord,
};
pub use defaults::shape_default;
pub use environment::{
    BuildEnvironment, DEFAULT_WORKFLOW_FILE_NAME, DOCKER_TAG_VAR, GIT_COMMIT_HASH_VAR,
    WORKFLOW_FILE_NAME_VAR,
};
pub use mapping::{apply_field_mappings, FieldMapping, FIELD_MAPPINGS};
pub use normalize::{normalize_value, sanitize_version, VERSION_KEY};
pub use project::{
    project_parameters, ParameterProjection, ProjectionError, OUTPUT_BINDING_KEY, OUTPUT_GLOB,
    OUTPUT_SOURCE,
};
