use crate::config::{InputRecord, OutputRecord};
use crate::defaults::shape_default;
use apppkg_core::{FieldPath, StructuredIssue};
use serde_yaml::{Mapping, Value};
use std::collections::BTreeSet;
use tracing::warn;

pub const OUTPUT_BINDING_KEY: &str = "outputs_result";
pub const OUTPUT_SOURCE: &str = "process/outputs_result";
pub const OUTPUT_GLOB: &str = "./output*";

/// The six structures derived from the `inputs` and `outputs` sections.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParameterProjection {
    pub workflow_inputs: Mapping,
    pub process_inputs: Mapping,
    pub step_inputs: Mapping,
    pub workflow_outputs: Mapping,
    pub process_outputs: Mapping,
    pub step_outputs: Vec<Value>,
    pub issues: Vec<StructuredIssue>,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ProjectionError {
    #[error("duplicate input parameter name `{0}`; input parameters must be unique")]
    DuplicateInputName(String),
}

pub fn project_parameters(
    inputs: &[InputRecord],
    outputs: &[OutputRecord],
) -> Result<ParameterProjection, ProjectionError> {
    let mut projection = ParameterProjection::default();
    project_inputs(inputs, &mut projection)?;
    project_outputs(outputs, &mut projection);
    for issue in &projection.issues {
        warn!("{issue}");
    }
    Ok(projection)
}

fn project_inputs(
    inputs: &[InputRecord],
    projection: &mut ParameterProjection,
) -> Result<(), ProjectionError> {
    // An unnamed input is keyed by `null`, so two of them collide as well.
    let mut seen = BTreeSet::<Option<&str>>::new();

    for (index, input) in inputs.iter().enumerate() {
        let name = input.name.as_deref();
        if !seen.insert(name) {
            return Err(ProjectionError::DuplicateInputName(
                name.unwrap_or("null").to_string(),
            ));
        }

        if input.name.is_none() || input.input_type.is_none() {
            projection.issues.push(record_issue(
                "inputs",
                index,
                "expected both input type and input name to be provided for input",
                "config.input.name_or_type_missing",
            ));
        }

        let key = optional_text(name);
        let input_type = optional_text(input.input_type.as_deref());

        let mut workflow_entry = Mapping::new();
        workflow_entry.insert(text("doc"), input.doc.clone().unwrap_or(Value::Null));
        workflow_entry.insert(text("label"), input.label.clone().unwrap_or(Value::Null));
        workflow_entry.insert(text("type"), input_type.clone());

        let mut input_binding = Mapping::new();
        input_binding.insert(text("position"), Value::from(index as u64 + 1));
        input_binding.insert(text("prefix"), Value::String(format!("--{}", name.unwrap_or_default())));

        let mut process_entry = Mapping::new();
        process_entry.insert(text("type"), input_type);
        process_entry.insert(text("inputBinding"), Value::Mapping(input_binding));

        if let Some(raw) = &input.default {
            let default = shape_default(input.input_type.as_deref(), raw.clone());
            workflow_entry.insert(text("default"), default.clone());
            process_entry.insert(text("default"), default);
        }

        projection
            .workflow_inputs
            .insert(key.clone(), Value::Mapping(workflow_entry));
        projection
            .process_inputs
            .insert(key.clone(), Value::Mapping(process_entry));
        projection.step_inputs.insert(key.clone(), key);
    }
    Ok(())
}

// Every output shares the single `outputs_result` process binding, so with
// several outputs only the last one's type survives there.
fn project_outputs(outputs: &[OutputRecord], projection: &mut ParameterProjection) {
    if outputs.len() > 1 {
        projection.issues.push(StructuredIssue::warning(
            "config_warning",
            FieldPath::key("outputs"),
            format!(
                "{} outputs declared but all share the `{OUTPUT_BINDING_KEY}` process binding; only the last output's type is kept",
                outputs.len()
            ),
            "config.outputs.shared_binding",
        ));
    }

    for (index, output) in outputs.iter().enumerate() {
        if output.name.is_none() || output.output_type.is_none() {
            projection.issues.push(record_issue(
                "outputs",
                index,
                "expected output name and output type to be specified",
                "config.output.name_or_type_missing",
            ));
        }

        let output_type = optional_text(output.output_type.as_deref());

        let mut workflow_entry = Mapping::new();
        workflow_entry.insert(text("type"), output_type.clone());
        workflow_entry.insert(text("outputSource"), text(OUTPUT_SOURCE));
        projection
            .workflow_outputs
            .insert(optional_text(output.name.as_deref()), Value::Mapping(workflow_entry));

        let mut output_binding = Mapping::new();
        output_binding.insert(text("glob"), text(OUTPUT_GLOB));
        let mut process_entry = Mapping::new();
        process_entry.insert(text("outputBinding"), Value::Mapping(output_binding));
        process_entry.insert(text("type"), output_type);
        projection
            .process_outputs
            .insert(text(OUTPUT_BINDING_KEY), Value::Mapping(process_entry));

        projection.step_outputs.push(text(OUTPUT_BINDING_KEY));
    }
}

fn record_issue(section: &str, index: usize, message: &str, reference: &str) -> StructuredIssue {
    StructuredIssue::warning(
        "config_warning",
        FieldPath::key(section).with_index(index),
        message,
        reference,
    )
}

fn text(value: &str) -> Value {
    Value::String(value.to_string())
}

fn optional_text(value: Option<&str>) -> Value {
    value.map(text).unwrap_or(Value::Null)
}

#[cfg(test)]
#[path = "project_test.rs"]
mod tests;
