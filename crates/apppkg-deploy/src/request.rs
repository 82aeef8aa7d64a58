use crate::submit::DeployError;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Reads the YAML deployment-request template into a JSON body.
pub fn load_deployment_request(path: &Path) -> Result<Value, DeployError> {
    let raw = fs::read_to_string(path).map_err(|source| DeployError::ReadFile {
        path: path.display().to_string(),
        source,
    })?;
    let yaml_value: serde_yaml::Value =
        serde_yaml::from_str(raw.as_str()).map_err(|source| DeployError::Parse {
            path: path.display().to_string(),
            source,
        })?;
    Ok(serde_json::to_value(yaml_value)?)
}

/// Points `executionUnit.href` at the process CWL. Templates without a
/// filled-in href are left untouched. Returns whether the href was replaced.
pub fn inject_execution_unit_href(request: &mut Value, href: &str) -> bool {
    let Some(slot) = request
        .get_mut("executionUnit")
        .and_then(|unit| unit.get_mut("href"))
    else {
        return false;
    };
    if !is_set(slot) {
        return false;
    }
    *slot = Value::String(href.to_string());
    true
}

fn is_set(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
    }
}

#[cfg(test)]
#[path = "request_test.rs"]
mod tests;
