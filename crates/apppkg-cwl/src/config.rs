use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct InputRecord {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub input_type: Option<String>,
    pub doc: Option<Value>,
    pub label: Option<Value>,
    pub default: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct OutputRecord {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub output_type: Option<String>,
    pub doc: Option<Value>,
    pub label: Option<Value>,
}

/// Algorithm configuration: the flat top-level fields plus the parsed
/// `inputs` and `outputs` sections.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AlgorithmConfig {
    pub fields: Mapping,
    pub inputs: Vec<InputRecord>,
    pub outputs: Vec<OutputRecord>,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("read file failed `{path}`: {source}")]
    ReadFile {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("yaml decode error in `{path}`: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("yaml decode error: {0}")]
    Decode(#[from] serde_yaml::Error),
    #[error("algorithm config must be a mapping at the top level")]
    NotMapping,
    #[error("`{section}` must be a list of records")]
    InvalidSection { section: &'static str },
    #[error("invalid record `{section}[{index}]`: {source}")]
    InvalidRecord {
        section: &'static str,
        index: usize,
        #[source]
        source: serde_yaml::Error,
    },
}

impl AlgorithmConfig {
    pub fn from_yaml_str(input: &str) -> Result<Self, ConfigError> {
        let value: Value = serde_yaml::from_str(input)?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> Result<Self, ConfigError> {
        let Value::Mapping(fields) = value else {
            return Err(ConfigError::NotMapping);
        };
        let inputs = parse_section(&fields, "inputs")?;
        let outputs = parse_section(&fields, "outputs")?;
        Ok(Self {
            fields,
            inputs,
            outputs,
        })
    }
}

pub fn load_algorithm_config(path: &Path) -> Result<AlgorithmConfig, ConfigError> {
    AlgorithmConfig::from_value(read_yaml(path)?)
}

/// Loads the workflow template as an order-preserving YAML tree. The
/// template's structure is trusted; only the designated paths get filled.
pub fn load_workflow_template(path: &Path) -> Result<Value, ConfigError> {
    read_yaml(path)
}

fn read_yaml(path: &Path) -> Result<Value, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.display().to_string(),
        source,
    })?;
    serde_yaml::from_str(raw.as_str()).map_err(|source| ConfigError::Parse {
        path: path.display().to_string(),
        source,
    })
}

fn parse_section<T: DeserializeOwned>(
    fields: &Mapping,
    section: &'static str,
) -> Result<Vec<T>, ConfigError> {
    match fields.get(section) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Sequence(records)) => records
            .iter()
            .enumerate()
            .map(|(index, record)| {
                serde_yaml::from_value(record.clone()).map_err(|source| {
                    ConfigError::InvalidRecord {
                        section,
                        index,
                        source,
                    }
                })
            })
            .collect(),
        Some(_) => Err(ConfigError::InvalidSection { section }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
