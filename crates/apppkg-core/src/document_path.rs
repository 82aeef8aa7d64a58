use serde_yaml::Value;
use std::fmt::{Display, Formatter, Write};

/// One step into a nested YAML document: a mapping key or a sequence index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathSegment<'a> {
    Key(&'a str),
    Index(usize),
}

impl Display for PathSegment<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            PathSegment::Key(key) => write!(f, "{key}"),
            PathSegment::Index(index) => write!(f, "[{index}]"),
        }
    }
}

/// Renders a destination path as `$graph[1].requirements.DockerRequirement`.
pub fn render_path(path: &[PathSegment<'_>]) -> String {
    let mut out = String::new();
    for segment in path {
        match segment {
            PathSegment::Key(key) => {
                if !out.is_empty() {
                    out.push('.');
                }
                out.push_str(key);
            }
            PathSegment::Index(index) => {
                let _ = write!(out, "[{index}]");
            }
        }
    }
    out
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AssignError {
    #[error("destination path must be non-empty")]
    EmptyPath,
    #[error("missing key `{key}` under `{path}`")]
    MissingKey { path: String, key: String },
    #[error("index {index} out of range under `{path}` (length {len})")]
    IndexOutOfRange {
        path: String,
        index: usize,
        len: usize,
    },
    #[error("expected a mapping at `{path}`")]
    NotMapping { path: String },
    #[error("expected a sequence at `{path}`")]
    NotSequence { path: String },
}

/// Writes `value` at `path`, overwriting whatever is there.
///
/// Every segment except the last must already resolve. The last segment may
/// add a new mapping key but a sequence index must be in range.
pub fn assign_path(
    document: &mut Value,
    path: &[PathSegment<'_>],
    value: Value,
) -> Result<(), AssignError> {
    let Some((last, parents)) = path.split_last() else {
        return Err(AssignError::EmptyPath);
    };

    let mut current = document;
    for (depth, segment) in parents.iter().enumerate() {
        current = child_mut(current, *segment, &path[..depth])?;
    }

    match (*last, current) {
        (PathSegment::Key(key), Value::Mapping(mapping)) => {
            mapping.insert(Value::String(key.to_string()), value);
            Ok(())
        }
        (PathSegment::Index(index), Value::Sequence(sequence)) => {
            let len = sequence.len();
            let slot = sequence
                .get_mut(index)
                .ok_or_else(|| AssignError::IndexOutOfRange {
                    path: render_path(parents),
                    index,
                    len,
                })?;
            *slot = value;
            Ok(())
        }
        (PathSegment::Key(_), _) => Err(AssignError::NotMapping {
            path: render_path(parents),
        }),
        (PathSegment::Index(_), _) => Err(AssignError::NotSequence {
            path: render_path(parents),
        }),
    }
}

pub fn lookup_path<'v>(document: &'v Value, path: &[PathSegment<'_>]) -> Option<&'v Value> {
    path.iter()
        .try_fold(document, |node, segment| match (segment, node) {
            (PathSegment::Key(key), Value::Mapping(mapping)) => mapping.get(*key),
            (PathSegment::Index(index), Value::Sequence(sequence)) => sequence.get(*index),
            _ => None,
        })
}

fn child_mut<'v>(
    node: &'v mut Value,
    segment: PathSegment<'_>,
    at: &[PathSegment<'_>],
) -> Result<&'v mut Value, AssignError> {
    match (segment, node) {
        (PathSegment::Key(key), Value::Mapping(mapping)) => {
            mapping.get_mut(key).ok_or_else(|| AssignError::MissingKey {
                path: render_path(at),
                key: key.to_string(),
            })
        }
        (PathSegment::Index(index), Value::Sequence(sequence)) => {
            let len = sequence.len();
            sequence
                .get_mut(index)
                .ok_or_else(|| AssignError::IndexOutOfRange {
                    path: render_path(at),
                    index,
                    len,
                })
        }
        (PathSegment::Key(_), _) => Err(AssignError::NotMapping {
            path: render_path(at),
        }),
        (PathSegment::Index(_), _) => Err(AssignError::NotSequence {
            path: render_path(at),
        }),
    }
}

#[cfg(test)]
#[path = "document_path_test.rs"]
mod tests;
