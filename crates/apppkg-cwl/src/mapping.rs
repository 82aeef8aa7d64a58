use crate::normalize::normalize_value;
use apppkg_core::PathSegment::{self, Index, Key};
use apppkg_core::{assign_path, render_path, AssignError, FieldPath, StructuredIssue};
use serde_yaml::{Mapping, Value};
use tracing::{debug, warn};

/// One algorithm config key and every template location it populates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldMapping {
    pub key: &'static str,
    pub destinations: &'static [&'static [PathSegment<'static>]],
}

// Keys recommended by the CWL v1.2 and OGC application package best practices.
pub const FIELD_MAPPINGS: &[FieldMapping] = &[
    FieldMapping {
        key: "algorithm_description",
        destinations: &[&[Key("$graph"), Index(0), Key("doc")]],
    },
    FieldMapping {
        key: "algorithm_name",
        destinations: &[
            &[Key("$graph"), Index(0), Key("label")],
            &[Key("$graph"), Index(0), Key("id")],
        ],
    },
    FieldMapping {
        key: "algorithm_version",
        destinations: &[&[Key("s:version")]],
    },
    FieldMapping {
        key: "author",
        destinations: &[&[Key("s:author"), Index(0), Key("s:name")]],
    },
    FieldMapping {
        key: "citation",
        destinations: &[&[Key("s:citation")]],
    },
    FieldMapping {
        key: "code_repository",
        destinations: &[&[Key("s:codeRepository")]],
    },
    FieldMapping {
        key: "contributor",
        destinations: &[&[Key("s:contributor"), Index(0), Key("s:name")]],
    },
    FieldMapping {
        key: "cores_min",
        destinations: &[&[
            Key("$graph"),
            Index(1),
            Key("requirements"),
            Key("ResourceRequirement"),
            Key("coresMin"),
        ]],
    },
    FieldMapping {
        key: "keywords",
        destinations: &[&[Key("s:keywords")]],
    },
    FieldMapping {
        key: "license",
        destinations: &[&[Key("s:license")]],
    },
    FieldMapping {
        key: "outdir_max",
        destinations: &[&[
            Key("$graph"),
            Index(1),
            Key("requirements"),
            Key("ResourceRequirement"),
            Key("outdirMax"),
        ]],
    },
    FieldMapping {
        key: "ram_min",
        destinations: &[&[
            Key("$graph"),
            Index(1),
            Key("requirements"),
            Key("ResourceRequirement"),
            Key("ramMin"),
        ]],
    },
    FieldMapping {
        key: "release_notes",
        destinations: &[&[Key("s:releaseNotes")]],
    },
    FieldMapping {
        key: "run_command",
        destinations: &[&[Key("$graph"), Index(1), Key("baseCommand")]],
    },
];

/// Copies every mapped config key into the workflow template.
///
/// A key missing from the config yields a warning issue and the run goes
/// on. A destination that does not exist in the template is fatal.
pub fn apply_field_mappings(
    config: &Mapping,
    workflow: &mut Value,
) -> Result<Vec<StructuredIssue>, AssignError> {
    let mut issues = Vec::new();
    for mapping in FIELD_MAPPINGS {
        let Some(value) = config.get(mapping.key) else {
            let issue = StructuredIssue::warning(
                "config_warning",
                FieldPath::key(mapping.key),
                format!("expected key `{}` not found in algorithm config", mapping.key),
                "config.expected_key_missing",
            );
            warn!("{issue}");
            issues.push(issue);
            continue;
        };

        for destination in mapping.destinations {
            debug!(key = mapping.key, destination = %render_path(destination), "mapping config value");
            assign_path(workflow, destination, normalize_value(destination, value.clone()))?;
        }
    }
    Ok(issues)
}

#[cfg(test)]
#[path = "mapping_test.rs"]
mod tests;
