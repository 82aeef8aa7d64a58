use super::{BuildEnvironment, DEFAULT_WORKFLOW_FILE_NAME};
use std::collections::BTreeMap;

#[test]
fn defaults_when_nothing_is_set() {
    let environment = BuildEnvironment::default();
    assert_eq!(environment.docker_tag, None);
    assert_eq!(environment.git_commit_hash, None);
    assert_eq!(environment.workflow_file_name, DEFAULT_WORKFLOW_FILE_NAME);
}

#[test]
fn lookup_supplies_every_value() {
    let vars = BTreeMap::from([
        ("DOCKER_TAG", "registry.example/demo:1.0"),
        ("GIT_COMMIT_HASH", "0f3c2a1"),
        ("WORKFLOW_FILE_NAME", "demo.cwl"),
    ]);

    let environment =
        BuildEnvironment::from_lookup(|key| vars.get(key).map(|value| value.to_string()));

    assert_eq!(environment.docker_tag.as_deref(), Some("registry.example/demo:1.0"));
    assert_eq!(environment.git_commit_hash.as_deref(), Some("0f3c2a1"));
    assert_eq!(environment.workflow_file_name, "demo.cwl");
}

#[test]
fn blank_file_name_falls_back_to_default() {
    let environment = BuildEnvironment::from_lookup(|key| {
        (key == "WORKFLOW_FILE_NAME").then(|| "  ".to_string())
    });
    assert_eq!(environment.workflow_file_name, DEFAULT_WORKFLOW_FILE_NAME);
}
