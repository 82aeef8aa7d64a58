pub const DEFAULT_WORKFLOW_FILE_NAME: &str = "process.cwl";

pub const DOCKER_TAG_VAR: &str = "DOCKER_TAG";
pub const GIT_COMMIT_HASH_VAR: &str = "GIT_COMMIT_HASH";
pub const WORKFLOW_FILE_NAME_VAR: &str = "WORKFLOW_FILE_NAME";

/// Values the build takes from its execution environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildEnvironment {
    pub docker_tag: Option<String>,
    pub git_commit_hash: Option<String>,
    pub workflow_file_name: String,
}

impl BuildEnvironment {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            docker_tag: lookup(DOCKER_TAG_VAR),
            git_commit_hash: lookup(GIT_COMMIT_HASH_VAR),
            workflow_file_name: lookup(WORKFLOW_FILE_NAME_VAR)
                .filter(|name| !name.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_WORKFLOW_FILE_NAME.to_string()),
        }
    }
}

impl Default for BuildEnvironment {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

#[cfg(test)]
#[path = "environment_test.rs"]
mod tests;
