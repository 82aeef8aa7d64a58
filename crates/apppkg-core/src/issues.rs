use crate::field_path::FieldPath;
use std::fmt::{Display, Formatter};

/// A recoverable problem found while building; the build carries on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructuredIssue {
    pub kind: String,
    pub field_path: FieldPath,
    pub message: String,
    pub reference: String,
}

impl StructuredIssue {
    pub fn warning(
        kind: &str,
        field_path: FieldPath,
        message: impl Into<String>,
        reference: &str,
    ) -> Self {
        Self {
            kind: kind.to_string(),
            field_path,
            message: message.into(),
            reference: reference.to_string(),
        }
    }
}

impl Display for StructuredIssue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {}: {} ({})",
            self.kind, self.field_path, self.message, self.reference
        )
    }
}

#[cfg(test)]
#[path = "issues_test.rs"]
mod tests;
