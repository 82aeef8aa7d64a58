pub mod document_path;
pub mod field_path;
pub mod issues;

pub use document_path::{assign_path, lookup_path, render_path, AssignError, PathSegment};
pub use field_path::{FieldPath, FieldPathSegment};
pub use issues::StructuredIssue;
