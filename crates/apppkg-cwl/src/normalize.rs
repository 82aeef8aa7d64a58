use apppkg_core::PathSegment;
use regex::Regex;
use serde_yaml::Value;
use std::sync::OnceLock;

pub const VERSION_KEY: &str = "s:version";

/// Adjusts a raw config value to what the destination field accepts.
/// Dispatches on the final segment of the destination path.
pub fn normalize_value(destination: &[PathSegment<'_>], value: Value) -> Value {
    match destination.last() {
        Some(PathSegment::Key(VERSION_KEY)) => Value::String(sanitize_version(&scalar_text(&value))),
        _ => value,
    }
}

/// Replaces every character outside `[A-Za-z0-9 ]` with `_`.
pub fn sanitize_version(raw: &str) -> String {
    version_pattern().replace_all(raw, "_").into_owned()
}

fn version_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[^a-zA-Z0-9 ]").expect("valid regex"))
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Number(number) => number.to_string(),
        Value::Bool(true) => "True".to_string(),
        Value::Bool(false) => "False".to_string(),
        Value::Null => "None".to_string(),
        other => serde_yaml::to_string(other)
            .map(|text| text.trim_end().to_string())
            .unwrap_or_default(),
    }
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
