use serde_yaml::{Mapping, Value};

/// CWL wants file-like defaults as `{class, path}` objects; every other
/// type keeps the raw default.
pub fn shape_default(input_type: Option<&str>, default: Value) -> Value {
    match input_type {
        Some(class @ ("File" | "Directory")) => {
            let mut shaped = Mapping::new();
            shaped.insert(Value::from("class"), Value::from(class));
            shaped.insert(Value::from("path"), default);
            Value::Mapping(shaped)
        }
        _ => default,
    }
}

#[cfg(test)]
#[path = "defaults_test.rs"]
mod tests;
