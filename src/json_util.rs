use serde_json::Value as JsonValue;

/// Human-readable name of a JSON value's type, used in shape errors
#[must_use]
pub const fn type_name(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "list",
        JsonValue::Object(_) => "mapping",
    }
}

/// Cuts out the part of `json_string` around the position the error points at.
pub fn error_snippet(err: &serde_json::Error, json_string: &str) -> String {
    if err.line() != 1 {
        // Pretty-printed bodies are readable enough as they are
        return format!("line {}, column {}", err.line(), err.column());
    }

    let col = err.column().min(json_string.len());
    let mut start = col.saturating_sub(50);
    let mut end = (col + 50).min(json_string.len());
    while !json_string.is_char_boundary(start) {
        start -= 1;
    }
    while !json_string.is_char_boundary(end) {
        end += 1;
    }

    let start_ell = if start == 0 { "" } else { "..." };
    let end_ell = if end == json_string.len() { "" } else { "..." };
    let snippet = &json_string[start..end];
    format!("{start_ell}{snippet}{end_ell}")
}
