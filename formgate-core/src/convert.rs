//! JSON value coercions for export surfaces.

use serde_json::Value;

/// Renders a stored attribute value as a CSV cell.
///
/// Scalars render bare, null renders as the empty string, and structured
/// values fall back to their compact JSON form.
pub fn value_to_cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}
