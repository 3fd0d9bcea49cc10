pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::{Map, Value};

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// The calculator result inside an envelope, or the value itself.
pub(crate) fn result_object(value: &Value) -> Option<&Map<String, Value>> {
    let map = value.as_object()?;
    match map.get("result") {
        Some(Value::Object(result)) => Some(result),
        _ => Some(map),
    }
}

/// Scalar fields of an object, nested objects flattened to dotted keys.
/// Arrays of objects (schedules) are left to `row_sections`.
pub(crate) fn scalar_fields(map: &Map<String, Value>) -> Vec<(String, String)> {
    let mut out = Vec::new();
    flatten_into("", map, &mut out);
    out
}

fn flatten_into(prefix: &str, map: &Map<String, Value>, out: &mut Vec<(String, String)>) {
    for (key, val) in map {
        let name = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match val {
            Value::Object(inner) => flatten_into(&name, inner, out),
            Value::Array(items) if items.iter().all(Value::is_object) && !items.is_empty() => {}
            _ => out.push((name, format_value(val))),
        }
    }
}

/// Named arrays of objects, e.g. an amortization schedule.
pub(crate) fn row_sections(map: &Map<String, Value>) -> Vec<(&str, &[Value])> {
    map.iter()
        .filter_map(|(key, val)| match val {
            Value::Array(items) if !items.is_empty() && items.iter().all(Value::is_object) => {
                Some((key.as_str(), items.as_slice()))
            }
            _ => None,
        })
        .collect()
}

pub(crate) fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(format_value).collect();
            items.join("; ")
        }
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}
