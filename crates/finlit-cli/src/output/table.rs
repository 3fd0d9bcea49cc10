use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::{format_value, result_object, row_sections, scalar_fields};

/// Format output as tables using the tabled crate: headline fields first,
/// then one table per schedule, then warnings and methodology.
pub fn print_table(value: &Value) {
    let Some(result) = result_object(value) else {
        println!("{}", value);
        return;
    };

    print_fields(result);

    for (name, rows) in row_sections(result) {
        println!("\n{}:", name);
        print_rows(rows);
    }

    if let Value::Object(envelope) = value {
        print_notes(envelope);
    }
}

fn print_fields(map: &Map<String, Value>) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in scalar_fields(map) {
        builder.push_record([key, val]);
    }
    println!("{}", Table::from(builder));
}

fn print_rows(rows: &[Value]) {
    let Some(Value::Object(first)) = rows.first() else {
        println!("(empty)");
        return;
    };

    let headers: Vec<String> = first.keys().cloned().collect();
    let mut builder = Builder::default();
    builder.push_record(&headers);

    for item in rows {
        if let Value::Object(map) = item {
            let row: Vec<String> = headers
                .iter()
                .map(|h| map.get(h.as_str()).map(format_value).unwrap_or_default())
                .collect();
            builder.push_record(row);
        }
    }

    println!("{}", Table::from(builder));
}

fn print_notes(envelope: &Map<String, Value>) {
    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {}", s);
                }
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}
