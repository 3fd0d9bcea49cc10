use serde_json::Value;
use std::io;

use super::{format_value, result_object, row_sections, scalar_fields};

/// Write output as CSV to stdout. A result carrying a schedule is written as
/// that schedule's rows; anything else as field,value pairs.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    match result_object(value) {
        Some(map) => {
            if let Some((_, rows)) = row_sections(map).first() {
                write_rows(&mut wtr, rows);
            } else {
                let _ = wtr.write_record(["field", "value"]);
                for (key, val) in scalar_fields(map) {
                    let _ = wtr.write_record([key.as_str(), val.as_str()]);
                }
            }
        }
        None => {
            let _ = wtr.write_record([format_value(value)]);
        }
    }

    let _ = wtr.flush();
}

fn write_rows(wtr: &mut csv::Writer<io::StdoutLock<'_>>, rows: &[Value]) {
    let Some(Value::Object(first)) = rows.first() else {
        return;
    };

    let headers: Vec<&str> = first.keys().map(|k| k.as_str()).collect();
    let _ = wtr.write_record(&headers);

    for item in rows {
        if let Value::Object(map) = item {
            let row: Vec<String> = headers
                .iter()
                .map(|h| map.get(*h).map(format_value).unwrap_or_default())
                .collect();
            let _ = wtr.write_record(&row);
        }
    }
}
