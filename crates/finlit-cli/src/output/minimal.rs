use serde_json::Value;

use super::{format_value, result_object};

/// Headline figure for each calculator, in order of priority.
const PRIORITY_KEYS: [&str; 6] = ["emi", "future_value", "amount", "savings", "interest", "title"];

/// Print just the key answer value from the output, falling back to the
/// first field of the result.
pub fn print_minimal(value: &Value) {
    let Some(map) = result_object(value) else {
        println!("{}", format_value(value));
        return;
    };

    for key in PRIORITY_KEYS {
        if let Some(val) = map.get(key) {
            if !val.is_null() {
                println!("{}", format_value(val));
                return;
            }
        }
    }

    if let Some((key, val)) = map.iter().find(|(k, _)| k.as_str() != "kind") {
        println!("{}: {}", key, format_value(val));
    }
}
