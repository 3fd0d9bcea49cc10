pub mod advice;
pub mod budgeting;
pub mod calculate;
pub mod interest;
pub mod investing;
pub mod loans;

use serde_json::{Map, Value};
use tracing::debug;

use finlit_core::engine::{self, CalculationKind, CalculationRequest};

use crate::input;

/// Loose `inputs` object from `--input <file.json>` or piped stdin, if either
/// was supplied.
pub fn read_inputs(path: Option<&str>) -> Result<Option<Map<String, Value>>, Box<dyn std::error::Error>> {
    let value = if let Some(path) = path {
        input::file::read_json_value(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        data
    } else {
        return Ok(None);
    };

    match value {
        Value::Object(map) => Ok(Some(map)),
        _ => Err("input JSON must be an object of named values".into()),
    }
}

/// Validate, compute and wrap a request in the standard envelope.
pub fn run_request(request: &CalculationRequest) -> Result<Value, Box<dyn std::error::Error>> {
    let result = engine::compute_with_metadata(request)?;
    Ok(serde_json::to_value(result)?)
}

/// Prefer file/stdin inputs; fall back to the request assembled from flags.
pub fn run_kind<F>(
    kind: CalculationKind,
    path: Option<&str>,
    from_flags: F,
) -> Result<Value, Box<dyn std::error::Error>>
where
    F: FnOnce() -> Result<CalculationRequest, Box<dyn std::error::Error>>,
{
    let request = match read_inputs(path)? {
        Some(map) => {
            debug!(%kind, fields = map.len(), "using JSON inputs");
            CalculationRequest::from_inputs(kind, &map)?
        }
        None => {
            debug!(%kind, "using command-line flags");
            from_flags()?
        }
    };
    run_request(&request)
}
