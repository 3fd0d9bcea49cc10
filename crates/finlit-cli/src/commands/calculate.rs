use clap::Args;
use serde_json::Value;

use finlit_core::engine::{CalculationKind, CalculationRequest};

use super::{read_inputs, run_request};
use crate::input;

/// Arguments for a generic calculation request
#[derive(Args)]
pub struct CalculateArgs {
    /// Calculation kind (compound_interest, simple_interest, emi, sip,
    /// budget_builder). When given, the JSON document is the bare inputs
    /// object; otherwise it must be {"kind": ..., "inputs": {...}}.
    #[arg(long)]
    pub kind: Option<CalculationKind>,

    /// Path to JSON input file (stdin is read when omitted)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_calculate(args: CalculateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let request = match args.kind {
        Some(kind) => {
            let inputs = read_inputs(args.input.as_deref())?
                .ok_or("--input <file.json> or stdin required for calculate")?;
            CalculationRequest::from_inputs(kind, &inputs)?
        }
        None => {
            let document = if let Some(ref path) = args.input {
                input::file::read_json_value(path)?
            } else if let Some(data) = input::stdin::read_stdin()? {
                data
            } else {
                return Err("--input <file.json> or stdin required for calculate".into());
            };
            CalculationRequest::from_json(&document)?
        }
    };
    run_request(&request)
}
