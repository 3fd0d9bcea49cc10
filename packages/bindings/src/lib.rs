use napi::Result as NapiResult;
use napi_derive::napi;
use serde::de::DeserializeOwned;
use serde::Serialize;

use finlit_core::engine::{self, CalculationKind, CalculationRequest};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

fn run<I, O, F>(input_json: &str, f: F) -> NapiResult<String>
where
    I: DeserializeOwned,
    O: Serialize,
    F: FnOnce(&I) -> finlit_core::FinlitResult<O>,
{
    let input: I = serde_json::from_str(input_json).map_err(to_napi_error)?;
    let output = f(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// `{"kind": ..., "inputs": {...}}` in, computation envelope out.
#[napi]
pub fn calculate(request_json: String) -> NapiResult<String> {
    let document: serde_json::Value =
        serde_json::from_str(&request_json).map_err(to_napi_error)?;
    let request = CalculationRequest::from_json(&document).map_err(to_napi_error)?;
    let output = engine::compute_with_metadata(&request).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// Calculation kind plus the bare inputs object the practice screens post.
#[napi]
pub fn calculate_loose(kind: String, inputs_json: String) -> NapiResult<String> {
    let kind: CalculationKind = kind.parse().map_err(to_napi_error)?;
    let inputs: serde_json::Map<String, serde_json::Value> =
        serde_json::from_str(&inputs_json).map_err(to_napi_error)?;
    let request = CalculationRequest::from_inputs(kind, &inputs).map_err(to_napi_error)?;
    let output = engine::compute_with_metadata(&request).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Calculators
// ---------------------------------------------------------------------------

#[napi]
pub fn compound_interest(input_json: String) -> NapiResult<String> {
    run(&input_json, finlit_core::interest::compound::compound_interest)
}

#[napi]
pub fn simple_interest(input_json: String) -> NapiResult<String> {
    run(&input_json, finlit_core::interest::simple::simple_interest)
}

#[napi]
pub fn emi(input_json: String) -> NapiResult<String> {
    run(&input_json, finlit_core::loans::emi::emi)
}

#[napi]
pub fn sip(input_json: String) -> NapiResult<String> {
    run(&input_json, finlit_core::investing::sip::sip)
}

#[napi]
pub fn build_budget(input_json: String) -> NapiResult<String> {
    run(&input_json, finlit_core::budgeting::budget::build_budget)
}

// ---------------------------------------------------------------------------
// Advice
// ---------------------------------------------------------------------------

#[napi]
pub fn scenario_advice(input_json: String) -> NapiResult<String> {
    run(&input_json, finlit_core::advice::scenarios::scenario_advice)
}
