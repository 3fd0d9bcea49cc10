use std::fmt;
use std::str::FromStr;
use std::time::Instant;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::budgeting::budget::{self, BudgetInput, BudgetOutput};
use crate::error::CalcError;
use crate::interest::compound::{self, CompoundInterestInput, CompoundInterestOutput};
use crate::interest::simple::{self, SimpleInterestInput, SimpleInterestOutput};
use crate::investing::sip::{self, SipInput, SipOutput};
use crate::loans::emi::{self, EmiInput, EmiOutput};
use crate::types::{with_metadata, ComputationOutput};
use crate::validation::LooseInputs;
use crate::FinlitResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// The calculators the practice screens offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalculationKind {
    CompoundInterest,
    SimpleInterest,
    #[serde(alias = "emi_calculator")]
    Emi,
    #[serde(alias = "sip_calculator")]
    Sip,
    BudgetBuilder,
}

impl CalculationKind {
    pub const ALL: [CalculationKind; 5] = [
        CalculationKind::CompoundInterest,
        CalculationKind::SimpleInterest,
        CalculationKind::Emi,
        CalculationKind::Sip,
        CalculationKind::BudgetBuilder,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CalculationKind::CompoundInterest => "compound_interest",
            CalculationKind::SimpleInterest => "simple_interest",
            CalculationKind::Emi => "emi",
            CalculationKind::Sip => "sip",
            CalculationKind::BudgetBuilder => "budget_builder",
        }
    }

    pub fn methodology(&self) -> &'static str {
        match self {
            CalculationKind::CompoundInterest => "Compound interest, annual compounding",
            CalculationKind::SimpleInterest => "Simple interest on original principal",
            CalculationKind::Emi => "Equated monthly installment (standard amortization)",
            CalculationKind::Sip => "Systematic investment plan (annuity-due, monthly)",
            CalculationKind::BudgetBuilder => "Income vs categorized expenses",
        }
    }
}

impl FromStr for CalculationKind {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "compound_interest" => Ok(CalculationKind::CompoundInterest),
            "simple_interest" => Ok(CalculationKind::SimpleInterest),
            "emi" | "emi_calculator" => Ok(CalculationKind::Emi),
            "sip" | "sip_calculator" => Ok(CalculationKind::Sip),
            "budget_builder" | "budget" => Ok(CalculationKind::BudgetBuilder),
            _ => Err(CalcError::UnknownKind(s.to_string())),
        }
    }
}

impl fmt::Display for CalculationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A calculation with its strongly-typed inputs.
///
/// Wire shape: `{"kind": "emi", "inputs": {"principal": 500000, ...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "inputs", rename_all = "snake_case")]
pub enum CalculationRequest {
    CompoundInterest(CompoundInterestInput),
    SimpleInterest(SimpleInterestInput),
    #[serde(alias = "emi_calculator")]
    Emi(EmiInput),
    #[serde(alias = "sip_calculator")]
    Sip(SipInput),
    BudgetBuilder(BudgetInput),
}

/// Result of `compute`, tagged with the kind that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CalculationResult {
    CompoundInterest(CompoundInterestOutput),
    SimpleInterest(SimpleInterestOutput),
    Emi(EmiOutput),
    Sip(SipOutput),
    BudgetBuilder(BudgetOutput),
}

impl CalculationRequest {
    pub fn kind(&self) -> CalculationKind {
        match self {
            CalculationRequest::CompoundInterest(_) => CalculationKind::CompoundInterest,
            CalculationRequest::SimpleInterest(_) => CalculationKind::SimpleInterest,
            CalculationRequest::Emi(_) => CalculationKind::Emi,
            CalculationRequest::Sip(_) => CalculationKind::Sip,
            CalculationRequest::BudgetBuilder(_) => CalculationKind::BudgetBuilder,
        }
    }

    /// Build a typed request from the untyped `inputs` object form clients
    /// send. Unknown keys are ignored; missing or non-numeric values are
    /// validation errors.
    pub fn from_inputs(kind: CalculationKind, inputs: &Map<String, Value>) -> FinlitResult<Self> {
        let fields = LooseInputs::new(inputs);
        let request = match kind {
            CalculationKind::CompoundInterest => {
                CalculationRequest::CompoundInterest(CompoundInterestInput {
                    principal: fields.number("principal")?,
                    rate: fields.number("rate")?,
                    time: fields.number("time")?,
                    include_schedule: fields.flag("include_schedule")?,
                })
            }
            CalculationKind::SimpleInterest => {
                CalculationRequest::SimpleInterest(SimpleInterestInput {
                    principal: fields.number("principal")?,
                    rate: fields.number("rate")?,
                    time: fields.number("time")?,
                })
            }
            CalculationKind::Emi => CalculationRequest::Emi(EmiInput {
                principal: fields.number("principal")?,
                rate: fields.number("rate")?,
                months: fields.number("months")?,
                include_schedule: fields.flag("include_schedule")?,
            }),
            CalculationKind::Sip => CalculationRequest::Sip(SipInput {
                monthly_investment: fields.number("monthly_investment")?,
                rate: fields.number("rate")?,
                months: fields.number("months")?,
                include_schedule: fields.flag("include_schedule")?,
            }),
            CalculationKind::BudgetBuilder => CalculationRequest::BudgetBuilder(BudgetInput {
                income: fields.number("income")?,
                expenses: fields.amounts("expenses")?,
            }),
        };
        Ok(request)
    }

    /// Build a typed request from a `{"kind": ..., "inputs": {...}}` document,
    /// reporting problems as validation errors rather than serde errors.
    pub fn from_json(value: &Value) -> FinlitResult<Self> {
        let obj = value
            .as_object()
            .ok_or_else(|| CalcError::validation("request", "must be a JSON object"))?;

        let kind: CalculationKind = match obj.get("kind").or_else(|| obj.get("simulation_type")) {
            Some(Value::String(s)) => s.parse()?,
            Some(_) => return Err(CalcError::validation("kind", "must be a string")),
            None => return Err(CalcError::validation("kind", "is required")),
        };

        match obj.get("inputs") {
            Some(Value::Object(inputs)) => Self::from_inputs(kind, inputs),
            Some(_) => Err(CalcError::validation("inputs", "must be a JSON object")),
            None => Err(CalcError::validation("inputs", "is required")),
        }
    }
}

impl CalculationResult {
    pub fn kind(&self) -> CalculationKind {
        match self {
            CalculationResult::CompoundInterest(_) => CalculationKind::CompoundInterest,
            CalculationResult::SimpleInterest(_) => CalculationKind::SimpleInterest,
            CalculationResult::Emi(_) => CalculationKind::Emi,
            CalculationResult::Sip(_) => CalculationKind::Sip,
            CalculationResult::BudgetBuilder(_) => CalculationKind::BudgetBuilder,
        }
    }
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

/// Run a single calculation. Pure: identical requests give identical results.
pub fn compute(request: &CalculationRequest) -> FinlitResult<CalculationResult> {
    let result = match request {
        CalculationRequest::CompoundInterest(input) => {
            CalculationResult::CompoundInterest(compound::compound_interest(input)?)
        }
        CalculationRequest::SimpleInterest(input) => {
            CalculationResult::SimpleInterest(simple::simple_interest(input)?)
        }
        CalculationRequest::Emi(input) => CalculationResult::Emi(emi::emi(input)?),
        CalculationRequest::Sip(input) => CalculationResult::Sip(sip::sip(input)?),
        CalculationRequest::BudgetBuilder(input) => {
            CalculationResult::BudgetBuilder(budget::build_budget(input)?)
        }
    };
    Ok(result)
}

/// `compute`, wrapped in the standard envelope with methodology, the
/// request as assumptions, warnings and timing.
pub fn compute_with_metadata(
    request: &CalculationRequest,
) -> FinlitResult<ComputationOutput<CalculationResult>> {
    let start = Instant::now();
    let kind = request.kind();

    let result = compute(request)
        .inspect_err(|e| debug!(%kind, error = %e, "calculation rejected"))?;
    let warnings = collect_warnings(request, &result);
    for w in &warnings {
        warn!(%kind, "{w}");
    }

    let elapsed = start.elapsed().as_micros() as u64;
    debug!(%kind, elapsed_us = elapsed, "calculation complete");

    Ok(with_metadata(
        kind.methodology(),
        request,
        warnings,
        elapsed,
        result,
    ))
}

fn collect_warnings(request: &CalculationRequest, result: &CalculationResult) -> Vec<String> {
    let mut warnings = Vec::new();

    let (principal, months, schedule) = match request {
        CalculationRequest::CompoundInterest(i) => (Some(i.principal), None, false),
        CalculationRequest::SimpleInterest(i) => (Some(i.principal), None, false),
        CalculationRequest::Emi(i) => (Some(i.principal), Some(i.months), i.include_schedule),
        CalculationRequest::Sip(i) => (None, Some(i.months), i.include_schedule),
        CalculationRequest::BudgetBuilder(_) => (None, None, false),
    };

    if principal.is_some_and(|p| p.is_zero()) {
        warnings.push("Principal is zero; all amounts are zero".to_string());
    }

    if let Some(months) = months {
        if schedule && !months.fract().is_zero() {
            warnings.push(format!(
                "Tenure of {months} months is fractional; schedule lists {} whole months",
                months.trunc()
            ));
        }
    }

    if let CalculationRequest::CompoundInterest(i) = request {
        if i.include_schedule && !i.time.fract().is_zero() {
            warnings.push(format!(
                "Time of {} years is fractional; schedule lists {} whole years",
                i.time,
                i.time.trunc()
            ));
        }
    }

    if let CalculationResult::BudgetBuilder(out) = result {
        if out.savings < Decimal::ZERO {
            warnings.push(format!(
                "Expenses exceed income by {}",
                out.savings.abs()
            ));
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_kind_parses_legacy_names() {
        assert_eq!("emi_calculator".parse::<CalculationKind>().unwrap(), CalculationKind::Emi);
        assert_eq!("SIP".parse::<CalculationKind>().unwrap(), CalculationKind::Sip);
        assert_eq!(
            "compound-interest".parse::<CalculationKind>().unwrap(),
            CalculationKind::CompoundInterest
        );
        assert!(matches!(
            "lottery".parse::<CalculationKind>(),
            Err(CalcError::UnknownKind(_))
        ));
    }

    #[test]
    fn test_request_wire_shape() {
        let req: CalculationRequest = serde_json::from_value(json!({
            "kind": "emi_calculator",
            "inputs": {"principal": 1000, "rate": 0, "months": 10}
        }))
        .unwrap();
        assert_eq!(req.kind(), CalculationKind::Emi);
    }

    #[test]
    fn test_from_json_ignores_unknown_keys() {
        let req = CalculationRequest::from_json(&json!({
            "kind": "simple_interest",
            "inputs": {"principal": 1000, "rate": 5, "time": 2, "frequency": 12}
        }))
        .unwrap();
        let CalculationResult::SimpleInterest(out) = compute(&req).unwrap() else {
            panic!("wrong result kind");
        };
        assert_eq!(out.interest, dec!(100));
    }

    #[test]
    fn test_from_json_missing_kind() {
        let err = CalculationRequest::from_json(&json!({"inputs": {}})).unwrap_err();
        assert_eq!(err.field(), Some("kind"));
    }

    #[test]
    fn test_budget_warning_on_deficit() {
        let req = CalculationRequest::BudgetBuilder(BudgetInput {
            income: dec!(100),
            expenses: [("rent".to_string(), dec!(150))].into_iter().collect(),
        });
        let out = compute_with_metadata(&req).unwrap();
        assert_eq!(out.warnings.len(), 1);
        assert_eq!(out.methodology, "Income vs categorized expenses");
    }
}
