use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use finlit_core::engine::{CalculationKind, CalculationRequest};
use finlit_core::loans::emi::EmiInput;

use super::run_kind;

/// Arguments for the EMI calculator
#[derive(Args)]
pub struct EmiArgs {
    /// Loan amount
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual interest rate in percent
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Tenure in months
    #[arg(long, alias = "tenure")]
    pub months: Option<Decimal>,

    /// Include the month-by-month amortization schedule
    #[arg(long)]
    pub schedule: bool,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_emi(args: EmiArgs) -> Result<Value, Box<dyn std::error::Error>> {
    run_kind(CalculationKind::Emi, args.input.as_deref(), || {
        Ok(CalculationRequest::Emi(EmiInput {
            principal: args
                .principal
                .ok_or("--principal is required (or provide --input)")?,
            rate: args.rate.ok_or("--rate is required (or provide --input)")?,
            months: args.months.ok_or("--months is required (or provide --input)")?,
            include_schedule: args.schedule,
        }))
    })
}
