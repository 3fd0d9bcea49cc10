use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use finlit_core::engine::{CalculationKind, CalculationRequest};
use finlit_core::interest::compound::CompoundInterestInput;
use finlit_core::interest::simple::SimpleInterestInput;

use super::run_kind;

/// Arguments for compound interest
#[derive(Args)]
pub struct CompoundInterestArgs {
    /// Amount invested up front
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual rate in percent (e.g. 8 for 8%)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Horizon in years
    #[arg(long)]
    pub time: Option<Decimal>,

    /// Include a year-by-year growth table
    #[arg(long)]
    pub schedule: bool,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for simple interest
#[derive(Args)]
pub struct SimpleInterestArgs {
    /// Amount invested or borrowed
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual rate in percent
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Horizon in years
    #[arg(long)]
    pub time: Option<Decimal>,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_compound_interest(args: CompoundInterestArgs) -> Result<Value, Box<dyn std::error::Error>> {
    run_kind(CalculationKind::CompoundInterest, args.input.as_deref(), || {
        Ok(CalculationRequest::CompoundInterest(CompoundInterestInput {
            principal: args
                .principal
                .ok_or("--principal is required (or provide --input)")?,
            rate: args.rate.ok_or("--rate is required (or provide --input)")?,
            time: args.time.ok_or("--time is required (or provide --input)")?,
            include_schedule: args.schedule,
        }))
    })
}

pub fn run_simple_interest(args: SimpleInterestArgs) -> Result<Value, Box<dyn std::error::Error>> {
    run_kind(CalculationKind::SimpleInterest, args.input.as_deref(), || {
        Ok(CalculationRequest::SimpleInterest(SimpleInterestInput {
            principal: args
                .principal
                .ok_or("--principal is required (or provide --input)")?,
            rate: args.rate.ok_or("--rate is required (or provide --input)")?,
            time: args.time.ok_or("--time is required (or provide --input)")?,
        }))
    })
}
