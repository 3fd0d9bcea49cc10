use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use finlit_core::engine::{CalculationKind, CalculationRequest};
use finlit_core::investing::sip::SipInput;

use super::run_kind;

/// Arguments for the SIP calculator
#[derive(Args)]
pub struct SipArgs {
    /// Amount invested at the start of every month
    #[arg(long)]
    pub monthly_investment: Option<Decimal>,

    /// Expected annual return in percent
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Investment horizon in months
    #[arg(long)]
    pub months: Option<Decimal>,

    /// Include the month-by-month accumulation table
    #[arg(long)]
    pub schedule: bool,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_sip(args: SipArgs) -> Result<Value, Box<dyn std::error::Error>> {
    run_kind(CalculationKind::Sip, args.input.as_deref(), || {
        Ok(CalculationRequest::Sip(SipInput {
            monthly_investment: args
                .monthly_investment
                .ok_or("--monthly-investment is required (or provide --input)")?,
            rate: args.rate.ok_or("--rate is required (or provide --input)")?,
            months: args.months.ok_or("--months is required (or provide --input)")?,
            include_schedule: args.schedule,
        }))
    })
}
