use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use finlit_core::advice::scenarios::{self, ScenarioInput, ScenarioKind, DEFAULT_INCOME};

/// Arguments for life-stage scenario advice
#[derive(Args)]
pub struct AdviceArgs {
    /// Scenario: student, first_job or tax_planning (unknown names fall back to student)
    #[arg(default_value = "student")]
    pub scenario: String,

    /// Income used for savings targets
    #[arg(long)]
    pub income: Option<Decimal>,
}

pub fn run_advice(args: AdviceArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let input = ScenarioInput {
        scenario: ScenarioKind::parse_or_default(&args.scenario),
        income: args.income.unwrap_or(DEFAULT_INCOME),
    };
    let result = scenarios::scenario_advice(&input)?;
    Ok(serde_json::to_value(result)?)
}
