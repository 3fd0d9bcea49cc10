use std::collections::BTreeMap;
use std::str::FromStr;

use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use finlit_core::budgeting::budget::BudgetInput;
use finlit_core::engine::{CalculationKind, CalculationRequest};

use super::run_kind;

/// Arguments for the budget builder
#[derive(Args)]
pub struct BudgetArgs {
    /// Monthly income
    #[arg(long)]
    pub income: Option<Decimal>,

    /// Expense as category=amount (repeatable or comma-separated, e.g.
    /// "rent=15000,food=8000"). Unrecognized categories count as "other".
    #[arg(long = "expense", value_delimiter = ',', value_parser = parse_expense)]
    pub expenses: Vec<(String, Decimal)>,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

fn parse_expense(s: &str) -> Result<(String, Decimal), String> {
    let (name, amount) = s
        .split_once('=')
        .ok_or_else(|| format!("expected category=amount, got '{s}'"))?;
    let amount = Decimal::from_str(amount.trim())
        .map_err(|e| format!("invalid amount for '{}': {e}", name.trim()))?;
    Ok((name.trim().to_string(), amount))
}

pub fn run_budget(args: BudgetArgs) -> Result<Value, Box<dyn std::error::Error>> {
    run_kind(CalculationKind::BudgetBuilder, args.input.as_deref(), || {
        let mut expenses: BTreeMap<String, Decimal> = BTreeMap::new();
        for (name, amount) in &args.expenses {
            *expenses.entry(name.clone()).or_insert(Decimal::ZERO) += *amount;
        }
        Ok(CalculationRequest::BudgetBuilder(BudgetInput {
            income: args.income.ok_or("--income is required (or provide --input)")?,
            expenses,
        }))
    })
}
