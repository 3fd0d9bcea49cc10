use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::time_value::{annual_rate, growth_factor, whole_periods};
use crate::types::{round_money, Money, Percent, Years};
use crate::validation::{self, checked};
use crate::FinlitResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Input parameters for compound interest. Interest compounds once a year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompoundInterestInput {
    pub principal: Money,
    /// Annual rate in percent
    pub rate: Percent,
    pub time: Years,
    /// Add a year-by-year growth breakdown to the output.
    #[serde(default)]
    pub include_schedule: bool,
}

/// Output of `compound_interest`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompoundInterestOutput {
    pub principal: Money,
    pub amount: Money,
    pub interest: Money,
    pub total_return_percentage: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule: Option<Vec<GrowthYear>>,
}

/// A single compounding year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthYear {
    pub year: u32,
    pub opening_balance: Money,
    pub interest: Money,
    pub closing_balance: Money,
}

// ---------------------------------------------------------------------------
// Core function
// ---------------------------------------------------------------------------

/// Annually compounded growth: `amount = P * (1 + rate/100)^time`.
///
/// Fractional years are compounded exactly in the closed form; the schedule
/// only lists the whole years.
pub fn compound_interest(input: &CompoundInterestInput) -> FinlitResult<CompoundInterestOutput> {
    validation::non_negative("principal", input.principal)?;
    validation::rate("rate", input.rate)?;
    validation::years("time", input.time)?;

    let r = annual_rate(input.rate);
    let factor = growth_factor(r, input.time, "time")?;
    let amount = checked(input.principal.checked_mul(factor), "principal")?;
    let interest = amount - input.principal;

    let total_return_percentage = if input.principal > Decimal::ZERO {
        let ratio = checked(interest.checked_div(input.principal), "time")?;
        checked(ratio.checked_mul(dec!(100)), "time")?
    } else {
        Decimal::ZERO
    };

    let schedule = input
        .include_schedule
        .then(|| build_schedule(input.principal, r, whole_periods(input.time)));

    Ok(CompoundInterestOutput {
        principal: round_money(input.principal),
        amount: round_money(amount),
        interest: round_money(interest),
        total_return_percentage: round_money(total_return_percentage),
        schedule,
    })
}

/// Balances stay below the closed-form amount, which has already been
/// checked for overflow.
fn build_schedule(principal: Money, r: Decimal, years: u32) -> Vec<GrowthYear> {
    let mut rows = Vec::with_capacity(years as usize);
    let mut balance = principal;

    for year in 1..=years {
        let opening = balance;
        let interest = opening * r;
        balance = opening + interest;
        rows.push(GrowthYear {
            year,
            opening_balance: round_money(opening),
            interest: round_money(interest),
            closing_balance: round_money(balance),
        });
    }

    rows
}
