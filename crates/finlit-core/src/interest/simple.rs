use serde::{Deserialize, Serialize};

use crate::time_value::annual_rate;
use crate::types::{round_money, Money, Percent, Years};
use crate::validation::{self, checked};
use crate::FinlitResult;

/// Input parameters for simple interest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimpleInterestInput {
    pub principal: Money,
    /// Annual rate in percent
    pub rate: Percent,
    pub time: Years,
}

/// Output of `simple_interest`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimpleInterestOutput {
    pub principal: Money,
    pub amount: Money,
    pub interest: Money,
}

/// Interest accrued on the original principal only: `P * rate * time / 100`.
pub fn simple_interest(input: &SimpleInterestInput) -> FinlitResult<SimpleInterestOutput> {
    validation::non_negative("principal", input.principal)?;
    validation::rate("rate", input.rate)?;
    validation::years("time", input.time)?;

    let per_year = checked(input.principal.checked_mul(annual_rate(input.rate)), "principal")?;
    let interest = checked(per_year.checked_mul(input.time), "time")?;
    let amount = checked(input.principal.checked_add(interest), "principal")?;

    Ok(SimpleInterestOutput {
        principal: round_money(input.principal),
        amount: round_money(amount),
        interest: round_money(interest),
    })
}
