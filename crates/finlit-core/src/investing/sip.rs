use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::time_value::{fv_annuity_due, monthly_rate, whole_periods};
use crate::types::{round_money, Money, Months, Percent};
use crate::validation::{self, checked};
use crate::FinlitResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Input parameters for a systematic investment plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SipInput {
    pub monthly_investment: Money,
    /// Expected annual return in percent
    pub rate: Percent,
    /// Investment horizon in months, at least 1
    pub months: Months,
    /// Add a month-by-month accumulation breakdown to the output.
    #[serde(default)]
    pub include_schedule: bool,
}

/// Output of `sip`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SipOutput {
    pub future_value: Money,
    pub invested_amount: Money,
    pub estimated_returns: Money,
    pub return_percentage: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule: Option<Vec<SipMonth>>,
}

/// Portfolio state at the end of one month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SipMonth {
    pub month: u32,
    pub contribution: Money,
    pub invested_to_date: Money,
    pub growth: Money,
    pub value: Money,
}

// ---------------------------------------------------------------------------
// Core function
// ---------------------------------------------------------------------------

/// Future value of monthly contributions made at the start of each month:
/// `FV = M * ((1+r)^n - 1) / r * (1+r)` with `r = rate / 12 / 100`,
/// or `M * n` when the rate is zero.
pub fn sip(input: &SipInput) -> FinlitResult<SipOutput> {
    validation::non_negative("monthly_investment", input.monthly_investment)?;
    validation::rate("rate", input.rate)?;
    validation::tenure_months("months", input.months)?;

    let r = monthly_rate(input.rate);
    let future_value = fv_annuity_due(r, input.months, input.monthly_investment, "months")?;
    let invested_amount = checked(
        input.monthly_investment.checked_mul(input.months),
        "months",
    )?;
    let estimated_returns = future_value - invested_amount;

    let return_percentage = if invested_amount > Decimal::ZERO {
        let ratio = checked(estimated_returns.checked_div(invested_amount), "months")?;
        checked(ratio.checked_mul(dec!(100)), "months")?
    } else {
        Decimal::ZERO
    };

    let schedule = input.include_schedule.then(|| {
        build_schedule(input.monthly_investment, r, whole_periods(input.months))
    });

    Ok(SipOutput {
        future_value: round_money(future_value),
        invested_amount: round_money(invested_amount),
        estimated_returns: round_money(estimated_returns),
        return_percentage: round_money(return_percentage),
        schedule,
    })
}

fn build_schedule(contribution: Money, r: Decimal, months: u32) -> Vec<SipMonth> {
    let mut rows = Vec::with_capacity(months as usize);
    let mut value = Decimal::ZERO;
    let mut invested = Decimal::ZERO;

    for month in 1..=months {
        invested += contribution;
        value = (value + contribution) * (Decimal::ONE + r);
        rows.push(SipMonth {
            month,
            contribution: round_money(contribution),
            invested_to_date: round_money(invested),
            growth: round_money(value - invested),
            value: round_money(value),
        });
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(monthly_investment: Money, rate: Percent, months: Months) -> SipInput {
        SipInput {
            monthly_investment,
            rate,
            months,
            include_schedule: false,
        }
    }

    #[test]
    fn test_sip_known_answer() {
        // 1,000/month at 12% for 60 months, annuity-due ~= 82,486.37
        let out = sip(&input(dec!(1000), dec!(12), dec!(60))).unwrap();
        assert!(
            (out.future_value - dec!(82486.37)).abs() <= dec!(0.01),
            "Expected FV ~82,486.37, got {}",
            out.future_value
        );
        assert_eq!(out.invested_amount, dec!(60000));
        assert!((out.estimated_returns - dec!(22486.37)).abs() <= dec!(0.01));
        assert_eq!(out.return_percentage, dec!(37.48));
    }

    #[test]
    fn test_sip_zero_rate_is_plain_sum() {
        let out = sip(&input(dec!(2500), dec!(0), dec!(36))).unwrap();
        assert_eq!(out.future_value, dec!(90000));
        assert_eq!(out.estimated_returns, Decimal::ZERO);
    }

    #[test]
    fn test_sip_zero_months_is_rejected() {
        let err = sip(&input(dec!(1000), dec!(12), dec!(0))).unwrap_err();
        assert_eq!(err.field(), Some("months"));
    }

    #[test]
    fn test_return_percentage_overflow_is_validation_error() {
        // The future value fits, but the return in percent does not.
        let err = sip(&input(dec!(0.0000000001), dec!(1000), dec!(109))).unwrap_err();
        assert_eq!(err.field(), Some("months"));
    }

    #[test]
    fn test_sip_zero_contribution() {
        let out = sip(&input(dec!(0), dec!(12), dec!(12))).unwrap();
        assert_eq!(out.future_value, Decimal::ZERO);
        assert_eq!(out.return_percentage, Decimal::ZERO);
    }

    #[test]
    fn test_schedule_ends_at_future_value() {
        let mut inp = input(dec!(1000), dec!(12), dec!(24));
        inp.include_schedule = true;
        let out = sip(&inp).unwrap();
        let schedule = out.schedule.clone().unwrap();
        assert_eq!(schedule.len(), 24);
        assert_eq!(schedule[0].value, dec!(1010));
        assert_eq!(schedule[23].invested_to_date, dec!(24000));
        assert!((schedule[23].value - out.future_value).abs() <= dec!(0.01));
    }
}
