use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::time_value::{monthly_rate, pmt, whole_periods};
use crate::types::{round_money, Money, Months, Percent};
use crate::validation::{self, checked};
use crate::FinlitResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Input parameters for an equated monthly installment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmiInput {
    pub principal: Money,
    /// Annual rate in percent
    pub rate: Percent,
    /// Loan tenure in months, at least 1
    pub months: Months,
    /// Add a month-by-month amortization schedule to the output.
    #[serde(default)]
    pub include_schedule: bool,
}

/// Output of `emi`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmiOutput {
    pub principal: Money,
    pub emi: Money,
    pub total_payment: Money,
    pub total_interest: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule: Option<Vec<AmortizationRow>>,
}

/// A single month of the amortization schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationRow {
    pub month: u32,
    pub opening_balance: Money,
    pub payment: Money,
    pub interest: Money,
    pub principal: Money,
    pub closing_balance: Money,
}

// ---------------------------------------------------------------------------
// Core function
// ---------------------------------------------------------------------------

/// Standard amortizing installment:
/// `emi = P * r * (1+r)^n / ((1+r)^n - 1)` with `r = rate / 12 / 100`,
/// or `P / n` when the rate is zero.
pub fn emi(input: &EmiInput) -> FinlitResult<EmiOutput> {
    validation::non_negative("principal", input.principal)?;
    validation::rate("rate", input.rate)?;
    validation::tenure_months("months", input.months)?;

    let r = monthly_rate(input.rate);
    let installment = pmt(r, input.months, input.principal, "months")?;
    let total_payment = checked(installment.checked_mul(input.months), "months")?;
    let total_interest = total_payment - input.principal;

    let schedule = input
        .include_schedule
        .then(|| build_schedule(input.principal, r, installment, input.months));

    Ok(EmiOutput {
        principal: round_money(input.principal),
        emi: round_money(installment),
        total_payment: round_money(total_payment),
        total_interest: round_money(total_interest),
        schedule,
    })
}

/// Walk the loan balance month by month. Any residue left by decimal
/// rounding is absorbed by the final row so the loan closes at zero. A
/// fractional tenure leaves a balance after the last whole month.
fn build_schedule(
    principal: Money,
    r: Decimal,
    installment: Money,
    tenure: Months,
) -> Vec<AmortizationRow> {
    let months = whole_periods(tenure);
    let closes = tenure.fract().is_zero();
    let mut rows = Vec::with_capacity(months as usize);
    let mut balance = principal;

    for month in 1..=months {
        let opening = balance;
        let interest = opening * r;
        let mut repaid = installment - interest;
        let mut payment = installment;

        if repaid > opening || (closes && month == months) {
            repaid = opening;
            payment = interest + opening;
        }

        balance = opening - repaid;
        rows.push(AmortizationRow {
            month,
            opening_balance: round_money(opening),
            payment: round_money(payment),
            interest: round_money(interest),
            principal: round_money(repaid),
            closing_balance: round_money(balance),
        });
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn input(principal: Money, rate: Percent, months: Months) -> EmiInput {
        EmiInput {
            principal,
            rate,
            months,
            include_schedule: false,
        }
    }

    #[test]
    fn test_emi_known_answer() {
        // 500,000 at 10% over 60 months ~= 10,623.52
        let out = emi(&input(dec!(500000), dec!(10), dec!(60))).unwrap();
        assert!(
            (out.emi - dec!(10623.52)).abs() <= dec!(0.01),
            "Expected EMI ~10,623.52, got {}",
            out.emi
        );
        assert!((out.total_payment - dec!(637411.34)).abs() <= dec!(0.05));
        assert!((out.total_interest - dec!(137411.34)).abs() <= dec!(0.05));
    }

    #[test]
    fn test_emi_zero_rate_repays_principal_exactly() {
        let out = emi(&input(dec!(120000), dec!(0), dec!(24))).unwrap();
        assert_eq!(out.emi, dec!(5000));
        assert_eq!(out.total_payment, dec!(120000));
        assert_eq!(out.total_interest, Decimal::ZERO);
    }

    #[test]
    fn test_emi_zero_months_is_rejected() {
        let err = emi(&input(dec!(1000), dec!(10), dec!(0))).unwrap_err();
        assert_eq!(err.field(), Some("months"));
    }

    #[test]
    fn test_schedule_amortizes_to_zero() {
        let mut inp = input(dec!(100000), dec!(12), dec!(12));
        inp.include_schedule = true;
        let out = emi(&inp).unwrap();
        let schedule = out.schedule.unwrap();

        assert_eq!(schedule.len(), 12);
        assert_eq!(schedule[0].interest, dec!(1000));
        assert_eq!(schedule.last().unwrap().closing_balance, Decimal::ZERO);

        let repaid: Decimal = schedule.iter().map(|r| r.principal).sum();
        assert!((repaid - dec!(100000)).abs() <= dec!(0.10));
    }

    #[test]
    fn test_schedule_fractional_tenure_is_truncated() {
        let mut inp = input(dec!(10000), dec!(6), dec!(6.5));
        inp.include_schedule = true;
        let out = emi(&inp).unwrap();
        let schedule = out.schedule.unwrap();
        assert_eq!(schedule.len(), 6);
        assert!(schedule.last().unwrap().closing_balance > Decimal::ZERO);
    }
}
