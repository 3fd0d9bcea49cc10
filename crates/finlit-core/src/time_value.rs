use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;

use crate::error::CalcError;
use crate::types::{Money, Percent};
use crate::validation::checked;
use crate::FinlitResult;

const MONTHS_PER_YEAR: Decimal = dec!(12);
const PERCENT: Decimal = dec!(100);

/// Annual percentage to a per-year decimal rate (8 -> 0.08).
pub fn annual_rate(rate: Percent) -> Decimal {
    rate / PERCENT
}

/// Annual percentage to a per-month decimal rate (12 -> 0.01).
pub fn monthly_rate(rate: Percent) -> Decimal {
    rate / MONTHS_PER_YEAR / PERCENT
}

/// Growth factor (1 + r)^n.
///
/// Whole period counts use exact integer exponentiation; fractional counts
/// fall back to `powd`. Overflow is reported against `field`.
pub fn growth_factor(rate: Decimal, periods: Decimal, field: &str) -> FinlitResult<Decimal> {
    let base = Decimal::ONE + rate;
    if base == Decimal::ONE || periods.is_zero() {
        return Ok(Decimal::ONE);
    }

    let factor = if periods.fract().is_zero() {
        periods.to_u64().and_then(|n| base.checked_powu(n))
    } else {
        base.checked_powd(periods)
    };
    checked(factor, field)
}

/// Number of whole periods in a possibly fractional tenure.
pub fn whole_periods(periods: Decimal) -> u32 {
    periods.trunc().to_u32().unwrap_or(0)
}

/// Level payment that amortizes `principal` over `nper` periods at `rate`
/// per period (ordinary annuity, payment at period end).
pub fn pmt(rate: Decimal, nper: Decimal, principal: Money, field: &str) -> FinlitResult<Money> {
    if nper <= Decimal::ZERO {
        return Err(CalcError::validation(field, "Number of periods must be > 0"));
    }

    if rate.is_zero() {
        return Ok(principal / nper);
    }

    let factor = growth_factor(rate, nper, field)?;
    let annuity_factor = factor - Decimal::ONE;

    // Rates too small to move (1 + r) at 28 digits behave as zero.
    if annuity_factor.is_zero() {
        return Ok(principal / nper);
    }

    let scaled = checked(principal.checked_mul(rate), field)?;
    let numerator = checked(scaled.checked_mul(factor), field)?;
    Ok(numerator / annuity_factor)
}

/// Future value of `payment` made at the start of each of `nper` periods
/// (annuity-due).
pub fn fv_annuity_due(
    rate: Decimal,
    nper: Decimal,
    payment: Money,
    field: &str,
) -> FinlitResult<Money> {
    let level = checked(payment.checked_mul(nper), field)?;
    if rate.is_zero() {
        return Ok(level);
    }

    let factor = growth_factor(rate, nper, field)?;
    let annuity_factor = factor - Decimal::ONE;
    if annuity_factor.is_zero() {
        return Ok(level);
    }

    let per_unit = checked(annuity_factor.checked_div(rate), field)?;
    let accumulated = checked(payment.checked_mul(per_unit), field)?;
    checked(accumulated.checked_mul(Decimal::ONE + rate), field)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_monthly_rate() {
        assert_eq!(monthly_rate(dec!(12)), dec!(0.01));
        assert_eq!(annual_rate(dec!(8)), dec!(0.08));
    }

    #[test]
    fn test_growth_factor_integer_periods() {
        let f = growth_factor(dec!(0.05), dec!(2), "t").unwrap();
        assert_eq!(f, dec!(1.1025));
    }

    #[test]
    fn test_growth_factor_fractional_periods() {
        // sqrt(1.21) = 1.1
        let f = growth_factor(dec!(0.21), dec!(0.5), "t").unwrap();
        assert!((f - dec!(1.1)).abs() < dec!(0.0000001));
    }

    #[test]
    fn test_growth_factor_overflow_is_reported() {
        let err = growth_factor(dec!(10), dec!(1000), "time").unwrap_err();
        assert_eq!(err.field(), Some("time"));
    }

    #[test]
    fn test_pmt_basic() {
        // 100,000 over 12 months at 1% per month = 8,884.88
        let result = pmt(dec!(0.01), dec!(12), dec!(100000), "months").unwrap();
        assert!((result - dec!(8884.88)).abs() < dec!(0.01));
    }

    #[test]
    fn test_pmt_zero_rate() {
        let result = pmt(Decimal::ZERO, dec!(4), dec!(1000), "months").unwrap();
        assert_eq!(result, dec!(250));
    }

    #[test]
    fn test_fv_annuity_due_zero_rate() {
        let result = fv_annuity_due(Decimal::ZERO, dec!(10), dec!(500), "months").unwrap();
        assert_eq!(result, dec!(5000));
    }

    #[test]
    fn test_fv_annuity_due_overflow_is_reported() {
        // (1+r)^n fits, ((1+r)^n - 1) / r does not.
        let err = fv_annuity_due(dec!(0.5), dec!(163), dec!(1), "months").unwrap_err();
        assert_eq!(err.field(), Some("months"));
    }

    #[test]
    fn test_whole_periods_truncates() {
        assert_eq!(whole_periods(dec!(12.9)), 12);
        assert_eq!(whole_periods(dec!(0.4)), 0);
    }
}
