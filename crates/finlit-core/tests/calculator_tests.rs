use finlit_core::budgeting::budget::{self, BudgetInput, ExpenseCategory};
use finlit_core::interest::compound::{self, CompoundInterestInput};
use finlit_core::interest::simple::{self, SimpleInterestInput};
use finlit_core::investing::sip::{self, SipInput};
use finlit_core::loans::emi::{self, EmiInput};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// Interest
// ===========================================================================

#[test]
fn test_compound_interest_rate_or_time_zero() {
    for (rate, time) in [(dec!(0), dec!(10)), (dec!(12), dec!(0)), (dec!(0), dec!(0))] {
        let out = compound::compound_interest(&CompoundInterestInput {
            principal: dec!(7500.50),
            rate,
            time,
            include_schedule: false,
        })
        .unwrap();
        assert_eq!(out.amount, dec!(7500.50));
        assert_eq!(out.interest, Decimal::ZERO);
    }
}

#[test]
fn test_compound_interest_fractional_years() {
    // 1000 at 21% for half a year = 1000 * sqrt(1.21) = 1100
    let out = compound::compound_interest(&CompoundInterestInput {
        principal: dec!(1000),
        rate: dec!(21),
        time: dec!(0.5),
        include_schedule: false,
    })
    .unwrap();
    assert!((out.amount - dec!(1100)).abs() <= dec!(0.01));
}

#[test]
fn test_simple_interest_known_answer() {
    let out = simple::simple_interest(&SimpleInterestInput {
        principal: dec!(25000),
        rate: dec!(7.5),
        time: dec!(4),
    })
    .unwrap();
    assert_eq!(out.interest, dec!(7500));
    assert_eq!(out.amount, dec!(32500));
    assert_eq!(out.principal, dec!(25000));
}

// ===========================================================================
// EMI
// ===========================================================================

#[test]
fn test_emi_reference_loan() {
    let out = emi::emi(&EmiInput {
        principal: dec!(500000),
        rate: dec!(10),
        months: dec!(60),
        include_schedule: false,
    })
    .unwrap();
    assert!(
        (out.emi - dec!(10623.51)).abs() <= dec!(0.02),
        "Expected EMI ~10,623.51, got {}",
        out.emi
    );
}

#[test]
fn test_emi_zero_rate_times_months_is_principal() {
    let out = emi::emi(&EmiInput {
        principal: dec!(100000),
        rate: dec!(0),
        months: dec!(7),
        include_schedule: false,
    })
    .unwrap();
    assert!((out.emi * dec!(7) - dec!(100000)).abs() <= dec!(0.05));
    assert_eq!(out.total_payment, dec!(100000));
}

#[test]
fn test_emi_schedule_interest_sums_to_total_interest() {
    let out = emi::emi(&EmiInput {
        principal: dec!(250000),
        rate: dec!(9),
        months: dec!(36),
        include_schedule: true,
    })
    .unwrap();
    let schedule = out.schedule.as_ref().unwrap();
    let interest: Decimal = schedule.iter().map(|r| r.interest).sum();
    let repaid: Decimal = schedule.iter().map(|r| r.principal).sum();
    assert!((interest - out.total_interest).abs() <= dec!(0.50));
    assert!((repaid - dec!(250000)).abs() <= dec!(0.50));
    assert_eq!(schedule.last().unwrap().closing_balance, Decimal::ZERO);
    assert_eq!(schedule.first().unwrap().opening_balance, dec!(250000));
}

#[test]
fn test_emi_rejects_sub_month_tenure() {
    let err = emi::emi(&EmiInput {
        principal: dec!(1000),
        rate: dec!(5),
        months: dec!(0.5),
        include_schedule: false,
    })
    .unwrap_err();
    assert_eq!(err.field(), Some("months"));
}

// ===========================================================================
// SIP
// ===========================================================================

#[test]
fn test_sip_reference_plan() {
    // Annuity-due: 1000 * ((1.01^60 - 1) / 0.01) * 1.01
    let out = sip::sip(&SipInput {
        monthly_investment: dec!(1000),
        rate: dec!(12),
        months: dec!(60),
        include_schedule: false,
    })
    .unwrap();
    assert!((out.future_value - dec!(82486.37)).abs() <= dec!(1));
    assert_eq!(out.invested_amount, dec!(60000));
}

#[test]
fn test_sip_zero_rate() {
    let out = sip::sip(&SipInput {
        monthly_investment: dec!(1234.56),
        rate: dec!(0),
        months: dec!(10),
        include_schedule: false,
    })
    .unwrap();
    assert_eq!(out.future_value, dec!(12345.60));
    assert_eq!(out.estimated_returns, Decimal::ZERO);
}

// ===========================================================================
// Budget builder
// ===========================================================================

#[test]
fn test_budget_savings_identity() {
    let cases = [
        (dec!(60000), dec!(20000), dec!(9000), dec!(4000), dec!(6000)),
        (dec!(1000), dec!(800), dec!(300), dec!(100), dec!(0)),
        (dec!(0), dec!(0), dec!(0), dec!(0), dec!(0)),
    ];
    for (income, rent, food, transport, other) in cases {
        let out = budget::build_budget(&BudgetInput {
            income,
            expenses: [
                ("rent".to_string(), rent),
                ("food".to_string(), food),
                ("transport".to_string(), transport),
                ("other".to_string(), other),
            ]
            .into_iter()
            .collect(),
        })
        .unwrap();
        assert_eq!(out.savings, income - (rent + food + transport + other));
        assert_eq!(out.total_expenses, rent + food + transport + other);
        if income.is_zero() {
            assert_eq!(out.savings_rate, Decimal::ZERO);
        }
    }
}

#[test]
fn test_budget_percent_of_income_breakdown() {
    let out = budget::build_budget(&BudgetInput {
        income: dec!(3000),
        expenses: [
            ("Rent".to_string(), dec!(1000)),
            ("transport".to_string(), dec!(150)),
        ]
        .into_iter()
        .collect(),
    })
    .unwrap();
    assert_eq!(out.breakdown[&ExpenseCategory::Rent].percent_of_income, dec!(33.33));
    assert_eq!(out.breakdown[&ExpenseCategory::Transport].percent_of_income, dec!(5));
    assert_eq!(out.savings_rate, dec!(61.67));
}
