use std::collections::BTreeMap;
use std::fmt;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::{round_money, Money};
use crate::validation::{self, checked};
use crate::FinlitResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Expense buckets reported by the budget builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseCategory {
    Rent,
    Food,
    Transport,
    Other,
}

impl ExpenseCategory {
    pub const ALL: [ExpenseCategory; 4] = [
        ExpenseCategory::Rent,
        ExpenseCategory::Food,
        ExpenseCategory::Transport,
        ExpenseCategory::Other,
    ];

    /// Map a free-form category name onto a bucket. Anything unrecognized
    /// lands in `Other`.
    pub fn classify(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "rent" => ExpenseCategory::Rent,
            "food" => ExpenseCategory::Food,
            "transport" => ExpenseCategory::Transport,
            _ => ExpenseCategory::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ExpenseCategory::Rent => "rent",
            ExpenseCategory::Food => "food",
            ExpenseCategory::Transport => "transport",
            ExpenseCategory::Other => "other",
        }
    }
}

impl fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Input parameters for the budget builder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetInput {
    pub income: Money,
    /// Category name -> monthly amount
    pub expenses: BTreeMap<String, Money>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetStatus {
    Surplus,
    Deficit,
}

/// One bucket of the breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryShare {
    pub amount: Money,
    pub percent_of_income: Decimal,
}

/// Output of `build_budget`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetOutput {
    pub income: Money,
    pub total_expenses: Money,
    /// Negative when spending exceeds income.
    pub savings: Money,
    pub savings_rate: Decimal,
    pub status: BudgetStatus,
    pub breakdown: BTreeMap<ExpenseCategory, CategoryShare>,
}

// ---------------------------------------------------------------------------
// Core function
// ---------------------------------------------------------------------------

/// Summarize income against categorized expenses.
pub fn build_budget(input: &BudgetInput) -> FinlitResult<BudgetOutput> {
    validation::non_negative("income", input.income)?;

    let mut buckets: BTreeMap<ExpenseCategory, Money> = ExpenseCategory::ALL
        .iter()
        .map(|c| (*c, Decimal::ZERO))
        .collect();

    for (name, amount) in &input.expenses {
        let field = format!("expenses.{name}");
        validation::non_negative(&field, *amount)?;
        let bucket = buckets
            .entry(ExpenseCategory::classify(name))
            .or_insert(Decimal::ZERO);
        *bucket = checked(bucket.checked_add(*amount), &field)?;
    }

    let mut total_expenses = Decimal::ZERO;
    for amount in buckets.values() {
        total_expenses = checked(total_expenses.checked_add(*amount), "expenses")?;
    }
    let savings = input.income - total_expenses;
    let savings_rate = share_of(savings, input.income)?;

    let breakdown: BTreeMap<ExpenseCategory, CategoryShare> = buckets
        .into_iter()
        .map(|(category, amount)| {
            let share = CategoryShare {
                amount: round_money(amount),
                percent_of_income: round_money(share_of(amount, input.income)?),
            };
            Ok((category, share))
        })
        .collect::<FinlitResult<_>>()?;

    Ok(BudgetOutput {
        income: round_money(input.income),
        total_expenses: round_money(total_expenses),
        savings: round_money(savings),
        savings_rate: round_money(savings_rate),
        status: if savings >= Decimal::ZERO {
            BudgetStatus::Surplus
        } else {
            BudgetStatus::Deficit
        },
        breakdown,
    })
}

/// `part / income * 100`, or zero when there is no income to divide by.
fn share_of(part: Money, income: Money) -> FinlitResult<Decimal> {
    if income > Decimal::ZERO {
        let ratio = checked(part.checked_div(income), "income")?;
        checked(ratio.checked_mul(dec!(100)), "income")
    } else {
        Ok(Decimal::ZERO)
    }
}
