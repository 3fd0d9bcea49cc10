use std::fmt;
use std::str::FromStr;

use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::CalcError;
use crate::types::{round_money, Money};
use crate::validation;
use crate::FinlitResult;

/// Share of income a first salary should set aside.
const FIRST_JOB_SAVINGS_SHARE: Money = dec!(0.2);

/// Income assumed when the caller does not supply one.
pub const DEFAULT_INCOME: Money = dec!(50000);

/// Life stages with canned guidance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioKind {
    #[default]
    Student,
    FirstJob,
    TaxPlanning,
}

impl ScenarioKind {
    /// Lenient lookup for path-style names: unknown names fall back to
    /// `Student`.
    pub fn parse_or_default(name: &str) -> Self {
        name.parse().unwrap_or_default()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ScenarioKind::Student => "student",
            ScenarioKind::FirstJob => "first_job",
            ScenarioKind::TaxPlanning => "tax_planning",
        }
    }
}

impl FromStr for ScenarioKind {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "student" => Ok(ScenarioKind::Student),
            "first_job" => Ok(ScenarioKind::FirstJob),
            "tax_planning" => Ok(ScenarioKind::TaxPlanning),
            other => Err(CalcError::validation(
                "scenario",
                format!("unknown scenario '{other}'"),
            )),
        }
    }
}

impl fmt::Display for ScenarioKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn default_income() -> Money {
    DEFAULT_INCOME
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioInput {
    #[serde(default)]
    pub scenario: ScenarioKind,
    #[serde(default = "default_income")]
    pub income: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioAdvice {
    pub scenario: ScenarioKind,
    pub title: String,
    pub advice: Vec<String>,
    pub suggested_actions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disclaimer: Option<String>,
}

fn lines(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Guidance for a life stage. Only the first-job savings target depends on
/// income.
pub fn scenario_advice(input: &ScenarioInput) -> FinlitResult<ScenarioAdvice> {
    validation::non_negative("income", input.income)?;

    let advice = match input.scenario {
        ScenarioKind::Student => ScenarioAdvice {
            scenario: input.scenario,
            title: "Student Financial Scenario".into(),
            advice: lines(&[
                "Focus on building emergency fund (3 months expenses)",
                "Start with small savings habit (10-20% of any income)",
                "Avoid unnecessary debt, especially consumer loans",
                "Learn about compound interest early",
            ]),
            suggested_actions: lines(&[
                "Open a basic savings account",
                "Track all expenses for one month",
                "Set up automatic savings transfer",
            ]),
            disclaimer: None,
        },
        ScenarioKind::FirstJob => {
            let target = round_money(input.income * FIRST_JOB_SAVINGS_SHARE);
            let mut advice = lines(&[
                "Build 6-month emergency fund",
                "Start retirement savings immediately (even small amounts)",
                "Avoid lifestyle inflation",
            ]);
            advice.push(format!("Save at least 20% of income: ₹{target:.2}"));
            ScenarioAdvice {
                scenario: input.scenario,
                title: "First Job Financial Scenario".into(),
                advice,
                suggested_actions: lines(&[
                    "Set up automatic investment (SIP) of ₹500-1000/month",
                    "Get health insurance",
                    "Create and follow a budget",
                ]),
                disclaimer: None,
            }
        }
        ScenarioKind::TaxPlanning => ScenarioAdvice {
            scenario: input.scenario,
            title: "Legal Tax Planning".into(),
            advice: lines(&[
                "Utilize Section 80C deductions (up to ₹1.5 lakh)",
                "Consider PPF, ELSS, or EPF contributions",
                "Keep records of all tax-saving investments",
                "File returns on time to avoid penalties",
            ]),
            suggested_actions: Vec::new(),
            disclaimer: Some(
                "This is educational information only. Consult a tax professional for \
                 personalized advice. Never engage in tax evasion - it is illegal."
                    .into(),
            ),
        },
    };

    Ok(advice)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_job_target_uses_income() {
        let out = scenario_advice(&ScenarioInput {
            scenario: ScenarioKind::FirstJob,
            income: dec!(60000),
        })
        .unwrap();
        assert!(out
            .advice
            .iter()
            .any(|line| line.ends_with("₹12000.00")));
    }

    #[test]
    fn test_unknown_scenario_falls_back_to_student() {
        assert_eq!(ScenarioKind::parse_or_default("retiree"), ScenarioKind::Student);
        assert_eq!(ScenarioKind::parse_or_default("first-job"), ScenarioKind::FirstJob);
        assert!("retiree".parse::<ScenarioKind>().is_err());
    }

    #[test]
    fn test_tax_planning_carries_disclaimer() {
        let out = scenario_advice(&ScenarioInput {
            scenario: ScenarioKind::TaxPlanning,
            income: DEFAULT_INCOME,
        })
        .unwrap();
        assert!(out.disclaimer.is_some());
        assert!(out.suggested_actions.is_empty());
    }

    #[test]
    fn test_defaults_from_empty_json() {
        let input: ScenarioInput = serde_json::from_str("{}").unwrap();
        assert_eq!(input.scenario, ScenarioKind::Student);
        assert_eq!(input.income, DEFAULT_INCOME);
    }
}
