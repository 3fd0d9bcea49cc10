use std::collections::BTreeMap;
use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::{Map, Value};

use crate::error::CalcError;
use crate::types::{Money, Months, Percent, Years};
use crate::FinlitResult;

/// Highest annual rate accepted, in percent.
pub const MAX_RATE_PERCENT: Percent = dec!(1000);

/// Longest horizon accepted for year-based calculators.
pub const MAX_YEARS: Years = dec!(1000);

/// Longest tenure accepted for month-based calculators.
pub const MAX_MONTHS: Months = dec!(12000);

pub(crate) fn non_negative(field: &str, value: Decimal) -> FinlitResult<()> {
    if value < Decimal::ZERO {
        return Err(CalcError::validation(field, "must be >= 0"));
    }
    Ok(())
}

pub(crate) fn rate(field: &str, value: Percent) -> FinlitResult<()> {
    non_negative(field, value)?;
    if value > MAX_RATE_PERCENT {
        return Err(CalcError::validation(
            field,
            format!("annual rate must be <= {MAX_RATE_PERCENT}%"),
        ));
    }
    Ok(())
}

pub(crate) fn years(field: &str, value: Years) -> FinlitResult<()> {
    non_negative(field, value)?;
    if value > MAX_YEARS {
        return Err(CalcError::validation(
            field,
            format!("must be <= {MAX_YEARS} years"),
        ));
    }
    Ok(())
}

/// Tenures that act as divisors or period counts must cover at least one month.
pub(crate) fn tenure_months(field: &str, value: Months) -> FinlitResult<()> {
    if value < Decimal::ONE {
        return Err(CalcError::validation(field, "must be at least 1 month"));
    }
    if value > MAX_MONTHS {
        return Err(CalcError::validation(
            field,
            format!("must be <= {MAX_MONTHS} months"),
        ));
    }
    Ok(())
}

/// Unwrap a checked decimal operation, blaming `field` on overflow.
pub(crate) fn checked(value: Option<Decimal>, field: &str) -> FinlitResult<Decimal> {
    value.ok_or_else(|| {
        CalcError::validation(field, "result exceeds the representable decimal range")
    })
}

// ---------------------------------------------------------------------------
// Loose key/value inputs
// ---------------------------------------------------------------------------

/// Typed accessors over the untyped `inputs` object sent by form-based clients.
///
/// Every accessor is strict: a missing key, `null`, a boolean, or text that is
/// not a number is a validation error, never a silent zero.
pub struct LooseInputs<'a> {
    fields: &'a Map<String, Value>,
}

impl<'a> LooseInputs<'a> {
    pub fn new(fields: &'a Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Required numeric field.
    pub fn number(&self, key: &str) -> FinlitResult<Decimal> {
        match self.fields.get(key) {
            None | Some(Value::Null) => Err(CalcError::validation(key, "is required")),
            Some(value) => to_decimal(key, value),
        }
    }

    /// Optional boolean switch, false when absent.
    pub fn flag(&self, key: &str) -> FinlitResult<bool> {
        match self.fields.get(key) {
            None | Some(Value::Null) => Ok(false),
            Some(Value::Bool(b)) => Ok(*b),
            Some(_) => Err(CalcError::validation(key, "must be true or false")),
        }
    }

    /// Required mapping of name to amount, e.g. expense categories.
    pub fn amounts(&self, key: &str) -> FinlitResult<BTreeMap<String, Money>> {
        let map = match self.fields.get(key) {
            None | Some(Value::Null) => return Err(CalcError::validation(key, "is required")),
            Some(Value::Object(map)) => map,
            Some(_) => {
                return Err(CalcError::validation(
                    key,
                    "must be an object of name -> amount",
                ))
            }
        };

        let mut out = BTreeMap::new();
        for (name, value) in map {
            let field = format!("{key}.{name}");
            out.insert(name.clone(), to_decimal(&field, value)?);
        }
        Ok(out)
    }
}

/// Convert a JSON scalar into a Decimal. Numeric strings are parsed; empty
/// strings and anything else non-numeric are rejected.
pub(crate) fn to_decimal(field: &str, value: &Value) -> FinlitResult<Decimal> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return Ok(Decimal::from(i));
            }
            if let Some(u) = n.as_u64() {
                return Ok(Decimal::from(u));
            }
            parse_decimal(field, &n.to_string())
        }
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return Err(CalcError::validation(field, "is required"));
            }
            parse_decimal(field, trimmed)
        }
        _ => Err(CalcError::validation(field, "must be a number")),
    }
}

fn parse_decimal(field: &str, text: &str) -> FinlitResult<Decimal> {
    let lowered = text.to_ascii_lowercase();
    if matches!(
        lowered.trim_start_matches(['+', '-']),
        "nan" | "inf" | "infinity"
    ) {
        return Err(CalcError::validation(field, "must be a finite number"));
    }

    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(&lowered))
        .map_err(|_| CalcError::validation(field, "must be a number within the decimal range"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn obj(v: Value) -> Map<String, Value> {
        match v {
            Value::Object(m) => m,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_number_accepts_integers_floats_and_numeric_text() {
        let m = obj(json!({"a": 12, "b": 8.5, "c": " 42.25 ", "d": 1.5e3}));
        let inputs = LooseInputs::new(&m);
        assert_eq!(inputs.number("a").unwrap(), dec!(12));
        assert_eq!(inputs.number("b").unwrap(), dec!(8.5));
        assert_eq!(inputs.number("c").unwrap(), dec!(42.25));
        assert_eq!(inputs.number("d").unwrap(), dec!(1500));
    }

    #[test]
    fn test_number_rejects_missing_and_non_numeric() {
        let m = obj(json!({"empty": "", "word": "ten", "flag": true, "nan": "NaN", "none": null}));
        let inputs = LooseInputs::new(&m);
        for key in ["missing", "empty", "word", "flag", "nan", "none"] {
            let err = inputs.number(key).unwrap_err();
            assert_eq!(err.field(), Some(key));
        }
    }

    #[test]
    fn test_amounts_names_nested_field_on_error() {
        let m = obj(json!({"expenses": {"rent": 100, "food": "lots"}}));
        let err = LooseInputs::new(&m).amounts("expenses").unwrap_err();
        assert_eq!(err.field(), Some("expenses.food"));
    }

    #[test]
    fn test_flag_defaults_to_false() {
        let m = obj(json!({"yes": true}));
        let inputs = LooseInputs::new(&m);
        assert!(inputs.flag("yes").unwrap());
        assert!(!inputs.flag("absent").unwrap());
    }

    #[test]
    fn test_tenure_months_requires_one_full_month() {
        assert!(tenure_months("months", dec!(0)).is_err());
        assert!(tenure_months("months", dec!(0.5)).is_err());
        assert!(tenure_months("months", dec!(1)).is_ok());
        assert!(tenure_months("months", dec!(12001)).is_err());
    }

    #[test]
    fn test_non_negative_allows_zero() {
        assert!(non_negative("x", dec!(0)).is_ok());
        assert!(non_negative("x", dec!(-0.01)).is_err());
    }
}
