//! Amount normalization.
//!
//! Stored amounts show up in three shapes: decimal text (`"19.99"`), a plain
//! JSON number, or an arbitrary-precision `Decimal` coming straight from the
//! database layer. Everything downstream works on `f64`.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::error::{Result, StatsError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawAmount {
    Number(f64),
    Text(String),
    /// Only produced in-process; serialized exports carry text or numbers.
    #[serde(skip_deserializing)]
    Decimal(Decimal),
}

impl RawAmount {
    /// Convert to a finite `f64`. `id` is the owning transaction, for errors.
    pub fn to_f64(&self, id: &str) -> Result<f64> {
        let value = match self {
            RawAmount::Number(n) => *n,
            RawAmount::Text(s) => {
                s.trim()
                    .parse::<f64>()
                    .map_err(|_| StatsError::MalformedAmount {
                        id: id.to_string(),
                        value: s.clone(),
                    })?
            }
            RawAmount::Decimal(d) => d.to_f64().ok_or_else(|| StatsError::MalformedAmount {
                id: id.to_string(),
                value: d.to_string(),
            })?,
        };

        if !value.is_finite() {
            return Err(StatsError::NonFiniteAmount { id: id.to_string() });
        }
        Ok(value)
    }
}

impl From<f64> for RawAmount {
    fn from(n: f64) -> Self {
        RawAmount::Number(n)
    }
}

impl From<&str> for RawAmount {
    fn from(s: &str) -> Self {
        RawAmount::Text(s.to_string())
    }
}

impl From<String> for RawAmount {
    fn from(s: String) -> Self {
        RawAmount::Text(s)
    }
}

impl From<Decimal> for RawAmount {
    fn from(d: Decimal) -> Self {
        RawAmount::Decimal(d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_text_amount() {
        assert_eq!(RawAmount::from("19.99").to_f64("t1").unwrap(), 19.99);
        assert_eq!(RawAmount::from(" 250 ").to_f64("t1").unwrap(), 250.0);
    }

    #[test]
    fn test_decimal_amount() {
        let d = Decimal::from_str("1234.5678").unwrap();
        assert_eq!(RawAmount::from(d).to_f64("t1").unwrap(), 1234.5678);
    }

    #[test]
    fn test_malformed_text_is_an_error() {
        let err = RawAmount::from("12,50 EUR").to_f64("t9").unwrap_err();
        assert_eq!(
            err,
            StatsError::MalformedAmount {
                id: "t9".to_string(),
                value: "12,50 EUR".to_string()
            }
        );
    }

    #[test]
    fn test_non_finite_rejected() {
        assert!(matches!(
            RawAmount::from("NaN").to_f64("t1"),
            Err(StatsError::NonFiniteAmount { .. })
        ));
        assert!(matches!(
            RawAmount::Number(f64::INFINITY).to_f64("t1"),
            Err(StatsError::NonFiniteAmount { .. })
        ));
    }

    #[test]
    fn test_deserialize_number_or_text() {
        let n: RawAmount = serde_json::from_str("42.5").unwrap();
        assert_eq!(n, RawAmount::Number(42.5));
        let s: RawAmount = serde_json::from_str("\"42.50\"").unwrap();
        assert_eq!(s, RawAmount::Text("42.50".to_string()));
    }
}
