//! Raw values
//!
//! Grocery lists and price feeds arrive from loosely typed sources: ids may be
//! numbers or strings, quantities may be typed as text, and prices may be
//! missing entirely. [`Scalar`] accepts any of those shapes so the validation
//! layer can decide what is acceptable instead of the deserializer.

use std::fmt;

use rust_decimal::{
    Decimal,
    prelude::{FromPrimitive, ToPrimitive},
};
use serde::{Deserialize, Serialize};

/// A loosely typed scalar value from an input record.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Scalar {
    /// Whole number
    Integer(i64),

    /// Floating point number (may be non-finite when built in code)
    Float(f64),

    /// Free text
    Text(String),
}

impl Scalar {
    /// Renders the value as a trimmed identifier string.
    pub fn to_ident(&self) -> String {
        match self {
            Scalar::Integer(value) => value.to_string(),
            Scalar::Float(value) => value.to_string(),
            Scalar::Text(value) => value.trim().to_string(),
        }
    }

    /// Interprets the value as a whole number.
    ///
    /// Floats are only accepted when they have no fractional part.
    pub fn to_integer(&self) -> Option<i64> {
        match self {
            Scalar::Integer(value) => Some(*value),
            Scalar::Float(value) => Decimal::from_f64(*value)
                .filter(|value| value.fract().is_zero())
                .and_then(|value| value.to_i64()),
            Scalar::Text(value) => value.trim().parse::<i64>().ok(),
        }
    }

    /// Interprets the value as an exact decimal.
    ///
    /// Returns `None` for non-finite floats and unparsable text.
    pub fn to_decimal(&self) -> Option<Decimal> {
        match self {
            Scalar::Integer(value) => Some(Decimal::from(*value)),
            Scalar::Float(value) if value.is_finite() => Decimal::from_f64(*value),
            Scalar::Float(_) => None,
            Scalar::Text(value) => value.trim().parse::<Decimal>().ok(),
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Integer(value) => write!(f, "{value}"),
            Scalar::Float(value) => write!(f, "{value}"),
            Scalar::Text(value) => write!(f, "{value:?}"),
        }
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::Integer(value)
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Scalar::Float(value)
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::Text(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_ident_trims_text_and_formats_numbers() {
        assert_eq!(Scalar::from(" milk ").to_ident(), "milk");
        assert_eq!(Scalar::from(7_i64).to_ident(), "7");
    }

    #[test]
    fn to_integer_accepts_whole_floats_and_numeric_text() {
        assert_eq!(Scalar::from(2.0_f64).to_integer(), Some(2));
        assert_eq!(Scalar::from("3").to_integer(), Some(3));
        assert_eq!(Scalar::from(2.5_f64).to_integer(), None);
        assert_eq!(Scalar::from("two").to_integer(), None);
    }

    #[test]
    fn to_decimal_rejects_non_finite_values() {
        assert_eq!(Scalar::from(f64::NAN).to_decimal(), None);
        assert_eq!(Scalar::from(f64::INFINITY).to_decimal(), None);
        assert_eq!(Scalar::from("1.25").to_decimal(), Some(Decimal::new(125, 2)));
    }

    #[test]
    fn deserializes_numbers_and_strings() -> Result<(), serde_json::Error> {
        let values: Vec<Scalar> = serde_json::from_str(r#"[1, 1.5, "x"]"#)?;

        assert_eq!(
            values,
            vec![Scalar::Integer(1), Scalar::Float(1.5), Scalar::from("x")]
        );

        Ok(())
    }
}
