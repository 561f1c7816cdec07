//! Localized two-decimal number formatting.
//!
//! Values are rounded half away from zero on their shortest decimal representation,
//! so `10.005` becomes `10,01` rather than following the binary value `10.00499…`.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Below this magnitude every value rounds to zero at two decimals.
const ZERO_THRESHOLD: f64 = 1e-6;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormatError {
    #[error("cannot format non-finite value {0}")]
    NonFinite(f64),
    #[error("'{0}' is not a number")]
    NotNumeric(String),
}

/// Separators used when rendering amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NumberFormat {
    pub decimal_separator: char,
    pub group_separator: char,
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self::es_ar()
    }
}

impl NumberFormat {
    /// Argentine Spanish: `1.234,56`.
    pub const fn es_ar() -> Self {
        Self {
            decimal_separator: ',',
            group_separator: '.',
        }
    }

    /// Formats `value` with exactly two decimals and grouped thousands.
    ///
    /// Every finite value formats; only NaN and infinities are rejected.
    pub fn format(&self, value: f64) -> Result<String, FormatError> {
        if !value.is_finite() {
            return Err(FormatError::NonFinite(value));
        }

        let (negative, plain) = if value.abs() < ZERO_THRESHOLD {
            (false, "0.00".to_string())
        } else {
            match Decimal::from_str(&value.to_string()) {
                Ok(decimal) => {
                    let mut rounded =
                        decimal.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
                    rounded.rescale(2);
                    (rounded.is_sign_negative() && !rounded.is_zero(), rounded.abs().to_string())
                }
                // Beyond Decimal's range (about 7.9e28) an f64 has no fractional digits left.
                Err(_) => (value < 0.0, value.abs().to_string()),
            }
        };

        let (int_part, frac_part) = plain.split_once('.').unwrap_or((plain.as_str(), "00"));
        let mut out = String::with_capacity(plain.len() + int_part.len() / 3 + 1);
        if negative {
            out.push('-');
        }
        let digits = int_part.len();
        for (i, ch) in int_part.chars().enumerate() {
            if i > 0 && (digits - i) % 3 == 0 {
                out.push(self.group_separator);
            }
            out.push(ch);
        }
        out.push(self.decimal_separator);
        out.push_str(frac_part);
        Ok(out)
    }

    /// Reads a string produced by [`NumberFormat::format`] back into a number.
    pub fn parse(&self, text: &str) -> Result<f64, FormatError> {
        let normalized: String = text
            .trim()
            .chars()
            .filter(|c| *c != self.group_separator)
            .map(|c| if c == self.decimal_separator { '.' } else { c })
            .collect();
        normalized
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| FormatError::NotNumeric(text.to_string()))
    }
}
