//! The quote request as received, and the computed quote both renderers read.

use crate::issuer::IssuerProfile;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A numeric field that may arrive as a JSON number or as a numeric-looking string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumericInput {
    Number(f64),
    Text(String),
}

impl NumericInput {
    /// The finite value this input denotes, if any.
    ///
    /// Strings are trimmed first; empty strings, `NaN` and infinities yield `None`.
    pub fn as_f64(&self) -> Option<f64> {
        let value = match self {
            NumericInput::Number(n) => *n,
            NumericInput::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return None;
                }
                trimmed.parse::<f64>().ok()?
            }
        };
        value.is_finite().then_some(value)
    }
}

impl fmt::Display for NumericInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericInput::Number(n) => write!(f, "{}", n),
            NumericInput::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for NumericInput {
    fn from(value: f64) -> Self {
        NumericInput::Number(value)
    }
}

impl From<i64> for NumericInput {
    fn from(value: i64) -> Self {
        NumericInput::Number(value as f64)
    }
}

impl From<i32> for NumericInput {
    fn from(value: i32) -> Self {
        NumericInput::Number(f64::from(value))
    }
}

impl From<&str> for NumericInput {
    fn from(value: &str) -> Self {
        NumericInput::Text(value.to_string())
    }
}

impl From<String> for NumericInput {
    fn from(value: String) -> Self {
        NumericInput::Text(value)
    }
}

/// One requested line, exactly as the caller sent it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemInput {
    #[serde(alias = "cantidad")]
    pub quantity: NumericInput,
    #[serde(alias = "descripcion")]
    pub description: String,
    #[serde(alias = "precio")]
    pub unit_price: NumericInput,
}

impl LineItemInput {
    pub fn new(
        quantity: impl Into<NumericInput>,
        description: impl Into<String>,
        unit_price: impl Into<NumericInput>,
    ) -> Self {
        Self {
            quantity: quantity.into(),
            description: description.into(),
            unit_price: unit_price.into(),
        }
    }
}

/// A validated quote request. Dates and tax ids are display strings and are never parsed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    #[serde(alias = "cliente")]
    pub client_name: String,
    #[serde(alias = "cuitCliente")]
    pub client_tax_id: String,
    #[serde(alias = "fecha")]
    pub issue_date: String,
    #[serde(alias = "condiciones")]
    pub payment_terms: String,
    pub items: Vec<LineItemInput>,
}

/// A line item with its parsed values and extended total.
///
/// The extended total is computed once, here, and every consumer reads this value.
#[derive(Debug, Clone, PartialEq)]
pub struct LineItemComputed {
    position: usize,
    description: String,
    quantity: i64,
    unit_price: f64,
    extended_total: f64,
}

impl LineItemComputed {
    pub fn new(
        position: usize,
        description: impl Into<String>,
        quantity: i64,
        unit_price: f64,
    ) -> Self {
        Self {
            position,
            description: description.into(),
            quantity,
            unit_price,
            extended_total: unit_price * quantity as f64,
        }
    }

    /// Zero-based position in the request.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    pub fn unit_price(&self) -> f64 {
        self.unit_price
    }

    pub fn extended_total(&self) -> f64 {
        self.extended_total
    }
}

/// Everything a renderer needs: issuer, the request as received, computed items and the total.
#[derive(Debug, Clone, PartialEq)]
pub struct ComputedQuote {
    issuer: IssuerProfile,
    request: QuoteRequest,
    items: Vec<LineItemComputed>,
    grand_total: f64,
}

impl ComputedQuote {
    /// Builds the quote, summing the already-computed extended totals in item order.
    pub fn new(issuer: IssuerProfile, request: QuoteRequest, items: Vec<LineItemComputed>) -> Self {
        let grand_total = items
            .iter()
            .fold(0.0, |total, item| total + item.extended_total());
        Self {
            issuer,
            request,
            items,
            grand_total,
        }
    }

    pub fn issuer(&self) -> &IssuerProfile {
        &self.issuer
    }

    pub fn request(&self) -> &QuoteRequest {
        &self.request
    }

    pub fn items(&self) -> &[LineItemComputed] {
        &self.items
    }

    pub fn grand_total(&self) -> f64 {
        self.grand_total
    }
}
