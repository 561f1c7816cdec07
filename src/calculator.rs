//! Turns a raw request into a [`ComputedQuote`].
//!
//! This is the only place where request numbers are parsed. Everything downstream
//! reads the parsed values and the totals computed here.

use crate::error::{InvalidItemError, ItemField};
use quotedoc_types::{ComputedQuote, IssuerProfile, LineItemComputed, NumericInput, QuoteRequest};

/// Parses every item and computes extended totals and the grand total, in input order.
///
/// Fails on the first item whose quantity or unit price cannot be parsed.
pub fn compute(issuer: &IssuerProfile, request: &QuoteRequest) -> Result<ComputedQuote, InvalidItemError> {
    let items = request
        .items
        .iter()
        .enumerate()
        .map(|(position, item)| {
            let quantity = parse_quantity(&item.quantity).ok_or_else(|| InvalidItemError {
                position,
                field: ItemField::Quantity,
                value: item.quantity.to_string(),
            })?;
            let unit_price = item.unit_price.as_f64().ok_or_else(|| InvalidItemError {
                position,
                field: ItemField::UnitPrice,
                value: item.unit_price.to_string(),
            })?;
            Ok(LineItemComputed::new(position, item.description.as_str(), quantity, unit_price))
        })
        .collect::<Result<Vec<_>, InvalidItemError>>()?;

    Ok(ComputedQuote::new(issuer.clone(), request.clone(), items))
}

/// Integer quantity; finite fractional values are truncated toward zero.
fn parse_quantity(input: &NumericInput) -> Option<i64> {
    if let NumericInput::Text(s) = input
        && let Ok(n) = s.trim().parse::<i64>()
    {
        return Some(n);
    }
    let truncated = input.as_f64()?.trunc();
    // i64::MAX is not representable; its f64 neighbour is 2^63.
    if truncated >= i64::MIN as f64 && truncated < i64::MAX as f64 {
        Some(truncated as i64)
    } else {
        None
    }
}
