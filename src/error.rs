use quotedoc_render_core::RenderError;
use std::fmt;
use thiserror::Error;

/// Which value of a line item failed to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemField {
    Quantity,
    UnitPrice,
}

impl fmt::Display for ItemField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemField::Quantity => f.write_str("quantity"),
            ItemField::UnitPrice => f.write_str("unit price"),
        }
    }
}

/// A line item whose quantity or unit price is not a usable number.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("item {position}: invalid {field} '{value}'")]
pub struct InvalidItemError {
    /// Zero-based position of the item in the request.
    pub position: usize,
    pub field: ItemField,
    /// The offending input as received.
    pub value: String,
}

/// A comprehensive error type for quote assembly.
#[derive(Error, Debug)]
pub enum QuoteError {
    #[error("Invalid line item: {0}")]
    InvalidItem(#[from] InvalidItemError),

    #[error("Rendering failed: {0}")]
    Render(#[from] RenderError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}
