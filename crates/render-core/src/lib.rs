//! Core rendering abstractions for quote documents.
//!
//! This crate provides the pieces every output backend shares:
//! - `QuoteRenderer`, the capability both the PDF and the spreadsheet backends implement
//! - `RenderError`, the error type for rendering operations
//! - Small utilities for font naming and coordinate conversion

mod error;
mod traits;
pub mod utils;

pub use error::RenderError;
pub use traits::QuoteRenderer;
pub use utils::FontWeight;
