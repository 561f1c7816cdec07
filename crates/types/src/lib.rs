//! Foundation types shared by every quotedoc crate.
//!
//! - [`quote`]: the request model and the computed, read-only quote both renderers consume
//! - [`issuer`]: the issuing business profile (injected configuration)
//! - [`number`]: locale-aware two-decimal number formatting
//! - [`color`] and [`geometry`]: small drawing primitives

pub mod color;
pub mod geometry;
pub mod issuer;
pub mod number;
pub mod quote;

pub use color::Color;
pub use geometry::{PageSize, Rect};
pub use issuer::IssuerProfile;
pub use number::{FormatError, NumberFormat};
pub use quote::{ComputedQuote, LineItemComputed, LineItemInput, NumericInput, QuoteRequest};
