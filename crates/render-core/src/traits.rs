use crate::error::RenderError;
use quotedoc_types::ComputedQuote;

/// Turns a computed quote into the bytes of one output document.
///
/// Implementations only read the quote. Amounts are taken from the quote as computed
/// and passed through the number formatter; they are never recomputed.
pub trait QuoteRenderer: Send + Sync {
    /// Short backend name used in logs.
    fn name(&self) -> &'static str;

    fn render(&self, quote: &ComputedQuote) -> Result<Vec<u8>, RenderError>;
}
