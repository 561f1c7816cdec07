use crate::grid::build_sheet;
use crate::package::write_workbook;
use quotedoc_render_core::{QuoteRenderer, RenderError};
use quotedoc_types::{ComputedQuote, NumberFormat};

/// Name of the only sheet in every quote workbook.
pub const DEFAULT_SHEET_NAME: &str = "Presupuesto";

/// Renders a [`ComputedQuote`] as a single-sheet XLSX workbook.
#[derive(Debug, Clone)]
pub struct XlsxQuoteRenderer {
    number_format: NumberFormat,
    sheet_name: String,
}

impl Default for XlsxQuoteRenderer {
    fn default() -> Self {
        Self {
            number_format: NumberFormat::default(),
            sheet_name: DEFAULT_SHEET_NAME.to_string(),
        }
    }
}

impl XlsxQuoteRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_number_format(mut self, number_format: NumberFormat) -> Self {
        self.number_format = number_format;
        self
    }

    pub fn sheet_name(&self) -> &str {
        &self.sheet_name
    }
}

impl QuoteRenderer for XlsxQuoteRenderer {
    fn name(&self) -> &'static str {
        "xlsx"
    }

    fn render(&self, quote: &ComputedQuote) -> Result<Vec<u8>, RenderError> {
        let grid = build_sheet(quote, &self.number_format)?;
        write_workbook(&grid, &self.sheet_name)
    }
}
