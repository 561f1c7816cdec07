pub mod fixtures;
pub mod pdf_assertions;
pub mod xlsx_assertions;

use lopdf::Document as LopdfDocument;
use quotedoc::{QuoteAssembler, QuoteError, QuoteRequest};
use quotedoc_traits::InMemoryResourceProvider;
use std::sync::Arc;
use xlsx_assertions::GeneratedSheet;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// Wrapper around a generated PDF with helper methods
pub struct GeneratedPdf {
    pub bytes: Vec<u8>,
    pub doc: LopdfDocument,
}

impl GeneratedPdf {
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, Box<dyn std::error::Error>> {
        let doc = LopdfDocument::load_mem(&bytes)?;
        Ok(Self { bytes, doc })
    }

    pub fn page_count(&self) -> usize {
        self.doc.get_pages().len()
    }

    /// Save PDF to a file for manual debugging
    #[allow(dead_code)]
    pub fn save_for_debug(&self, name: &str) -> std::io::Result<()> {
        std::fs::write(format!("test_output_{}.pdf", name), &self.bytes)
    }
}

/// Both documents of one quote, parsed back for inspection.
pub struct GeneratedQuote {
    pub pdf: GeneratedPdf,
    pub sheet: GeneratedSheet,
}

/// Assembles `request` with the given in-memory assets (default config otherwise).
pub fn generate_with_assets(
    request: &QuoteRequest,
    assets: InMemoryResourceProvider,
) -> Result<GeneratedQuote, Box<dyn std::error::Error>> {
    let assembler = QuoteAssembler::builder()
        .with_resources(Arc::new(assets))
        .build()?;
    let artifacts = assembler.assemble(request)?;
    Ok(GeneratedQuote {
        pdf: GeneratedPdf::from_bytes(artifacts.document)?,
        sheet: GeneratedSheet::from_bytes(&artifacts.sheet)?,
    })
}

/// Assembles `request` with no logo or watermark available.
pub fn generate(request: &QuoteRequest) -> Result<GeneratedQuote, Box<dyn std::error::Error>> {
    generate_with_assets(request, InMemoryResourceProvider::new())
}

/// Runs only the validation and rendering, keeping the typed error.
pub fn try_assemble(request: &QuoteRequest) -> Result<(), QuoteError> {
    QuoteAssembler::builder().build()?.assemble(request).map(|_| ())
}
