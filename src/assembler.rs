use crate::artifacts::QuoteArtifacts;
use crate::calculator;
use crate::config::AssemblerConfig;
use crate::error::QuoteError;
use quotedoc_render_core::{QuoteRenderer, RenderError};
use quotedoc_render_lopdf::LopdfQuoteRenderer;
use quotedoc_render_xlsx::XlsxQuoteRenderer;
use quotedoc_resource::FilesystemResourceProvider;
use quotedoc_traits::{InMemoryResourceProvider, ResourceProvider};
use quotedoc_types::{ComputedQuote, IssuerProfile, QuoteRequest};
use std::path::Path;
use std::sync::Arc;

/// Computes a quote once and renders it into both output documents.
pub struct QuoteAssembler {
    issuer: IssuerProfile,
    sheet_renderer: Box<dyn QuoteRenderer>,
    document_renderer: Box<dyn QuoteRenderer>,
}

impl QuoteAssembler {
    pub fn builder() -> QuoteAssemblerBuilder {
        QuoteAssemblerBuilder::default()
    }

    pub fn issuer(&self) -> &IssuerProfile {
        &self.issuer
    }

    /// Validates the request and produces the spreadsheet and the PDF.
    ///
    /// An invalid item fails the whole assembly before anything is rendered.
    pub fn assemble(&self, request: &QuoteRequest) -> Result<QuoteArtifacts, QuoteError> {
        let quote = calculator::compute(&self.issuer, request)?;
        let artifacts = self.render(&quote)?;
        log::info!(
            "assembled quote for '{}': {} item(s), xlsx {} bytes, pdf {} bytes",
            request.client_name,
            quote.items().len(),
            artifacts.sheet.len(),
            artifacts.document.len()
        );
        Ok(artifacts)
    }

    /// Renders an already computed quote with both renderers.
    pub fn render(&self, quote: &ComputedQuote) -> Result<QuoteArtifacts, QuoteError> {
        let (sheet, document) = self.render_both(quote);
        Ok(QuoteArtifacts {
            sheet: sheet?,
            document: document?,
        })
    }

    #[cfg(feature = "parallel")]
    fn render_both(
        &self,
        quote: &ComputedQuote,
    ) -> (Result<Vec<u8>, RenderError>, Result<Vec<u8>, RenderError>) {
        rayon::join(
            || self.sheet_renderer.render(quote),
            || self.document_renderer.render(quote),
        )
    }

    #[cfg(not(feature = "parallel"))]
    fn render_both(
        &self,
        quote: &ComputedQuote,
    ) -> (Result<Vec<u8>, RenderError>, Result<Vec<u8>, RenderError>) {
        (
            self.sheet_renderer.render(quote),
            self.document_renderer.render(quote),
        )
    }
}

/// A builder for creating a [`QuoteAssembler`].
#[derive(Default)]
pub struct QuoteAssemblerBuilder {
    config: AssemblerConfig,
    resources: Option<Arc<dyn ResourceProvider>>,
    sheet_renderer: Option<Box<dyn QuoteRenderer>>,
    document_renderer: Option<Box<dyn QuoteRenderer>>,
}

impl QuoteAssemblerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(mut self, config: AssemblerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_issuer(mut self, issuer: IssuerProfile) -> Self {
        self.config.issuer = issuer;
        self
    }

    /// Where the logo and watermark images are looked up.
    pub fn with_resources(mut self, resources: Arc<dyn ResourceProvider>) -> Self {
        self.resources = Some(resources);
        self
    }

    /// Shorthand for a [`FilesystemResourceProvider`] rooted at `dir`.
    pub fn with_assets_dir<P: AsRef<Path>>(self, dir: P) -> Self {
        self.with_resources(Arc::new(FilesystemResourceProvider::new(dir)))
    }

    /// Replaces the XLSX renderer.
    pub fn with_sheet_renderer(mut self, renderer: Box<dyn QuoteRenderer>) -> Self {
        self.sheet_renderer = Some(renderer);
        self
    }

    /// Replaces the PDF renderer.
    pub fn with_document_renderer(mut self, renderer: Box<dyn QuoteRenderer>) -> Self {
        self.document_renderer = Some(renderer);
        self
    }

    pub fn build(self) -> Result<QuoteAssembler, QuoteError> {
        let format = self.config.number_format;
        if format.decimal_separator == format.group_separator {
            return Err(QuoteError::Config(format!(
                "decimal and group separators are both '{}'",
                format.decimal_separator
            )));
        }

        let resources: Arc<dyn ResourceProvider> = match self.resources {
            Some(resources) => resources,
            None => {
                log::debug!("no resource provider configured; logo and watermark are disabled");
                Arc::new(InMemoryResourceProvider::new())
            }
        };

        let sheet_renderer: Box<dyn QuoteRenderer> = match self.sheet_renderer {
            Some(renderer) => renderer,
            None => Box::new(XlsxQuoteRenderer::new().with_number_format(format)),
        };

        let document_renderer: Box<dyn QuoteRenderer> = match self.document_renderer {
            Some(renderer) => renderer,
            None => {
                let mut pdf = LopdfQuoteRenderer::new(resources).with_number_format(format);
                if let Some(logo) = self.config.header_logo {
                    pdf = pdf.with_header_logo(logo);
                }
                if let Some(watermark) = self.config.watermark {
                    pdf = pdf.with_watermark(watermark);
                }
                Box::new(pdf)
            }
        };

        log::debug!(
            "quote assembler ready: sheet via {}, document via {}",
            sheet_renderer.name(),
            document_renderer.name()
        );

        Ok(QuoteAssembler {
            issuer: self.config.issuer,
            sheet_renderer,
            document_renderer,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ItemField;
    use quotedoc_types::{LineItemInput, NumberFormat};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Records how often it runs and echoes the formatted grand total.
    struct EchoRenderer {
        calls: Arc<AtomicUsize>,
    }

    impl QuoteRenderer for EchoRenderer {
        fn name(&self) -> &'static str {
            "echo"
        }

        fn render(&self, quote: &ComputedQuote) -> Result<Vec<u8>, RenderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(NumberFormat::es_ar().format(quote.grand_total())?.into_bytes())
        }
    }

    struct FailingRenderer;

    impl QuoteRenderer for FailingRenderer {
        fn name(&self) -> &'static str {
            "failing"
        }

        fn render(&self, _quote: &ComputedQuote) -> Result<Vec<u8>, RenderError> {
            Err(RenderError::Other("boom".into()))
        }
    }

    fn request(price: &str) -> QuoteRequest {
        QuoteRequest {
            client_name: "ACME SRL".into(),
            client_tax_id: "20-12345678-9".into(),
            issue_date: "18/10/2026".into(),
            payment_terms: "Contado".into(),
            items: vec![
                LineItemInput::new(2, "A", 10.005),
                LineItemInput::new(1, "B", price),
            ],
        }
    }

    fn echo_assembler(calls: &Arc<AtomicUsize>) -> QuoteAssembler {
        QuoteAssembler::builder()
            .with_sheet_renderer(Box::new(EchoRenderer { calls: calls.clone() }))
            .with_document_renderer(Box::new(EchoRenderer { calls: calls.clone() }))
            .build()
            .unwrap()
    }

    #[test]
    fn test_both_renderers_see_the_same_quote() {
        let calls = Arc::new(AtomicUsize::new(0));
        let artifacts = echo_assembler(&calls).assemble(&request("5")).unwrap();
        assert_eq!(artifacts.sheet, b"25,01");
        assert_eq!(artifacts.document, artifacts.sheet);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_invalid_item_renders_nothing() {
        let calls = Arc::new(AtomicUsize::new(0));
        let err = echo_assembler(&calls).assemble(&request("abc")).unwrap_err();
        match err {
            QuoteError::InvalidItem(e) => {
                assert_eq!(e.position, 1);
                assert_eq!(e.field, ItemField::UnitPrice);
            }
            other => panic!("unexpected error: {}", other),
        }
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_render_error_propagates() {
        let assembler = QuoteAssembler::builder()
            .with_document_renderer(Box::new(FailingRenderer))
            .build()
            .unwrap();
        let err = assembler.assemble(&request("5")).unwrap_err();
        assert!(matches!(err, QuoteError::Render(RenderError::Other(_))));
    }

    #[test]
    fn test_clashing_separators_are_rejected() {
        let config = AssemblerConfig {
            number_format: NumberFormat {
                decimal_separator: ',',
                group_separator: ',',
            },
            ..AssemblerConfig::default()
        };
        let result = QuoteAssembler::builder().with_config(config).build();
        assert!(matches!(result, Err(QuoteError::Config(_))));
    }

    #[test]
    fn test_default_renderers_produce_documents() {
        let assembler = QuoteAssembler::builder().build().unwrap();
        let artifacts = assembler.assemble(&request("5")).unwrap();
        assert!(artifacts.document.starts_with(b"%PDF-"));
        assert!(artifacts.sheet.starts_with(b"PK"));
    }

    #[test]
    fn test_with_issuer_overrides_config() {
        let issuer = IssuerProfile {
            name: "Otra S.A".into(),
            ..IssuerProfile::default()
        };
        let assembler = QuoteAssembler::builder()
            .with_issuer(issuer.clone())
            .build()
            .unwrap();
        assert_eq!(assembler.issuer(), &issuer);
    }
}
