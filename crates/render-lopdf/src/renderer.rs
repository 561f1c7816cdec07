use crate::canvas::{ImageHandle, PdfCanvas};
use crate::layout::*;
use crate::metrics;
use quotedoc_render_core::{FontWeight, QuoteRenderer, RenderError};
use quotedoc_traits::ResourceProvider;
use quotedoc_types::{ComputedQuote, NumberFormat, PageSize, Rect};
use std::sync::Arc;

/// Renders a [`ComputedQuote`] as a fixed-layout US Letter PDF.
///
/// The header logo and the watermark are optional resources looked up by name.
/// When one is missing or cannot be decoded it is left out and the rest of the
/// page is laid out exactly the same.
pub struct LopdfQuoteRenderer {
    resources: Arc<dyn ResourceProvider>,
    header_logo: Option<String>,
    watermark: Option<String>,
    number_format: NumberFormat,
}

impl LopdfQuoteRenderer {
    pub fn new(resources: Arc<dyn ResourceProvider>) -> Self {
        Self {
            resources,
            header_logo: None,
            watermark: None,
            number_format: NumberFormat::default(),
        }
    }

    pub fn with_header_logo(mut self, name: impl Into<String>) -> Self {
        self.header_logo = Some(name.into());
        self
    }

    pub fn with_watermark(mut self, name: impl Into<String>) -> Self {
        self.watermark = Some(name.into());
        self
    }

    pub fn with_number_format(mut self, number_format: NumberFormat) -> Self {
        self.number_format = number_format;
        self
    }

    fn load_image(&self, canvas: &mut PdfCanvas, name: Option<&str>) -> Option<ImageHandle> {
        let name = name?;
        let bytes = self.resources.load_optional(name)?;
        match canvas.register_image(&bytes) {
            Ok(handle) => Some(handle),
            Err(e) => {
                log::warn!("skipping image '{}': {}", name, e);
                None
            }
        }
    }

    fn money(&self, value: f64) -> Result<String, RenderError> {
        Ok(format!("{}{}", CURRENCY_PREFIX, self.number_format.format(value)?))
    }

    fn draw_header(&self, canvas: &mut PdfCanvas, quote: &ComputedQuote) -> Result<(), RenderError> {
        let issuer = quote.issuer();
        canvas.text(ISSUER_X, ISSUER_NAME_Y, &issuer.name, FontWeight::Bold, ISSUER_NAME_SIZE)?;

        let issuer_lines = [
            format!("Cuit: {}", issuer.tax_id),
            issuer.address.clone(),
            issuer.email.clone(),
        ];
        for (line, y) in issuer_lines.iter().zip(ISSUER_LINES_Y) {
            canvas.text(ISSUER_X, y, line, FontWeight::Regular, ISSUER_LINE_SIZE)?;
        }

        let request = quote.request();
        let client_lines = [
            request.client_name.clone(),
            format!("CUIT: {}", request.client_tax_id),
            format!("Fecha de emisión: {}", request.issue_date),
        ];
        for (line, y) in client_lines.iter().zip(CLIENT_LINES_Y) {
            canvas.text(CLIENT_X, y, line, FontWeight::Regular, CLIENT_SIZE)?;
        }

        canvas.text(TITLE_X, TITLE_Y, TITLE, FontWeight::Bold, TITLE_SIZE)
    }

    /// Draws the item table and the total row; returns the y below the total row.
    fn draw_table(&self, canvas: &mut PdfCanvas, quote: &ComputedQuote) -> Result<f32, RenderError> {
        draw_table_header(canvas, TABLE_TOP)?;
        let mut y = TABLE_TOP + ROW_HEIGHT;

        let leading = ROW_SIZE * LINE_SPACING;
        for item in quote.items() {
            let description = description_lines(item.description());
            let extra_lines = description.len().saturating_sub(1) as f32;
            let height = ROW_HEIGHT + extra_lines * leading;
            if let Some(top) = canvas.ensure_space(y, height)? {
                log::debug!("item {} continues on page {}", item.position(), canvas.page_count());
                draw_table_header(canvas, top)?;
                y = top + ROW_HEIGHT;
            }

            let cells = [
                item.quantity().to_string(),
                self.money(item.unit_price())?,
                self.money(item.extended_total())?,
            ];
            canvas.stroke_rect(Rect::new(TABLE_X, y, TABLE_WIDTH, height))?;
            for (cell, x) in cells.iter().zip([COLUMN_X[0], COLUMN_X[2], COLUMN_X[3]]) {
                canvas.text(x + CELL_INSET_X, y + CELL_INSET_Y, cell, FontWeight::Regular, ROW_SIZE)?;
            }
            for (i, line) in description.iter().enumerate() {
                let line_y = y + CELL_INSET_Y + i as f32 * leading;
                canvas.text(COLUMN_X[1] + CELL_INSET_X, line_y, line, FontWeight::Regular, ROW_SIZE)?;
            }
            y += height;
        }

        if let Some(top) = canvas.ensure_space(y, ROW_HEIGHT)? {
            y = top;
        }
        let total_cells = [TOTAL_LABEL.to_string(), self.money(quote.grand_total())?];
        for (i, cell) in total_cells.iter().enumerate() {
            let column = i + 2;
            canvas.fill_and_stroke_rect(
                Rect::new(COLUMN_X[column], y, COLUMN_WIDTHS[column], ROW_HEIGHT),
                TOTAL_FILL,
            )?;
            canvas.text(
                COLUMN_X[column] + CELL_INSET_X,
                y + CELL_INSET_Y,
                cell,
                FontWeight::Bold,
                TOTAL_SIZE,
            )?;
        }

        Ok(y + ROW_HEIGHT)
    }

    /// Payment terms follow the bold label on its line and wrap at the right margin.
    fn draw_footer(&self, canvas: &mut PdfCanvas, top: f32, terms: &str) -> Result<(), RenderError> {
        let content_width = canvas.page_width() - 2.0 * canvas.margin();
        let label_width = metrics::text_width(FontWeight::Bold, FOOTER_SIZE, FOOTER_LABEL);
        let lines = metrics::wrap_text(
            FontWeight::Regular,
            FOOTER_SIZE,
            terms,
            content_width - label_width,
            content_width,
        );
        let leading = FOOTER_SIZE * LINE_SPACING;

        let mut y = top;
        for (i, line) in lines.iter().enumerate() {
            if let Some(fresh) = canvas.ensure_space(y, leading)? {
                y = fresh;
            }
            if i == 0 {
                canvas.text_runs(
                    TABLE_X,
                    y,
                    &[(FontWeight::Bold, FOOTER_LABEL), (FontWeight::Regular, line)],
                    FOOTER_SIZE,
                )?;
            } else {
                canvas.text(TABLE_X, y, line, FontWeight::Regular, FOOTER_SIZE)?;
            }
            y += leading;
        }
        Ok(())
    }
}

/// Wraps an item description to the inner width of its column.
///
/// Words wider than the column are split between characters.
fn description_lines(description: &str) -> Vec<String> {
    let width = COLUMN_WIDTHS[1] - 2.0 * CELL_INSET_X;
    let mut lines = Vec::new();
    for line in metrics::wrap_text(FontWeight::Regular, ROW_SIZE, description, width, width) {
        if metrics::text_width(FontWeight::Regular, ROW_SIZE, &line) <= width {
            lines.push(line);
            continue;
        }
        let mut current = String::new();
        for c in line.chars() {
            current.push(c);
            if metrics::text_width(FontWeight::Regular, ROW_SIZE, &current) > width {
                current.pop();
                lines.push(std::mem::take(&mut current));
                current.push(c);
            }
        }
        lines.push(current);
    }
    lines
}

fn draw_table_header(canvas: &mut PdfCanvas, y: f32) -> Result<(), RenderError> {
    canvas.stroke_rect(Rect::new(TABLE_X, y, TABLE_WIDTH, ROW_HEIGHT))?;
    for (label, x) in HEADER_LABELS.iter().zip(COLUMN_X) {
        canvas.text(x + CELL_INSET_X, y + CELL_INSET_Y, label, FontWeight::Bold, HEADER_SIZE)?;
    }
    Ok(())
}

impl QuoteRenderer for LopdfQuoteRenderer {
    fn name(&self) -> &'static str {
        "pdf"
    }

    fn render(&self, quote: &ComputedQuote) -> Result<Vec<u8>, RenderError> {
        let mut canvas = PdfCanvas::new(PageSize::Letter, PAGE_MARGIN);
        canvas.set_title(format!("Presupuesto - {}", quote.request().client_name));

        if let Some(watermark) = self.load_image(&mut canvas, self.watermark.as_deref()) {
            canvas.on_page_start(move |page| {
                let (width, height) = (page.page_width(), page.page_height());
                page.draw_image(&watermark, width / 4.0, height / 4.0, width / 2.0, WATERMARK_OPACITY)
            });
        }
        let logo = self.load_image(&mut canvas, self.header_logo.as_deref());

        canvas.begin_page()?;
        if let Some(logo) = &logo {
            canvas.draw_image(logo, LOGO_X, LOGO_Y, LOGO_WIDTH, 1.0)?;
        }
        self.draw_header(&mut canvas, quote)?;
        let below_total = self.draw_table(&mut canvas, quote)?;
        self.draw_footer(&mut canvas, below_total + FOOTER_GAP, &quote.request().payment_terms)?;

        let pages = canvas.page_count();
        let bytes = canvas.finish()?;
        log::debug!(
            "rendered quote for '{}': {} item(s), {} page(s)",
            quote.request().client_name,
            quote.items().len(),
            pages
        );
        Ok(bytes)
    }
}
