//! A small drawing surface over a lopdf `Document`.
//!
//! Coordinates are in points with the origin at the top-left corner of the page and y
//! growing downwards. The canvas flips them when it emits content operators.
//!
//! Page-start hooks run every time a page begins, the first one included. The quote
//! renderer uses one to stamp the watermark behind the content of each page.

use crate::encoding::{to_text_string, to_win_ansi};
use crate::image::{DecodedImage, deflate};
use crate::metrics;
use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream, StringFormat, dictionary};
use quotedoc_render_core::utils::{flip_y, get_styled_font_name};
use quotedoc_render_core::{FontWeight, RenderError};
use quotedoc_types::{Color, PageSize, Rect};

const BASE_FONT: &str = "Helvetica";

/// Ratio between a text line's top and its baseline, relative to the font size.
const BASELINE_RATIO: f32 = 0.8;

/// Callback run at the start of every page.
pub type PageHook = Box<dyn FnMut(&mut PdfCanvas) -> Result<(), RenderError> + Send>;

/// An image registered with the canvas, drawable on any page.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageHandle {
    name: String,
    pub width: u32,
    pub height: u32,
}

impl ImageHandle {
    pub fn scaled_height(&self, width: f32) -> f32 {
        width * self.height as f32 / self.width as f32
    }
}

/// Graphics state already emitted on the current page.
#[derive(Debug, Default)]
struct PageState {
    fill: Option<Color>,
    stroke: Option<Color>,
}

pub struct PdfCanvas {
    document: Document,
    pages_id: ObjectId,
    resources_id: ObjectId,
    width: f32,
    height: f32,
    margin: f32,
    pages: Vec<Content>,
    state: PageState,
    xobjects: Dictionary,
    ext_gstates: Dictionary,
    hooks: Vec<PageHook>,
    title: Option<String>,
}

impl PdfCanvas {
    pub fn new(page_size: PageSize, margin: f32) -> Self {
        let mut document = Document::with_version("1.7");
        let pages_id = document.new_object_id();
        let resources_id = document.new_object_id();
        let (width, height) = page_size.dimensions_pt();

        Self {
            document,
            pages_id,
            resources_id,
            width,
            height,
            margin,
            pages: Vec::new(),
            state: PageState::default(),
            xobjects: Dictionary::new(),
            ext_gstates: Dictionary::new(),
            hooks: Vec::new(),
            title: None,
        }
    }

    pub fn page_width(&self) -> f32 {
        self.width
    }

    pub fn page_height(&self) -> f32 {
        self.height
    }

    pub fn margin(&self) -> f32 {
        self.margin
    }

    /// Lowest y content may reach before a page break is needed.
    pub fn bottom_limit(&self) -> f32 {
        self.height - self.margin
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = Some(title.into());
    }

    /// Registers a hook run at the start of every page started from now on.
    pub fn on_page_start<F>(&mut self, hook: F)
    where
        F: FnMut(&mut PdfCanvas) -> Result<(), RenderError> + Send + 'static,
    {
        self.hooks.push(Box::new(hook));
    }

    /// Starts a new page and runs the page-start hooks on it.
    pub fn begin_page(&mut self) -> Result<(), RenderError> {
        self.pages.push(Content { operations: vec![] });
        self.state = PageState::default();
        log::trace!("began page {}", self.pages.len());

        let mut hooks = std::mem::take(&mut self.hooks);
        let result = hooks.iter_mut().try_for_each(|hook| hook(self));
        hooks.append(&mut self.hooks);
        self.hooks = hooks;
        result
    }

    /// Makes sure a block of `height` points fits below `y`.
    ///
    /// Returns `Some(top)` with the top of a fresh page when a break was needed.
    pub fn ensure_space(&mut self, y: f32, height: f32) -> Result<Option<f32>, RenderError> {
        if self.pages.is_empty() {
            self.begin_page()?;
            return Ok(Some(self.margin));
        }
        if y + height <= self.bottom_limit() {
            return Ok(None);
        }
        self.begin_page()?;
        Ok(Some(self.margin))
    }

    /// Draws a single line of black text whose top edge sits at `y`.
    pub fn text(
        &mut self,
        x: f32,
        y: f32,
        text: &str,
        weight: FontWeight,
        size: f32,
    ) -> Result<(), RenderError> {
        if text.is_empty() {
            return Ok(());
        }
        let baseline = flip_y(y + size * BASELINE_RATIO, self.height);
        let ops = vec![
            Operation::new("BT", vec![]),
            Operation::new(
                "Tf",
                vec![
                    Object::Name(font_resource_name(weight).as_bytes().to_vec()),
                    size.into(),
                ],
            ),
            Operation::new("Td", vec![x.into(), baseline.into()]),
            Operation::new(
                "Tj",
                vec![Object::String(to_win_ansi(text), StringFormat::Literal)],
            ),
            Operation::new("ET", vec![]),
        ];
        self.set_fill(Color::BLACK)?;
        self.current()?.operations.extend(ops);
        Ok(())
    }

    /// Draws consecutive runs on one line, each in its own weight.
    ///
    /// Returns the x coordinate where the last run ends.
    pub fn text_runs(
        &mut self,
        x: f32,
        y: f32,
        runs: &[(FontWeight, &str)],
        size: f32,
    ) -> Result<f32, RenderError> {
        let mut cursor = x;
        for (weight, text) in runs {
            self.text(cursor, y, text, *weight, size)?;
            cursor += metrics::text_width(*weight, size, text);
        }
        Ok(cursor)
    }

    pub fn stroke_rect(&mut self, rect: Rect) -> Result<(), RenderError> {
        self.set_stroke(Color::BLACK)?;
        let op = self.rect_op(rect);
        let page = self.current()?;
        page.operations.push(op);
        page.operations.push(Operation::new("S", vec![]));
        Ok(())
    }

    pub fn fill_and_stroke_rect(&mut self, rect: Rect, fill: Color) -> Result<(), RenderError> {
        self.set_fill(fill)?;
        self.set_stroke(Color::BLACK)?;
        let op = self.rect_op(rect);
        let page = self.current()?;
        page.operations.push(op);
        page.operations.push(Operation::new("B", vec![]));
        Ok(())
    }

    /// Decodes and embeds an image once so it can be drawn on any page.
    pub fn register_image(&mut self, bytes: &[u8]) -> Result<ImageHandle, RenderError> {
        let decoded = DecodedImage::decode(bytes)?;
        let id = decoded.embed(&mut self.document)?;
        let name = format!("Im{}", self.xobjects.len() + 1);
        self.xobjects.set(name.as_str(), id);
        log::debug!(
            "embedded image {} ({}x{}, alpha: {})",
            name,
            decoded.width,
            decoded.height,
            decoded.has_alpha()
        );
        Ok(ImageHandle {
            name,
            width: decoded.width,
            height: decoded.height,
        })
    }

    /// Draws `image` scaled to `width` with its top-left corner at (`x`, `y`).
    ///
    /// `opacity` below 1.0 goes through an ExtGState with matching `ca`/`CA`.
    pub fn draw_image(
        &mut self,
        image: &ImageHandle,
        x: f32,
        y: f32,
        width: f32,
        opacity: f32,
    ) -> Result<(), RenderError> {
        let height = image.scaled_height(width);
        let bottom = flip_y(y + height, self.height);

        let mut ops = vec![Operation::new("q", vec![])];
        if opacity < 1.0 {
            let state = self.opacity_state(opacity);
            ops.push(Operation::new("gs", vec![Object::Name(state.into_bytes())]));
        }
        ops.push(Operation::new(
            "cm",
            vec![
                width.into(),
                0.into(),
                0.into(),
                height.into(),
                x.into(),
                bottom.into(),
            ],
        ));
        ops.push(Operation::new(
            "Do",
            vec![Object::Name(image.name.as_bytes().to_vec())],
        ));
        ops.push(Operation::new("Q", vec![]));

        self.current()?.operations.extend(ops);
        Ok(())
    }

    /// Assembles the object graph and serializes the document.
    pub fn finish(mut self) -> Result<Vec<u8>, RenderError> {
        if self.pages.is_empty() {
            self.begin_page()?;
        }

        let mut fonts = Dictionary::new();
        for weight in [FontWeight::Regular, FontWeight::Bold] {
            let font = dictionary! {
                "Type" => "Font",
                "Subtype" => "Type1",
                "BaseFont" => get_styled_font_name(BASE_FONT, weight),
                "Encoding" => "WinAnsiEncoding",
            };
            let font_id = self.document.add_object(font);
            fonts.set(font_resource_name(weight), font_id);
        }

        let mut resources = dictionary! { "Font" => fonts };
        if !self.xobjects.is_empty() {
            resources.set("XObject", std::mem::take(&mut self.xobjects));
        }
        if !self.ext_gstates.is_empty() {
            resources.set("ExtGState", std::mem::take(&mut self.ext_gstates));
        }
        self.document
            .objects
            .insert(self.resources_id, Object::Dictionary(resources));

        let mut page_ids = Vec::with_capacity(self.pages.len());
        for content in std::mem::take(&mut self.pages) {
            let stream = Stream::new(
                dictionary! { "Filter" => "FlateDecode" },
                deflate(&content.encode()?)?,
            );
            let content_id = self.document.add_object(stream);
            let page = dictionary! {
                "Type" => "Page",
                "Parent" => self.pages_id,
                "MediaBox" => vec![0.into(), 0.into(), self.width.into(), self.height.into()],
                "Contents" => content_id,
                "Resources" => self.resources_id,
            };
            page_ids.push(self.document.add_object(page));
        }

        let kids: Vec<Object> = page_ids.iter().map(|id| Object::from(*id)).collect();
        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_ids.len() as i64,
        };
        self.document
            .objects
            .insert(self.pages_id, Object::Dictionary(pages));

        let catalog_id = self
            .document
            .add_object(dictionary! { "Type" => "Catalog", "Pages" => self.pages_id });
        self.document.trailer.set("Root", catalog_id);

        if let Some(title) = &self.title {
            let info = dictionary! {
                "Title" => Object::String(to_text_string(title), StringFormat::Hexadecimal),
                "Producer" => Object::string_literal("quotedoc"),
            };
            let info_id = self.document.add_object(info);
            self.document.trailer.set("Info", info_id);
        }

        let mut out = Vec::new();
        self.document.save_to(&mut out)?;
        log::debug!("serialized {} page(s), {} bytes", page_ids.len(), out.len());
        Ok(out)
    }

    fn current(&mut self) -> Result<&mut Content, RenderError> {
        self.pages
            .last_mut()
            .ok_or_else(|| RenderError::Pdf("drawing before any page was started".into()))
    }

    fn rect_op(&self, rect: Rect) -> Operation {
        Operation::new(
            "re",
            vec![
                rect.x.into(),
                flip_y(rect.bottom(), self.height).into(),
                rect.width.into(),
                rect.height.into(),
            ],
        )
    }

    fn set_fill(&mut self, color: Color) -> Result<(), RenderError> {
        if self.state.fill == Some(color) {
            return Ok(());
        }
        let [r, g, b] = color.to_unit_rgb();
        self.current()?
            .operations
            .push(Operation::new("rg", vec![r.into(), g.into(), b.into()]));
        self.state.fill = Some(color);
        Ok(())
    }

    fn set_stroke(&mut self, color: Color) -> Result<(), RenderError> {
        if self.state.stroke == Some(color) {
            return Ok(());
        }
        let [r, g, b] = color.to_unit_rgb();
        self.current()?
            .operations
            .push(Operation::new("RG", vec![r.into(), g.into(), b.into()]));
        self.state.stroke = Some(color);
        Ok(())
    }

    /// Name of the ExtGState for `opacity`, created on first use.
    fn opacity_state(&mut self, opacity: f32) -> String {
        let opacity = opacity.clamp(0.0, 1.0);
        let name = format!("GS{}", (opacity * 1000.0).round() as u32);
        if !self.ext_gstates.has(name.as_bytes()) {
            self.ext_gstates.set(
                name.as_str(),
                dictionary! {
                    "Type" => "ExtGState",
                    "ca" => opacity,
                    "CA" => opacity,
                },
            );
        }
        name
    }
}

fn font_resource_name(weight: FontWeight) -> &'static str {
    match weight {
        FontWeight::Regular => "F1",
        FontWeight::Bold => "F2",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{page_operators, png};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_empty_canvas_still_has_one_page() {
        let bytes = PdfCanvas::new(PageSize::Letter, 40.0).finish().unwrap();
        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }

    #[test]
    fn test_text_is_extractable() {
        let mut canvas = PdfCanvas::new(PageSize::Letter, 40.0);
        canvas.begin_page().unwrap();
        canvas
            .text(40.0, 40.0, "Presupuesto", FontWeight::Bold, 18.0)
            .unwrap();
        let end = canvas
            .text_runs(
                40.0,
                80.0,
                &[(FontWeight::Bold, "Total: "), (FontWeight::Regular, "$10,00")],
                11.0,
            )
            .unwrap();
        assert!(end > 40.0);

        let doc = Document::load_mem(&canvas.finish().unwrap()).unwrap();
        let text = doc.extract_text(&[1]).unwrap();
        assert!(text.contains("Presupuesto"));
        assert!(text.contains("$10,00"));
    }

    #[test]
    fn test_drawing_without_page_fails() {
        let mut canvas = PdfCanvas::new(PageSize::Letter, 40.0);
        let err = canvas.stroke_rect(Rect::new(0.0, 0.0, 10.0, 10.0));
        assert!(matches!(err, Err(RenderError::Pdf(_))));
    }

    #[test]
    fn test_hooks_run_on_every_page() {
        let counter = Arc::new(AtomicUsize::new(0));
        let seen = counter.clone();

        let mut canvas = PdfCanvas::new(PageSize::Letter, 40.0);
        canvas.on_page_start(move |c| {
            seen.fetch_add(1, Ordering::SeqCst);
            c.stroke_rect(Rect::new(10.0, 10.0, 5.0, 5.0))
        });
        canvas.begin_page().unwrap();
        assert_eq!(canvas.ensure_space(100.0, 25.0).unwrap(), None);
        assert_eq!(canvas.ensure_space(740.0, 25.0).unwrap(), Some(40.0));
        assert_eq!(canvas.page_count(), 2);
        assert_eq!(counter.load(Ordering::SeqCst), 2);

        let doc = Document::load_mem(&canvas.finish().unwrap()).unwrap();
        for page in 1..=2 {
            assert!(page_operators(&doc, page).contains(&"re".to_string()));
        }
    }

    #[test]
    fn test_fill_color_is_not_repeated() {
        let mut canvas = PdfCanvas::new(PageSize::Letter, 40.0);
        canvas.begin_page().unwrap();
        canvas.text(40.0, 40.0, "a", FontWeight::Regular, 10.0).unwrap();
        canvas.text(40.0, 60.0, "b", FontWeight::Regular, 10.0).unwrap();
        canvas
            .fill_and_stroke_rect(Rect::new(40.0, 80.0, 80.0, 25.0), Color::YELLOW)
            .unwrap();

        let doc = Document::load_mem(&canvas.finish().unwrap()).unwrap();
        let ops = page_operators(&doc, 1);
        assert_eq!(ops.iter().filter(|op| *op == "rg").count(), 2);
        assert_eq!(ops.iter().filter(|op| *op == "B").count(), 1);
    }

    #[test]
    fn test_translucent_image_uses_ext_gstate() {
        let mut canvas = PdfCanvas::new(PageSize::Letter, 40.0);
        let image = canvas.register_image(&png(10, 5, 255)).unwrap();
        assert_eq!(image.scaled_height(100.0), 50.0);

        canvas.begin_page().unwrap();
        canvas.draw_image(&image, 153.0, 198.0, 306.0, 0.1).unwrap();
        canvas.draw_image(&image, 250.0, 40.0, 100.0, 1.0).unwrap();

        let doc = Document::load_mem(&canvas.finish().unwrap()).unwrap();
        let ops = page_operators(&doc, 1);
        assert_eq!(ops.iter().filter(|op| *op == "Do").count(), 2);
        assert_eq!(ops.iter().filter(|op| *op == "gs").count(), 1);
    }

    #[test]
    fn test_euro_and_dashes_survive_extraction() {
        let mut canvas = PdfCanvas::new(PageSize::Letter, 40.0);
        canvas.set_title("Presupuesto – ACME");
        canvas.begin_page().unwrap();
        canvas
            .text(40.0, 40.0, "Caño 1/2” – 10 €", FontWeight::Regular, 10.0)
            .unwrap();

        let doc = Document::load_mem(&canvas.finish().unwrap()).unwrap();
        let text = doc.extract_text(&[1]).unwrap();
        assert!(text.contains("Caño 1/2” – 10 €"), "{}", text);
    }
}
