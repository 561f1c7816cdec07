use lopdf::Document as LopdfDocument;

/// Extract all text content from a PDF document
pub fn extract_text(doc: &LopdfDocument) -> String {
    let mut text = String::new();
    let pages = doc.get_pages();
    for page_num in 1..=pages.len() {
        if let Ok(page_text) = doc.extract_text(&[page_num as u32]) {
            text.push_str(&page_text);
            text.push('\n');
        }
    }
    text
}

/// Text of a single page (1-based).
pub fn page_text(doc: &LopdfDocument, page: u32) -> String {
    doc.extract_text(&[page]).unwrap_or_default()
}

/// Content-stream operators of a single page (1-based), in drawing order.
pub fn page_operators(doc: &LopdfDocument, page: u32) -> Vec<String> {
    let Some(page_id) = doc.get_pages().get(&page).copied() else {
        return Vec::new();
    };
    doc.get_and_decode_page_content(page_id)
        .map(|content| content.operations.into_iter().map(|op| op.operator).collect())
        .unwrap_or_default()
}

/// Text-positioning and text-showing operations of a page, with operands.
pub fn text_operations(doc: &LopdfDocument, page: u32) -> Vec<String> {
    let Some(page_id) = doc.get_pages().get(&page).copied() else {
        return Vec::new();
    };
    doc.get_and_decode_page_content(page_id)
        .map(|content| {
            content
                .operations
                .into_iter()
                .filter(|op| matches!(op.operator.as_str(), "Tf" | "Td" | "Tj"))
                .map(|op| format!("{} {:?}", op.operator, op.operands))
                .collect()
        })
        .unwrap_or_default()
}

/// Number of image draws (`Do`) on a page.
pub fn image_draws(doc: &LopdfDocument, page: u32) -> usize {
    page_operators(doc, page).iter().filter(|op| *op == "Do").count()
}

/// Assert that PDF contains specific text
#[macro_export]
macro_rules! assert_pdf_contains_text {
    ($pdf:expr, $text:expr) => {
        let extracted = $crate::common::pdf_assertions::extract_text(&$pdf.doc);
        assert!(
            extracted.contains($text),
            "PDF should contain '{}', but extracted text was:\n{}",
            $text,
            extracted
        );
    };
}

/// Assert the number of pages in a PDF
#[macro_export]
macro_rules! assert_pdf_page_count {
    ($pdf:expr, $count:expr) => {
        assert_eq!(
            $pdf.page_count(),
            $count,
            "Expected {} pages, got {}",
            $count,
            $pdf.page_count()
        );
    };
}
