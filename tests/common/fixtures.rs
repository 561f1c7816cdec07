use image::{ImageFormat, Rgba, RgbaImage};
use quotedoc::{LineItemInput, QuoteRequest};
use quotedoc::config::{DEFAULT_HEADER_LOGO, DEFAULT_WATERMARK};
use quotedoc_traits::InMemoryResourceProvider;
use std::io::Cursor;

/// A request for "ACME SRL" with the given items.
pub fn request(items: Vec<LineItemInput>) -> QuoteRequest {
    QuoteRequest {
        client_name: "ACME SRL".into(),
        client_tax_id: "20-12345678-9".into(),
        issue_date: "18/10/2026".into(),
        payment_terms: "Contado".into(),
        items,
    }
}

/// Two items totalling 20,01 and 5,00, one of them sent with string numbers.
pub fn two_item_request() -> QuoteRequest {
    request(vec![
        LineItemInput::new(2, "Bomba centrifuga", 10.005),
        LineItemInput::new("1", "Sello mecanico", "5"),
    ])
}

/// `count` single-unit items named "Item 1".."Item count", priced 1.00 each.
pub fn many_items(count: usize) -> QuoteRequest {
    request(
        (1..=count)
            .map(|i| LineItemInput::new(1, format!("Item {}", i), 1.0))
            .collect(),
    )
}

/// A solid PNG; `alpha` below 255 yields an image with a soft mask.
pub fn png(width: u32, height: u32, alpha: u8) -> Vec<u8> {
    let img = RgbaImage::from_pixel(width, height, Rgba([20, 60, 160, alpha]));
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageFormat::Png).unwrap();
    out.into_inner()
}

/// Logo and watermark registered under their default resource names.
pub fn default_assets() -> InMemoryResourceProvider {
    InMemoryResourceProvider::new()
        .with(DEFAULT_HEADER_LOGO, png(40, 20, 255))
        .unwrap()
        .with(DEFAULT_WATERMARK, png(50, 50, 128))
        .unwrap()
}
