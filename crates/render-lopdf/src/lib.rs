//! PDF backend for quote documents, built on lopdf.
//!
//! [`LopdfQuoteRenderer`] lays the quote out on a fixed-coordinate US Letter page
//! through [`PdfCanvas`], a small top-left-origin drawing surface with page-start
//! hooks, standard Type1 fonts and image XObjects.

mod canvas;
mod encoding;
mod image;
pub mod layout;
pub mod metrics;
mod renderer;

pub use canvas::{ImageHandle, PageHook, PdfCanvas};
pub use image::DecodedImage;
pub use renderer::LopdfQuoteRenderer;
