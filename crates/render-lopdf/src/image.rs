//! Raster image decoding into PDF image XObjects.

use flate2::Compression;
use flate2::write::ZlibEncoder;
use lopdf::{Document, ObjectId, Stream, dictionary};
use quotedoc_render_core::RenderError;
use std::io::Write;

/// A decoded raster, split into color samples and an optional alpha channel.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    rgb: Vec<u8>,
    alpha: Option<Vec<u8>>,
}

impl DecodedImage {
    /// Decodes PNG or JPEG bytes.
    ///
    /// The alpha channel is kept only when at least one pixel is not fully opaque.
    pub fn decode(bytes: &[u8]) -> Result<Self, RenderError> {
        let image = image::load_from_memory(bytes)
            .map_err(|e| RenderError::Pdf(format!("failed to decode image: {}", e)))?;
        let (width, height) = (image.width(), image.height());
        if width == 0 || height == 0 {
            return Err(RenderError::Pdf("image has no pixels".into()));
        }

        let alpha = if image.color().has_alpha() {
            let rgba = image.to_rgba8();
            let alpha: Vec<u8> = rgba.pixels().map(|p| p.0[3]).collect();
            alpha.iter().any(|a| *a != u8::MAX).then_some(alpha)
        } else {
            None
        };

        Ok(Self {
            width,
            height,
            rgb: image.to_rgb8().into_raw(),
            alpha,
        })
    }

    pub fn has_alpha(&self) -> bool {
        self.alpha.is_some()
    }

    /// Height that keeps the aspect ratio when drawn `width` points wide.
    pub fn scaled_height(&self, width: f32) -> f32 {
        width * self.height as f32 / self.width as f32
    }

    /// Adds the image (and its soft mask) to `document`, returning the XObject id.
    pub fn embed(&self, document: &mut Document) -> Result<ObjectId, RenderError> {
        let mut dict = dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => self.width as i64,
            "Height" => self.height as i64,
            "ColorSpace" => "DeviceRGB",
            "BitsPerComponent" => 8,
            "Filter" => "FlateDecode",
        };

        if let Some(alpha) = &self.alpha {
            let mask = Stream::new(
                dictionary! {
                    "Type" => "XObject",
                    "Subtype" => "Image",
                    "Width" => self.width as i64,
                    "Height" => self.height as i64,
                    "ColorSpace" => "DeviceGray",
                    "BitsPerComponent" => 8,
                    "Filter" => "FlateDecode",
                },
                deflate(alpha)?,
            );
            let mask_id = document.add_object(mask);
            dict.set("SMask", mask_id);
        }

        let stream = Stream::new(dict, deflate(&self.rgb)?);
        Ok(document.add_object(stream))
    }
}

pub(crate) fn deflate(data: &[u8]) -> Result<Vec<u8>, RenderError> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    Ok(encoder.finish()?)
}
