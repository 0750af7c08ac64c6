// compresso/src/processors/encoder.rs
use crate::core::{CompressError, OutputFormat, Result};
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::DynamicImage;
use oxipng::{optimize_from_memory, Options};

/// An encoder whose output size is steered by a quality knob.
pub trait QualityEncoder {
    fn encode(&self, image: &DynamicImage, quality: u8) -> Result<Vec<u8>>;
}

impl<E: QualityEncoder + ?Sized> QualityEncoder for &E {
    fn encode(&self, image: &DynamicImage, quality: u8) -> Result<Vec<u8>> {
        (**self).encode(image, quality)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct JpegQualityEncoder;

impl QualityEncoder for JpegQualityEncoder {
    fn encode(&self, image: &DynamicImage, quality: u8) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        let encoder = JpegEncoder::new_with_quality(&mut buffer, quality.clamp(1, 100));
        image
            .write_with_encoder(encoder)
            .map_err(CompressError::encoding)?;
        Ok(buffer)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct WebpQualityEncoder;

impl QualityEncoder for WebpQualityEncoder {
    fn encode(&self, image: &DynamicImage, quality: u8) -> Result<Vec<u8>> {
        let (width, height) = (image.width(), image.height());
        let quality = quality.clamp(1, 100) as f32;

        // libwebp only takes 8-bit RGB or RGBA.
        let encoded = if image.color().has_alpha() {
            let rgba = image.to_rgba8();
            webp::Encoder::from_rgba(rgba.as_raw(), width, height).encode_simple(false, quality)
        } else {
            let rgb = image.to_rgb8();
            webp::Encoder::from_rgb(rgb.as_raw(), width, height).encode_simple(false, quality)
        };

        encoded
            .map(|memory| memory.to_vec())
            .map_err(|e| CompressError::Encode(format!("WebP encode failed: {:?}", e)))
    }
}

pub fn quality_encoder_for(format: OutputFormat) -> Option<Box<dyn QualityEncoder + Send + Sync>> {
    match format {
        OutputFormat::Jpeg => Some(Box::new(JpegQualityEncoder)),
        OutputFormat::WebP => Some(Box::new(WebpQualityEncoder)),
        OutputFormat::Png => None,
    }
}

/// Lossless PNG with the strongest oxipng preset. Color type reductions stay
/// off so the decoded result keeps the source's alpha channel (or lack of one).
pub fn encode_png(image: &DynamicImage) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    let encoder = PngEncoder::new_with_quality(&mut buffer, CompressionType::Fast, FilterType::Adaptive);
    image
        .write_with_encoder(encoder)
        .map_err(CompressError::encoding)?;

    let mut options = Options::from_preset(6);
    options.color_type_reduction = false;
    options.grayscale_reduction = false;

    optimize_from_memory(&buffer, &options)
        .map_err(|e| CompressError::Encode(format!("PNG optimization failed: {}", e)))
}
