// compresso/src/processors/compressor.rs
use super::encoder::{encode_png, quality_encoder_for, QualityEncoder};
use super::loader::Loader;
use super::resizer::Resizer;
use super::search::search_quality;
use crate::core::{OutputFormat, ResizeAlgorithm, Result, TierSettings};
use image::{DynamicImage, Rgb, RgbImage};

/// Encoded output of one compression call.
#[derive(Debug, Clone)]
pub struct CompressionResult {
    pub bytes: Vec<u8>,
    /// `None` for PNG, which has no quality knob.
    pub quality: Option<u8>,
    pub format: OutputFormat,
    pub width: u32,
    pub height: u32,
    pub encode_passes: u32,
}

impl CompressionResult {
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    pub fn within_budget(&self, settings: &TierSettings) -> bool {
        settings.fits(self.size())
    }
}

#[derive(Debug, Clone)]
pub struct Compressor {
    loader: Loader,
    resizer: Resizer,
    background: Rgb<u8>,
}

impl Compressor {
    pub fn new() -> Self {
        Self {
            loader: Loader::new(),
            resizer: Resizer::default(),
            background: Rgb([255, 255, 255]),
        }
    }

    pub fn with_algorithm(mut self, algorithm: ResizeAlgorithm) -> Self {
        self.resizer = Resizer::new(algorithm);
        self
    }

    /// Color that transparent pixels are composited over for JPEG output.
    pub fn with_background(mut self, background: [u8; 3]) -> Self {
        self.background = Rgb(background);
        self
    }

    pub fn compress_bytes(
        &self,
        data: &[u8],
        settings: &TierSettings,
        format: OutputFormat,
    ) -> Result<CompressionResult> {
        let image = self.loader.load_from_bytes(data)?;
        self.compress(image, settings, format)
    }

    pub fn compress(
        &self,
        image: DynamicImage,
        settings: &TierSettings,
        format: OutputFormat,
    ) -> Result<CompressionResult> {
        match quality_encoder_for(format) {
            Some(encoder) => self.compress_with(encoder.as_ref(), image, settings, format),
            None => {
                settings.validate()?;
                let image = self.prepare(image, settings, format);
                let bytes = encode_png(&image)?;
                log::info!(
                    "Compressed to PNG {}x{}: {} bytes",
                    image.width(),
                    image.height(),
                    bytes.len()
                );

                Ok(CompressionResult {
                    bytes,
                    quality: None,
                    format,
                    width: image.width(),
                    height: image.height(),
                    encode_passes: 1,
                })
            }
        }
    }

    /// Runs the resize, normalization and quality search with a caller-chosen encoder.
    pub fn compress_with<E: QualityEncoder + ?Sized>(
        &self,
        encoder: &E,
        image: DynamicImage,
        settings: &TierSettings,
        format: OutputFormat,
    ) -> Result<CompressionResult> {
        settings.validate()?;
        let image = self.prepare(image, settings, format);
        let outcome = search_quality(encoder, &image, settings)?;

        log::info!(
            "Compressed to {} {}x{}: {} bytes at quality {} ({} encode passes)",
            format.label(),
            image.width(),
            image.height(),
            outcome.bytes.len(),
            outcome.quality,
            outcome.encode_passes
        );

        Ok(CompressionResult {
            bytes: outcome.bytes,
            quality: Some(outcome.quality),
            format,
            width: image.width(),
            height: image.height(),
            encode_passes: outcome.encode_passes,
        })
    }

    fn prepare(&self, image: DynamicImage, settings: &TierSettings, format: OutputFormat) -> DynamicImage {
        let image = self.resizer.fit_within(image, settings.max_dimension);
        if format.requires_opaque() {
            self.flatten(image)
        } else {
            image
        }
    }

    /// Reduces an image to something a baseline JPEG can carry: 8-bit gray or opaque RGB.
    pub fn flatten(&self, image: DynamicImage) -> DynamicImage {
        match image {
            DynamicImage::ImageLuma8(_) | DynamicImage::ImageRgb8(_) => image,
            DynamicImage::ImageLuma16(_) => DynamicImage::ImageLuma8(image.to_luma8()),
            ref other if other.color().has_alpha() => {
                log::debug!("Flattening {:?} onto background {:?}", other.color(), self.background.0);
                DynamicImage::ImageRgb8(self.composite(other))
            }
            other => DynamicImage::ImageRgb8(other.to_rgb8()),
        }
    }

    fn composite(&self, image: &DynamicImage) -> RgbImage {
        let rgba = image.to_rgba8();
        let Rgb(background) = self.background;

        RgbImage::from_fn(rgba.width(), rgba.height(), |x, y| {
            let [r, g, b, a] = rgba.get_pixel(x, y).0;
            let alpha = a as u32;
            let blend = |fg: u8, bg: u8| -> u8 {
                ((fg as u32 * alpha + bg as u32 * (255 - alpha) + 127) / 255) as u8
            };
            Rgb([
                blend(r, background[0]),
                blend(g, background[1]),
                blend(b, background[2]),
            ])
        })
    }
}

impl Default for Compressor {
    fn default() -> Self {
        Self::new()
    }
}
