// compresso/src/processors/loader.rs
use crate::core::{CompressError, Result};
use crate::utils::image_format_to_string;
use image::{DynamicImage, GenericImageView, ImageFormat, ImageReader};
use std::io::Cursor;
use std::path::Path;

#[derive(Debug, Clone, Default)]
pub struct Loader {
    max_dimensions: Option<(u32, u32)>,
    expected_format: Option<ImageFormat>,
}

impl Loader {
    /// No dimension ceiling: large scans are bounded only by memory.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_dimensions(mut self, width: u32, height: u32) -> Self {
        self.max_dimensions = Some((width, height));
        self
    }

    pub fn with_expected_format(mut self, format: ImageFormat) -> Self {
        self.expected_format = Some(format);
        self
    }

    pub fn load_from_bytes(&self, data: &[u8]) -> Result<DynamicImage> {
        if data.is_empty() {
            return Err(CompressError::Decode("Image data is empty".to_string()));
        }

        let mut reader = ImageReader::new(Cursor::new(data)).with_guessed_format()?;

        let format = reader
            .format()
            .ok_or_else(|| CompressError::Decode("Unrecognized image format".to_string()))?;

        if let Some(expected) = self.expected_format {
            if format != expected {
                return Err(CompressError::Decode(format!(
                    "Expected {} data, found {}",
                    image_format_to_string(expected),
                    image_format_to_string(format)
                )));
            }
        }

        reader.no_limits();
        let image = reader.decode().map_err(CompressError::decoding)?;

        if let Some((max_w, max_h)) = self.max_dimensions {
            let (width, height) = image.dimensions();
            if width > max_w || height > max_h {
                return Err(CompressError::MemoryLimitExceeded(format!(
                    "Image dimensions {}x{} exceed maximum {}x{}",
                    width, height, max_w, max_h
                )));
            }
        }

        log::debug!(
            "Decoded {} image: {}x{}, color: {:?}",
            image_format_to_string(format),
            image.width(),
            image.height(),
            image.color()
        );

        Ok(image)
    }

    pub fn get_dimensions_and_format(&self, path: &Path) -> Result<(u32, u32, String)> {
        let reader = ImageReader::open(path)?.with_guessed_format()?;

        let format = reader
            .format()
            .map(image_format_to_string)
            .unwrap_or_else(|| "Unknown".to_string());

        let (width, height) = reader.into_dimensions().map_err(CompressError::decoding)?;

        Ok((width, height, format))
    }
}
