// compresso/src/processors/resizer.rs
use crate::core::ResizeAlgorithm;
use image::{imageops::FilterType, DynamicImage};

#[derive(Debug, Clone, Copy)]
pub struct Resizer {
    algorithm: ResizeAlgorithm,
}

impl Resizer {
    pub fn new(algorithm: ResizeAlgorithm) -> Self {
        Self { algorithm }
    }

    /// Shrinks `image` so its long edge is at most `max_dimension`. Never upscales.
    pub fn fit_within(&self, image: DynamicImage, max_dimension: u32) -> DynamicImage {
        let (orig_width, orig_height) = (image.width(), image.height());
        let (width, height) = Self::fitted_dimensions(orig_width, orig_height, max_dimension);

        if width == orig_width && height == orig_height {
            log::debug!(
                "Image {}x{} already within {} px, skipping resize",
                orig_width,
                orig_height,
                max_dimension
            );
            return image;
        }

        log::debug!(
            "Resizing image from {}x{} to {}x{}",
            orig_width,
            orig_height,
            width,
            height
        );

        image.resize_exact(width, height, self.get_filter_type())
    }

    /// Target dimensions for a long-edge ceiling. The long edge lands exactly
    /// on `max_dimension`, the short edge is scaled and truncated.
    pub fn fitted_dimensions(width: u32, height: u32, max_dimension: u32) -> (u32, u32) {
        let long = width.max(height);
        if long <= max_dimension || max_dimension == 0 {
            return (width, height);
        }

        let scale = |edge: u32| -> u32 {
            let scaled = edge as u64 * max_dimension as u64 / long as u64;
            (scaled as u32).max(1)
        };

        (scale(width), scale(height))
    }

    fn get_filter_type(&self) -> FilterType {
        match self.algorithm {
            ResizeAlgorithm::Bilinear => FilterType::Triangle,
            ResizeAlgorithm::Bicubic => FilterType::CatmullRom,
            ResizeAlgorithm::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

impl Default for Resizer {
    fn default() -> Self {
        Self::new(ResizeAlgorithm::Lanczos3)
    }
}
