mod cli;
mod core;
mod processors;
mod utils;

pub use cli::{parse_hex_color, Algorithm, Cli, Commands};
pub use crate::core::processor::{ImageProcessor, JPEG_ONLY_MESSAGE};
pub use crate::core::{
    CompressError, CompressionReport, ImageMetadata, OutputFormat, ProcessConfig,
    ProcessingStats, ResizeAlgorithm, Result, Tier, TierSettings, MIB,
};
pub use processors::{
    encode_png, quality_encoder_for, search_quality, BatchProcessor, CompressionResult, Compressor,
    JpegQualityEncoder, Loader, MetadataProcessor, QualityEncoder, Resizer, SearchOutcome,
    TempJanitor, WebpQualityEncoder, DEFAULT_RETENTION, SEARCH_ROUNDS,
};
pub use utils::{
    calculate_aspect_ratio, compressed_file_name, format_file_size, format_megabytes,
    generate_output_path, is_jpeg_path, is_same_location,
};

pub mod prelude {
    pub use crate::{
        compress, BatchProcessor, CompressionResult, Compressor, ImageProcessor, OutputFormat,
        ProcessConfig, Tier, TierSettings,
    };
}

// Re-export commonly used types
pub use image::DynamicImage;

/// Compresses encoded image bytes to a tier's budget with default settings.
pub fn compress(image_bytes: &[u8], tier: Tier, format: OutputFormat) -> Result<CompressionResult> {
    Compressor::new().compress_bytes(image_bytes, tier.settings(), format)
}
