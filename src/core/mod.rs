// compresso/src/core/mod.rs
pub mod processor;
mod tier;

pub use tier::{Tier, TierSettings, MIB};

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResizeAlgorithm {
    Bilinear,
    Bicubic,
    #[default]
    Lanczos3,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Jpeg,
    Png,
    WebP,
}

impl OutputFormat {
    /// Resolves a user-supplied format name. Anything unrecognized is JPEG.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_uppercase().as_str() {
            "JPEG" | "JPG" => OutputFormat::Jpeg,
            "PNG" => OutputFormat::Png,
            "WEBP" => OutputFormat::WebP,
            other => {
                log::warn!("Unrecognized output format {:?}, falling back to JPEG", other);
                OutputFormat::Jpeg
            }
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "jpg",
            OutputFormat::Png => "png",
            OutputFormat::WebP => "webp",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "JPG",
            OutputFormat::Png => "PNG",
            OutputFormat::WebP => "WEBP",
        }
    }

    pub fn requires_opaque(self) -> bool {
        self == OutputFormat::Jpeg
    }
}

#[derive(Debug, Clone)]
pub struct ProcessConfig {
    pub tier: Tier,
    pub format: OutputFormat,
    pub algorithm: ResizeAlgorithm,
    pub background: [u8; 3],
    pub max_file_size: Option<u64>,
    pub max_dimensions: Option<(u32, u32)>,
    pub jpeg_input_only: bool,
}

impl Default for ProcessConfig {
    fn default() -> Self {
        Self {
            tier: Tier::default(),
            format: OutputFormat::default(),
            algorithm: ResizeAlgorithm::Lanczos3,
            background: [255, 255, 255],
            max_file_size: None,
            max_dimensions: None,
            jpeg_input_only: true,
        }
    }
}

impl ProcessConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_file_size == Some(0) {
            return Err(CompressError::InvalidParameter(
                "Maximum file size must be greater than zero".to_string(),
            ));
        }

        if let Some((0, _)) | Some((_, 0)) = self.max_dimensions {
            return Err(CompressError::InvalidParameter(
                "Maximum dimensions must be greater than zero".to_string(),
            ));
        }

        self.tier.settings().validate()
    }
}

#[derive(Debug, Clone)]
pub struct ImageMetadata {
    pub width: u32,
    pub height: u32,
    pub format: String,
    pub has_exif: bool,
    pub file_size: u64,
}

/// Outcome of compressing one file on disk.
#[derive(Debug, Clone)]
pub struct CompressionReport {
    pub input: PathBuf,
    pub output: PathBuf,
    pub original_size: u64,
    pub compressed_size: u64,
    pub quality: Option<u8>,
    pub format: OutputFormat,
    pub width: u32,
    pub height: u32,
}

impl CompressionReport {
    pub fn size_text(&self) -> String {
        crate::utils::format_megabytes(self.compressed_size)
    }
}

#[derive(Debug, Default)]
pub struct ProcessingStats {
    pub processed_count: usize,
    pub total_size_before: u64,
    pub total_size_after: u64,
    pub errors: Vec<(String, String)>,
}

impl ProcessingStats {
    pub fn record(&mut self, report: &CompressionReport) {
        self.processed_count += 1;
        self.total_size_before += report.original_size;
        self.total_size_after += report.compressed_size;
    }

    pub fn savings_percent(&self) -> f64 {
        if self.total_size_before == 0 {
            return 0.0;
        }

        let savings = (self.total_size_before as f64 - self.total_size_after as f64)
            / self.total_size_before as f64
            * 100.0;
        savings.clamp(0.0, 100.0)
    }
}

#[derive(Error, Debug)]
pub enum CompressError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Encode error: {0}")]
    Encode(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Security error: {0}")]
    SecurityError(String),

    #[error("Memory limit exceeded: {0}")]
    MemoryLimitExceeded(String),
}

impl CompressError {
    /// Decoding reads from memory, so even reader errors mean malformed input.
    pub(crate) fn decoding(err: image::ImageError) -> Self {
        CompressError::Decode(err.to_string())
    }

    pub(crate) fn encoding(err: image::ImageError) -> Self {
        match err {
            image::ImageError::IoError(e) => CompressError::Io(e),
            other => CompressError::Encode(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, CompressError>;
