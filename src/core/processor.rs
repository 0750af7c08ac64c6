// compresso/src/core/processor.rs
use super::{CompressError, CompressionReport, ImageMetadata, ProcessConfig, Result};
use crate::processors::{Compressor, Loader, MetadataProcessor};
use crate::utils::{format_megabytes, is_jpeg_path, is_same_location};
use std::path::Path;

pub const JPEG_ONLY_MESSAGE: &str = "Only JPEG/JPG input is supported.";

pub struct ImageProcessor {
    config: ProcessConfig,
    loader: Loader,
    compressor: Compressor,
    metadata_processor: MetadataProcessor,
}

impl ImageProcessor {
    pub fn new(config: ProcessConfig) -> Self {
        let compressor = Compressor::new()
            .with_algorithm(config.algorithm)
            .with_background(config.background);

        let mut loader = Loader::new();
        if config.jpeg_input_only {
            loader = loader.with_expected_format(image::ImageFormat::Jpeg);
        }
        if let Some((width, height)) = config.max_dimensions {
            loader = loader.with_max_dimensions(width, height);
        }

        Self {
            config,
            loader,
            compressor,
            metadata_processor: MetadataProcessor::new(),
        }
    }

    pub fn config(&self) -> &ProcessConfig {
        &self.config
    }

    pub fn process<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input_path: P,
        output_path: Q,
    ) -> Result<CompressionReport> {
        let input_path = input_path.as_ref();
        let output_path = output_path.as_ref();

        self.config.validate()?;
        self.validate_paths(input_path, output_path)?;

        let original_size = std::fs::metadata(input_path)?.len();
        if let Some(max_size) = self.config.max_file_size {
            if original_size > max_size {
                return Err(CompressError::MemoryLimitExceeded(format!(
                    "File size {} exceeds limit {}",
                    original_size, max_size
                )));
            }
        }

        let data = std::fs::read(input_path)?;
        let image = self.loader.load_from_bytes(&data)?;
        drop(data);

        let settings = self.config.tier.settings();
        let result = self.compressor.compress(image, settings, self.config.format)?;

        if let Some(parent) = output_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(output_path, &result.bytes)?;

        if !result.within_budget(settings) {
            log::warn!(
                "{} is {} after compression, above the {} tier target of {}",
                output_path.display(),
                format_megabytes(result.size()),
                self.config.tier,
                format_megabytes(settings.target_bytes as u64)
            );
        }

        log::info!(
            "Saved image: {} ({} -> {})",
            output_path.display(),
            format_megabytes(original_size),
            format_megabytes(result.size())
        );

        Ok(CompressionReport {
            input: input_path.to_path_buf(),
            output: output_path.to_path_buf(),
            original_size,
            compressed_size: result.size(),
            quality: result.quality,
            format: result.format,
            width: result.width,
            height: result.height,
        })
    }

    pub fn get_metadata<P: AsRef<Path>>(&self, path: P) -> Result<ImageMetadata> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(CompressError::InvalidParameter(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        let metadata = std::fs::metadata(path)?;
        let (width, height, format) = self.loader.get_dimensions_and_format(path)?;
        let has_exif = self.metadata_processor.has_metadata(path)?;

        Ok(ImageMetadata {
            width,
            height,
            format,
            has_exif,
            file_size: metadata.len(),
        })
    }

    fn validate_paths(&self, input_path: &Path, output_path: &Path) -> Result<()> {
        if input_path.to_string_lossy().contains("..") {
            return Err(CompressError::SecurityError(
                "Path traversal detected in input path".to_string(),
            ));
        }

        if output_path.to_string_lossy().contains("..") {
            return Err(CompressError::SecurityError(
                "Path traversal detected in output path".to_string(),
            ));
        }

        if !input_path.is_file() {
            return Err(CompressError::InvalidParameter(format!(
                "Input file does not exist: {}",
                input_path.display()
            )));
        }

        if self.config.jpeg_input_only && !is_jpeg_path(input_path) {
            return Err(CompressError::UnsupportedFormat(JPEG_ONLY_MESSAGE.to_string()));
        }

        if is_same_location(input_path, output_path) {
            return Err(CompressError::InvalidParameter(
                "Output would overwrite the input file".to_string(),
            ));
        }

        Ok(())
    }
}
