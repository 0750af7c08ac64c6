// compresso/src/processors/batch.rs
use crate::core::processor::ImageProcessor;
use crate::core::{CompressError, CompressionReport, ProcessConfig, ProcessingStats, Result};
use crate::utils::{compressed_file_name, is_jpeg_path, is_same_location};
use indicatif::{ParallelProgressIterator, ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub struct BatchProcessor {
    processor: ImageProcessor,
    thread_pool: Option<rayon::ThreadPool>,
}

impl BatchProcessor {
    /// `max_threads == 0` runs on rayon's global pool.
    pub fn new(config: ProcessConfig, max_threads: usize) -> Result<Self> {
        config.validate()?;

        let thread_pool = if max_threads > 0 {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(max_threads)
                .build()
                .map_err(|e| {
                    CompressError::InvalidParameter(format!("Failed to create thread pool: {}", e))
                })?;
            Some(pool)
        } else {
            None
        };

        Ok(Self {
            processor: ImageProcessor::new(config),
            thread_pool,
        })
    }

    pub fn process_directory(
        &self,
        input_dir: &Path,
        output_dir: &Path,
        recursive: bool,
    ) -> Result<ProcessingStats> {
        self.validate_paths(input_dir, output_dir)?;

        let image_paths = self.collect_image_paths(input_dir, recursive);

        if image_paths.is_empty() {
            log::warn!("No JPEG files found in {}", input_dir.display());
            return Ok(ProcessingStats::default());
        }

        log::info!(
            "Compressing {} images from {} at tier {}",
            image_paths.len(),
            input_dir.display(),
            self.processor.config().tier
        );

        std::fs::create_dir_all(output_dir)?;

        let pb = self.create_progress_bar(image_paths.len());

        let run = || -> Vec<(PathBuf, Result<CompressionReport>)> {
            image_paths
                .par_iter()
                .progress_with(pb.clone())
                .map(|input_path| {
                    let result = self.process_single_image_in_batch(input_path, output_dir);
                    (input_path.clone(), result)
                })
                .collect()
        };

        let results = match &self.thread_pool {
            Some(pool) => pool.install(run),
            None => run(),
        };

        let mut stats = ProcessingStats::default();
        for (input_path, result) in results {
            match result {
                Ok(report) => stats.record(&report),
                Err(e) => {
                    log::warn!("Failed to compress {}: {}", input_path.display(), e);
                    stats.errors.push((input_path.display().to_string(), e.to_string()));
                }
            }
        }

        pb.finish_with_message(format!(
            "Compressed {} images ({:.1}% size reduction)",
            stats.processed_count,
            stats.savings_percent()
        ));

        Ok(stats)
    }

    fn process_single_image_in_batch(
        &self,
        input_path: &Path,
        output_dir: &Path,
    ) -> Result<CompressionReport> {
        let config = self.processor.config();
        let file_name = compressed_file_name(input_path, config.tier, config.format).ok_or_else(|| {
            CompressError::InvalidParameter(format!("Invalid file name: {}", input_path.display()))
        })?;

        self.processor.process(input_path, output_dir.join(file_name))
    }

    fn collect_image_paths(&self, input_dir: &Path, recursive: bool) -> Vec<PathBuf> {
        let walker = if recursive {
            WalkDir::new(input_dir)
        } else {
            WalkDir::new(input_dir).max_depth(1)
        };

        let mut paths: Vec<PathBuf> = walker
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .filter(|entry| is_jpeg_path(entry.path()))
            .map(|entry| entry.into_path())
            .collect();

        paths.sort();
        paths
    }

    fn create_progress_bar(&self, total: usize) -> ProgressBar {
        let pb = ProgressBar::new(total as u64);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-");
        pb.set_style(style);
        pb
    }

    pub fn validate_paths(&self, input_dir: &Path, output_dir: &Path) -> Result<()> {
        if input_dir.to_string_lossy().contains("..") {
            return Err(CompressError::SecurityError(
                "Path traversal detected in input path".to_string(),
            ));
        }

        if output_dir.to_string_lossy().contains("..") {
            return Err(CompressError::SecurityError(
                "Path traversal detected in output path".to_string(),
            ));
        }

        if !input_dir.is_dir() {
            return Err(CompressError::InvalidParameter(format!(
                "Input directory does not exist: {}",
                input_dir.display()
            )));
        }

        if output_dir.exists() && !output_dir.is_dir() {
            return Err(CompressError::InvalidParameter(format!(
                "Output path exists but is not a directory: {}",
                output_dir.display()
            )));
        }

        if is_same_location(input_dir, output_dir) {
            return Err(CompressError::InvalidParameter(
                "Input and output directories cannot be the same".to_string(),
            ));
        }

        Ok(())
    }
}
