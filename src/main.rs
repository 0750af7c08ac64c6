use anyhow::{bail, Context, Result};
use clap::Parser;
use compresso::{
    calculate_aspect_ratio, format_file_size, format_megabytes, generate_output_path,
    Algorithm, BatchProcessor, Cli, Commands, ImageProcessor, MetadataProcessor, OutputFormat,
    ProcessConfig, TempJanitor, Tier,
};
use log::LevelFilter;
use std::path::PathBuf;
use std::time::Duration;

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(if cli.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        })
        .init();

    match cli.command {
        Commands::Compress {
            input,
            output,
            tier,
            format,
            algorithm,
            background,
            max_file_size,
            max_dimension,
        } => {
            let config = ProcessConfig {
                tier: Tier::from_name(&tier),
                format: OutputFormat::from_name(&format),
                algorithm: algorithm.into(),
                background,
                max_file_size,
                max_dimensions: max_dimension.map(|edge| (edge, edge)),
                ..Default::default()
            };
            process_compress(input, output, config)?;
        }
        Commands::Batch {
            input,
            output,
            tier,
            format,
            threads,
            recursive,
            algorithm,
        } => {
            process_batch(input, output, &tier, &format, threads, recursive, algorithm)?;
        }
        Commands::Info { input } => {
            process_info(input)?;
        }
        Commands::Clean {
            dir,
            retention_secs,
        } => {
            let janitor = TempJanitor::new(&dir).with_retention(Duration::from_secs(retention_secs));
            let removed = janitor
                .sweep()
                .with_context(|| format!("failed to clean {}", dir.display()))?;
            println!("Removed {} expired files from {}", removed, dir.display());
        }
    }

    Ok(())
}

fn process_compress(input: PathBuf, output: Option<PathBuf>, config: ProcessConfig) -> Result<()> {
    let output_path = generate_output_path(&input, output.as_deref(), config.tier, config.format);

    let processor = ImageProcessor::new(config);
    let report = processor
        .process(&input, &output_path)
        .with_context(|| format!("failed to compress {}", input.display()))?;

    println!("Compressed image saved to: {}", report.output.display());
    println!(
        "{} -> {} ({}, {}x{}{})",
        format_megabytes(report.original_size),
        report.size_text(),
        report.format.label(),
        report.width,
        report.height,
        report
            .quality
            .map(|q| format!(", quality {}", q))
            .unwrap_or_default()
    );

    Ok(())
}

fn process_batch(
    input: PathBuf,
    output: PathBuf,
    tier: &str,
    format: &str,
    threads: usize,
    recursive: bool,
    algorithm: Algorithm,
) -> Result<()> {
    let config = ProcessConfig {
        tier: Tier::from_name(tier),
        format: OutputFormat::from_name(format),
        algorithm: algorithm.into(),
        ..Default::default()
    };

    let processor = BatchProcessor::new(config, threads)?;
    let stats = processor.process_directory(&input, &output, recursive)?;

    for (file, error) in &stats.errors {
        eprintln!("{}: {}", file, error);
    }

    println!(
        "Batch complete. Compressed {} images to {} ({} -> {})",
        stats.processed_count,
        output.display(),
        format_file_size(stats.total_size_before),
        format_file_size(stats.total_size_after)
    );

    Ok(())
}

fn process_info(input: PathBuf) -> Result<()> {
    if !input.exists() {
        bail!("File does not exist: {}", input.display());
    }

    let processor = ImageProcessor::new(ProcessConfig::default());
    let info = processor
        .get_metadata(&input)
        .with_context(|| format!("failed to read {}", input.display()))?;
    let aspect_ratio = calculate_aspect_ratio(info.width, info.height);

    println!("=== Image Information ===");
    println!("File: {}", input.display());
    println!("Size: {}", format_file_size(info.file_size));
    println!("Dimensions: {} x {} pixels", info.width, info.height);
    println!("Aspect Ratio: {:.2}:1", aspect_ratio);
    println!("Format: {}", info.format);
    println!("Has EXIF metadata: {}", info.has_exif);

    if info.has_exif {
        let metadata = MetadataProcessor::new();
        if let Some(exif) = metadata.read_metadata(&input)? {
            println!("\n=== EXIF Metadata ===");
            for (label, value) in metadata.extract_common_metadata(&exif) {
                println!("{:25}: {}", label, value);
            }
        }
    }

    Ok(())
}
