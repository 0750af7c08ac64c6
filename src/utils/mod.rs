// compresso/src/utils/mod.rs
use crate::core::{OutputFormat, Tier, MIB};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// `photo.jpg` compressed at the ultra tier to WebP becomes `photo_ultra_compressed.webp`.
pub fn compressed_file_name(input_path: &Path, tier: Tier, format: OutputFormat) -> Option<OsString> {
    let stem = input_path.file_stem()?.to_str()?;
    let name = format!(
        "{}_{}_compressed.{}",
        sanitize_filename(stem),
        tier.name(),
        format.extension()
    );
    Some(OsString::from(name))
}

pub fn generate_output_path(
    input_path: &Path,
    output: Option<&Path>,
    tier: Tier,
    format: OutputFormat,
) -> PathBuf {
    if let Some(path) = output {
        if !path.is_dir() {
            return path.to_path_buf();
        }
    }

    let file_name = compressed_file_name(input_path, tier, format)
        .unwrap_or_else(|| OsString::from(format!("image_{}_compressed.{}", tier.name(), format.extension())));

    match output {
        Some(dir) => dir.join(file_name),
        None => input_path.with_file_name(file_name),
    }
}

/// Size as shown to users: binary megabytes, two decimals.
pub fn format_megabytes(bytes: u64) -> String {
    format!("{:.2} MB", bytes as f64 / MIB as f64)
}

pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

    if bytes == 0 {
        return "0 B".to_string();
    }

    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }

    format!("{:.2} {}", size, UNITS[unit])
}

/// Compares paths after resolving symlinks and `.` segments. A path that does
/// not exist yet is resolved through its parent directory.
pub fn is_same_location(a: &Path, b: &Path) -> bool {
    resolve_location(a) == resolve_location(b)
}

fn resolve_location(path: &Path) -> PathBuf {
    if let Ok(resolved) = std::fs::canonicalize(path) {
        return resolved;
    }

    match (path.parent(), path.file_name()) {
        (Some(parent), Some(name)) => {
            let parent = if parent.as_os_str().is_empty() {
                Path::new(".")
            } else {
                parent
            };
            std::fs::canonicalize(parent)
                .map(|dir| dir.join(name))
                .unwrap_or_else(|_| path.to_path_buf())
        }
        _ => path.to_path_buf(),
    }
}

pub fn is_jpeg_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| matches!(ext.to_ascii_lowercase().as_str(), "jpg" | "jpeg"))
        .unwrap_or(false)
}

pub fn sanitize_filename(filename: &str) -> String {
    let invalid_chars = ['/', '\\', ':', '*', '?', '"', '<', '>', '|'];
    filename
        .chars()
        .map(|c| if invalid_chars.contains(&c) { '_' } else { c })
        .collect()
}

pub fn calculate_aspect_ratio(width: u32, height: u32) -> f32 {
    if height == 0 {
        0.0
    } else {
        width as f32 / height as f32
    }
}

pub fn image_format_to_string(format: image::ImageFormat) -> String {
    match format {
        image::ImageFormat::Jpeg => "JPEG",
        image::ImageFormat::Png => "PNG",
        image::ImageFormat::Gif => "GIF",
        image::ImageFormat::WebP => "WebP",
        image::ImageFormat::Tiff => "TIFF",
        image::ImageFormat::Bmp => "BMP",
        _ => "Unknown",
    }
    .to_string()
}
