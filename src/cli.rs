// compresso/src/cli.rs
use crate::core::ResizeAlgorithm;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "compresso", version, about = "Compress JPEG photos to a size tier")]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compress a single JPEG
    Compress {
        input: PathBuf,

        /// Output file or directory (default: next to the input)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// ultra, super or normal
        #[arg(short, long, default_value = "normal")]
        tier: String,

        /// jpeg, png or webp; anything else means jpeg
        #[arg(short, long, default_value = "jpeg")]
        format: String,

        #[arg(short, long, value_enum, default_value_t = Algorithm::Lanczos3)]
        algorithm: Algorithm,

        /// Background for flattening transparency, as RRGGBB
        #[arg(long, default_value = "ffffff", value_parser = parse_hex_color)]
        background: [u8; 3],

        /// Reject inputs larger than this many bytes
        #[arg(long)]
        max_file_size: Option<u64>,

        /// Reject inputs wider or taller than this many pixels
        #[arg(long)]
        max_dimension: Option<u32>,
    },

    /// Compress every JPEG in a directory in parallel
    Batch {
        input: PathBuf,

        output: PathBuf,

        #[arg(short, long, default_value = "normal")]
        tier: String,

        #[arg(short, long, default_value = "jpeg")]
        format: String,

        /// Worker threads (0 = one per core)
        #[arg(short = 'j', long, default_value_t = 0)]
        threads: usize,

        #[arg(short, long)]
        recursive: bool,

        #[arg(short, long, value_enum, default_value_t = Algorithm::Lanczos3)]
        algorithm: Algorithm,
    },

    /// Show dimensions, format and EXIF of an image
    Info { input: PathBuf },

    /// Delete temp files older than the retention window
    Clean {
        dir: PathBuf,

        #[arg(long, default_value_t = 3600)]
        retention_secs: u64,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Algorithm {
    Bilinear,
    Bicubic,
    Lanczos3,
}

impl From<Algorithm> for ResizeAlgorithm {
    fn from(algorithm: Algorithm) -> Self {
        match algorithm {
            Algorithm::Bilinear => ResizeAlgorithm::Bilinear,
            Algorithm::Bicubic => ResizeAlgorithm::Bicubic,
            Algorithm::Lanczos3 => ResizeAlgorithm::Lanczos3,
        }
    }
}

pub fn parse_hex_color(value: &str) -> Result<[u8; 3], String> {
    let hex = value.trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return Err(format!("expected RRGGBB, got {:?}", value));
    }

    let channel = |i: usize| {
        u8::from_str_radix(&hex[i..i + 2], 16).map_err(|e| format!("bad color {:?}: {}", value, e))
    };

    Ok([channel(0)?, channel(2)?, channel(4)?])
}
