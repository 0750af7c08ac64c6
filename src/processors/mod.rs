// compresso/src/processors/mod.rs
mod batch;
mod compressor;
mod encoder;
mod janitor;
mod loader;
mod metadata;
mod resizer;
mod search;

pub use batch::BatchProcessor;
pub use compressor::{CompressionResult, Compressor};
pub use encoder::{encode_png, quality_encoder_for, JpegQualityEncoder, QualityEncoder, WebpQualityEncoder};
pub use janitor::{TempJanitor, DEFAULT_RETENTION};
pub use loader::Loader;
pub use metadata::MetadataProcessor;
pub use resizer::Resizer;
pub use search::{search_quality, SearchOutcome, SEARCH_ROUNDS};
