// compresso/src/processors/search.rs
use super::encoder::QualityEncoder;
use crate::core::{Result, TierSettings};
use image::DynamicImage;

/// Bisection rounds after an oversized first attempt.
pub const SEARCH_ROUNDS: u32 = 3;

#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub bytes: Vec<u8>,
    pub quality: u8,
    pub encode_passes: u32,
}

/// Finds the highest quality whose output fits `settings.target_bytes`.
///
/// The first encode uses `initial_quality` and is accepted as-is when it fits.
/// Otherwise a fixed number of bisection rounds narrow the quality range, and
/// the winning quality is encoded once more so the returned bytes always match
/// the reported quality. When no round fits the budget, `initial_quality` is
/// encoded again and returned as a best effort.
pub fn search_quality<E: QualityEncoder + ?Sized>(
    encoder: &E,
    image: &DynamicImage,
    settings: &TierSettings,
) -> Result<SearchOutcome> {
    let target = settings.target_bytes;
    let initial_quality = settings.initial_quality;

    let initial = encoder.encode(image, initial_quality)?;
    let mut passes = 1;
    let initial_size = initial.len() as u64;

    log::debug!(
        "Initial encode at quality {}: {} bytes (target {})",
        initial_quality,
        initial_size,
        target
    );

    if settings.fits(initial_size) {
        return Ok(SearchOutcome {
            bytes: initial,
            quality: initial_quality,
            encode_passes: passes,
        });
    }
    drop(initial);

    let (low, high) = settings.quality_range;
    let (mut low, mut high) = (low as i32, high as i32);
    let mut best: Option<u8> = None;

    for round in 1..=SEARCH_ROUNDS {
        if low > high {
            log::debug!("Quality range exhausted after {} rounds", round - 1);
            break;
        }

        let quality = ((low + high) / 2) as u8;
        let size = encoder.encode(image, quality)?.len() as u64;
        passes += 1;

        log::debug!("Round {}: quality {} -> {} bytes", round, quality, size);

        if settings.is_under(size) {
            best = Some(quality);
            low = quality as i32 + 1;
        } else {
            high = quality as i32 - 1;
        }
    }

    let quality = best.unwrap_or_else(|| {
        log::debug!(
            "No quality in {}-{} got under {} bytes, falling back to {}",
            settings.quality_range.0,
            settings.quality_range.1,
            target,
            initial_quality
        );
        initial_quality
    });

    let bytes = encoder.encode(image, quality)?;
    passes += 1;

    Ok(SearchOutcome {
        bytes,
        quality,
        encode_passes: passes,
    })
}
