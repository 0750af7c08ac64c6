// compresso/src/processors/metadata.rs
use crate::core::{CompressError, Result};
use exif::{Exif, In, Reader, Tag};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

const COMMON_FIELDS: [(Tag, &str); 10] = [
    (Tag::Make, "Camera Make"),
    (Tag::Model, "Camera Model"),
    (Tag::DateTimeOriginal, "Original Date/Time"),
    (Tag::ExposureTime, "Exposure Time"),
    (Tag::FNumber, "Aperture"),
    (Tag::PhotographicSensitivity, "ISO"),
    (Tag::FocalLength, "Focal Length"),
    (Tag::Orientation, "Orientation"),
    (Tag::Software, "Software"),
    (Tag::Copyright, "Copyright"),
];

#[derive(Debug, Clone, Copy, Default)]
pub struct MetadataProcessor;

impl MetadataProcessor {
    pub fn new() -> Self {
        Self
    }

    pub fn read_metadata(&self, path: &Path) -> Result<Option<Exif>> {
        let file = File::open(path)?;
        let mut bufreader = BufReader::new(&file);

        match Reader::new().read_from_container(&mut bufreader) {
            Ok(exif) => {
                log::debug!("Found EXIF data in {}", path.display());
                Ok(Some(exif))
            }
            Err(exif::Error::NotFound(_)) => {
                log::debug!("No EXIF data found in {}", path.display());
                Ok(None)
            }
            Err(exif::Error::Io(e)) => Err(CompressError::Io(e)),
            Err(e) => {
                log::warn!("Failed to read EXIF from {}: {}", path.display(), e);
                Err(CompressError::Decode(format!("EXIF read error: {}", e)))
            }
        }
    }

    pub fn has_metadata(&self, path: &Path) -> Result<bool> {
        Ok(self.read_metadata(path)?.is_some())
    }

    /// Label/value pairs for the handful of fields worth showing a user.
    pub fn extract_common_metadata(&self, exif: &Exif) -> Vec<(String, String)> {
        COMMON_FIELDS
            .iter()
            .filter_map(|(tag, label)| {
                exif.get_field(*tag, In::PRIMARY).map(|field| {
                    let value = field.display_value().with_unit(exif).to_string();
                    (label.to_string(), value)
                })
            })
            .collect()
    }
}
