// compresso/src/processors/janitor.rs
use crate::core::Result;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

pub const DEFAULT_RETENTION: Duration = Duration::from_secs(60 * 60);

/// Expires uploads and outputs nobody came back for.
#[derive(Debug, Clone)]
pub struct TempJanitor {
    dir: PathBuf,
    retention: Duration,
}

impl TempJanitor {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            retention: DEFAULT_RETENTION,
        }
    }

    pub fn with_retention(mut self, retention: Duration) -> Self {
        self.retention = retention;
        self
    }

    /// Removes regular files at least `retention` old. Returns how many went.
    pub fn sweep(&self) -> Result<usize> {
        if !self.dir.is_dir() {
            log::debug!("Nothing to sweep, {} is not a directory", self.dir.display());
            return Ok(0);
        }

        let now = SystemTime::now();
        let mut removed = 0;

        for entry in std::fs::read_dir(&self.dir)? {
            let entry = entry?;
            let metadata = match entry.metadata() {
                Ok(metadata) if metadata.is_file() => metadata,
                Ok(_) => continue,
                Err(e) => {
                    log::warn!("Cannot stat {}: {}", entry.path().display(), e);
                    continue;
                }
            };

            // A modification time in the future counts as fresh.
            let age = metadata
                .modified()
                .ok()
                .and_then(|modified| now.duration_since(modified).ok())
                .unwrap_or(Duration::ZERO);

            if age < self.retention {
                continue;
            }

            match std::fs::remove_file(entry.path()) {
                Ok(()) => {
                    log::debug!("Expired {} (age {}s)", entry.path().display(), age.as_secs());
                    removed += 1;
                }
                Err(e) => log::warn!("Failed to remove {}: {}", entry.path().display(), e),
            }
        }

        log::info!("Swept {} expired files from {}", removed, self.dir.display());
        Ok(removed)
    }
}
