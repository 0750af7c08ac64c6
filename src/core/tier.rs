// compresso/src/core/tier.rs
use super::{CompressError, Result};
use std::fmt;

/// Binary megabyte.
pub const MIB: u64 = 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tier {
    Ultra,
    Super,
    #[default]
    Normal,
}

/// Size budget and quality search bounds for one tier.
///
/// `target_bytes` is fractional: 0.2 MB is 209715.2 bytes, and a 209715 byte
/// output is under it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TierSettings {
    pub target_bytes: f64,
    pub max_dimension: u32,
    pub quality_range: (u8, u8),
    pub initial_quality: u8,
}

const ULTRA: TierSettings = TierSettings {
    target_bytes: 0.2 * MIB as f64,
    max_dimension: 1200,
    quality_range: (30, 60),
    initial_quality: 40,
};

const SUPER: TierSettings = TierSettings {
    target_bytes: 0.5 * MIB as f64,
    max_dimension: 2000,
    quality_range: (50, 80),
    initial_quality: 65,
};

const NORMAL: TierSettings = TierSettings {
    target_bytes: 2.0 * MIB as f64,
    max_dimension: 4000,
    quality_range: (75, 95),
    initial_quality: 85,
};

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::Ultra, Tier::Super, Tier::Normal];

    /// Unknown names get the normal tier, matching what the upload form did.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "ultra" => Tier::Ultra,
            "super" => Tier::Super,
            "normal" => Tier::Normal,
            other => {
                log::warn!("Unknown tier {:?}, using normal", other);
                Tier::Normal
            }
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Tier::Ultra => "ultra",
            Tier::Super => "super",
            Tier::Normal => "normal",
        }
    }

    pub fn settings(self) -> &'static TierSettings {
        match self {
            Tier::Ultra => &ULTRA,
            Tier::Super => &SUPER,
            Tier::Normal => &NORMAL,
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TierSettings {
    pub fn fits(&self, size: u64) -> bool {
        size as f64 <= self.target_bytes
    }

    pub fn is_under(&self, size: u64) -> bool {
        (size as f64) < self.target_bytes
    }

    pub fn validate(&self) -> Result<()> {
        if !self.target_bytes.is_finite() || self.target_bytes <= 0.0 {
            return Err(CompressError::InvalidParameter(
                "Target size must be greater than zero".to_string(),
            ));
        }

        if self.max_dimension == 0 {
            return Err(CompressError::InvalidParameter(
                "Maximum dimension must be greater than zero".to_string(),
            ));
        }

        let (low, high) = self.quality_range;
        if low == 0 || high > 100 || low > high {
            return Err(CompressError::InvalidParameter(format!(
                "Quality range {}-{} must satisfy 1 <= low <= high <= 100",
                low, high
            )));
        }

        if !(low..=high).contains(&self.initial_quality) {
            return Err(CompressError::InvalidParameter(format!(
                "Initial quality {} lies outside {}-{}",
                self.initial_quality, low, high
            )));
        }

        Ok(())
    }
}
