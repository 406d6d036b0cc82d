//! Tunable parameters for region extraction.
//!
//! The defaults reproduce the settings the extractor was first tuned with
//! (11 tap blur, 30/150 hysteresis, 5000 px² minimum area). None of them are
//! load-bearing; load a JSON file or build the struct directly to change them.
//!
//! ```no_run
//! use tabletscan::ExtractorConfig;
//! use std::path::Path;
//!
//! let config = ExtractorConfig::from_json_file(Path::new("extractor.json"))?.validate()?;
//! # Ok::<(), tabletscan::Error>(())
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{Error, Result};

pub const DEFAULT_KERNEL_SIZE: u32 = 11;
pub const DEFAULT_LOW_THRESHOLD: f32 = 30.0;
pub const DEFAULT_HIGH_THRESHOLD: f32 = 150.0;
pub const DEFAULT_MIN_REGION_AREA: f64 = 5000.0;

/// Largest accepted blur kernel, in taps
pub const MAX_KERNEL_SIZE: u32 = 255;

/// Parameters for [`RegionExtractor`](crate::RegionExtractor).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Gaussian kernel size in pixels (odd, >= 1)
    pub kernel_size: u32,

    /// Hysteresis low threshold on gradient magnitude
    pub low_threshold: f32,

    /// Hysteresis high threshold on gradient magnitude
    pub high_threshold: f32,

    /// Contours enclosing this many px² or fewer are discarded
    pub min_region_area: f64,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            kernel_size: DEFAULT_KERNEL_SIZE,
            low_threshold: DEFAULT_LOW_THRESHOLD,
            high_threshold: DEFAULT_HIGH_THRESHOLD,
            min_region_area: DEFAULT_MIN_REGION_AREA,
        }
    }
}

impl ExtractorConfig {
    pub fn with_kernel_size(mut self, kernel_size: u32) -> Self {
        self.kernel_size = kernel_size;
        self
    }

    pub fn with_thresholds(mut self, low: f32, high: f32) -> Self {
        self.low_threshold = low;
        self.high_threshold = high;
        self
    }

    pub fn with_min_region_area(mut self, min_region_area: f64) -> Self {
        self.min_region_area = min_region_area;
        self
    }

    /// Check every parameter and return the normalised configuration.
    ///
    /// An even kernel size is bumped to the next odd value; everything else
    /// that is out of range is an [`Error::Config`].
    pub fn validate(mut self) -> Result<Self> {
        if self.kernel_size == 0 {
            return Err(Error::config("kernel_size", 0, "must be at least 1"));
        }
        if self.kernel_size > MAX_KERNEL_SIZE {
            return Err(Error::config(
                "kernel_size",
                self.kernel_size,
                format!("must not exceed {MAX_KERNEL_SIZE}"),
            ));
        }
        if self.kernel_size % 2 == 0 {
            let odd = self.kernel_size + 1;
            warn!(
                "kernel_size {} is even, using {} instead",
                self.kernel_size, odd
            );
            self.kernel_size = odd;
        }

        for (name, value) in [
            ("low_threshold", self.low_threshold),
            ("high_threshold", self.high_threshold),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::config(name, value, "must be a finite, non-negative number"));
            }
        }
        if self.low_threshold > self.high_threshold {
            return Err(Error::config(
                "low_threshold",
                self.low_threshold,
                format!("must not exceed high_threshold ({})", self.high_threshold),
            ));
        }

        if !self.min_region_area.is_finite() || self.min_region_area < 0.0 {
            return Err(Error::config(
                "min_region_area",
                self.min_region_area,
                "must be a finite, non-negative number",
            ));
        }

        Ok(self)
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        Ok(config)
    }

    pub fn to_json_file(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}
