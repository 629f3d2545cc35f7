//! Limits enforced by the request handler.
//!
//! Supports YAML configuration; missing keys fall back to defaults.
//!
//! ```yaml
//! max_coordinate: 10000
//! max_pixels: 1000000
//! ```

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Caps on request magnitude that bound worst-case latency and memory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RasterConfig {
    /// Largest accepted absolute value of any coordinate, and largest radius.
    #[serde(default = "default_max_coordinate")]
    pub max_coordinate: i64,

    /// Largest accepted pixel-count estimate for a single primitive.
    #[serde(default = "default_max_pixels")]
    pub max_pixels: u64,
}

fn default_max_coordinate() -> i64 {
    10_000
}
fn default_max_pixels() -> u64 {
    1_000_000
}

impl Default for RasterConfig {
    fn default() -> Self {
        Self {
            max_coordinate: default_max_coordinate(),
            max_pixels: default_max_pixels(),
        }
    }
}

impl RasterConfig {
    /// Creates a configuration with default limits.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the coordinate/radius magnitude limit.
    #[must_use]
    pub fn max_coordinate(mut self, limit: i64) -> Self {
        self.max_coordinate = limit;
        self
    }

    /// Sets the pixel-count limit.
    #[must_use]
    pub fn max_pixels(mut self, limit: u64) -> Self {
        self.max_pixels = limit;
        self
    }

    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or holds
    /// out-of-range limits.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .map_err(|_| Error::ConfigNotFound(path.display().to_string()))?;

        Self::parse(&content)
    }

    /// Parses configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error with line number if parsing fails, or
    /// [`Error::ConfigInvalid`] if a limit is out of range.
    pub fn parse(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml_ng::from_str(yaml).map_err(|e| {
            let line = e.location().map(|l| l.line()).unwrap_or(0);
            Error::ConfigParse {
                line,
                message: e.to_string(),
            }
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration with fallback to defaults.
    #[must_use]
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(path).unwrap_or_default()
    }

    /// Checks that both limits are positive and that the coordinate limit
    /// fits the `i32` grid.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigInvalid`] naming the offending key.
    pub fn validate(&self) -> Result<()> {
        if self.max_coordinate <= 0 || self.max_coordinate > i64::from(i32::MAX) {
            return Err(Error::ConfigInvalid {
                key: "max_coordinate",
                message: format!("{} is not in 1..={}", self.max_coordinate, i32::MAX),
            });
        }
        if self.max_pixels == 0 {
            return Err(Error::ConfigInvalid {
                key: "max_pixels",
                message: "must be greater than 0".to_string(),
            });
        }
        Ok(())
    }
}
