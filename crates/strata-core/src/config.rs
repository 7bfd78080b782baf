//! Layer stack configuration.
//!
//! [`StackConfig`] holds the policy knobs of a [`LayerStack`](crate::LayerStack):
//! the size and color of synthesized blank layers, the suffix used to keep
//! layer names unique, and the default mosaic density. It can be loaded from
//! TOML; missing keys fall back to their defaults.
//!
//! ```
//! use strata_core::StackConfig;
//!
//! let config = StackConfig::from_toml_str(r#"
//! blank_width = 64
//! blank_height = 32
//! copy_suffix = "_dup"
//! "#)?;
//! assert_eq!(config.blank_width, 64);
//! assert_eq!(config.blank_name, "new blank");
//! # Ok::<(), strata_core::StrataError>(())
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, StrataError};
use crate::ops::DEFAULT_MOSAIC_SEED_RATIO;

/// Policy settings for a layer stack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StackConfig {
    /// Width of a blank layer added to an empty stack.
    pub blank_width: u32,
    /// Height of a blank layer added to an empty stack.
    pub blank_height: u32,
    /// Fill color of blank layers.
    pub blank_color: [u8; 3],
    /// Name given to blank layers before uniqueness suffixing.
    pub blank_name: String,
    /// Appended to a layer name until it no longer collides.
    pub copy_suffix: String,
    /// Fraction of pixels used as seeds by the default mosaic.
    pub mosaic_seed_ratio: f64,
}

impl Default for StackConfig {
    fn default() -> Self {
        Self {
            blank_width: 100,
            blank_height: 100,
            blank_color: [255, 255, 255],
            blank_name: "new blank".to_string(),
            copy_suffix: "-copy".to_string(),
            mosaic_seed_ratio: DEFAULT_MOSAIC_SEED_RATIO,
        }
    }
}

impl StackConfig {
    /// Parse and validate a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(text).map_err(|e| StrataError::Config(e.message().to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| StrataError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }

    /// Serialize to TOML text.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| StrataError::Config(e.to_string()))
    }

    /// Check that every field holds a usable value.
    pub fn validate(&self) -> Result<()> {
        if self.blank_width == 0 || self.blank_height == 0 {
            return Err(StrataError::Config(format!(
                "blank layer size must be positive, got {}x{}",
                self.blank_width, self.blank_height
            )));
        }
        if self.blank_name.is_empty() {
            return Err(StrataError::Config("blank_name cannot be empty".to_string()));
        }
        if self.copy_suffix.is_empty() {
            return Err(StrataError::Config("copy_suffix cannot be empty".to_string()));
        }
        if !(self.mosaic_seed_ratio > 0.0 && self.mosaic_seed_ratio <= 1.0) {
            return Err(StrataError::Config(format!(
                "mosaic_seed_ratio must be in (0, 1], got {}",
                self.mosaic_seed_ratio
            )));
        }
        Ok(())
    }

    /// Set the blank layer size.
    #[must_use]
    pub fn with_blank_size(mut self, width: u32, height: u32) -> Self {
        self.blank_width = width;
        self.blank_height = height;
        self
    }

    /// Set the name uniqueness suffix.
    #[must_use]
    pub fn with_copy_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.copy_suffix = suffix.into();
        self
    }

    /// Set the default mosaic seed ratio.
    #[must_use]
    pub fn with_mosaic_seed_ratio(mut self, ratio: f64) -> Self {
        self.mosaic_seed_ratio = ratio;
        self
    }
}
