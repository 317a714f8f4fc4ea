// Fri Oct 16 2026 - Alex

use crate::patch::{OverrideFlag, OverrideSet};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Validation failed: {0}")]
    ValidationFailed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatchConfig {
    pub overrides: Vec<OverrideFlag>,
    /// Keep zeroed extension blocks in the output instead of cutting it at
    /// the declared block count.
    pub write_full_edid: bool,
    pub pretty_json: bool,
    pub require_overrides: bool,
}

impl Default for PatchConfig {
    fn default() -> Self {
        Self {
            overrides: vec![OverrideFlag::SetRgb444, OverrideFlag::NoExtensions],
            write_full_edid: false,
            pretty_json: true,
            require_overrides: false,
        }
    }
}

impl PatchConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path.as_ref())?;
        let config: PatchConfig = serde_json::from_str(&text)?;
        config.validate()?;
        log::debug!("Loaded config from {}", path.as_ref().display());
        Ok(config)
    }

    pub fn with_overrides<I: IntoIterator<Item = OverrideFlag>>(mut self, flags: I) -> Self {
        self.overrides = flags.into_iter().collect();
        self
    }

    pub fn with_full_edid(mut self, full: bool) -> Self {
        self.write_full_edid = full;
        self
    }

    pub fn with_pretty_json(mut self, pretty: bool) -> Self {
        self.pretty_json = pretty;
        self
    }

    pub fn override_set(&self) -> OverrideSet {
        self.overrides.iter().copied().collect()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.require_overrides && self.overrides.is_empty() {
            return Err(ConfigError::ValidationFailed(
                "at least one override must be enabled".to_string(),
            ));
        }
        Ok(())
    }
}
