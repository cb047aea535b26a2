use anyhow::Context;
use serde::Deserialize;
use std::fs;
use std::path::Path;

use source_map_lookup::logging::LogLevel;
use source_map_lookup::CanonicalUrl;

/// Config file looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "smap.json";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmapConfig {
    pub base_url: Option<String>,
    pub base_url_is_file: Option<bool>,
    pub trim_file_scheme: Option<bool>,
    pub log_level: Option<LogLevel>,
}

/// Settings every command decodes with, after merging file and flags.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodeOptions {
    /// Base for relative sources. `None` resolves each map against its own
    /// location.
    pub base_url: Option<CanonicalUrl>,
    pub base_url_is_file: bool,
    pub trim_file_scheme: bool,
    pub log_level: LogLevel,
}

impl SmapConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("cannot read config {}", path.display()))?;
        let config: SmapConfig = serde_json::from_str(&content)
            .with_context(|| format!("invalid config {}", path.display()))?;
        Ok(config)
    }

    /// Load `explicit`, or the default file when it exists, or nothing.
    pub fn discover(explicit: Option<&Path>) -> anyhow::Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        let default = Path::new(DEFAULT_CONFIG_FILE);
        if default.is_file() {
            Self::load(default)
        } else {
            Ok(Self::default())
        }
    }

    /// Values set in `overrides` replace ours.
    pub fn merge(self, overrides: SmapConfig) -> SmapConfig {
        SmapConfig {
            base_url: overrides.base_url.or(self.base_url),
            base_url_is_file: overrides.base_url_is_file.or(self.base_url_is_file),
            trim_file_scheme: overrides.trim_file_scheme.or(self.trim_file_scheme),
            log_level: overrides.log_level.or(self.log_level),
        }
    }

    pub fn decode_options(&self) -> DecodeOptions {
        DecodeOptions {
            base_url: self.base_url.as_deref().map(CanonicalUrl::parse),
            base_url_is_file: self.base_url_is_file.unwrap_or(false),
            trim_file_scheme: self.trim_file_scheme.unwrap_or(true),
            log_level: self.log_level.unwrap_or(LogLevel::Warn),
        }
    }
}

impl Default for DecodeOptions {
    fn default() -> Self {
        SmapConfig::default().decode_options()
    }
}
