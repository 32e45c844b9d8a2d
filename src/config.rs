//! Application configuration, read from an optional JSON file.

use crate::locale::Language;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Environment variable naming a config file.
pub const CONFIG_ENV: &str = "EVENT_INSIGHT_CONFIG";
/// Config file looked up in the working directory.
pub const CONFIG_FILE: &str = "event_insight.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// tracing filter used when RUST_LOG is unset
    pub log_filter: String,
    pub window_size: [f32; 2],
    /// Worksheet to read; first sheet when unset
    pub sheet: Option<String>,
    /// PNG export size in pixels
    pub export_size: [u32; 2],
    pub open_after_export: bool,
    /// Interface and report wording, `"en"` or `"ru"`
    pub language: Language,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_filter: "info".to_string(),
            window_size: [1200.0, 800.0],
            sheet: None,
            export_size: [1000, 600],
            open_after_export: true,
            language: Language::English,
        }
    }
}

impl AppConfig {
    /// Read `$EVENT_INSIGHT_CONFIG`, else `./event_insight.json`, else defaults.
    pub fn load() -> Result<Self, ConfigError> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Self::from_file(Path::new(&path));
        }

        let local = Path::new(CONFIG_FILE);
        if local.exists() {
            Self::from_file(local)
        } else {
            Ok(Self::default())
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }
}
