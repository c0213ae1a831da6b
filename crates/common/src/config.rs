//! Application configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Global application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Default mask parameters.
    pub masks: MaskDefaults,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Default mask-generation parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaskDefaults {
    /// Default edge-detection operator name.
    pub operator: String,

    /// Low threshold: anything at or below is zeroed.
    pub low_threshold: f64,

    /// High threshold: anything above is pushed to the range peak.
    /// `None` means the format peak (no high clipping).
    pub high_threshold: Option<f64>,

    /// Multiplier applied before thresholding.
    pub multiplier: f64,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "maskwork=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,

    /// Optional log file path.
    pub file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            masks: MaskDefaults::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for MaskDefaults {
    fn default() -> Self {
        Self {
            operator: "kirsch".to_string(),
            low_threshold: 0.0,
            high_threshold: None,
            multiplier: 1.0,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file: None,
        }
    }
}

impl AppConfig {
    /// Load config from the standard location, falling back to defaults.
    pub fn load() -> Self {
        let config_path = config_file_path();
        if config_path.exists() {
            match std::fs::read_to_string(&config_path) {
                Ok(content) => match serde_json::from_str(&content) {
                    Ok(config) => return config,
                    Err(e) => {
                        tracing::warn!("Failed to parse config at {:?}: {}", config_path, e);
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read config at {:?}: {}", config_path, e);
                }
            }
        }
        Self::default()
    }

    /// Save config to the standard location.
    pub fn save(&self) -> Result<(), std::io::Error> {
        let config_path = config_file_path();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(config_path, json)
    }
}

/// Standard config file location.
fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("maskwork").join("config.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_mask_params_are_passthrough() {
        let defaults = MaskDefaults::default();
        assert_eq!(defaults.low_threshold, 0.0);
        assert!(defaults.high_threshold.is_none());
        assert_eq!(defaults.multiplier, 1.0);
    }

    #[test]
    fn config_roundtrips_through_json() {
        let config = AppConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: AppConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.masks.operator, config.masks.operator);
        assert_eq!(parsed.logging.level, config.logging.level);
    }
}
