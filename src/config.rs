//! Host loop configuration.
//!
//! Loaded from an optional JSON file; every field has a default, so an
//! empty object (or no file at all) gives the standard setup.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Fixed ticks per second fed to `logic::tick`.
    pub ticks_per_sec: u32,
    /// Longest frame gap honoured by the clock, in milliseconds.
    pub max_frame_ms: f64,
    /// Quiet time after the last mutation before a snapshot is due.
    pub save_debounce_secs: f64,
    /// Snapshot at least this often while mutations keep coming.
    pub save_fallback_secs: f64,
    /// Game seconds the headless host plays.
    pub simulate_secs: u64,
    /// Manual clicks per second issued by the headless host.
    pub clicks_per_sec: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            ticks_per_sec: 10,
            max_frame_ms: 500.0,
            save_debounce_secs: 2.0,
            save_fallback_secs: 15.0,
            simulate_secs: 3_600,
            clicks_per_sec: 5.0,
        }
    }
}

impl EngineConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_gives_defaults() {
        assert_eq!(EngineConfig::from_json_str("{}").unwrap(), EngineConfig::default());
    }

    #[test]
    fn partial_override() {
        let config = EngineConfig::from_json_str(r#"{"ticks_per_sec": 30, "clicks_per_sec": 0}"#).unwrap();
        assert_eq!(config.ticks_per_sec, 30);
        assert_eq!(config.clicks_per_sec, 0.0);
        assert_eq!(config.simulate_secs, 3_600);
    }

    #[test]
    fn wrong_types_are_rejected() {
        let err = EngineConfig::from_json_str(r#"{"ticks_per_sec": "fast"}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = EngineConfig::load("/nonexistent/idle-click.json").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/idle-click.json"));
    }
}
