//! Engine configuration
//!
//! One serializable object carries every tunable of the pipeline. Missing
//! fields fall back to their defaults, so a config file only needs to name
//! what it changes.

use crate::actions::ActionMapping;
use crate::classifier::knn::DEFAULT_K;
use crate::processing::cursor_smoothing::CursorConfig;
use crate::processing::gesture_gate::GateConfig;
use crate::processing::pinch::PinchConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClassifierConfig {
    /// Neighbors consulted per vote
    pub k: usize,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self { k: DEFAULT_K }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    pub classifier: ClassifierConfig,
    pub gate: GateConfig,
    pub cursor: CursorConfig,
    pub pinch: PinchConfig,
    pub actions: ActionMapping,
}

impl EngineConfig {
    /// Read and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_json(&content)?;
        tracing::debug!("Loaded config from {}", path.as_ref().display());
        Ok(config)
    }

    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.classifier.k == 0 {
            return Err(invalid("classifier.k must be at least 1"));
        }

        let gate = &self.gate;
        if !(0.0..=1.0).contains(&gate.confidence_threshold) {
            return Err(invalid("gate.confidenceThreshold must be within [0, 1]"));
        }
        if !(gate.debounce_ms >= 0.0 && gate.cooldown_ms >= 0.0) {
            return Err(invalid("gate timings must not be negative"));
        }

        let zone = &self.cursor.active_zone;
        if !(zone.x_min < zone.x_max && zone.y_min < zone.y_max) {
            return Err(invalid("cursor.activeZone must have min < max on both axes"));
        }
        let alpha = self.cursor.smoothing;
        if !(alpha > 0.0 && alpha <= 1.0) {
            return Err(invalid("cursor.smoothing must be within (0, 1]"));
        }
        if self.cursor.screen.width == 0 || self.cursor.screen.height == 0 {
            return Err(invalid("cursor.screen must be non-zero"));
        }

        let pinch = &self.pinch;
        if !(pinch.close_threshold > 0.0) {
            return Err(invalid("pinch.closeThreshold must be positive"));
        }
        if !(pinch.release_threshold > pinch.close_threshold) {
            return Err(invalid("pinch.releaseThreshold must exceed closeThreshold"));
        }
        if !(pinch.click_cooldown_ms >= 0.0 && pinch.double_click_window_ms >= 0.0) {
            return Err(invalid("pinch timings must not be negative"));
        }

        Ok(())
    }
}

fn invalid(message: &str) -> ConfigError {
    ConfigError::Invalid(message.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.classifier.k, 5);
        assert_eq!(config.gate.confidence_threshold, 0.6);
        assert_eq!(config.gate.debounce_ms, 150.0);
        assert_eq!(config.gate.cooldown_ms, 600.0);
        assert_eq!(config.cursor.smoothing, 0.5);
        assert_eq!(config.cursor.screen.width, 1920);
        assert_eq!(config.cursor.screen.height, 1080);
        assert_eq!(config.cursor.active_zone.y_max, 0.65);
        assert_eq!(config.pinch.close_threshold, 0.045);
        assert_eq!(config.pinch.release_threshold, 0.065);
        assert_eq!(config.pinch.click_cooldown_ms, 300.0);
        assert_eq!(config.pinch.double_click_window_ms, 400.0);
        assert!(config.actions.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json() {
        let config = EngineConfig::from_json(
            r#"{
                "gate": {"debounceMs": 200},
                "cursor": {"screen": {"width": 2560, "height": 1440}},
                "actions": {"fist": "play_pause"}
            }"#,
        )
        .unwrap();

        assert_eq!(config.gate.debounce_ms, 200.0);
        assert_eq!(config.gate.cooldown_ms, 600.0);
        assert_eq!(config.cursor.screen.width, 2560);
        assert_eq!(config.cursor.smoothing, 0.5);
        assert_eq!(config.actions.action_for("fist"), Some("play_pause"));
    }

    #[test]
    fn test_invalid_values() {
        let cases = [
            r#"{"classifier": {"k": 0}}"#,
            r#"{"gate": {"confidenceThreshold": 1.5}}"#,
            r#"{"cursor": {"smoothing": 0}}"#,
            r#"{"cursor": {"activeZone": {"xMin": 0.9, "xMax": 0.1, "yMin": 0.1, "yMax": 0.6}}}"#,
            r#"{"cursor": {"screen": {"width": 0, "height": 100}}}"#,
            r#"{"pinch": {"closeThreshold": 0.07, "releaseThreshold": 0.06}}"#,
        ];
        for json in cases {
            assert!(
                matches!(EngineConfig::from_json(json), Err(ConfigError::Invalid(_))),
                "expected invalid: {}",
                json
            );
        }
    }

    #[test]
    fn test_nan_values_are_invalid() {
        let mut cases = Vec::new();
        let mut config = EngineConfig::default();
        config.gate.debounce_ms = f64::NAN;
        cases.push(config);
        let mut config = EngineConfig::default();
        config.gate.cooldown_ms = f64::NAN;
        cases.push(config);
        let mut config = EngineConfig::default();
        config.pinch.click_cooldown_ms = f64::NAN;
        cases.push(config);
        let mut config = EngineConfig::default();
        config.pinch.double_click_window_ms = f64::NAN;
        cases.push(config);
        let mut config = EngineConfig::default();
        config.pinch.close_threshold = f64::NAN;
        cases.push(config);
        let mut config = EngineConfig::default();
        config.pinch.release_threshold = f64::NAN;
        cases.push(config);
        let mut config = EngineConfig::default();
        config.gate.confidence_threshold = f64::NAN;
        cases.push(config);

        for config in cases {
            assert!(
                matches!(config.validate(), Err(ConfigError::Invalid(_))),
                "expected invalid: {:?}",
                config
            );
        }
    }

    #[test]
    fn test_negative_timings_are_invalid() {
        let mut config = EngineConfig::default();
        config.gate.debounce_ms = -1.0;
        assert!(config.validate().is_err());

        let mut config = EngineConfig::default();
        config.pinch.double_click_window_ms = -1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"classifier": {"k": 3}}"#).unwrap();
        assert_eq!(EngineConfig::load(&path).unwrap().classifier.k, 3);

        assert!(matches!(
            EngineConfig::load(dir.path().join("missing.json")),
            Err(ConfigError::Io(_))
        ));
    }
}
