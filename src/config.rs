use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_DECK_SIZE: usize = 12;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid swipe config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{field} must be a positive number, got {value}")]
    NotPositive { field: &'static str, value: f64 },
    #[error("deck_size must be at least 1")]
    EmptyDeck,
}

/// Which optional controls the widget offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Features {
    pub undo: bool,
    pub restart: bool,
    pub dark_mode: bool,
}

impl Default for Features {
    fn default() -> Self {
        Self {
            undo: true,
            restart: true,
            dark_mode: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwipeConfig {
    /// Horizontal distance a drag has to exceed to commit.
    pub commit_threshold: f64,
    pub rotation_divisor: f64,
    pub opacity_divisor: f64,
    pub exit_rotation_deg: f64,
    /// Matches the exit transition in the stylesheet.
    pub settle_duration_ms: u32,
    pub deck_size: usize,
    pub features: Features,
}

impl Default for SwipeConfig {
    fn default() -> Self {
        Self::upgraded()
    }
}

impl SwipeConfig {
    /// Full widget: buttons, undo, restart and the dark-mode toggle.
    pub fn upgraded() -> Self {
        Self {
            commit_threshold: 110.0,
            rotation_divisor: 18.0,
            opacity_divisor: 120.0,
            exit_rotation_deg: 30.0,
            settle_duration_ms: 260,
            deck_size: DEFAULT_DECK_SIZE,
            features: Features::default(),
        }
    }

    /// Plain swipe-only widget.
    pub fn basic() -> Self {
        Self {
            commit_threshold: 100.0,
            rotation_divisor: 20.0,
            opacity_divisor: 100.0,
            features: Features {
                undo: false,
                restart: false,
                dark_mode: false,
            },
            ..Self::upgraded()
        }
    }

    /// Parses overrides on top of the defaults. Missing fields keep their default.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: SwipeConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("commit_threshold", self.commit_threshold),
            ("rotation_divisor", self.rotation_divisor),
            ("opacity_divisor", self.opacity_divisor),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::NotPositive { field, value });
            }
        }
        if self.deck_size == 0 {
            return Err(ConfigError::EmptyDeck);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_differ_in_tuning_and_features() {
        let upgraded = SwipeConfig::upgraded();
        let basic = SwipeConfig::basic();
        assert_eq!(upgraded.commit_threshold, 110.0);
        assert_eq!(basic.commit_threshold, 100.0);
        assert_eq!(upgraded.rotation_divisor, 18.0);
        assert_eq!(basic.rotation_divisor, 20.0);
        assert_eq!(basic.settle_duration_ms, upgraded.settle_duration_ms);
        assert!(upgraded.features.undo);
        assert!(!basic.features.undo);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config =
            SwipeConfig::from_json(r#"{"commit_threshold": 90, "features": {"undo": false}}"#)
                .unwrap();
        assert_eq!(config.commit_threshold, 90.0);
        assert_eq!(config.rotation_divisor, 18.0);
        assert!(!config.features.undo);
        assert!(config.features.restart);
    }

    #[test]
    fn rejects_non_positive_divisor() {
        let err = SwipeConfig::from_json(r#"{"rotation_divisor": 0}"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::NotPositive {
                field: "rotation_divisor",
                ..
            }
        ));
    }

    #[test]
    fn rejects_empty_deck_and_garbage() {
        assert!(matches!(
            SwipeConfig::from_json(r#"{"deck_size": 0}"#),
            Err(ConfigError::EmptyDeck)
        ));
        assert!(matches!(
            SwipeConfig::from_json("not json"),
            Err(ConfigError::Parse(_))
        ));
    }
}
