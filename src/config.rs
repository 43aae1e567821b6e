//! Game configuration
//!
//! Construction-time options. Every field has a default so partial JSON
//! documents load cleanly.

use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Largest accepted jump multiplier (cells at full power)
pub const MAX_JUMP_SHIFT: u32 = 1_000;

/// Jump distance multipliers applied to power (0..1)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct JumpShift {
    /// Multiplier when jumping from a hazard cell
    pub min: u32,
    /// Multiplier when jumping from a normal cell
    pub max: u32,
}

impl Default for JumpShift {
    fn default() -> Self {
        Self { min: 3, max: 10 }
    }
}

/// Game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Balls allotted per level attempt
    pub balls_per_level: u32,
    /// Animation frame interval (ms)
    pub tick_period_ms: f32,
    /// Cells ahead/behind the ball that are rendered and searched for landings
    pub visible_cell_window: usize,
    pub jump_shift: JumpShift,

    // === Rendering hints (read by the host) ===
    /// Cell edge length in pixels
    pub cell_size_px: f32,
    /// Ball radius as a fraction of the cell size
    pub ball_ratio: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            balls_per_level: 5,
            tick_period_ms: 20.0,
            visible_cell_window: 100,
            jump_shift: JumpShift::default(),

            cell_size_px: 35.0,
            ball_ratio: 0.2,
        }
    }
}

impl Config {
    /// Parse and validate a JSON document
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a JSON file, using defaults when it does not exist
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::warn!("Config {} not found, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(e) => return Err(e.into()),
        };
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.balls_per_level == 0 {
            return Err(invalid("balls_per_level", "must be at least 1"));
        }
        if !(self.tick_period_ms.is_finite() && self.tick_period_ms > 0.0) {
            return Err(invalid("tick_period_ms", "must be a positive number"));
        }
        if self.jump_shift.min > self.jump_shift.max {
            return Err(invalid("jump_shift", "min must not exceed max"));
        }
        if self.jump_shift.max > MAX_JUMP_SHIFT {
            return Err(ConfigError::Invalid {
                field: "jump_shift",
                reason: format!("max must not exceed {}", MAX_JUMP_SHIFT),
            });
        }
        if !(self.cell_size_px.is_finite() && self.cell_size_px > 0.0) {
            return Err(invalid("cell_size_px", "must be a positive number"));
        }
        if !(0.0..=0.5).contains(&self.ball_ratio) {
            return Err(invalid("ball_ratio", "must be within 0.0..=0.5"));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.balls_per_level, 5);
        assert_eq!(config.tick_period_ms, 20.0);
        assert_eq!(config.visible_cell_window, 100);
        assert_eq!(config.jump_shift, JumpShift { min: 3, max: 10 });
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = Config::from_json(r#"{ "balls_per_level": 3 }"#).unwrap();
        assert_eq!(config.balls_per_level, 3);
        assert_eq!(config.visible_cell_window, 100);
    }

    #[test]
    fn test_json_round_trip() {
        let mut config = Config::default();
        config.jump_shift = JumpShift { min: 2, max: 6 };
        let json = config.to_json().unwrap();
        assert_eq!(Config::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_rejects_zero_balls() {
        let err = Config::from_json(r#"{ "balls_per_level": 0 }"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "balls_per_level",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_inverted_shift() {
        let err = Config::from_json(r#"{ "jump_shift": { "min": 9, "max": 4 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "jump_shift", .. }));
    }

    #[test]
    fn test_rejects_oversized_shift() {
        let at_limit = Config {
            jump_shift: JumpShift {
                min: 3,
                max: MAX_JUMP_SHIFT,
            },
            ..Default::default()
        };
        assert!(at_limit.validate().is_ok());

        let err = Config::from_json(r#"{ "jump_shift": { "min": 3, "max": 500000000 } }"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "jump_shift", .. }));
    }

    #[test]
    fn test_unreadable_path_is_an_error() {
        // A directory exists but cannot be read as a file
        let dir = std::env::temp_dir();
        assert!(matches!(Config::load(&dir), Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_rejects_bad_json() {
        assert!(matches!(
            Config::from_json("{ nope"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = Config::load("/nonexistent/cell-golf.json").unwrap();
        assert_eq!(config, Config::default());
    }
}
