//! Engine configuration
//!
//! Loaded from JSON by hosts that want to tweak gameplay without rebuilding.

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_DELTA_TIME, STARTING_BALLS};
use crate::error::{ConfigError, ConfigResult};

/// Gameplay settings for one engine instance
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Balls available at the start of a game
    pub starting_balls: u32,
    /// Largest step a single refresh integrates (seconds)
    pub max_delta_time: f64,
    /// Seed for entity id allocation
    pub id_seed: u64,

    // === Play area ===
    pub board_width: f64,
    pub board_height: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            starting_balls: STARTING_BALLS,
            max_delta_time: MAX_DELTA_TIME,
            id_seed: 0,

            board_width: 800.0,
            board_height: 1000.0,
        }
    }
}

impl GameConfig {
    /// Parse and validate a JSON config. Missing fields take their defaults.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        log::info!(
            "Loaded config: {} balls, max dt {:.4}s, {}x{} board",
            config.starting_balls, config.max_delta_time, config.board_width, config.board_height
        );
        Ok(config)
    }

    pub fn to_json(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if !(self.max_delta_time.is_finite() && self.max_delta_time > 0.0) {
            return Err(ConfigError::InvalidDeltaTime(self.max_delta_time));
        }

        let valid_side = |side: f64| side.is_finite() && side >= 0.0;
        if !valid_side(self.board_width) || !valid_side(self.board_height) {
            return Err(ConfigError::InvalidBoundary {
                width: self.board_width,
                height: self.board_height,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.starting_balls, 10);
        assert_eq!(config.max_delta_time, 1.0 / 60.0);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = GameConfig::from_json(r#"{"starting_balls": 3}"#);
        assert!(matches!(config, Ok(c) if c.starting_balls == 3 && c.max_delta_time == MAX_DELTA_TIME));
    }

    #[test]
    fn test_json_round_trip() {
        let config = GameConfig {
            id_seed: 77,
            ..Default::default()
        };
        let parsed = config.to_json().and_then(|json| GameConfig::from_json(&json));
        assert!(matches!(parsed, Ok(c) if c == config));
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            GameConfig::from_json(r#"{"max_delta_time": 0.0}"#),
            Err(ConfigError::InvalidDeltaTime(_))
        ));
        assert!(matches!(
            GameConfig::from_json(r#"{"board_width": -1.0}"#),
            Err(ConfigError::InvalidBoundary { .. })
        ));
        assert!(matches!(
            GameConfig::from_json("not json"),
            Err(ConfigError::Parse(_))
        ));
    }
}
