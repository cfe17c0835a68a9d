//! Configuration errors
//!
//! Simulation operations never fail; only loading a `GameConfig` does.

use thiserror::Error;

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("max_delta_time must be finite and positive, got {0}")]
    InvalidDeltaTime(f64),

    #[error("board size must be finite and non-negative, got {width}x{height}")]
    InvalidBoundary { width: f64, height: f64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            ConfigError::InvalidDeltaTime(-1.0).to_string(),
            "max_delta_time must be finite and positive, got -1"
        );
        assert_eq!(
            ConfigError::InvalidBoundary {
                width: 10.0,
                height: -2.5
            }
            .to_string(),
            "board size must be finite and non-negative, got 10x-2.5"
        );
    }
}
