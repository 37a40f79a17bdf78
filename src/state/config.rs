//! Session configuration.
//!
//! Every field has a default, so an empty JSON object is a valid config.

use std::fmt;
use std::time::Duration;

use serde::Deserialize;

use super::clock::{FINISHED_DELAY, THINKING_DELAY};

/// Longest delay a config may ask for (60 seconds).
pub const MAX_DELAY_MS: u64 = 60_000;

/// Tunables for a [`GameSession`](super::session::GameSession).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Computer think time before it moves.
    pub thinking_delay_ms: u64,

    /// How long a finished round stays on screen.
    pub finished_delay_ms: u64,

    /// Fixed RNG seed. Seeded from the clock when absent.
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            thinking_delay_ms: THINKING_DELAY.as_millis() as u64,
            finished_delay_ms: FINISHED_DELAY.as_millis() as u64,
            seed: None,
        }
    }
}

impl SessionConfig {
    /// Parse and validate a JSON config.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, millis) in [
            ("thinking_delay_ms", self.thinking_delay_ms),
            ("finished_delay_ms", self.finished_delay_ms),
        ] {
            if millis > MAX_DELAY_MS {
                return Err(ConfigError::DelayTooLong { field, millis });
            }
        }
        Ok(())
    }

    pub fn thinking_delay(&self) -> Duration {
        Duration::from_millis(self.thinking_delay_ms)
    }

    pub fn finished_delay(&self) -> Duration {
        Duration::from_millis(self.finished_delay_ms)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Config errors.
#[derive(Debug)]
pub enum ConfigError {
    Parse(serde_json::Error),
    DelayTooLong { field: &'static str, millis: u64 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "Invalid session config: {}", err),
            Self::DelayTooLong { field, millis } => write!(
                f,
                "{} is {}ms, longest allowed is {}ms",
                field, millis, MAX_DELAY_MS
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            Self::DelayTooLong { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults_are_one_and_three_seconds() {
        let config = SessionConfig::default();
        assert_eq!(config.thinking_delay(), Duration::from_secs(1));
        assert_eq!(config.finished_delay(), Duration::from_secs(3));
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_empty_object_is_default() {
        let config = SessionConfig::from_json("{}").unwrap();
        assert_eq!(config, SessionConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let config = SessionConfig::from_json(r#"{"thinking_delay_ms": 250, "seed": 7}"#).unwrap();
        assert_eq!(config.thinking_delay(), Duration::from_millis(250));
        assert_eq!(config.finished_delay(), FINISHED_DELAY);
        assert_eq!(config.seed, Some(7));
    }

    #[test]
    fn test_rejects_long_delay() {
        let err = SessionConfig::from_json(r#"{"finished_delay_ms": 120000}"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::DelayTooLong {
                field: "finished_delay_ms",
                millis: 120_000
            }
        ));
        assert!(err.to_string().contains("finished_delay_ms"));
    }

    #[test]
    fn test_parse_error_has_source() {
        let err = SessionConfig::from_json("not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(std::error::Error::source(&err).is_some());
    }
}
