//! Machine configuration.

use crate::core::DEFAULT_HISTORY_LIMIT;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default bound on transitions chained from enter passes.
pub const DEFAULT_MAX_CHAINED_TRANSITIONS: usize = 8;

/// Errors produced while loading or validating a configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Configuration could not be parsed: {0}")]
    Parse(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Tunables for a single [`Fsm`](crate::fsm::Fsm).
///
/// Missing fields take their defaults, so a partial JSON document is
/// enough:
///
/// ```rust
/// use statecraft::FsmConfig;
///
/// let config = FsmConfig::from_json(r#"{ "history_limit": 4 }"#).unwrap();
/// assert_eq!(config.history_limit, 4);
/// assert_eq!(config.max_chained_transitions, 8);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FsmConfig {
    /// Number of state changes kept in the history; 0 disables recording
    pub history_limit: usize,

    /// How many transitions requested during enter passes may follow one
    /// another before the machine reports a loop
    pub max_chained_transitions: usize,
}

impl Default for FsmConfig {
    fn default() -> Self {
        Self {
            history_limit: DEFAULT_HISTORY_LIMIT,
            max_chained_transitions: DEFAULT_MAX_CHAINED_TRANSITIONS,
        }
    }
}

impl FsmConfig {
    /// Parse and validate a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_chained_transitions == 0 {
            return Err(ConfigError::Invalid(
                "max_chained_transitions must be at least 1".into(),
            ));
        }
        Ok(())
    }

    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self
    }

    pub fn with_max_chained_transitions(mut self, limit: usize) -> Self {
        self.max_chained_transitions = limit;
        self
    }
}
