//! Bot configuration management.
//!
//! Consolidates all environment variable reads and provides validated configuration.

use std::path::PathBuf;
use tourney::handler::DEFAULT_MAX_PARTICIPANTS_LIMIT;

/// Default command prefix
pub const DEFAULT_PREFIX: &str = "!";

/// Complete bot configuration loaded from environment variables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotConfig {
    /// Prefix marking a chat message as a command
    pub command_prefix: String,
    /// JSON snapshot of the registry, none keeps state in memory only
    pub state_file: Option<PathBuf>,
    /// Seed for reproducible bracket seeding
    pub seed: Option<u64>,
    /// Largest tournament `create_tournament` accepts
    pub max_participants_limit: usize,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            command_prefix: DEFAULT_PREFIX.to_string(),
            state_file: None,
            seed: None,
            max_participants_limit: DEFAULT_MAX_PARTICIPANTS_LIMIT,
        }
    }
}

impl BotConfig {
    /// Load configuration from environment variables
    ///
    /// # Arguments
    ///
    /// * `prefix_override` - Optional command prefix override (from CLI args)
    /// * `state_file_override` - Optional snapshot path override (from CLI args)
    /// * `seed_override` - Optional seed override (from CLI args)
    ///
    /// # Errors
    ///
    /// Returns error if a variable is set but cannot be parsed
    pub fn from_env(
        prefix_override: Option<String>,
        state_file_override: Option<PathBuf>,
        seed_override: Option<u64>,
    ) -> Result<Self, ConfigError> {
        Self::from_vars(
            |key| std::env::var(key).ok(),
            prefix_override,
            state_file_override,
            seed_override,
        )
    }

    /// Load configuration through an arbitrary variable lookup
    fn from_vars(
        lookup: impl Fn(&str) -> Option<String>,
        prefix_override: Option<String>,
        state_file_override: Option<PathBuf>,
        seed_override: Option<u64>,
    ) -> Result<Self, ConfigError> {
        let command_prefix = prefix_override
            .or_else(|| lookup("COMMAND_PREFIX"))
            .unwrap_or_else(|| DEFAULT_PREFIX.to_string());

        let state_file = state_file_override.or_else(|| {
            lookup("TOURNAMENT_STATE_FILE")
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from)
        });

        let seed = match seed_override {
            Some(seed) => Some(seed),
            None => parse_var(&lookup, "TOURNAMENT_SEED")?,
        };

        let max_participants_limit = parse_var(&lookup, "MAX_PARTICIPANTS_LIMIT")?
            .unwrap_or(DEFAULT_MAX_PARTICIPANTS_LIMIT);

        Ok(BotConfig {
            command_prefix,
            state_file,
            seed,
            max_participants_limit,
        })
    }

    /// Validate configuration after loading
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.command_prefix.trim().is_empty() {
            return Err(ConfigError::Invalid {
                var: "COMMAND_PREFIX".to_string(),
                reason: "Must not be empty".to_string(),
            });
        }

        if self.command_prefix.chars().any(char::is_whitespace) {
            return Err(ConfigError::Invalid {
                var: "COMMAND_PREFIX".to_string(),
                reason: "Must not contain whitespace".to_string(),
            });
        }

        if self.max_participants_limit < 2 {
            return Err(ConfigError::Invalid {
                var: "MAX_PARTICIPANTS_LIMIT".to_string(),
                reason: "Must be at least 2".to_string(),
            });
        }

        Ok(())
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration for {var}: {reason}")]
    Invalid { var: String, reason: String },
}

/// Parse an optional variable, rejecting values that do not parse
fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|e: T::Err| ConfigError::Invalid {
                var: key.to_string(),
                reason: format!("'{}': {}", value, e),
            }),
        None => Ok(None),
    }
}
