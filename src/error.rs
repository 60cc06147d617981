//! Error types for data-driven configuration.
//!
//! Nothing in the per-tick entity model can fail: out-of-range hit points and
//! shooting power are clamped. The only fallible surface is configuration,
//! where an enemy parameter table is edited by key. Those failures are
//! returned as values so a bad override is logged and skipped instead of
//! stopping the game loop.

use std::fmt;

/// Failure to apply a single enemy parameter override.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamError {
    /// The key does not name any field of the parameter record.
    UnknownKey {
        /// The key as supplied by the caller.
        key: String,
    },

    /// The key exists but the value has the wrong shape.
    TypeMismatch {
        /// Name of the parameter.
        key: &'static str,
        /// Human-readable description of the accepted value.
        expected: &'static str,
    },

    /// The value has the right shape but is outside the accepted range.
    InvalidValue {
        /// Name of the parameter.
        key: &'static str,
        /// Human-readable description of the problem.
        reason: &'static str,
    },

    /// The config file used a value kind no parameter accepts (a table or a
    /// datetime).
    UnsupportedValue {
        /// The key as written in the file.
        key: String,
    },
}

impl fmt::Display for ParamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamError::UnknownKey { key } => write!(f, "unknown enemy parameter '{}'", key),
            ParamError::TypeMismatch { key, expected } => {
                write!(f, "enemy parameter '{}' expects {}", key, expected)
            }
            ParamError::InvalidValue { key, reason } => {
                write!(f, "invalid value for enemy parameter '{}': {}", key, reason)
            }
            ParamError::UnsupportedValue { key } => {
                write!(f, "enemy parameter '{}' has an unsupported value type", key)
            }
        }
    }
}

impl std::error::Error for ParamError {}

/// Convenience alias: a `Result` using `ParamError` as the error type.
pub type ParamResult<T> = Result<T, ParamError>;

/// Failure to load the TOML configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// The file is not valid TOML or does not match the config layout.
    Parse(toml::de::Error),

    /// The `[enemies.<kind>]` table names a kind that does not exist.
    UnknownEnemy {
        /// The table name as written in the file.
        name: String,
    },

    /// An enemy override was rejected by the parameter table.
    Param {
        /// Enemy kind name the override targeted.
        enemy: String,
        source: ParamError,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Parse(e) => write!(f, "config parse error: {}", e),
            ConfigError::UnknownEnemy { name } => {
                write!(f, "config names unknown enemy kind '{}'", name)
            }
            ConfigError::Param { enemy, source } => write!(f, "{}: {}", enemy, source),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Parse(e) => Some(e),
            ConfigError::UnknownEnemy { .. } => None,
            ConfigError::Param { source, .. } => Some(source),
        }
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}
