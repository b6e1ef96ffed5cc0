use std::env::VarError;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// The variable is set but unreadable (e.g. not unicode).
    #[error("Environment variable error: {0}")]
    EnvVarError(#[from] VarError),

    /// A value could not be parsed into the expected type.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// A value parsed but is not acceptable for this service.
    #[error("Invalid value for {key}: {reason}")]
    InvalidValue { key: String, reason: String },
}
