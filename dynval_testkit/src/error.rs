//! Environment mocking errors

use thiserror::Error;

/// Environment mocking error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnvError {
    /// Key is empty or contains `=` or NUL
    #[error("invalid environment key {0:?}")]
    InvalidKey(String),

    /// Value contains NUL
    #[error("invalid environment value for key {0:?}")]
    InvalidValue(String),
}

/// Result type alias for environment mocking
pub type EnvResult<T> = Result<T, EnvError>;
