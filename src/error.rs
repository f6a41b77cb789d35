use thiserror::Error;

use crate::anqp::AnqpElementType;

/// Passpoint matching error types
#[derive(Error, Debug)]
pub enum MatchError {
    #[error("Invalid domain: {0}")]
    InvalidDomain(String),

    #[error("ANQP element type mismatch: expected {expected}, found {found}")]
    ElementTypeMismatch {
        expected: AnqpElementType,
        found: AnqpElementType,
    },

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, MatchError>;
