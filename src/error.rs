//! Error types

use thiserror::Error;

/// Why an encoded timer list was rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("record {record}: unknown timer kind '{value}'")]
    InvalidTimerKind { record: usize, value: String },
    #[error("record {record}: invalid duration '{value}'")]
    InvalidDuration { record: usize, value: String },
    #[error("record {record}: invalid round count '{value}'")]
    InvalidRounds { record: usize, value: String },
}

/// Key-value store failures. Never escapes the persistence layer.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Store I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}
