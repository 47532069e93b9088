// src/store/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    SerdeJson(#[from] serde_json::Error),
    #[error("Invalid item ids: {0}")]
    InvalidItemIds(String),
    #[error("Unknown attribute type: {0}")]
    UnknownAttributeType(String),
    #[error("Invalid settings: {0}")]
    InvalidSettings(String),
}

pub type StoreResult<T> = Result<T, StoreError>;
