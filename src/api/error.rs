//! Error types for the library API.

use thiserror::Error;

/// Errors related to the record store (storage medium, configuration, etc.).
#[derive(Error, Debug)]
pub enum StoreError {
    /// An error occurred during store initialization.
    #[error("Failed to initialize store: {0}")]
    Init(String),

    /// The configuration file could not be read or parsed.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The requested prompt could not be found by its ID.
    #[error("Prompt '{0}' not found")]
    NotFound(String),

    /// The storage medium refused the operation (quota, permissions, disabled).
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// The persisted collection exists but could not be parsed.
    #[error("Stored collection is corrupted: {0}")]
    Corrupt(String),

    /// An underlying file I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to serialize or deserialize data.
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// A cryptographic operation on a sealed medium failed.
    #[error("Crypto error: {0}")]
    Crypto(String),

    /// The collection cannot be opened in the configured mode: wrong key,
    /// or sealed and plaintext mixed up. The data may still be intact, so
    /// writes must not replace it.
    #[error("Sealed collection cannot be opened: {0}")]
    Sealed(String),
}

/// Reasons a share token is rejected.
///
/// Both variants are the same "this link is invalid" outcome for the
/// consuming layer; they are kept apart so logs can say which check failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShareError {
    /// The token is not valid base64, not UTF-8, or not the expected JSON shape.
    #[error("Invalid share token: {0}")]
    InvalidToken(String),

    /// The token decoded but lacks a required field.
    #[error("Share token is missing required field '{0}'")]
    MissingField(&'static str),
}
