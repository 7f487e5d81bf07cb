//! # Error Types
//!
//! This module defines the error type used throughout the library.
//! All fallible operations return [`Result<T, SasTokenError>`](SasTokenError).

use thiserror::Error;

/// The error type for all token issuance operations.
///
/// The variants follow the stages a token passes through: buffer encoding,
/// the external collaborators, expiry extraction, and the wall clock.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SasTokenError {
    /// An output buffer cannot hold the encoded or decoded data.
    ///
    /// Nothing is written past the buffer and no output view is produced.
    #[error("Buffer too small: need {needed} bytes, capacity is {capacity}")]
    BufferTooSmall { needed: usize, capacity: usize },

    /// Base64 text is malformed (invalid alphabet, length, or padding).
    #[error("Invalid base64: {0}")]
    InvalidBase64(String),

    /// The signing-string provider or the token assembler reported failure.
    #[error("Provider error: {0}")]
    Provider(String),

    /// The expiry field of an assembled token is missing or unusable.
    ///
    /// Covers a missing `&se=` marker, an empty or non-numeric field, a value
    /// that overflows `u32`, and a zero expiry.
    #[error("Parse error: {0}")]
    Parse(String),

    /// The wall clock could not be read.
    #[error("Clock error: {0}")]
    Clock(String),

    /// Issuer construction rejected its inputs.
    #[error("Config error: {0}")]
    Config(String),
}

impl From<&'static str> for SasTokenError {
    fn from(msg: &'static str) -> Self {
        SasTokenError::Provider(msg.to_string())
    }
}
