//! # Error Types
//!
//! Errors raised while decoding shared primitives.

use thiserror::Error;

/// Errors that can occur while decoding addresses and other encoded values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EncodingError {
    /// Input is not valid hexadecimal.
    #[error("Invalid hex: {0}")]
    InvalidHex(String),

    /// Decoded value has the wrong byte length.
    #[error("Invalid length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
}
