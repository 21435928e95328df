use thiserror::Error;

use super::claims::TokenClass;

/// Error type for JWT operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Failed to decode token: {0}")]
    DecodingFailed(String),

    #[error("Token signature is invalid")]
    InvalidSignature,

    #[error("Token is expired")]
    TokenExpired,

    #[error("Expected {expected} token, got {actual} token")]
    WrongTokenClass {
        expected: TokenClass,
        actual: TokenClass,
    },

    #[error("Unsupported signing algorithm: {0}")]
    UnsupportedAlgorithm(String),
}
