use thiserror::Error;

use crate::user::errors::UserError;

/// Outcomes of the authentication flow and the identity gate.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    /// Unknown email and wrong password share this variant and message.
    #[error("Incorrect email or password")]
    AuthenticationFailed,

    #[error("User account is disabled")]
    AccountDisabled,

    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Not authenticated")]
    Unauthenticated,

    #[error("Insufficient permissions")]
    Forbidden,

    // Store or hashing failure, never an authentication outcome
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<UserError> for AuthError {
    fn from(err: UserError) -> Self {
        AuthError::Internal(err.to_string())
    }
}

impl From<auth::JwtError> for AuthError {
    fn from(err: auth::JwtError) -> Self {
        AuthError::Internal(err.to_string())
    }
}
