use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::TokenClass;
use crate::jwt::TokenCodec;
use crate::jwt::TokenPair;
use crate::jwt::TokenSettings;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Authentication coordinator combining password hashing and token handling.
///
/// Holds no mutable state; share it behind an `Arc`.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_codec: TokenCodec,
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `settings` - Signing secret, algorithm and token lifetimes
    pub fn new(settings: &TokenSettings) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            token_codec: TokenCodec::new(settings),
        }
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Check a plaintext password against a stored hash.
    pub fn verify_password(&self, password: &str, stored_hash: &str) -> bool {
        self.password_hasher.verify(password, stored_hash)
    }

    /// Issue a fresh access/refresh pair for a subject.
    ///
    /// Issuance is stateless: previously issued tokens stay valid.
    ///
    /// # Errors
    /// * `JwtError` - Token generation failed
    pub fn issue_tokens(&self, subject_id: &str, email: &str) -> Result<TokenPair, JwtError> {
        self.token_codec.issue_pair(subject_id, email)
    }

    /// Validate a token of the expected class and return its claims.
    ///
    /// # Errors
    /// * `JwtError` - Signature, expiry, payload or class check failed
    pub fn validate_token(&self, token: &str, expected: TokenClass) -> Result<Claims, JwtError> {
        self.token_codec.verify(token, expected)
    }
}
