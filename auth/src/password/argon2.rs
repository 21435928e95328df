use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Argon2;

use super::errors::PasswordError;
use super::legacy;

/// Number of password bytes that take part in hashing.
///
/// Anything past this is ignored by both [`PasswordHasher::hash`] and
/// [`PasswordHasher::verify`]. The limit comes from bcrypt, which produced
/// the hashes of earlier deployments, and is kept so those credentials
/// still verify.
pub const MAX_PASSWORD_BYTES: usize = 72;

/// Password hashing implementation.
///
/// New hashes are Argon2id in PHC string format. Verification also accepts
/// legacy bcrypt hashes.
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher;

impl PasswordHasher {
    /// Create a new password hasher instance.
    pub fn new() -> Self {
        Self
    }

    /// Hash a plaintext password securely.
    ///
    /// Uses Argon2id with random salt generation. The input is truncated to
    /// [`MAX_PASSWORD_BYTES`] bytes first.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to hash
    ///
    /// # Returns
    /// PHC string format hash (includes algorithm, parameters, salt, and hash)
    ///
    /// # Errors
    /// * `HashingFailed` - Password hashing operation failed
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();

        argon2
            .hash_password(truncate(password), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Verify a password against a stored hash.
    ///
    /// The digest comparison is constant-time. A wrong password and an
    /// unreadable stored hash both yield `false`.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `hash` - Stored hash, Argon2 PHC string or bcrypt
    pub fn verify(&self, password: &str, hash: &str) -> bool {
        let password = truncate(password);

        if legacy::is_bcrypt_hash(hash) {
            return legacy::verify_bcrypt(password, hash);
        }

        let parsed_hash = match PasswordHash::new(hash) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!(error = %e, "Stored password hash could not be parsed");
                return false;
            }
        };

        Argon2::default()
            .verify_password(password, &parsed_hash)
            .is_ok()
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

fn truncate(password: &str) -> &[u8] {
    let bytes = password.as_bytes();
    &bytes[..bytes.len().min(MAX_PASSWORD_BYTES)]
}
