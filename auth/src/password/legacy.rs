//! Verification of bcrypt hashes written before the switch to Argon2id.

const BCRYPT_PREFIXES: [&str; 3] = ["$2a$", "$2b$", "$2y$"];

/// Whether the stored hash is in bcrypt modular crypt format.
pub fn is_bcrypt_hash(hash: &str) -> bool {
    BCRYPT_PREFIXES.iter().any(|prefix| hash.starts_with(prefix))
}

/// Verify already-truncated password bytes against a bcrypt hash.
///
/// Malformed hashes are reported as a mismatch.
pub(crate) fn verify_bcrypt(password: &[u8], hash: &str) -> bool {
    match bcrypt::verify(password, hash) {
        Ok(matches) => matches,
        Err(e) => {
            tracing::warn!(error = %e, "Stored bcrypt hash could not be parsed");
            false
        }
    }
}
