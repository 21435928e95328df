//! Authentication utilities library
//!
//! Provides the authentication building blocks of the user service:
//! - Password hashing (Argon2id, legacy bcrypt verification)
//! - Typed access/refresh JWT issuance and verification
//! - Authentication coordination
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! ```
//!
//! ## Typed Tokens
//! ```
//! use auth::{TokenClass, TokenCodec, TokenSettings};
//!
//! let codec = TokenCodec::new(&TokenSettings::new("secret_key_at_least_32_bytes_long!"));
//! let pair = codec.issue_pair("user123", "alice@example.com").unwrap();
//!
//! let claims = codec.verify(&pair.access_token, TokenClass::Access).unwrap();
//! assert_eq!(claims.email, "alice@example.com");
//!
//! // A refresh token never passes as an access token
//! assert!(codec.verify(&pair.refresh_token, TokenClass::Access).is_err());
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::Authenticator;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use jwt::TokenClass;
pub use jwt::TokenCodec;
pub use jwt::TokenPair;
pub use jwt::TokenSettings;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use password::MAX_PASSWORD_BYTES;
