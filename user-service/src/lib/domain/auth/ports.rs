use async_trait::async_trait;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::AccessTier;
use crate::domain::auth::models::Credentials;
use crate::domain::user::models::User;

/// Port for the login and refresh flows.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Exchange credentials for a fresh token pair.
    ///
    /// # Errors
    /// * `AuthenticationFailed` - Unknown email or wrong password
    /// * `AccountDisabled` - Correct credentials of an inactive user
    /// * `Internal` - Store, hashing or signing failure
    async fn login(&self, credentials: Credentials) -> Result<auth::TokenPair, AuthError>;

    /// Exchange a valid refresh token for a brand-new token pair.
    ///
    /// # Errors
    /// * `InvalidToken` - Token invalid, expired, of the wrong class or its owner is gone
    /// * `AccountDisabled` - Owner is inactive
    /// * `Internal` - Store or signing failure
    async fn refresh(&self, refresh_token: &str) -> Result<auth::TokenPair, AuthError>;
}

/// Port guarding operations behind an access token.
#[async_trait]
pub trait IdentityGatePort: Send + Sync + 'static {
    /// # Errors
    /// * `Unauthenticated` - Token absent, invalid or its owner is gone
    async fn require_authenticated(&self, token: Option<&str>) -> Result<User, AuthError>;

    /// # Errors
    /// * `Unauthenticated` - As for `require_authenticated`
    /// * `Forbidden` - Owner is inactive
    async fn require_active(&self, token: Option<&str>) -> Result<User, AuthError>;

    /// # Errors
    /// * `Unauthenticated` - As for `require_authenticated`
    /// * `Forbidden` - Owner is inactive or not an admin
    async fn require_admin(&self, token: Option<&str>) -> Result<User, AuthError>;

    async fn authorize(&self, token: Option<&str>, tier: AccessTier) -> Result<User, AuthError> {
        match tier {
            AccessTier::Authenticated => self.require_authenticated(token).await,
            AccessTier::Active => self.require_active(token).await,
            AccessTier::Admin => self.require_admin(token).await,
        }
    }
}
