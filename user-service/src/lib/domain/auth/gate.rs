use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use auth::TokenClass;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::ports::IdentityGatePort;
use crate::domain::user::models::User;
use crate::user::ports::UserRepository;

/// Resolves an access token to a user and enforces the access tiers.
///
/// Checks short-circuit in order: token presence, token validity, identity
/// lookup, active flag, admin flag.
pub struct IdentityGate<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
}

impl<UR> IdentityGate<UR>
where
    UR: UserRepository,
{
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }
}

#[async_trait]
impl<UR> IdentityGatePort for IdentityGate<UR>
where
    UR: UserRepository,
{
    async fn require_authenticated(&self, token: Option<&str>) -> Result<User, AuthError> {
        let token = token.ok_or(AuthError::Unauthenticated)?;

        let claims = self
            .authenticator
            .validate_token(token, TokenClass::Access)
            .map_err(|e| {
                tracing::debug!(error = %e, "Access token rejected");
                AuthError::Unauthenticated
            })?;

        self.repository
            .find_by_email(&claims.email)
            .await?
            .ok_or_else(|| {
                tracing::debug!(user_id = %claims.sub, "Access token owner no longer exists");
                AuthError::Unauthenticated
            })
    }

    async fn require_active(&self, token: Option<&str>) -> Result<User, AuthError> {
        let user = self.require_authenticated(token).await?;

        if !user.is_active {
            tracing::warn!(user_id = %user.id, "Inactive user denied");
            return Err(AuthError::Forbidden);
        }

        Ok(user)
    }

    async fn require_admin(&self, token: Option<&str>) -> Result<User, AuthError> {
        let user = self.require_active(token).await?;

        if !user.is_admin {
            tracing::warn!(user_id = %user.id, "Non-admin user denied");
            return Err(AuthError::Forbidden);
        }

        Ok(user)
    }
}
