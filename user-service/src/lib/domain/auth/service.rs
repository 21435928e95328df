use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use auth::TokenClass;
use auth::TokenPair;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::Credentials;
use crate::domain::auth::ports::AuthServicePort;
use crate::domain::user::models::Password;
use crate::domain::user::models::User;
use crate::user::ports::UserRepository;

/// Verified against when the email is unknown, so both failures cost one
/// full password verification.
const DUMMY_PASSWORD: &str = "dummy-password-for-timing";

/// Login and refresh flows over the user store.
pub struct AuthService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
    dummy_hash: Option<String>,
}

impl<UR> AuthService<UR>
where
    UR: UserRepository,
{
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        let dummy_hash = authenticator
            .hash_password(DUMMY_PASSWORD)
            .map_err(|e| tracing::warn!(error = %e, "Failed to prepare dummy password hash"))
            .ok();

        Self {
            repository,
            authenticator,
            dummy_hash,
        }
    }

    async fn verify_password(
        &self,
        password: Password,
        password_hash: String,
    ) -> Result<bool, AuthError> {
        let authenticator = Arc::clone(&self.authenticator);
        tokio::task::spawn_blocking(move || {
            authenticator.verify_password(password.as_str(), &password_hash)
        })
        .await
        .map_err(|e| AuthError::Internal(format!("Password verification task failed: {}", e)))
    }

    fn issue_for(&self, user: &User) -> Result<TokenPair, AuthError> {
        self.authenticator
            .issue_tokens(&user.id.to_string(), user.email.as_str())
            .map_err(AuthError::from)
    }
}

#[async_trait]
impl<UR> AuthServicePort for AuthService<UR>
where
    UR: UserRepository,
{
    async fn login(&self, credentials: Credentials) -> Result<TokenPair, AuthError> {
        let Some(user) = self
            .repository
            .find_by_email(credentials.email.as_str())
            .await?
        else {
            if let Some(dummy_hash) = &self.dummy_hash {
                self.verify_password(credentials.password, dummy_hash.clone())
                    .await?;
            }
            tracing::warn!("Login failed: unknown email or wrong password");
            return Err(AuthError::AuthenticationFailed);
        };

        if !self
            .verify_password(credentials.password, user.password_hash.clone())
            .await?
        {
            tracing::warn!("Login failed: unknown email or wrong password");
            return Err(AuthError::AuthenticationFailed);
        }

        if !user.is_active {
            tracing::warn!(user_id = %user.id, "Login refused for disabled account");
            return Err(AuthError::AccountDisabled);
        }

        let tokens = self.issue_for(&user)?;
        tracing::info!(user_id = %user.id, "User logged in");

        Ok(tokens)
    }

    async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, AuthError> {
        let claims = self
            .authenticator
            .validate_token(refresh_token, TokenClass::Refresh)
            .map_err(|e| {
                tracing::warn!(error = %e, "Refresh token rejected");
                AuthError::InvalidToken
            })?;

        let Some(user) = self.repository.find_by_email(&claims.email).await? else {
            tracing::warn!(user_id = %claims.sub, "Refresh token owner no longer exists");
            return Err(AuthError::InvalidToken);
        };

        if !user.is_active {
            tracing::warn!(user_id = %user.id, "Refresh refused for disabled account");
            return Err(AuthError::AccountDisabled);
        }

        let tokens = self.issue_for(&user)?;
        tracing::info!(user_id = %user.id, "Tokens refreshed");

        Ok(tokens)
    }
}
