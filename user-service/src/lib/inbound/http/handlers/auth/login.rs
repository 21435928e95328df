use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use axum_extra::extract::cookie::CookieJar;
use axum_extra::extract::WithRejection;
use serde::Deserialize;

use super::TokenResponseData;
use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::Credentials;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Password;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    WithRejection(Json(body), _): WithRejection<Json<LoginRequest>, ApiError>,
) -> Result<(CookieJar, ApiSuccess<TokenResponseData>), ApiError> {
    let credentials = body.try_into_credentials()?;

    let tokens = state.auth_service.login(credentials).await?;

    Ok((
        state.cookie_settings.set_tokens(jar, &tokens),
        ApiSuccess::new(StatusCode::OK, (&tokens).into()),
    ))
}

/// HTTP request body for login (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequest {
    email: String,
    password: String,
}

impl LoginRequest {
    fn try_into_credentials(self) -> Result<Credentials, ApiError> {
        let email = EmailAddress::new(self.email)
            .map_err(|e| ApiError::UnprocessableEntity(format!("Invalid email: {}", e)))?;

        // Out-of-policy passwords can never match a stored hash
        let password = Password::new(self.password)
            .map_err(|_| ApiError::from(AuthError::AuthenticationFailed))?;

        Ok(Credentials { email, password })
    }
}
