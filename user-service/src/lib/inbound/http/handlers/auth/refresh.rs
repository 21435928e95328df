use axum::extract::State;
use axum::http::StatusCode;
use axum_extra::extract::cookie::CookieJar;

use super::TokenResponseData;
use crate::inbound::http::cookies::token_from;
use crate::inbound::http::cookies::REFRESH_TOKEN_COOKIE;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn refresh(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, ApiSuccess<TokenResponseData>), ApiError> {
    let refresh_token = token_from(&jar, REFRESH_TOKEN_COOKIE)
        .ok_or_else(|| ApiError::Unauthorized("Refresh token not found".to_string()))?;

    let tokens = state.auth_service.refresh(&refresh_token).await?;

    Ok((
        state.cookie_settings.set_tokens(jar, &tokens),
        ApiSuccess::new(StatusCode::OK, (&tokens).into()),
    ))
}
