use axum::extract::State;
use axum::http::StatusCode;
use axum_extra::extract::cookie::CookieJar;

use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::MessageData;
use crate::inbound::http::router::AppState;

/// Clears both token cookies. Tokens themselves stay valid until expiry.
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, ApiSuccess<MessageData>) {
    (
        state.cookie_settings.clear_tokens(jar),
        ApiSuccess::new(
            StatusCode::OK,
            MessageData {
                message: "Successfully logged out".to_string(),
            },
        ),
    )
}
