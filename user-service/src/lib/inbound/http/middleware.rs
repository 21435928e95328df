use axum::extract::Request;
use axum::extract::State;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use axum_extra::extract::cookie::CookieJar;

use crate::domain::auth::models::AccessTier;
use crate::domain::user::models::User;
use crate::inbound::http::cookies::token_from;
use crate::inbound::http::cookies::ACCESS_TOKEN_COOKIE;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Extension type holding the user resolved from the access token cookie
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

/// Requires a valid access token of an existing user.
pub async fn require_authenticated(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Response {
    guard(state, req, next, AccessTier::Authenticated).await
}

/// Requires an authenticated, active user.
pub async fn require_active(State(state): State<AppState>, req: Request, next: Next) -> Response {
    guard(state, req, next, AccessTier::Active).await
}

/// Requires an active admin.
pub async fn require_admin(State(state): State<AppState>, req: Request, next: Next) -> Response {
    guard(state, req, next, AccessTier::Admin).await
}

async fn guard(state: AppState, mut req: Request, next: Next, tier: AccessTier) -> Response {
    let token = token_from(&CookieJar::from_headers(req.headers()), ACCESS_TOKEN_COOKIE);

    match state
        .identity_gate
        .authorize(token.as_deref(), tier)
        .await
    {
        Ok(user) => {
            req.extensions_mut().insert(CurrentUser(user));
            next.run(req).await
        }
        Err(e) => {
            tracing::debug!(error = %e, tier = ?tier, uri = %req.uri(), "Request denied");
            ApiError::from(e).into_response()
        }
    }
}
