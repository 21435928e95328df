use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::header;
use axum::http::HeaderValue;
use axum::http::Method;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::patch;
use axum::routing::post;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::cookies::CookieSettings;
use super::handlers::auth;
use super::handlers::health;
use super::handlers::users;
use super::middleware::require_active;
use super::middleware::require_admin;
use super::middleware::require_authenticated;
use crate::domain::auth::ports::AuthServicePort;
use crate::domain::auth::ports::IdentityGatePort;
use crate::domain::user::ports::UserServicePort;

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServicePort>,
    pub auth_service: Arc<dyn AuthServicePort>,
    pub identity_gate: Arc<dyn IdentityGatePort>,
    pub cookie_settings: CookieSettings,
}

/// Transport-level settings of the router.
#[derive(Debug, Clone)]
pub struct HttpSettings {
    pub request_timeout: Duration,
    /// Empty means any origin, without credentials.
    pub allowed_origins: Vec<String>,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(30),
            allowed_origins: Vec::new(),
        }
    }
}

pub fn create_router(state: AppState, settings: &HttpSettings) -> Router {
    let auth_routes = Router::new()
        .route("/login", post(auth::login))
        .route("/refresh", post(auth::refresh))
        .route("/logout", post(auth::logout))
        .merge(
            Router::new()
                .route("/me", get(auth::me))
                .route_layer(middleware::from_fn_with_state(
                    state.clone(),
                    require_active,
                )),
        )
        .merge(
            Router::new()
                .route("/verify", get(auth::verify_token))
                .route_layer(middleware::from_fn_with_state(
                    state.clone(),
                    require_authenticated,
                )),
        );

    let user_routes = Router::new()
        .route("/", post(users::create_user))
        .merge(
            Router::new()
                .route("/list", get(users::list_users))
                .route("/active", get(users::list_active_users))
                .route_layer(middleware::from_fn_with_state(
                    state.clone(),
                    require_authenticated,
                )),
        )
        .merge(
            Router::new()
                .route("/:user_id", get(users::get_user))
                .route_layer(middleware::from_fn_with_state(
                    state.clone(),
                    require_active,
                )),
        )
        .merge(
            Router::new()
                .route(
                    "/:user_id",
                    patch(users::update_user).delete(users::delete_user),
                )
                .route("/:user_id/activate", post(users::activate_user))
                .route("/:user_id/deactivate", post(users::deactivate_user))
                .route_layer(middleware::from_fn_with_state(
                    state.clone(),
                    require_admin,
                )),
        );

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .route("/", get(health::root))
        .route("/health", get(health::health))
        .nest("/api/v1/auth", auth_routes)
        .nest("/api/v1/users", user_routes)
        .layer(
            ServiceBuilder::new()
                .layer(trace_layer)
                .layer(TimeoutLayer::new(settings.request_timeout))
                .layer(cors_layer(&settings.allowed_origins)),
        )
        .with_state(state)
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(origin = %origin, error = %e, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    // Cookies need credentials, which rule out wildcards
    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true)
}
