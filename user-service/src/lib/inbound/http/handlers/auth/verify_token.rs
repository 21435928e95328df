use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::middleware::CurrentUser;

pub async fn verify_token(
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> ApiSuccess<VerifyTokenResponseData> {
    ApiSuccess::new(
        StatusCode::OK,
        VerifyTokenResponseData {
            user_id: user.id.to_string(),
            email: user.email.as_str().to_string(),
        },
    )
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerifyTokenResponseData {
    pub user_id: String,
    pub email: String,
}
