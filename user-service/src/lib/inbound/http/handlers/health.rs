use axum::http::StatusCode;
use serde::Serialize;

use super::ApiSuccess;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceInfoData {
    pub service: String,
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthData {
    pub status: String,
}

pub async fn root() -> ApiSuccess<ServiceInfoData> {
    ApiSuccess::new(
        StatusCode::OK,
        ServiceInfoData {
            service: "user-service".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
    )
}

pub async fn health() -> ApiSuccess<HealthData> {
    ApiSuccess::new(
        StatusCode::OK,
        HealthData {
            status: "healthy".to_string(),
        },
    )
}
