use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use axum_extra::extract::WithRejection;
use serde::Deserialize;
use serde::Serialize;

use crate::domain::user::models::Pagination;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::UserData;
use crate::inbound::http::router::AppState;

/// `?skip=&limit=` query parameters
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaginationParams {
    skip: Option<i64>,
    limit: Option<i64>,
}

impl PaginationParams {
    fn into_pagination(self) -> Result<Pagination, ApiError> {
        Pagination::new(
            self.skip.unwrap_or(0),
            self.limit.unwrap_or(Pagination::DEFAULT_LIMIT),
        )
        .map_err(ApiError::from)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserListData {
    pub total: i64,
    pub skip: i64,
    pub limit: i64,
    pub items: Vec<UserData>,
}

pub async fn list_users(
    State(state): State<AppState>,
    WithRejection(Query(params), _): WithRejection<Query<PaginationParams>, ApiError>,
) -> Result<ApiSuccess<UserListData>, ApiError> {
    let page = state
        .user_service
        .list_users(params.into_pagination()?)
        .await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        UserListData {
            total: page.total,
            skip: page.pagination.skip,
            limit: page.pagination.limit,
            items: page.items.iter().map(UserData::from).collect(),
        },
    ))
}

pub async fn list_active_users(
    State(state): State<AppState>,
    WithRejection(Query(params), _): WithRejection<Query<PaginationParams>, ApiError>,
) -> Result<ApiSuccess<Vec<UserData>>, ApiError> {
    let users = state
        .user_service
        .list_active_users(params.into_pagination()?)
        .await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        users.iter().map(UserData::from).collect(),
    ))
}
