use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::router::AppState;
use crate::session::ports::SessionServicePort;
use crate::session::requests::RefreshRequest;

pub async fn refresh(
    State(state): State<AppState>,
    Json(body): Json<RefreshRequest>,
) -> Result<ApiSuccess<RefreshResponseData>, ApiError> {
    let report = state.validator.validate(&body);
    if !report.is_valid() {
        return Err(ApiError::Validation(report));
    }

    state
        .session_service
        .refresh(&body.refresh_token)
        .await
        .map_err(|e| {
            tracing::warn!("Token refresh rejected: {}", e);
            ApiError::from(e)
        })
        .map(|access_token| ApiSuccess::new(StatusCode::CREATED, RefreshResponseData { access_token }))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponseData {
    pub access_token: String,
}
