use auth::TokenPair;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::router::AppState;
use crate::session::ports::SessionServicePort;
use crate::session::requests::LoginRequest;

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<ApiSuccess<TokenPair>, ApiError> {
    let report = state.validator.validate(&body);
    if !report.is_valid() {
        return Err(ApiError::Validation(report));
    }

    state
        .session_service
        .login(&body.email, &body.password)
        .await
        .map_err(|e| {
            tracing::warn!(email = %body.email, "Login rejected: {}", e);
            ApiError::from(e)
        })
        .map(|pair| ApiSuccess::new(StatusCode::OK, pair))
}
