use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use super::ApiError;
use super::ApiSuccess;
use super::UserData;
use crate::inbound::http::router::AppState;
use crate::user::models::Registration;
use crate::user::ports::UserServicePort;
use crate::user::requests::RegisterRequest;

pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<ApiSuccess<UserData>, ApiError> {
    match state.user_service.register(body).await? {
        Registration::Created(ref user) => Ok(ApiSuccess::new(StatusCode::CREATED, user.into())),
        Registration::Rejected(report) => Err(ApiError::Validation(report)),
    }
}
