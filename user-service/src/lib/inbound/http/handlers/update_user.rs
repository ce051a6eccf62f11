use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;

use super::ApiError;
use super::ApiSuccess;
use super::UserData;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;
use crate::user::models::UserId;
use crate::user::ports::UserServicePort;
use crate::user::requests::UpdateRequest;

pub async fn update_user(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    Path(user_id): Path<String>,
    Json(body): Json<UpdateRequest>,
) -> Result<ApiSuccess<UserData>, ApiError> {
    let user_id = UserId::from_string(&user_id).map_err(UserError::from)?;

    let report = state.validator.validate(&body);
    if !report.is_valid() {
        return Err(ApiError::Validation(report));
    }

    let user = state
        .user_service
        .update_user(&user_id, body.into_command())
        .await?;

    tracing::info!(caller = %caller.email, "Updated user {}", user.id);

    Ok(ApiSuccess::new(StatusCode::OK, (&user).into()))
}
