use axum::extract::Request;
use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;

use super::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Caller identity stored in request extensions by [`authenticate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub email: String,
}

/// Admits a request only with a valid, unexpired, authorized access token in
/// its `Authorization: Bearer` header.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    let claims = state.authenticator.authorize(header).map_err(|e| {
        tracing::warn!(uri = %req.uri(), "Request rejected: {}", e);
        ApiError::from(e)
    })?;

    req.extensions_mut().insert(AuthenticatedUser {
        email: claims.sub,
    });

    Ok(next.run(req).await)
}
