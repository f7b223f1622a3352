use crate::api::ErrorResponse;
use crate::AppState;
use axum::{
    body::Body,
    extract::State,
    http::{header, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use subtle::ConstantTimeEq;

fn unauthorized(message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
        .into_response()
}

/// Middleware that requires the configured bearer token.
/// Apply this to routes that should be protected by default.
pub async fn require_auth(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let Some(auth_header) = request.headers().get(header::AUTHORIZATION) else {
        return unauthorized("Missing Authorization header");
    };

    let Ok(auth_str) = auth_header.to_str() else {
        return unauthorized("Invalid Authorization header");
    };

    let Some(token) = auth_str.strip_prefix("Bearer ") else {
        return unauthorized("Invalid Authorization header format");
    };

    let expected = state.config.access_token.as_bytes();
    if !bool::from(token.trim().as_bytes().ct_eq(expected)) {
        tracing::warn!("Rejected request with invalid access token");
        return unauthorized("Invalid access token");
    }

    next.run(request).await
}
