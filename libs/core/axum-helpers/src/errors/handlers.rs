use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::ErrorResponse;

/// Fallback handler for unmatched routes.
pub async fn not_found() -> Response {
    let body = Json(ErrorResponse::new("The requested resource was not found"));
    (StatusCode::NOT_FOUND, body).into_response()
}

/// Fallback for known paths hit with a method they do not serve.
pub async fn method_not_allowed() -> Response {
    let body = Json(ErrorResponse::new("Method not allowed"));
    (StatusCode::METHOD_NOT_ALLOWED, body).into_response()
}
