//! Event domain error types

use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

/// Result type for event operations
pub type EventResult<T> = Result<T, EventError>;

/// Event domain errors
///
/// The `Display` text of each variant is the `message` returned to callers.
#[derive(Debug, Error)]
pub enum EventError {
    /// Identifier is not a well-formed ObjectId
    #[error("Invalid event ID")]
    InvalidId,

    /// No event with the given identifier
    #[error("Event not found")]
    NotFound,

    /// A required creation field is absent or falsy
    #[error("Missing required fields")]
    MissingFields,

    /// Neither lookup nor list mode was selected, or page/limit is negative
    #[error("Invalid query parameters")]
    InvalidQuery,

    /// Request body could not be turned into a document
    #[error("{0}")]
    InvalidBody(String),

    /// Driver or server failure; the message is passed through unchanged
    #[error("{0}")]
    Database(String),
}

impl From<mongodb::error::Error> for EventError {
    fn from(err: mongodb::error::Error) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<mongodb::bson::ser::Error> for EventError {
    fn from(err: mongodb::bson::ser::Error) -> Self {
        Self::InvalidBody(format!("Invalid field value: {}", err))
    }
}

impl From<validator::ValidationErrors> for EventError {
    fn from(_: validator::ValidationErrors) -> Self {
        Self::MissingFields
    }
}

// Convert to axum_helpers::AppError for HTTP responses
impl From<EventError> for AppError {
    fn from(err: EventError) -> Self {
        let message = err.to_string();
        match err {
            EventError::NotFound => AppError::NotFound(message),
            EventError::InvalidId
            | EventError::MissingFields
            | EventError::InvalidQuery
            | EventError::InvalidBody(_) => AppError::BadRequest(message),
            EventError::Database(_) => AppError::InternalServerError(message),
        }
    }
}

impl IntoResponse for EventError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (EventError::InvalidId, StatusCode::BAD_REQUEST),
            (EventError::MissingFields, StatusCode::BAD_REQUEST),
            (EventError::InvalidQuery, StatusCode::BAD_REQUEST),
            (EventError::NotFound, StatusCode::NOT_FOUND),
            (
                EventError::Database("socket closed".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(AppError::from(err).status(), status);
        }
    }

    #[test]
    fn test_database_message_is_verbatim() {
        let err = EventError::Database("server selection timeout".to_string());
        assert_eq!(err.to_string(), "server selection timeout");
    }
}
