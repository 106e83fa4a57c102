use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

/// Failures surfaced to API clients as JSON bodies.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request is missing a usable `sessionId` cookie.
    #[error("missing or invalid session cookie")]
    Unauthorized,

    /// The request body failed one or more structural checks.
    #[error("request validation failed")]
    Validation(Vec<String>),

    /// Anything that went wrong below the handlers. The client only sees a
    /// generic 500; the cause is logged server-side.
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                json!({ "error": "unauthorized" }),
            ),
            ApiError::Validation(details) => (
                StatusCode::BAD_REQUEST,
                json!({ "error": "validation failed", "details": details }),
            ),
            ApiError::Database(e) => {
                error!(error = %e, "database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "internal server error" }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
