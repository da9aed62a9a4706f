use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Failures reported by the persistence layer.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("focus mode {0} not found")]
    NotFound(i64),
    #[error("unknown tag id in {0:?}")]
    UnknownTag(Vec<i64>),
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Structured error written back to the client.
///
/// Serialized as `{ "code", "message", "status", "error" }` where `error`
/// carries the underlying cause.
#[derive(Debug, thiserror::Error)]
#[error("{code}: {message} ({detail})")]
pub struct ApiError {
    pub status: StatusCode,
    pub code: &'static str,
    pub message: String,
    pub detail: String,
}

impl ApiError {
    pub fn new(
        status: StatusCode,
        code: &'static str,
        message: impl Into<String>,
        detail: impl std::fmt::Display,
    ) -> Self {
        Self {
            status,
            code,
            message: message.into(),
            detail: detail.to_string(),
        }
    }

    pub fn bad_request(code: &'static str, message: impl Into<String>, detail: impl std::fmt::Display) -> Self {
        Self::new(StatusCode::BAD_REQUEST, code, message, detail)
    }

    pub fn internal(code: &'static str, message: impl Into<String>, detail: impl std::fmt::Display) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, code, message, detail)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = json!({
            "code": self.code,
            "message": self.message,
            "status": self.status.as_u16(),
            "error": self.detail,
        });
        (self.status, Json(body)).into_response()
    }
}
