use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum BoardError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("forbidden: {0}")]
    Forbidden(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("internal error: {0}")]
    Internal(String),

    /// Storage failure. Classified as internal; any open transaction is rolled back.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl BoardError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            BoardError::NotFound(_) => StatusCode::NOT_FOUND,
            BoardError::Forbidden(_) => StatusCode::FORBIDDEN,
            BoardError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            BoardError::Internal(_) | BoardError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Malformed bodies, such as a negative `targetPosition`, are caller errors like any other.
impl From<JsonRejection> for BoardError {
    fn from(rejection: JsonRejection) -> Self {
        BoardError::InvalidArgument(rejection.body_text())
    }
}

impl IntoResponse for BoardError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match &self {
            BoardError::NotFound(msg)
            | BoardError::Forbidden(msg)
            | BoardError::InvalidArgument(msg) => msg.clone(),
            BoardError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "Internal server error".into()
            }
            BoardError::Database(err) => {
                tracing::error!("Database error: {:?}", err);
                "Internal server error".into()
            }
        };

        let body = json!({
            "error": message,
            "status": status.as_u16(),
        });

        (status, axum::Json(body)).into_response()
    }
}
