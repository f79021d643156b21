//! WebServer-specific error types and their HTTP status mapping

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use orchestrator::AppealError;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WebServerError {
    #[error("Server startup error: {0}")]
    ServerStartup(String),

    #[error("{message}")]
    BadRequest { message: String },

    #[error(transparent)]
    Appeal(#[from] AppealError),
}

impl WebServerError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        WebServerError::BadRequest {
            message: message.into(),
        }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            WebServerError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            WebServerError::Appeal(err) => match err {
                AppealError::Validation { .. } | AppealError::Shared(_) => {
                    StatusCode::BAD_REQUEST
                }
                AppealError::NotFound { .. } => StatusCode::NOT_FOUND,
                AppealError::InvalidTransition { .. } | AppealError::Conflict { .. } => {
                    StatusCode::CONFLICT
                }
                AppealError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            WebServerError::ServerStartup(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for WebServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        // Storage details stay in the logs, not in the response body
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "internal error");
            "internal server error".to_string()
        } else {
            self.to_string()
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

pub type WebServerResult<T> = Result<T, WebServerError>;
