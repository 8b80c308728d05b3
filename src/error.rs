use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::time::Duration;
use thiserror::Error;

/// Failures of the HTTP shell. The engine itself never fails.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("input has {chars} characters, the limit is {limit}")]
    InputTooLarge { chars: usize, limit: usize },

    #[error("invalid page request: {0}")]
    InvalidPage(&'static str),

    #[error("processing did not finish within {0:?}")]
    Timeout(Duration),

    #[error("malformed upload: {0}")]
    Upload(String),

    #[error("uploaded file is not valid UTF-8")]
    InvalidUtf8,

    #[error("processing worker was cancelled")]
    Cancelled,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InputTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::InvalidPage(_) | ApiError::Upload(_) | ApiError::InvalidUtf8 => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            ApiError::Cancelled => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::warn!(error = %self, "request failed");
        }
        let body = Json(serde_json::json!({
            "success": false,
            "error": self.to_string(),
        }));
        (status, body).into_response()
    }
}
