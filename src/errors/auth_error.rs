use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Authentication error types
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Authorization header is missing from request
    #[error("Missing Authorization header")]
    MissingAuthHeader,

    /// Authorization header format is invalid (not "Bearer {token}")
    #[error("Invalid Authorization header format")]
    InvalidAuthHeader,

    /// Token does not match the configured secret
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::UNAUTHORIZED
    }

    /// Log the error at the appropriate level
    pub fn log(&self) {
        match self {
            // Debug level for expected auth failures (missing/invalid headers)
            AuthError::MissingAuthHeader | AuthError::InvalidAuthHeader => {
                tracing::debug!("{}", self);
            }
            AuthError::Unauthorized(msg) => {
                tracing::warn!("Unauthorized: {}", msg);
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();

        let status = self.status_code();

        // Response format: {"error": "human readable message"}
        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// Result type alias for convenience
pub type AuthResult<T> = Result<T, AuthError>;
