use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;

use crate::core::transcode::TranscodeError;
use crate::core::tts::SynthesisError;

/// Application error type
///
/// Every variant is turned into a single response write of the form
/// `{"error": "<message>"}`. Errors that happen after a streaming response has
/// started never reach this type.
#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    NotFound,
    Synthesis(SynthesisError),
    EncoderStartup(TranscodeError),
    InternalServerError(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Synthesis(_)
            | AppError::EncoderStartup(_)
            | AppError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_message = match self {
            AppError::BadRequest(msg) => {
                tracing::warn!("Bad request: {}", msg);
                msg
            }
            AppError::NotFound => "Not found".to_string(),
            AppError::Synthesis(e) => {
                tracing::error!("Speech synthesis failed: {}", e);
                format!("Speech synthesis failed: {e}")
            }
            AppError::EncoderStartup(e) => {
                tracing::error!("{}", e);
                "Failed to start audio encoder".to_string()
            }
            AppError::InternalServerError(msg) => {
                tracing::error!("Internal server error: {}", msg);
                "Internal server error".to_string()
            }
        };

        let body = Json(json!({
            "error": error_message
        }));

        (status, body).into_response()
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::BadRequest(msg) => write!(f, "Bad request: {msg}"),
            AppError::NotFound => write!(f, "Not found"),
            AppError::Synthesis(e) => write!(f, "Speech synthesis failed: {e}"),
            AppError::EncoderStartup(e) => write!(f, "{e}"),
            AppError::InternalServerError(msg) => write!(f, "Internal server error: {msg}"),
        }
    }
}

impl std::error::Error for AppError {}

impl From<SynthesisError> for AppError {
    fn from(err: SynthesisError) -> Self {
        AppError::Synthesis(err)
    }
}

impl From<TranscodeError> for AppError {
    fn from(err: TranscodeError) -> Self {
        AppError::EncoderStartup(err)
    }
}

// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;
