use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::generation::client::GenerationError;
use crate::models::ApiResponse;

/// Request-terminating failures. Every variant renders as the standard
/// `{message, success: false}` envelope with the status the API contract
/// assigns to it. Recoverable conditions (skipped parse blocks, duplicate
/// exam names) never become an `AppError`.
#[derive(Debug)]
pub enum AppError {
    /// Missing or invalid request fields.
    Input(&'static str),
    Unauthorized,
    NotFound(&'static str),
    /// The generation provider call failed or returned a non-success status.
    Provider(String),
    /// The provider returned zero completions.
    EmptyGeneration,
    /// The provider call exceeded the client timeout.
    ProviderTimeout,
    /// The parser produced no usable question drafts.
    NoQuestionsGenerated,
    /// Some generated questions were saved before a persistence failure;
    /// saved rows are not rolled back.
    PartialGeneration,
    Internal(&'static str),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (code, message) = match self {
            AppError::Input(msg) => (StatusCode::BAD_REQUEST, msg.to_owned()),
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized".to_owned()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.to_owned()),
            AppError::Provider(detail) => {
                tracing::error!("generation provider failure: {detail}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Error generating quiz".to_owned(),
                )
            }
            AppError::EmptyGeneration => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Provider returned no completions".to_owned(),
            ),
            AppError::ProviderTimeout => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Generation provider timed out".to_owned(),
            ),
            AppError::NoQuestionsGenerated => (
                StatusCode::BAD_REQUEST,
                "Failed to generate valid questions.".to_owned(),
            ),
            AppError::PartialGeneration => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Quiz generation did not fully succeed".to_owned(),
            ),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.to_owned()),
        };

        (code, Json(ApiResponse::<()>::failure(message))).into_response()
    }
}

impl From<GenerationError> for AppError {
    fn from(err: GenerationError) -> Self {
        match err {
            GenerationError::Provider(detail) => AppError::Provider(detail),
            GenerationError::Timeout => AppError::ProviderTimeout,
            GenerationError::Empty => AppError::EmptyGeneration,
        }
    }
}

/// Adapter for turning internal errors into rejections while logging the
/// underlying cause, so handlers stay terse.
pub trait ResultExt<T> {
    fn reject(self, msg: &'static str) -> Result<T, AppError>;
}

impl<T, E: std::fmt::Display> ResultExt<T> for Result<T, E> {
    fn reject(self, msg: &'static str) -> Result<T, AppError> {
        self.map_err(|e| {
            tracing::error!("{msg}: {e}");
            AppError::Internal(msg)
        })
    }
}
