use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::api::response;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("Failed to initialize OpenAI LLM. Check your API key. ({0})")]
    Initialization(String),

    #[error("Invalid YouTube URL format.")]
    InvalidVideoUrl,

    #[error("Transcripts are disabled for this video.")]
    TranscriptsDisabled,

    #[error("No transcript found for this video.")]
    NoTranscriptFound,

    #[error("Failed to extract transcript: {0}")]
    Transcript(String),

    #[error("Failed to fetch data: {0}")]
    FetchError(String),

    #[error("Error parsing content: {0}")]
    ParseError(String),

    #[error("LLM processing error: {0}")]
    LlmError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl AppError {
    /// Stable tag identifying the error category in API responses.
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "validation",
            AppError::Initialization(_) => "initialization",
            AppError::InvalidVideoUrl => "invalid_video_url",
            AppError::TranscriptsDisabled => "transcripts_disabled",
            AppError::NoTranscriptFound => "transcript_not_found",
            AppError::Transcript(_) => "transcript",
            AppError::FetchError(_) => "fetch",
            AppError::ParseError(_) => "parse",
            AppError::LlmError(_) => "llm",
            AppError::ConfigError(_) => "config",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::Initialization(_) | AppError::InvalidVideoUrl => {
                StatusCode::BAD_REQUEST
            }
            AppError::TranscriptsDisabled | AppError::ParseError(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            AppError::NoTranscriptFound => StatusCode::NOT_FOUND,
            AppError::Transcript(_) | AppError::FetchError(_) | AppError::LlmError(_) => {
                StatusCode::BAD_GATEWAY
            }
            AppError::ConfigError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        response::error::<()>(self.status_code(), self.kind(), self.to_string()).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
