use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

/// Error taxonomy for the attempt lifecycle. Each lifecycle failure is a
/// distinct kind so callers match on the variant, never on message text.
#[derive(Debug, Clone, Error)]
pub enum AppError {
    #[error("Unauthorized")]
    Unauthorized,

    #[error("Quiz not found")]
    QuizNotFound,

    #[error("No quiz attempt found")]
    AttemptNotFound,

    #[error("Quiz is not available at this time")]
    QuizNotAvailable,

    #[error("Quiz submission window closed")]
    SubmissionWindowClosed,

    #[error("Quiz already completed")]
    AlreadyCompleted,

    #[error("Quiz already submitted")]
    AlreadySubmitted,

    #[error("Request timed out. Please try again.")]
    Timeout,

    #[error("Already exists: {0}")]
    AlreadyExists(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    /// Whether the client may usefully retry with the same payload.
    /// Timeout is the only ambiguous-effect case; the update may or may not
    /// have committed before the timer fired.
    pub fn is_retryable(&self) -> bool {
        matches!(self, AppError::Timeout | AppError::DatabaseError(_))
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::QuizNotFound | AppError::AttemptNotFound => StatusCode::NOT_FOUND,
            AppError::QuizNotAvailable | AppError::SubmissionWindowClosed => StatusCode::FORBIDDEN,
            AppError::AlreadyCompleted | AppError::AlreadySubmitted => StatusCode::BAD_REQUEST,
            AppError::Timeout => StatusCode::GATEWAY_TIMEOUT,
            AppError::AlreadyExists(_) => StatusCode::CONFLICT,
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::DatabaseError(_) | AppError::InternalError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        // Store and internal failures are logged with full detail and returned
        // to the client as a generic message only.
        let message = match self {
            AppError::DatabaseError(detail) | AppError::InternalError(detail) => {
                log::error!("internal error: {}", detail);
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: message,
            code: self.status_code().as_u16(),
        })
    }
}

impl From<mongodb::error::Error> for AppError {
    fn from(err: mongodb::error::Error) -> Self {
        AppError::DatabaseError(err.to_string())
    }
}

impl From<mongodb::bson::ser::Error> for AppError {
    fn from(err: mongodb::bson::ser::Error) -> Self {
        AppError::InternalError(format!("BSON serialization error: {}", err))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::ValidationError(err.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;
