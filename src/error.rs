//! Error types for the Hartland library server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Numeric codes returned alongside every error body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorCode {
    Failure = 1,
    NotAuthorized = 2,
    BadValue = 3,
    Duplicate = 4,
    EmptyQuery = 5,
    BookNotAvailable = 6,
    NotAuthenticated = 7,
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Empty required field, non-numeric year, unparsable date...
    #[error("{0}")]
    Validation(String),

    #[error("A book with this ISBN already exists!")]
    DuplicateIsbn(String),

    #[error("Search query cannot be empty!")]
    EmptyQuery,

    /// Covers both an unknown book and one that is already checked out
    #[error("The book is not available for checkout.")]
    BookUnavailable(i32),

    #[error("Invalid username or password!")]
    Authentication,

    #[error("You need to log in first!")]
    Unauthenticated,

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub code: u32,
    pub error: String,
    pub message: String,
}

impl AppError {
    fn status_and_code(&self) -> (StatusCode, ErrorCode) {
        match self {
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, ErrorCode::BadValue),
            AppError::DuplicateIsbn(_) => (StatusCode::CONFLICT, ErrorCode::Duplicate),
            AppError::EmptyQuery => (StatusCode::BAD_REQUEST, ErrorCode::EmptyQuery),
            AppError::BookUnavailable(_) => (StatusCode::CONFLICT, ErrorCode::BookNotAvailable),
            AppError::Authentication => (StatusCode::UNAUTHORIZED, ErrorCode::NotAuthorized),
            AppError::Unauthenticated => (StatusCode::SEE_OTHER, ErrorCode::NotAuthenticated),
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, ErrorCode::Failure),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let AppError::Unauthenticated = self {
            return Redirect::to("/login").into_response();
        }

        let (status, code) = self.status_and_code();
        let message = match &self {
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        let body = Json(ErrorResponse {
            code: code as u32,
            error: format!("{:?}", code),
            message,
        });

        (status, body).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
