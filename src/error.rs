use axum::Json;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

pub mod error_codes {
    pub const INVALID_REQUEST: i32 = 101;
    pub const INTERNAL: i32 = 102;
    pub const DATABASE: i32 = 103;
    pub const INVALID_AUTH: i32 = 104;
    pub const NOT_FOUND: i32 = 105;
    pub const DUPLICATE_KEY: i32 = 107;
}

/// Transport-facing error taxonomy. `Display` is the safe outward message;
/// the payload string is internal detail that only ever reaches the logs.
/// Database and internal failures collapse to one generic message.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("invalid request parameters")]
    InvalidRequest(String),
    #[error("failed to process the request at this time, please try again later.")]
    Internal(String),
    #[error("failed to process the request at this time, please try again later.")]
    Database(String),
    #[error("email or passcode invalid")]
    InvalidAuth(String),
    #[error("the requested resource does not exist")]
    NotFound(String),
    #[error("this email already exists, please use a different email address")]
    DuplicateKey(String),
}

#[derive(Serialize)]
struct ErrorResponse {
    code: i32,
    error_type: &'static str,
    error_message: String,
}

impl AppError {
    pub fn code(&self) -> i32 {
        match self {
            AppError::InvalidRequest(_) => error_codes::INVALID_REQUEST,
            AppError::Internal(_) => error_codes::INTERNAL,
            AppError::Database(_) => error_codes::DATABASE,
            AppError::InvalidAuth(_) => error_codes::INVALID_AUTH,
            AppError::NotFound(_) => error_codes::NOT_FOUND,
            AppError::DuplicateKey(_) => error_codes::DUPLICATE_KEY,
        }
    }

    pub fn error_type(&self) -> &'static str {
        match self {
            AppError::InvalidRequest(_) => "InvalidRequestErr",
            AppError::Internal(_) => "InternalErr",
            AppError::Database(_) => "DatabaseErr",
            AppError::InvalidAuth(_) => "InvalidAuthErr",
            AppError::NotFound(_) => "NotFoundErr",
            AppError::DuplicateKey(_) => "DuplicateKeyErr",
        }
    }

    /// Internal detail, never serialized into a response.
    pub fn detail(&self) -> &str {
        match self {
            AppError::InvalidRequest(detail)
            | AppError::Internal(detail)
            | AppError::Database(detail)
            | AppError::InvalidAuth(detail)
            | AppError::NotFound(detail)
            | AppError::DuplicateKey(detail) => detail,
        }
    }

    /// Logs the internal detail and passes the error through. Handlers call
    /// this at the point where raw failures are mapped into the taxonomy.
    pub fn log(self, op: &'static str) -> Self {
        tracing::error!(op, code = self.code(), detail = %self.detail(), "request failed");
        self
    }

    fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(_) | AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::InvalidAuth(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::DuplicateKey(_) => StatusCode::CONFLICT,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse {
            code: self.code(),
            error_type: self.error_type(),
            error_message: self.to_string(),
        });

        (self.status(), body).into_response()
    }
}
