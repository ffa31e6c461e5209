//! Mapping of domain failures onto HTTP responses

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use ck_core::errors::{DomainError, TokenError};
use ck_shared::errors::{error_codes, ErrorResponse};
use ck_shared::types::PaginationError;

use crate::dto::ErrorResponseExt;

/// Errors returned by handlers and middleware
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("{message}")]
    BadRequest { code: &'static str, message: String },

    #[error("{0}")]
    Unauthorized(String),
}

impl From<TokenError> for ApiError {
    fn from(error: TokenError) -> Self {
        ApiError::Domain(error.into())
    }
}

impl From<PaginationError> for ApiError {
    fn from(error: PaginationError) -> Self {
        ApiError::BadRequest {
            code: error_codes::INVALID_PAGINATION,
            message: error.to_string(),
        }
    }
}

/// HTTP status for a domain error
///
/// Token rejections are 401 except signing failures, which are server faults.
pub fn status_for(error: &DomainError) -> StatusCode {
    match error {
        DomainError::Token(TokenError::Signing { .. }) => StatusCode::INTERNAL_SERVER_ERROR,
        DomainError::Token(_) => StatusCode::UNAUTHORIZED,
        DomainError::Validation { .. } => StatusCode::BAD_REQUEST,
        DomainError::Cipher(_) | DomainError::Key(_) | DomainError::Internal { .. } => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl ApiError {
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::Domain(error) => error.error_code(),
            ApiError::BadRequest { code, .. } => *code,
            ApiError::Unauthorized(_) => error_codes::UNAUTHORIZED,
        }
    }

    fn to_error_response(&self) -> ErrorResponse {
        let message = match self.status_code() {
            // Server-side details stay in the logs
            StatusCode::INTERNAL_SERVER_ERROR => "An internal error occurred".to_string(),
            _ => self.to_string(),
        };
        ErrorResponse::new(self.error_code(), message)
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Domain(error) => status_for(error),
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(code = self.error_code(), error = %self, "Request failed");
        } else {
            tracing::warn!(code = self.error_code(), error = %self, "Request rejected");
        }
        self.to_error_response().to_response(status)
    }
}
