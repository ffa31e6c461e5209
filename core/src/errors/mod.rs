//! Domain-specific error types and error handling.

mod types;


pub use types::{CipherError, KeyError, TokenError};

use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Cipher(#[from] CipherError),

    #[error(transparent)]
    Key(#[from] KeyError),

    #[error(transparent)]
    Token(#[from] TokenError),
}

impl DomainError {
    /// Machine-readable code used in API error bodies
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "VALIDATION_ERROR",
            Self::Internal { .. } => "INTERNAL_ERROR",
            Self::Cipher(err) => err.error_code(),
            Self::Key(err) => err.error_code(),
            Self::Token(err) => err.error_code(),
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
