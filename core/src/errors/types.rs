//! Error kinds raised by the cipher, key and token services.
//!
//! Each enum maps one-to-one onto the failure modes a caller must be able to
//! distinguish. Messages never include key material, plaintext, or the reason
//! an authentication check failed.

use thiserror::Error;

/// Symmetric encryption errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CipherError {
    #[error("Random source failure: {message}")]
    RandomSource { message: String },

    #[error("Invalid key length: expected 32 bytes, got {actual}")]
    InvalidKey { actual: usize },

    #[error("Malformed ciphertext: {reason}")]
    MalformedCiphertext { reason: String },

    #[error("Ciphertext authentication failed")]
    Authentication,
}

impl CipherError {
    /// Stable machine-readable code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::RandomSource { .. } => "RANDOM_SOURCE_FAILURE",
            Self::InvalidKey { .. } => "INVALID_KEY",
            Self::MalformedCiphertext { .. } => "MALFORMED_CIPHERTEXT",
            Self::Authentication => "AUTHENTICATION_FAILED",
        }
    }
}

/// Signing key generation and persistence errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KeyError {
    #[error("Random source failure: {message}")]
    RandomSource { message: String },

    #[error("Invalid key format: {message}")]
    KeyFormat { message: String },

    #[error("Key storage failure: {message}")]
    KeyStorage { message: String },
}

impl KeyError {
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::RandomSource { .. } => "RANDOM_SOURCE_FAILURE",
            Self::KeyFormat { .. } => "KEY_FORMAT_INVALID",
            Self::KeyStorage { .. } => "KEY_STORAGE_FAILED",
        }
    }
}

/// Token issuance and verification errors
///
/// Verification stops at the first failing check, so at most one of these
/// is reported per token.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token signing failed: {message}")]
    Signing { message: String },

    #[error("Malformed token: {reason}")]
    Malformed { reason: String },

    #[error("Unexpected signing algorithm: {algorithm}")]
    AlgorithmMismatch { algorithm: String },

    #[error("Invalid signature")]
    SignatureInvalid,

    #[error("Token claims are not a JSON object")]
    ClaimsType,

    #[error("Issuer mismatch: {found}")]
    IssuerMismatch { found: String },

    #[error("Audience mismatch: {found}")]
    AudienceMismatch { found: String },

    #[error("Token not valid before {not_before}")]
    TokenNotYetValid { not_before: i64 },

    #[error("Token has no expiration claim")]
    MissingExpiration,

    #[error("Token expired at {expired_at}")]
    TokenExpired { expired_at: i64 },
}

impl TokenError {
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Signing { .. } => "SIGNING_FAILED",
            Self::Malformed { .. } => "MALFORMED_TOKEN",
            Self::AlgorithmMismatch { .. } => "ALGORITHM_MISMATCH",
            Self::SignatureInvalid => "SIGNATURE_INVALID",
            Self::ClaimsType => "CLAIMS_TYPE_INVALID",
            Self::IssuerMismatch { .. } => "ISSUER_MISMATCH",
            Self::AudienceMismatch { .. } => "AUDIENCE_MISMATCH",
            Self::TokenNotYetValid { .. } => "TOKEN_NOT_YET_VALID",
            Self::MissingExpiration => "MISSING_EXPIRATION",
            Self::TokenExpired { .. } => "TOKEN_EXPIRED",
        }
    }
}
