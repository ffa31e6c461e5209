//! # Credkit Core
//!
//! Cryptographic core of the Credkit backend: AES-256-GCM envelopes,
//! ES512 key management, and JWT issuance and verification.
//! Every operation is synchronous and holds no shared mutable state.

pub mod domain;
pub mod errors;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::entities::{Claims, TokenPair};
pub use errors::{CipherError, DomainError, DomainResult, KeyError, TokenError};
pub use services::{Es512KeyPair, SymmetricKey, TokenService, TokenServiceConfig};
