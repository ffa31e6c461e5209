//! Cryptographic services.

pub mod cipher;
pub mod token;

// Re-export commonly used types
pub use cipher::SymmetricKey;
pub use token::{Es512KeyPair, TokenService, TokenServiceConfig};
