//! Token service module for ES512-signed JWTs
//!
//! This module handles:
//! - P-521 keypair generation and PEM persistence
//! - Access/refresh token issuance
//! - Ordered signature and claim verification

mod config;
mod jws;
mod key_manager;
mod service;

#[cfg(test)]
mod tests;

pub use config::{TokenServiceConfig, DEFAULT_AUDIENCE, DEFAULT_ISSUER};
pub use jws::Header;
pub use key_manager::{
    generate_keypair, load_or_generate, load_private_key, save_private_key, Es512KeyPair,
    PEM_BLOCK_TYPE,
};
pub use service::{issue_token, issue_token_pair, verify_token, verify_token_at, TokenService};

pub use p521::ecdsa::VerifyingKey;
