//! Symmetric authenticated encryption (AES-256-GCM)

pub mod envelope;
pub mod key;

pub use envelope::{decrypt, decrypt_to_string, encrypt, generate_key, NONCE_SIZE, TAG_SIZE};
pub use key::{SymmetricKey, KEY_SIZE};
