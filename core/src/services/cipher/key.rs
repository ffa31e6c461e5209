//! 256-bit symmetric key material

use std::fmt;

use rand::{rngs::OsRng, RngCore};

use crate::errors::CipherError;

/// AES-256 key size in bytes
pub const KEY_SIZE: usize = 32;

/// Owned AES-256 key
///
/// The key bytes are never printed; `Debug` only reports the length.
#[derive(Clone, PartialEq, Eq)]
pub struct SymmetricKey([u8; KEY_SIZE]);

impl SymmetricKey {
    /// Draws a fresh key from the OS random source
    pub fn generate() -> Result<Self, CipherError> {
        let mut bytes = [0u8; KEY_SIZE];
        OsRng
            .try_fill_bytes(&mut bytes)
            .map_err(|e| CipherError::RandomSource {
                message: e.to_string(),
            })?;
        Ok(Self(bytes))
    }

    /// Wraps existing key bytes, which must be exactly 32 bytes long
    pub fn from_slice(bytes: &[u8]) -> Result<Self, CipherError> {
        let key: [u8; KEY_SIZE] = bytes
            .try_into()
            .map_err(|_| CipherError::InvalidKey { actual: bytes.len() })?;
        Ok(Self(key))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl AsRef<[u8]> for SymmetricKey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for SymmetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SymmetricKey")
            .field("len", &KEY_SIZE)
            .finish_non_exhaustive()
    }
}
