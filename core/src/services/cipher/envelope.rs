//! AES-256-GCM encryption with a hex envelope of `nonce || ciphertext || tag`

use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Nonce,
};
use rand::{rngs::OsRng, RngCore};

use crate::errors::CipherError;

use super::key::{SymmetricKey, KEY_SIZE};

/// GCM nonce size in bytes
pub const NONCE_SIZE: usize = 12;

/// GCM authentication tag size in bytes
pub const TAG_SIZE: usize = 16;

/// Generates a new random AES-256 key
pub fn generate_key() -> Result<SymmetricKey, CipherError> {
    SymmetricKey::generate()
}

fn cipher_for(key: &[u8]) -> Result<Aes256Gcm, CipherError> {
    if key.len() != KEY_SIZE {
        return Err(CipherError::InvalidKey { actual: key.len() });
    }
    Aes256Gcm::new_from_slice(key).map_err(|_| CipherError::InvalidKey { actual: key.len() })
}

fn generate_nonce() -> Result<[u8; NONCE_SIZE], CipherError> {
    let mut nonce = [0u8; NONCE_SIZE];
    OsRng
        .try_fill_bytes(&mut nonce)
        .map_err(|e| CipherError::RandomSource {
            message: e.to_string(),
        })?;
    Ok(nonce)
}

/// Encrypts `plaintext` under a fresh nonce and returns the hex envelope
///
/// Two calls with the same key and plaintext never return the same envelope.
pub fn encrypt(key: &[u8], plaintext: &[u8]) -> Result<String, CipherError> {
    let cipher = cipher_for(key)?;
    let nonce = generate_nonce()?;

    // aead::Error carries no detail; with a valid key only an oversized
    // plaintext can fail here
    let sealed = cipher
        .encrypt(&Nonce::from(nonce), plaintext)
        .map_err(|_| CipherError::MalformedCiphertext {
            reason: "plaintext too large to seal".to_string(),
        })?;

    let mut envelope = Vec::with_capacity(NONCE_SIZE + sealed.len());
    envelope.extend_from_slice(&nonce);
    envelope.extend_from_slice(&sealed);

    Ok(hex::encode(envelope))
}

/// Opens a hex envelope produced by [`encrypt`]
pub fn decrypt(key: &[u8], envelope: &str) -> Result<Vec<u8>, CipherError> {
    let cipher = cipher_for(key)?;

    let raw = hex::decode(envelope).map_err(|_| CipherError::MalformedCiphertext {
        reason: "envelope is not valid hex".to_string(),
    })?;
    if raw.len() < NONCE_SIZE {
        return Err(CipherError::MalformedCiphertext {
            reason: format!("envelope shorter than {} byte nonce", NONCE_SIZE),
        });
    }

    let (nonce, sealed) = raw.split_at(NONCE_SIZE);
    let nonce: [u8; NONCE_SIZE] = nonce
        .try_into()
        .map_err(|_| CipherError::MalformedCiphertext {
            reason: format!("envelope shorter than {} byte nonce", NONCE_SIZE),
        })?;
    cipher
        .decrypt(&Nonce::from(nonce), sealed)
        .map_err(|_| CipherError::Authentication)
}

/// Opens a hex envelope and returns the plaintext as UTF-8 text
pub fn decrypt_to_string(key: &[u8], envelope: &str) -> Result<String, CipherError> {
    let plaintext = decrypt(key, envelope)?;
    String::from_utf8(plaintext).map_err(|_| CipherError::MalformedCiphertext {
        reason: "plaintext is not valid UTF-8".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_key() -> SymmetricKey {
        generate_key().unwrap()
    }

    #[test]
    fn test_encrypt_decrypt() {
        let key = test_key();

        let envelope = encrypt(key.as_bytes(), b"hello world").unwrap();
        assert_eq!(envelope.len(), 2 * (NONCE_SIZE + 11 + TAG_SIZE));
        assert!(envelope.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));

        let decrypted = decrypt(key.as_bytes(), &envelope).unwrap();
        assert_eq!(decrypted, b"hello world");
    }

    #[test]
    fn test_empty_plaintext() {
        let key = test_key();

        let envelope = encrypt(key.as_bytes(), b"").unwrap();
        assert_eq!(envelope.len(), 2 * (NONCE_SIZE + TAG_SIZE));
        assert_eq!(decrypt(key.as_bytes(), &envelope).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_envelope_nonce_prefix() {
        let key = [0x42u8; KEY_SIZE];
        let nonce = [7u8; NONCE_SIZE];
        let sealed = Aes256Gcm::new_from_slice(&key)
            .unwrap()
            .encrypt(&Nonce::from(nonce), b"fixed nonce".as_ref())
            .unwrap();

        let mut raw = nonce.to_vec();
        raw.extend_from_slice(&sealed);
        assert_eq!(decrypt(&key, &hex::encode(&raw)).unwrap(), b"fixed nonce");

        let envelope = encrypt(&key, b"fixed nonce").unwrap();
        let raw = hex::decode(&envelope).unwrap();
        let (prefix, sealed) = raw.split_at(NONCE_SIZE);
        let nonce: [u8; NONCE_SIZE] = prefix.try_into().unwrap();
        let opened = Aes256Gcm::new_from_slice(&key)
            .unwrap()
            .decrypt(&Nonce::from(nonce), sealed)
            .unwrap();
        assert_eq!(opened, b"fixed nonce");
    }

    #[test]
    fn test_different_nonces() {
        let key = test_key();

        let first = encrypt(key.as_bytes(), b"same input").unwrap();
        let second = encrypt(key.as_bytes(), b"same input").unwrap();

        // Nonce prefixes differ, so the whole envelope differs
        assert_ne!(first[..2 * NONCE_SIZE], second[..2 * NONCE_SIZE]);
        assert_ne!(first, second);

        assert_eq!(decrypt(key.as_bytes(), &first).unwrap(), b"same input");
        assert_eq!(decrypt(key.as_bytes(), &second).unwrap(), b"same input");
    }

    #[test]
    fn test_invalid_key_length() {
        assert_eq!(
            encrypt(&[0u8; 16], b"data"),
            Err(CipherError::InvalidKey { actual: 16 })
        );
        assert_eq!(
            decrypt(&[0u8; 33], "00"),
            Err(CipherError::InvalidKey { actual: 33 })
        );
    }

    #[test]
    fn test_wrong_key_fails_authentication() {
        let envelope = encrypt(test_key().as_bytes(), b"secret").unwrap();

        assert_eq!(
            decrypt(test_key().as_bytes(), &envelope),
            Err(CipherError::Authentication)
        );
    }

    #[test]
    fn test_tampered_envelope_fails_authentication() {
        let key = test_key();
        let envelope = encrypt(key.as_bytes(), b"secret").unwrap();

        let mut raw = hex::decode(&envelope).unwrap();
        let last = raw.len() - 1;
        raw[last] ^= 0x01;
        assert_eq!(
            decrypt(key.as_bytes(), &hex::encode(&raw)),
            Err(CipherError::Authentication)
        );

        let mut raw = hex::decode(&envelope).unwrap();
        raw[0] ^= 0x80;
        assert_eq!(
            decrypt(key.as_bytes(), &hex::encode(&raw)),
            Err(CipherError::Authentication)
        );
    }

    #[test]
    fn test_malformed_envelopes() {
        let key = test_key();

        assert!(matches!(
            decrypt(key.as_bytes(), "not hex at all"),
            Err(CipherError::MalformedCiphertext { .. })
        ));
        assert!(matches!(
            decrypt(key.as_bytes(), &"ab".repeat(NONCE_SIZE - 1)),
            Err(CipherError::MalformedCiphertext { .. })
        ));

        // A bare nonce is long enough to parse but has no tag to verify
        assert_eq!(
            decrypt(key.as_bytes(), &"00".repeat(NONCE_SIZE)),
            Err(CipherError::Authentication)
        );
    }

    #[test]
    fn test_decrypt_to_string() {
        let key = test_key();

        let envelope = encrypt(key.as_bytes(), "héllo".as_bytes()).unwrap();
        assert_eq!(decrypt_to_string(key.as_bytes(), &envelope).unwrap(), "héllo");

        let envelope = encrypt(key.as_bytes(), &[0xff, 0xfe]).unwrap();
        assert!(matches!(
            decrypt_to_string(key.as_bytes(), &envelope),
            Err(CipherError::MalformedCiphertext { .. })
        ));
    }
}
