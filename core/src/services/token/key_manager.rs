//! ES512 key generation and PEM persistence
//!
//! Private keys are stored as SEC1 DER inside a PEM block of type
//! `EC PRIVATE KEY`. One key file per service; there is no rotation.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use p521::ecdsa::{SigningKey, VerifyingKey};
use p521::pkcs8::LineEnding;
use p521::SecretKey;
use rand::{rngs::OsRng, RngCore};

use crate::errors::KeyError;

/// PEM block type of a persisted private key
pub const PEM_BLOCK_TYPE: &str = "EC PRIVATE KEY";

/// Byte length of a P-521 scalar
const SCALAR_SIZE: usize = 66;

/// Candidate scalars drawn before giving up on the random source
const MAX_SCALAR_ATTEMPTS: usize = 16;

/// P-521 keypair used to sign and verify ES512 tokens
pub struct Es512KeyPair {
    secret_key: SecretKey,
    signing_key: SigningKey,
    verifying_key: VerifyingKey,
}

impl std::fmt::Debug for Es512KeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Es512KeyPair")
            .field("curve", &"P-521")
            .finish_non_exhaustive()
    }
}

impl Es512KeyPair {
    fn from_secret_key(secret_key: SecretKey) -> Result<Self, KeyError> {
        let signing_key =
            SigningKey::from_bytes(&secret_key.to_bytes()).map_err(|e| KeyError::KeyFormat {
                message: format!("Invalid P-521 scalar: {}", e),
            })?;
        let verifying_key = VerifyingKey::from(&signing_key);

        Ok(Self {
            secret_key,
            signing_key,
            verifying_key,
        })
    }

    /// Parses a PEM-encoded SEC1 private key
    pub fn from_pem(pem: &str) -> Result<Self, KeyError> {
        let label = pem_label(pem).ok_or_else(|| KeyError::KeyFormat {
            message: "No PEM block found".to_string(),
        })?;
        if label != PEM_BLOCK_TYPE {
            return Err(KeyError::KeyFormat {
                message: format!("Unexpected PEM block type: {}", label),
            });
        }

        let secret_key = SecretKey::from_sec1_pem(pem).map_err(|e| KeyError::KeyFormat {
            message: format!("Invalid EC private key: {}", e),
        })?;
        Self::from_secret_key(secret_key)
    }

    /// Encodes the private key as a PEM block with LF line endings
    pub fn to_pem(&self) -> Result<String, KeyError> {
        self.secret_key
            .to_sec1_pem(LineEnding::LF)
            .map(|pem| pem.to_string())
            .map_err(|e| KeyError::KeyFormat {
                message: format!("Failed to encode private key: {}", e),
            })
    }

    /// Public half of the pair, safe to distribute
    pub fn public_key(&self) -> &VerifyingKey {
        &self.verifying_key
    }

    pub(crate) fn signing_key(&self) -> &SigningKey {
        &self.signing_key
    }
}

/// Returns the label of the first `-----BEGIN ...-----` line
fn pem_label(pem: &str) -> Option<&str> {
    let start = pem.find("-----BEGIN ")? + "-----BEGIN ".len();
    let rest = &pem[start..];
    let end = rest.find("-----")?;
    Some(&rest[..end])
}

/// Generates a new P-521 keypair from the OS random source
pub fn generate_keypair() -> Result<Es512KeyPair, KeyError> {
    for _ in 0..MAX_SCALAR_ATTEMPTS {
        let mut candidate = [0u8; SCALAR_SIZE];
        OsRng
            .try_fill_bytes(&mut candidate)
            .map_err(|e| KeyError::RandomSource {
                message: e.to_string(),
            })?;
        // The field is 521 bits wide, so only the low bit of the top byte is used
        candidate[0] &= 0x01;

        // Zero and values at or above the group order are rejected
        if let Ok(secret_key) = SecretKey::from_slice(&candidate) {
            return Es512KeyPair::from_secret_key(secret_key);
        }
    }

    Err(KeyError::RandomSource {
        message: format!("No valid scalar after {} attempts", MAX_SCALAR_ATTEMPTS),
    })
}

/// Writes the private key to `path` as PEM
///
/// On Unix the file is created with mode `0600`.
pub fn save_private_key<P: AsRef<Path>>(keypair: &Es512KeyPair, path: P) -> Result<(), KeyError> {
    let path = path.as_ref();
    let pem = keypair.to_pem()?;

    let storage_error = |e: std::io::Error| KeyError::KeyStorage {
        message: format!("Failed to write {}: {}", path.display(), e),
    };

    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options.open(path).map_err(storage_error)?;
    file.write_all(pem.as_bytes()).map_err(storage_error)?;
    file.sync_all().map_err(storage_error)?;

    tracing::debug!(path = %path.display(), "Saved ES512 private key");
    Ok(())
}

/// Reads a PEM private key written by [`save_private_key`]
pub fn load_private_key<P: AsRef<Path>>(path: P) -> Result<Es512KeyPair, KeyError> {
    let path = path.as_ref();
    let pem = fs::read_to_string(path).map_err(|e| KeyError::KeyFormat {
        message: format!("Failed to read {}: {}", path.display(), e),
    })?;

    Es512KeyPair::from_pem(&pem)
}

/// Loads the key at `path`, or generates and saves one if the file is absent
pub fn load_or_generate<P: AsRef<Path>>(path: P) -> Result<Es512KeyPair, KeyError> {
    let path = path.as_ref();
    if path.exists() {
        return load_private_key(path);
    }

    tracing::info!(path = %path.display(), "No signing key found, generating a new one");
    let keypair = generate_keypair()?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| KeyError::KeyStorage {
            message: format!("Failed to create {}: {}", parent.display(), e),
        })?;
    }
    save_private_key(&keypair, path)?;

    Ok(keypair)
}
