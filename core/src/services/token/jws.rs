//! Compact JWS serialization for ES512 tokens
//!
//! A token is `base64url(header) . base64url(payload) . base64url(r || s)`
//! with unpadded URL-safe base64 throughout.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use p521::ecdsa::signature::{RandomizedSigner, Verifier};
use p521::ecdsa::{Signature, VerifyingKey};
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};

use crate::domain::entities::token::{JWT_ALGORITHM, JWT_TYPE};
use crate::errors::TokenError;

use super::key_manager::Es512KeyPair;

/// JOSE header
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    pub alg: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub typ: Option<String>,
}

impl Header {
    pub fn es512() -> Self {
        Self {
            alg: JWT_ALGORITHM.to_string(),
            typ: Some(JWT_TYPE.to_string()),
        }
    }

    /// Whether the declared algorithm belongs to the ECDSA family
    pub fn is_ecdsa(&self) -> bool {
        self.alg.starts_with("ES")
    }
}

fn encode_json<T: Serialize>(value: &T) -> Result<String, TokenError> {
    let json = serde_json::to_vec(value).map_err(|e| TokenError::Signing {
        message: format!("Failed to serialize token segment: {}", e),
    })?;
    Ok(URL_SAFE_NO_PAD.encode(json))
}

/// Serializes and signs `payload` with a fresh random ECDSA nonce
pub fn sign<T: Serialize>(keypair: &Es512KeyPair, payload: &T) -> Result<String, TokenError> {
    let signing_input = format!(
        "{}.{}",
        encode_json(&Header::es512())?,
        encode_json(payload)?
    );

    let signature: Signature = keypair
        .signing_key()
        .try_sign_with_rng(&mut OsRng, signing_input.as_bytes())
        .map_err(|e| TokenError::Signing {
            message: e.to_string(),
        })?;

    Ok(format!(
        "{}.{}",
        signing_input,
        URL_SAFE_NO_PAD.encode(signature.to_bytes())
    ))
}

/// Borrowed view of the three segments of a compact token
#[derive(Debug, Clone, Copy)]
pub struct CompactToken<'a> {
    signing_input: &'a str,
    header: &'a str,
    payload: &'a str,
    signature: &'a str,
}

impl<'a> CompactToken<'a> {
    pub fn parse(token: &'a str) -> Result<Self, TokenError> {
        let malformed = || TokenError::Malformed {
            reason: "expected three dot-separated segments".to_string(),
        };

        let (signing_input, signature) = token.rsplit_once('.').ok_or_else(malformed)?;
        let (header, payload) = signing_input.split_once('.').ok_or_else(malformed)?;
        if payload.contains('.') || header.is_empty() {
            return Err(malformed());
        }

        Ok(Self {
            signing_input,
            header,
            payload,
            signature,
        })
    }

    /// Decodes the JOSE header
    pub fn header(&self) -> Result<Header, TokenError> {
        let bytes = URL_SAFE_NO_PAD
            .decode(self.header)
            .map_err(|_| TokenError::Malformed {
                reason: "header is not base64url".to_string(),
            })?;
        serde_json::from_slice(&bytes).map_err(|_| TokenError::Malformed {
            reason: "header is not a JSON object with an alg field".to_string(),
        })
    }

    /// Checks the signature over `header.payload`
    pub fn verify_signature(&self, public_key: &VerifyingKey) -> Result<(), TokenError> {
        let bytes = URL_SAFE_NO_PAD
            .decode(self.signature)
            .map_err(|_| TokenError::SignatureInvalid)?;
        let signature = Signature::from_slice(&bytes).map_err(|_| TokenError::SignatureInvalid)?;

        public_key
            .verify(self.signing_input.as_bytes(), &signature)
            .map_err(|_| TokenError::SignatureInvalid)
    }

    /// Decoded payload bytes; only meaningful after the signature checks out
    pub fn payload(&self) -> Result<Vec<u8>, TokenError> {
        URL_SAFE_NO_PAD
            .decode(self.payload)
            .map_err(|_| TokenError::ClaimsType)
    }
}
