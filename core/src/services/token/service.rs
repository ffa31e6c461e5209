//! Token issuance and verification

use chrono::{Duration, Utc};
use p521::ecdsa::VerifyingKey;
use serde_json::{Map, Value};

use crate::domain::entities::token::{Claims, TokenPair};
use crate::errors::TokenError;

use super::config::TokenServiceConfig;
use super::jws::{self, CompactToken};
use super::key_manager::Es512KeyPair;

/// Signs `claims` as a compact ES512 token
pub fn issue_token(keypair: &Es512KeyPair, claims: &Claims) -> Result<String, TokenError> {
    jws::sign(keypair, claims)
}

/// Signs the same claims twice, producing an access and a refresh token
///
/// ECDSA signing is randomized, so the two tokens never match even though
/// their payloads do. Callers wanting different lifetimes should use
/// [`issue_token`] with distinct claims.
pub fn issue_token_pair(keypair: &Es512KeyPair, claims: &Claims) -> Result<TokenPair, TokenError> {
    let access_token = issue_token(keypair, claims)?;
    let refresh_token = issue_token(keypair, claims)?;

    Ok(TokenPair {
        access_token,
        refresh_token,
    })
}

/// Verifies a token against the current wall clock
pub fn verify_token(
    token: &str,
    public_key: &VerifyingKey,
    expected_issuer: &str,
    expected_audience: &str,
) -> Result<Claims, TokenError> {
    verify_token_at(
        token,
        public_key,
        expected_issuer,
        expected_audience,
        Utc::now().timestamp(),
    )
}

/// Verifies a token as of `now` (seconds since the Unix epoch)
///
/// Checks run in a fixed order and the first failure is returned:
/// algorithm, signature, claims shape, issuer, audience, not-before,
/// expiration. There is no clock leeway.
pub fn verify_token_at(
    token: &str,
    public_key: &VerifyingKey,
    expected_issuer: &str,
    expected_audience: &str,
    now: i64,
) -> Result<Claims, TokenError> {
    let compact = CompactToken::parse(token)?;

    let header = compact.header()?;
    if !header.is_ecdsa() {
        return Err(TokenError::AlgorithmMismatch {
            algorithm: header.alg,
        });
    }

    compact.verify_signature(public_key)?;

    let mut claims: Map<String, Value> =
        serde_json::from_slice(&compact.payload()?).map_err(|_| TokenError::ClaimsType)?;

    if !is_string_equal(claims.get("iss"), expected_issuer) {
        return Err(TokenError::IssuerMismatch {
            found: describe(claims.get("iss")),
        });
    }
    if !is_string_equal(claims.get("aud"), expected_audience) {
        return Err(TokenError::AudienceMismatch {
            found: describe(claims.get("aud")),
        });
    }
    claims.remove("iss");
    claims.remove("aud");

    let nbf = take_numeric(&mut claims, "nbf");
    if let Some(not_before) = nbf {
        if now < not_before {
            return Err(TokenError::TokenNotYetValid { not_before });
        }
    }

    let exp = take_numeric(&mut claims, "exp").ok_or(TokenError::MissingExpiration)?;
    if now > exp {
        return Err(TokenError::TokenExpired { expired_at: exp });
    }

    Ok(Claims {
        iss: expected_issuer.to_string(),
        aud: expected_audience.to_string(),
        exp,
        nbf,
        iat: take_numeric(&mut claims, "iat"),
        sub: take_string(&mut claims, "sub"),
        jti: take_string(&mut claims, "jti"),
        extra: claims,
    })
}

fn is_string_equal(value: Option<&Value>, expected: &str) -> bool {
    matches!(value, Some(Value::String(s)) if s == expected)
}

/// Removes `name` if it holds a string; other types stay in the map
fn take_string(claims: &mut Map<String, Value>, name: &str) -> Option<String> {
    match claims.get(name) {
        Some(Value::String(_)) => match claims.remove(name) {
            Some(Value::String(value)) => Some(value),
            _ => None,
        },
        _ => None,
    }
}

/// Removes `name` if it holds a number, truncating fractional seconds
fn take_numeric(claims: &mut Map<String, Value>, name: &str) -> Option<i64> {
    let seconds = match claims.get(name)? {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64))?,
        _ => return None,
    };
    claims.remove(name);
    Some(seconds)
}

fn describe(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => "<missing>".to_string(),
    }
}

/// Issues and verifies tokens with one keypair and a fixed issuer/audience
#[derive(Debug)]
pub struct TokenService {
    keypair: Es512KeyPair,
    config: TokenServiceConfig,
}

impl TokenService {
    pub fn new(keypair: Es512KeyPair, config: TokenServiceConfig) -> Self {
        Self { keypair, config }
    }

    pub fn config(&self) -> &TokenServiceConfig {
        &self.config
    }

    pub fn public_key(&self) -> &VerifyingKey {
        self.keypair.public_key()
    }

    /// Issues an access/refresh pair for `subject`
    ///
    /// Both tokens share `sub`, `iat` and `nbf`; each gets its own `jti` and
    /// an expiry from the configured lifetimes.
    pub fn generate_tokens(&self, subject: &str) -> Result<TokenPair, TokenError> {
        let now = Utc::now();
        let claims_for = |ttl: Duration| {
            Claims::for_subject(
                self.config.issuer.as_str(),
                self.config.audience.as_str(),
                subject,
                now,
                ttl,
            )
        };

        let access_token = issue_token(&self.keypair, &claims_for(self.config.access_token_ttl))?;
        let refresh_token = issue_token(&self.keypair, &claims_for(self.config.refresh_token_ttl))?;

        tracing::debug!(subject = %subject, "Issued token pair");
        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }

    /// Verifies a token against the configured issuer and audience
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        verify_token(
            token,
            self.public_key(),
            &self.config.issuer,
            &self.config.audience,
        )
        .map_err(|e| {
            tracing::warn!(code = e.error_code(), "Token rejected");
            e
        })
    }

    /// Access token lifetime in whole seconds
    pub fn access_token_expires_in(&self) -> i64 {
        self.config.access_token_ttl.num_seconds()
    }
}
