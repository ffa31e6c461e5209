//! Token entities for ES512-signed JWTs.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// Signing algorithm written into every issued token header
pub const JWT_ALGORITHM: &str = "ES512";

/// Token type written into every issued token header
pub const JWT_TYPE: &str = "JWT";

/// Claims structure for JWT payload
///
/// Registered claims are typed fields. Anything else the caller supplies is
/// kept in `extra` and serialized alongside them at the top level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Issuer
    pub iss: String,

    /// Audience
    pub aud: String,

    /// Expiration timestamp (seconds since the Unix epoch)
    pub exp: i64,

    /// Not before timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nbf: Option<i64>,

    /// Issued at timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,

    /// Subject
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,

    /// JWT ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jti: Option<String>,

    /// Application-specific claims
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Claims {
    pub fn new(issuer: impl Into<String>, audience: impl Into<String>, exp: i64) -> Self {
        Self {
            iss: issuer.into(),
            aud: audience.into(),
            exp,
            nbf: None,
            iat: None,
            sub: None,
            jti: None,
            extra: Map::new(),
        }
    }

    /// Creates claims valid from `now` until `ttl` has elapsed, with a fresh
    /// random `jti`
    pub fn for_subject(
        issuer: impl Into<String>,
        audience: impl Into<String>,
        subject: impl Into<String>,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> Self {
        Self::new(issuer, audience, (now + ttl).timestamp())
            .with_subject(subject)
            .with_issued_at(now.timestamp())
            .with_not_before(now.timestamp())
            .with_jwt_id(Uuid::new_v4().to_string())
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.sub = Some(subject.into());
        self
    }

    pub fn with_not_before(mut self, nbf: i64) -> Self {
        self.nbf = Some(nbf);
        self
    }

    pub fn with_issued_at(mut self, iat: i64) -> Self {
        self.iat = Some(iat);
        self
    }

    pub fn with_jwt_id(mut self, jti: impl Into<String>) -> Self {
        self.jti = Some(jti.into());
        self
    }

    /// Adds an application-specific claim
    pub fn with_claim(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(name.into(), value.into());
        self
    }

    /// Looks up an application-specific claim
    pub fn claim(&self, name: &str) -> Option<&Value> {
        self.extra.get(name)
    }

    /// Seconds until expiration relative to `now`; negative once expired
    pub fn expires_in(&self, now: i64) -> i64 {
        self.exp - now
    }
}

/// Access and refresh tokens minted from the same claims
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}
