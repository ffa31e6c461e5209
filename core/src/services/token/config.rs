//! Configuration for the token service

use chrono::Duration;

/// Default issuer and audience
pub const DEFAULT_ISSUER: &str = "credkit";
pub const DEFAULT_AUDIENCE: &str = "credkit-api";

/// Configuration for the token service
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// Value written to and required in `iss`
    pub issuer: String,
    /// Value written to and required in `aud`
    pub audience: String,
    /// Lifetime of access tokens
    pub access_token_ttl: Duration,
    /// Lifetime of refresh tokens
    pub refresh_token_ttl: Duration,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self {
            issuer: DEFAULT_ISSUER.to_string(),
            audience: DEFAULT_AUDIENCE.to_string(),
            access_token_ttl: Duration::hours(24),
            refresh_token_ttl: Duration::days(7),
        }
    }
}

impl TokenServiceConfig {
    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = issuer.into();
        self
    }

    pub fn with_audience(mut self, audience: impl Into<String>) -> Self {
        self.audience = audience.into();
        self
    }

    pub fn with_access_token_ttl(mut self, ttl: Duration) -> Self {
        self.access_token_ttl = ttl;
        self
    }

    pub fn with_refresh_token_ttl(mut self, ttl: Duration) -> Self {
        self.refresh_token_ttl = ttl;
        self
    }
}
