//! Token issuance configuration

use serde::{Deserialize, Serialize};

/// Issuer, audience and lifetimes for issued tokens
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TokenConfig {
    /// Value of the `iss` claim
    #[serde(default = "default_issuer")]
    pub issuer: String,

    /// Value of the `aud` claim
    #[serde(default = "default_audience")]
    pub audience: String,

    /// Path of the PEM-encoded ES512 private key
    #[serde(default = "default_private_key_path")]
    pub private_key_path: String,

    /// Access token lifetime in seconds
    #[serde(default = "default_access_ttl")]
    pub access_token_ttl_secs: i64,

    /// Refresh token lifetime in seconds
    #[serde(default = "default_refresh_ttl")]
    pub refresh_token_ttl_secs: i64,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            issuer: default_issuer(),
            audience: default_audience(),
            private_key_path: default_private_key_path(),
            access_token_ttl_secs: default_access_ttl(),
            refresh_token_ttl_secs: default_refresh_ttl(),
        }
    }
}

impl TokenConfig {
    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = issuer.into();
        self
    }

    pub fn with_audience(mut self, audience: impl Into<String>) -> Self {
        self.audience = audience.into();
        self
    }

    pub fn with_private_key_path(mut self, path: impl Into<String>) -> Self {
        self.private_key_path = path.into();
        self
    }

    pub fn with_access_token_ttl(mut self, secs: i64) -> Self {
        self.access_token_ttl_secs = secs;
        self
    }

    pub fn with_refresh_token_ttl(mut self, secs: i64) -> Self {
        self.refresh_token_ttl_secs = secs;
        self
    }
}

fn default_issuer() -> String {
    String::from("credkit")
}

fn default_audience() -> String {
    String::from("credkit-api")
}

fn default_private_key_path() -> String {
    String::from("keys/es512_private_key.pem")
}

fn default_access_ttl() -> i64 {
    24 * 60 * 60
}

fn default_refresh_ttl() -> i64 {
    7 * 24 * 60 * 60
}
