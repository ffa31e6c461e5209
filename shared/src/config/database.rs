//! Database configuration module

use serde::{Deserialize, Serialize};

/// MySQL connection pool configuration
///
/// An empty `url` disables the database entirely.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Database connection URL
    #[serde(default)]
    pub url: String,

    /// Maximum number of open connections in the pool
    #[serde(default = "default_max_open")]
    pub max_open_connections: u32,

    /// Seconds an idle connection is kept before it is closed
    ///
    /// Connections are opened on demand; none are held open in advance.
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,

    /// Maximum lifetime of a connection in seconds
    #[serde(default = "default_conn_max_lifetime")]
    pub conn_max_lifetime_secs: u64,

    /// Seconds to wait when acquiring a connection
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_open_connections: default_max_open(),
            idle_timeout_secs: default_idle_timeout(),
            conn_max_lifetime_secs: default_conn_max_lifetime(),
            connect_timeout_secs: default_connect_timeout(),
        }
    }
}

impl DatabaseConfig {
    /// Create a new database configuration with URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn with_max_open_connections(mut self, max: u32) -> Self {
        self.max_open_connections = max;
        self
    }

    pub fn with_idle_timeout(mut self, secs: u64) -> Self {
        self.idle_timeout_secs = secs;
        self
    }

    pub fn with_conn_max_lifetime(mut self, secs: u64) -> Self {
        self.conn_max_lifetime_secs = secs;
        self
    }

    pub fn with_connect_timeout(mut self, secs: u64) -> Self {
        self.connect_timeout_secs = secs;
        self
    }

    /// Whether a database URL has been configured
    pub fn is_enabled(&self) -> bool {
        !self.url.trim().is_empty()
    }
}

fn default_max_open() -> u32 {
    50
}

fn default_idle_timeout() -> u64 {
    600
}

fn default_conn_max_lifetime() -> u64 {
    10
}

fn default_connect_timeout() -> u64 {
    30
}
