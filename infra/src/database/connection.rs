//! Database connection pool management
//!
//! Connections are opened lazily and the pool never grows past `max_open`.
//! Idle connections are closed after `idle_timeout` and every connection is
//! recycled after `conn_max_lifetime`.

use sqlx::{
    mysql::{MySqlConnectOptions, MySqlPoolOptions},
    MySqlPool,
};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use ck_shared::config::DatabaseConfig;

use crate::InfrastructureError;

/// Pool tuning applied before connecting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolSettings {
    pub max_open: u32,
    pub idle_timeout: Duration,
    pub conn_max_lifetime: Duration,
    pub acquire_timeout: Duration,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self::from_config(&DatabaseConfig::default())
    }
}

impl PoolSettings {
    pub fn from_config(config: &DatabaseConfig) -> Self {
        Self {
            max_open: config.max_open_connections,
            idle_timeout: Duration::from_secs(config.idle_timeout_secs),
            conn_max_lifetime: Duration::from_secs(config.conn_max_lifetime_secs),
            acquire_timeout: Duration::from_secs(config.connect_timeout_secs),
        }
    }

    pub fn with_max_open(mut self, max_open: u32) -> Self {
        self.max_open = max_open;
        self
    }

    pub fn with_idle_timeout(mut self, timeout: Duration) -> Self {
        self.idle_timeout = timeout;
        self
    }

    pub fn with_conn_max_lifetime(mut self, lifetime: Duration) -> Self {
        self.conn_max_lifetime = lifetime;
        self
    }

    pub fn with_acquire_timeout(mut self, timeout: Duration) -> Self {
        self.acquire_timeout = timeout;
        self
    }

    /// SQLx pool options for these settings
    pub fn pool_options(&self) -> MySqlPoolOptions {
        MySqlPoolOptions::new()
            .max_connections(self.max_open)
            .min_connections(0)
            .idle_timeout(self.idle_timeout)
            .max_lifetime(self.conn_max_lifetime)
            .acquire_timeout(self.acquire_timeout)
            .test_before_acquire(true)
    }
}

/// Database connection pool wrapper
#[derive(Clone)]
pub struct DatabasePool {
    pool: MySqlPool,
    settings: PoolSettings,
}

impl fmt::Debug for DatabasePool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabasePool")
            .field("settings", &self.settings)
            .field("statistics", &self.statistics())
            .finish()
    }
}

impl DatabasePool {
    /// Connects a pool for `config` and pings it once
    ///
    /// A bad URL or unreachable server fails here rather than on first use.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, InfrastructureError> {
        if !config.is_enabled() {
            return Err(InfrastructureError::Config(
                "Database URL is not configured".to_string(),
            ));
        }

        let connect_options = MySqlConnectOptions::from_str(&config.url)
            .map_err(|e| InfrastructureError::Config(format!("Invalid database URL: {}", e)))?;

        let settings = PoolSettings::from_config(config);
        tracing::info!(
            max_open = settings.max_open,
            idle_timeout_secs = settings.idle_timeout.as_secs(),
            "Creating database connection pool"
        );

        let pool = settings
            .pool_options()
            .connect_with(connect_options)
            .await
            .map_err(|e| {
                tracing::error!("Failed to create database pool: {}", e);
                InfrastructureError::Database(e)
            })?;

        let pool = Self { pool, settings };
        pool.health_check().await?;

        tracing::info!("Database connection pool created successfully");
        Ok(pool)
    }

    /// Get a reference to the underlying SQLx pool
    pub fn get_pool(&self) -> &MySqlPool {
        &self.pool
    }

    pub fn settings(&self) -> &PoolSettings {
        &self.settings
    }

    /// Runs `SELECT 1` against the pool
    pub async fn health_check(&self) -> Result<(), InfrastructureError> {
        let value: i64 = sqlx::query_scalar("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Database health check failed: {}", e);
                InfrastructureError::Database(e)
            })?;

        if value != 1 {
            return Err(InfrastructureError::Config(format!(
                "Unexpected health check result: {}",
                value
            )));
        }
        Ok(())
    }

    /// Get connection pool statistics
    pub fn statistics(&self) -> PoolStatistics {
        PoolStatistics {
            connections: self.pool.size(),
            idle_connections: self.pool.num_idle(),
            max_connections: self.settings.max_open,
        }
    }

    /// Close all connections in the pool
    pub async fn close(&self) {
        tracing::info!("Closing database connection pool");
        self.pool.close().await;
    }
}

/// Snapshot of pool usage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolStatistics {
    pub connections: u32,
    pub idle_connections: usize,
    pub max_connections: u32,
}

impl fmt::Display for PoolStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "connections: {}/{}, {} idle",
            self.connections, self.max_connections, self.idle_connections
        )
    }
}
