//! # Infrastructure Layer
//!
//! Concrete infrastructure for the Credkit service:
//! - **Logging**: `tracing` subscriber construction and installation
//! - **Database**: MySQL connection pool using SQLx
//!
//! ## Features
//!
//! - `mysql`: Enable MySQL database support (default)

/// Database module - MySQL connection pool using SQLx
#[cfg(feature = "mysql")]
pub mod database;

/// Logging module - subscriber setup from configuration
pub mod logging;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Logging setup error
    #[error("Logging error: {0}")]
    Logging(String),
}
