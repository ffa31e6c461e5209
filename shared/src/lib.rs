//! Shared configuration and common types for the Credkit server
//!
//! - Configuration types and layered loading
//! - API error and response structures
//! - Pagination query parsing

pub mod config;
pub mod errors;
pub mod types;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, ConfigError, DatabaseConfig, Environment, LogFormat, LoggingConfig, ServerConfig,
    TokenConfig,
};
pub use errors::{error_codes, ErrorResponse};
pub use types::{HealthResponse, Pagination, PaginationError, PaginationQuery};
