//! Type definitions module
//!
//! - `pagination` - Pagination and sorting for list endpoints
//! - `response` - Health check responses

pub mod pagination;
pub mod response;

pub use pagination::{Pagination, PaginationError, PaginationQuery, SortField};
pub use response::{HealthResponse, HealthStatus, ServiceHealth};
