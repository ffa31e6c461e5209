//! Pagination and sorting parameters for list endpoints
//!
//! Query strings look like `?limit=20&page=3&sort=created_at:desc,name:asc`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Items per page when `limit` is absent
pub const DEFAULT_LIMIT: u64 = 10;

/// Page number when `page` is absent
pub const DEFAULT_PAGE: u64 = 1;

/// Pagination parsing errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PaginationError {
    #[error("failed to parse limit: {0}")]
    InvalidLimit(String),

    #[error("failed to parse page: {0}")]
    InvalidPage(String),

    #[error("invalid sort parameter: {0}")]
    InvalidSort(String),
}

/// Raw query parameters as bound from a query string
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PaginationQuery {
    pub limit: Option<String>,
    pub page: Option<String>,
    pub sort: Option<String>,
}

/// One `field:order` sort clause
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortField {
    pub field: String,
    pub order: String,
}

/// Pagination state for a list response
///
/// `count` and `total` are filled in by the handler after querying.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// Items returned on this page
    pub count: u64,
    pub limit: u64,
    /// Current page number (1-indexed)
    pub page: u64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sort: Vec<SortField>,
    /// Items across all pages
    pub total: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            count: 0,
            limit: DEFAULT_LIMIT,
            page: DEFAULT_PAGE,
            sort: Vec::new(),
            total: 0,
        }
    }
}

impl Pagination {
    /// Parses raw query values, applying defaults for absent or empty ones
    pub fn parse(query: &PaginationQuery) -> Result<Self, PaginationError> {
        let limit = match non_empty(&query.limit) {
            Some(raw) => raw
                .parse::<u64>()
                .map_err(|e| PaginationError::InvalidLimit(e.to_string()))?,
            None => DEFAULT_LIMIT,
        };

        let page = match non_empty(&query.page) {
            Some(raw) => raw
                .parse::<u64>()
                .map_err(|e| PaginationError::InvalidPage(e.to_string()))?,
            None => DEFAULT_PAGE,
        };

        let sort = match non_empty(&query.sort) {
            Some(raw) => raw
                .split(',')
                .map(parse_sort_field)
                .collect::<Result<Vec<_>, _>>()?,
            None => Vec::new(),
        };

        Ok(Self {
            limit,
            page,
            sort,
            ..Default::default()
        })
    }

    /// Row offset for database queries, saturating at `u64::MAX`
    pub fn offset(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.limit)
    }

    /// Records result counts after the page has been fetched
    pub fn with_counts(mut self, count: u64, total: u64) -> Self {
        self.count = count;
        self.total = total;
        self
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn parse_sort_field(raw: &str) -> Result<SortField, PaginationError> {
    let mut parts = raw.split(':');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(field), Some(order), None) => Ok(SortField {
            field: field.to_string(),
            order: order.to_string(),
        }),
        _ => Err(PaginationError::InvalidSort(raw.to_string())),
    }
}
