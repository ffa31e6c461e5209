//! Request extractors

use std::future::{ready, Ready};

use actix_web::{dev::Payload, web, Error, FromRequest, HttpRequest};
use ck_shared::types::{Pagination, PaginationQuery};
use ck_shared::errors::error_codes;

use crate::handlers::ApiError;

/// Pagination parsed from `limit`, `page` and `sort` query parameters
///
/// Invalid values are rejected with 400 before the handler runs.
#[derive(Debug, Clone)]
pub struct Page(pub Pagination);

impl FromRequest for Page {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(parse_page(req.query_string()).map_err(Error::from))
    }
}

fn parse_page(query_string: &str) -> Result<Page, ApiError> {
    let query = web::Query::<PaginationQuery>::from_query(query_string).map_err(|e| {
        ApiError::BadRequest {
            code: error_codes::INVALID_PAGINATION,
            message: e.to_string(),
        }
    })?;

    Ok(Page(Pagination::parse(&query)?))
}
