//! Error handling shared by all routes

pub mod error;

pub use error::{status_for, ApiError};
