//! Database module - MySQL connection pool using SQLx

pub mod connection;

#[cfg(test)]
mod tests;

pub use connection::{DatabasePool, PoolSettings, PoolStatistics};
