//! Domain entities representing core business objects.

pub mod token;

pub use token::{Claims, TokenPair, JWT_ALGORITHM, JWT_TYPE};
