//! Shared identifier types used across the drink counter crates.

pub mod types;

pub use types::{CustomerId, OrderId};
