//! Inventory ledger for the drink counter.
//!
//! The ledger is the only owner of stock levels. Every check-then-mutate
//! runs inside one critical section, so concurrent orders racing on the
//! same ingredient can never jointly overdraw it.

pub mod error;
pub mod ledger;

pub use error::{Shortfall, StockError};
pub use ledger::{InventoryLedger, LowStockAlert};
