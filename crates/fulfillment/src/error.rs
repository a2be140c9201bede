//! Fulfillment error types.

use domain::Beverage;
use inventory::StockError;
use thiserror::Error;

/// Errors that can occur during order fulfillment.
///
/// A payment decline is not represented here — it is a business outcome
/// carried on the `Payment` value, not an error.
#[derive(Debug, Error)]
pub enum FulfillmentError {
    /// The requested beverage has no recipe in the catalog.
    #[error("{0} is not on the menu")]
    OffMenu(Beverage),

    /// The reservation could not be covered.
    #[error(transparent)]
    Stock(#[from] StockError),

    /// The preparation station faulted.
    #[error("preparation failed: {0}")]
    Preparation(String),

    /// A notification could not be delivered. Best-effort; logged by the
    /// workflow and never escalated.
    #[error("notification delivery failed: {0}")]
    Notification(String),
}

/// Convenience type alias for fulfillment results.
pub type Result<T> = std::result::Result<T, FulfillmentError>;
