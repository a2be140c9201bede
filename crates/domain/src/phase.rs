//! Order phase state machine.

use serde::{Deserialize, Serialize};

/// The phase of an order in its fulfillment lifecycle.
///
/// Phase transitions:
/// ```text
/// Received ──► Reserved ──► Paid ──► Preparing ──► Completed
///     │            │                     │
///     │            └──► RejectedPayment  └──► Failed
///     └──► RejectedStock
/// ```
///
/// Any phase holding a reservation can fall to `Failed`, which releases it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum OrderPhase {
    /// Order accepted at intake, nothing reserved yet.
    #[default]
    Received,

    /// Ingredients are held for this order, awaiting payment.
    Reserved,

    /// Payment approved, preparation not started.
    Paid,

    /// The station is making the drink; no longer revocable.
    Preparing,

    /// Drink handed over; the reservation is consumed (terminal state).
    Completed,

    /// Reservation failed, nothing was held (terminal state).
    RejectedStock,

    /// Payment declined; the reservation was released (terminal state).
    RejectedPayment,

    /// Unexpected fault; any outstanding reservation was released (terminal state).
    Failed,
}

impl OrderPhase {
    /// Returns true if payment can be charged in this phase.
    pub fn can_charge(&self) -> bool {
        matches!(self, OrderPhase::Reserved)
    }

    /// Returns true if preparation can start in this phase.
    pub fn can_prepare(&self) -> bool {
        matches!(self, OrderPhase::Paid)
    }

    /// Returns true if a stock reservation is outstanding in this phase.
    ///
    /// Leaving any of these phases for a failure state must release it;
    /// reaching `Completed` consumes it.
    pub fn holds_reservation(&self) -> bool {
        matches!(
            self,
            OrderPhase::Reserved | OrderPhase::Paid | OrderPhase::Preparing
        )
    }

    /// Returns true if this is a terminal phase (no further transitions).
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            OrderPhase::Completed
                | OrderPhase::RejectedStock
                | OrderPhase::RejectedPayment
                | OrderPhase::Failed
        )
    }

    /// Returns the phase name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderPhase::Received => "Received",
            OrderPhase::Reserved => "Reserved",
            OrderPhase::Paid => "Paid",
            OrderPhase::Preparing => "Preparing",
            OrderPhase::Completed => "Completed",
            OrderPhase::RejectedStock => "RejectedStock",
            OrderPhase::RejectedPayment => "RejectedPayment",
            OrderPhase::Failed => "Failed",
        }
    }
}

impl std::fmt::Display for OrderPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
