//! Payments and receipts.

use chrono::{DateTime, Utc};
use common::OrderId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::money::Money;
use crate::order::PaymentMethod;

/// Outcome of a charge attempt. A decline is a business outcome,
/// not an error; callers branch on [`approved`](Self::approved).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    /// The order being paid for.
    pub order_id: OrderId,

    /// Amount charged.
    pub amount: Money,

    /// How the customer paid.
    pub method: PaymentMethod,

    /// Whether the charge went through.
    pub approved: bool,

    /// Opaque gateway reference; present iff approved.
    pub transaction_ref: Option<Uuid>,
}

impl Payment {
    /// Creates an approved payment with a fresh transaction reference.
    pub fn approved(order_id: OrderId, amount: Money, method: PaymentMethod) -> Self {
        Self {
            order_id,
            amount,
            method,
            approved: true,
            transaction_ref: Some(Uuid::new_v4()),
        }
    }

    /// Creates a declined payment.
    pub fn declined(order_id: OrderId, amount: Money, method: PaymentMethod) -> Self {
        Self {
            order_id,
            amount,
            method,
            approved: false,
            transaction_ref: None,
        }
    }
}

/// Proof of a completed order. Produced only for completed orders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    /// Sequential receipt number, e.g. `RCP-0001`.
    pub number: String,

    /// The completed order.
    pub order_id: OrderId,

    /// Amount paid.
    pub amount: Money,

    /// When the receipt was issued.
    pub issued_at: DateTime<Utc>,
}
