//! Orders as accepted at the counter.

use common::{CustomerId, OrderId};
use serde::{Deserialize, Serialize};

use crate::catalog::Beverage;

/// How the customer pays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PaymentMethod {
    #[default]
    Card,
    Cash,
    Wallet,
}

impl PaymentMethod {
    /// Returns the method name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Card => "card",
            PaymentMethod::Cash => "cash",
            PaymentMethod::Wallet => "wallet",
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An order as submitted by a customer, before an ID is assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRequest {
    /// The customer placing the order.
    pub customer_id: CustomerId,

    /// The beverage to make.
    pub beverage: Beverage,

    /// Extra sweetness in grams of sugar; applies only to recipes
    /// that already contain sugar.
    pub sweetness: u32,

    /// How the customer pays.
    pub method: PaymentMethod,

    /// Channel to notify instead of the configured default.
    pub notify_channel: Option<String>,
}

impl OrderRequest {
    /// Creates a request with no sweetness adjustment, card payment,
    /// and the default notification channel.
    pub fn new(customer_id: CustomerId, beverage: Beverage) -> Self {
        Self {
            customer_id,
            beverage,
            sweetness: 0,
            method: PaymentMethod::default(),
            notify_channel: None,
        }
    }

    /// Sets the sweetness adjustment.
    pub fn with_sweetness(mut self, sweetness: u32) -> Self {
        self.sweetness = sweetness;
        self
    }

    /// Sets the payment method.
    pub fn with_method(mut self, method: PaymentMethod) -> Self {
        self.method = method;
        self
    }

    /// Sets a notification channel override.
    pub fn with_channel(mut self, channel: impl Into<String>) -> Self {
        self.notify_channel = Some(channel.into());
        self
    }
}

/// An accepted order. Immutable once created; its disposition is tracked
/// separately by the fulfillment workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Identifier assigned at intake.
    pub id: OrderId,

    /// The customer placing the order.
    pub customer_id: CustomerId,

    /// The beverage to make.
    pub beverage: Beverage,

    /// Extra sweetness in grams of sugar.
    pub sweetness: u32,

    /// How the customer pays.
    pub method: PaymentMethod,

    /// Channel to notify instead of the configured default.
    pub notify_channel: Option<String>,
}

impl Order {
    /// Creates an order from a request, assigning the given ID.
    pub fn new(id: OrderId, request: OrderRequest) -> Self {
        Self {
            id,
            customer_id: request.customer_id,
            beverage: request.beverage,
            sweetness: request.sweetness,
            method: request.method,
            notify_channel: request.notify_channel,
        }
    }
}
