//! Notification service trait and implementations.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use common::OrderId;
use domain::{Order, Receipt};

use crate::error::FulfillmentError;

/// Trait for delivering customer-facing messages to a named channel.
///
/// Delivery is best-effort; the workflow logs failures and never lets
/// them alter an order's disposition.
#[async_trait]
pub trait NotificationService: Send + Sync {
    /// Announces a finished drink.
    async fn notify_ready(&self, channel: &str, order: &Order) -> Result<(), FulfillmentError>;

    /// Announces that an order will not be fulfilled.
    async fn notify_failure(
        &self,
        channel: &str,
        order: &Order,
        reason: &str,
    ) -> Result<(), FulfillmentError>;

    /// Delivers the receipt for a completed order.
    async fn print_receipt(&self, channel: &str, receipt: &Receipt) -> Result<(), FulfillmentError>;
}

/// Notification sink that writes to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotificationService;

#[async_trait]
impl NotificationService for LogNotificationService {
    async fn notify_ready(&self, channel: &str, order: &Order) -> Result<(), FulfillmentError> {
        tracing::info!(
            %channel,
            order_id = %order.id,
            beverage = %order.beverage,
            "order ready for pickup"
        );
        Ok(())
    }

    async fn notify_failure(
        &self,
        channel: &str,
        order: &Order,
        reason: &str,
    ) -> Result<(), FulfillmentError> {
        tracing::info!(
            %channel,
            order_id = %order.id,
            beverage = %order.beverage,
            reason,
            "order not fulfilled"
        );
        Ok(())
    }

    async fn print_receipt(&self, channel: &str, receipt: &Receipt) -> Result<(), FulfillmentError> {
        let body = serde_json::to_string(receipt)
            .map_err(|e| FulfillmentError::Notification(e.to_string()))?;
        tracing::info!(%channel, receipt = %body, "receipt");
        Ok(())
    }
}

/// What an [`InMemoryNotificationService`] recorded for one delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    /// Channel the message was addressed to.
    pub channel: String,
    /// The order concerned.
    pub order_id: OrderId,
    /// Message kind.
    pub kind: DeliveryKind,
}

/// Kinds of delivery an in-memory sink records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryKind {
    /// `notify_ready` call.
    Ready,
    /// `notify_failure` call with its reason.
    Failure(String),
    /// `print_receipt` call with the receipt number.
    Receipt(String),
}

#[derive(Debug, Default)]
struct InMemoryNotificationState {
    deliveries: Vec<Delivery>,
    fail_on_deliver: bool,
}

/// In-memory notification sink for testing.
#[derive(Debug, Clone, Default)]
pub struct InMemoryNotificationService {
    state: Arc<RwLock<InMemoryNotificationState>>,
}

impl InMemoryNotificationService {
    /// Creates a new in-memory notification sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the sink to fail every delivery.
    pub fn set_fail_on_deliver(&self, fail: bool) {
        self.state.write().unwrap().fail_on_deliver = fail;
    }

    /// Returns every recorded delivery.
    pub fn deliveries(&self) -> Vec<Delivery> {
        self.state.read().unwrap().deliveries.clone()
    }

    /// Number of recorded `notify_ready` deliveries.
    pub fn ready_count(&self) -> usize {
        self.count_kind(|kind| matches!(kind, DeliveryKind::Ready))
    }

    /// Number of recorded `notify_failure` deliveries.
    pub fn failure_count(&self) -> usize {
        self.count_kind(|kind| matches!(kind, DeliveryKind::Failure(_)))
    }

    /// Number of recorded receipts.
    pub fn receipt_count(&self) -> usize {
        self.count_kind(|kind| matches!(kind, DeliveryKind::Receipt(_)))
    }

    /// Number of terminal notifications (ready or failure) for one order.
    pub fn terminal_count_for(&self, order_id: OrderId) -> usize {
        self.state
            .read()
            .unwrap()
            .deliveries
            .iter()
            .filter(|d| {
                d.order_id == order_id
                    && matches!(d.kind, DeliveryKind::Ready | DeliveryKind::Failure(_))
            })
            .count()
    }

    fn count_kind(&self, matches: impl Fn(&DeliveryKind) -> bool) -> usize {
        self.state
            .read()
            .unwrap()
            .deliveries
            .iter()
            .filter(|d| matches(&d.kind))
            .count()
    }

    fn record(&self, delivery: Delivery) -> Result<(), FulfillmentError> {
        let mut state = self.state.write().unwrap();
        if state.fail_on_deliver {
            return Err(FulfillmentError::Notification(
                "channel unavailable".to_string(),
            ));
        }
        state.deliveries.push(delivery);
        Ok(())
    }
}

#[async_trait]
impl NotificationService for InMemoryNotificationService {
    async fn notify_ready(&self, channel: &str, order: &Order) -> Result<(), FulfillmentError> {
        self.record(Delivery {
            channel: channel.to_string(),
            order_id: order.id,
            kind: DeliveryKind::Ready,
        })
    }

    async fn notify_failure(
        &self,
        channel: &str,
        order: &Order,
        reason: &str,
    ) -> Result<(), FulfillmentError> {
        self.record(Delivery {
            channel: channel.to_string(),
            order_id: order.id,
            kind: DeliveryKind::Failure(reason.to_string()),
        })
    }

    async fn print_receipt(&self, channel: &str, receipt: &Receipt) -> Result<(), FulfillmentError> {
        self.record(Delivery {
            channel: channel.to_string(),
            order_id: receipt.order_id,
            kind: DeliveryKind::Receipt(receipt.number.clone()),
        })
    }
}
