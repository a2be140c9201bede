//! Fulfillment workflow orchestrating a single order through its stages.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use chrono::Utc;
use common::OrderId;
use domain::{
    IngredientAmounts, Money, Order, OrderPhase, Payment, Receipt, Recipe, RecipeCatalog,
};
use inventory::InventoryLedger;

use crate::error::FulfillmentError;
use crate::services::notification::NotificationService;
use crate::services::payment::PaymentService;
use crate::services::preparation::PreparationService;
use crate::status::StatusBoard;

/// Tunables for the workflow.
#[derive(Debug, Clone)]
pub struct WorkflowSettings {
    /// Channel notified when an order carries no override.
    pub default_channel: String,

    /// How long a charge may take before it is treated as declined.
    pub payment_timeout: Duration,
}

impl Default for WorkflowSettings {
    fn default() -> Self {
        Self {
            default_channel: "counter".to_string(),
            payment_timeout: Duration::from_secs(5),
        }
    }
}

/// Drives one order through reservation, payment, preparation, and
/// notification, with compensating release on failure.
///
/// The synchronous half ([`reserve`](Self::reserve)) settles whether the
/// drink is procurable; the asynchronous half
/// ([`fulfill_reserved`](Self::fulfill_reserved)) runs on the order's own
/// task. A declined or timed-out payment and a preparation fault each
/// release the reservation exactly once before the order settles; a
/// completed order consumes it.
pub struct FulfillmentWorkflow<P, B, N>
where
    P: PaymentService,
    B: PreparationService,
    N: NotificationService,
{
    catalog: Arc<RecipeCatalog>,
    ledger: Arc<InventoryLedger>,
    payment: P,
    station: B,
    notifier: N,
    board: StatusBoard,
    settings: WorkflowSettings,
    receipt_seq: AtomicU64,
}

impl<P, B, N> FulfillmentWorkflow<P, B, N>
where
    P: PaymentService,
    B: PreparationService,
    N: NotificationService,
{
    /// Creates a new workflow.
    pub fn new(
        catalog: Arc<RecipeCatalog>,
        ledger: Arc<InventoryLedger>,
        payment: P,
        station: B,
        notifier: N,
        settings: WorkflowSettings,
    ) -> Self {
        Self {
            catalog,
            ledger,
            payment,
            station,
            notifier,
            board: StatusBoard::new(),
            settings,
            receipt_seq: AtomicU64::new(0),
        }
    }

    /// The disposition board for this workflow's orders.
    pub fn board(&self) -> &StatusBoard {
        &self.board
    }

    /// Synchronous half: looks up the recipe and reserves ingredients.
    ///
    /// Covers `Received → Reserved` and `Received → RejectedStock`; the
    /// submitter learns immediately whether the drink is procurable. A
    /// stock rejection sends its failure notification before returning.
    #[tracing::instrument(skip(self, order), fields(order_id = %order.id, beverage = %order.beverage))]
    pub async fn reserve(
        &self,
        order: &Order,
    ) -> Result<(Recipe, IngredientAmounts), FulfillmentError> {
        self.board.set(order.id, OrderPhase::Received);
        metrics::counter!("orders_received_total").increment(1);

        let recipe = self
            .catalog
            .recipe(order.beverage)
            .cloned()
            .ok_or(FulfillmentError::OffMenu(order.beverage))?;
        let needs = recipe.ingredients_for(order.sweetness);

        match self.ledger.reserve(&needs) {
            Ok(_remaining) => {
                self.board.set(order.id, OrderPhase::Reserved);
                Ok((recipe, needs))
            }
            Err(e) => {
                self.board.set(order.id, OrderPhase::RejectedStock);
                metrics::counter!("orders_rejected_stock").increment(1);
                tracing::info!(error = %e, "order rejected at reservation");
                self.deliver_failure(order, &e.to_string()).await;
                Err(e.into())
            }
        }
    }

    /// Asynchronous half: payment, preparation, and the terminal
    /// notification for an order that holds a reservation.
    #[tracing::instrument(skip_all, fields(order_id = %order.id, beverage = %order.beverage))]
    pub async fn fulfill_reserved(&self, order: Order, recipe: Recipe, needs: IngredientAmounts) {
        let started = Instant::now();

        let charge = self.payment.charge(order.id, recipe.price, order.method);
        let payment = match tokio::time::timeout(self.settings.payment_timeout, charge).await {
            Ok(payment) => payment,
            Err(_) => {
                tracing::info!(
                    timeout = ?self.settings.payment_timeout,
                    "charge timed out, treating as declined"
                );
                Payment::declined(order.id, recipe.price, order.method)
            }
        };

        if !payment.approved {
            self.ledger.release(&needs);
            self.board.set(order.id, OrderPhase::RejectedPayment);
            metrics::counter!("orders_rejected_payment").increment(1);
            tracing::info!(amount = %payment.amount, "payment declined, reservation released");
            self.deliver_failure(&order, "payment declined").await;
            self.observe_duration(started);
            return;
        }

        self.board.set(order.id, OrderPhase::Paid);
        tracing::debug!(txn = ?payment.transaction_ref, "payment approved");

        self.board.set(order.id, OrderPhase::Preparing);
        match self.station.prepare(&order, &recipe).await {
            Ok(()) => {
                self.board.set(order.id, OrderPhase::Completed);
                metrics::counter!("orders_completed").increment(1);
                let receipt = self.issue_receipt(order.id, recipe.price);
                tracing::info!(receipt = %receipt.number, "order completed");
                self.deliver_ready(&order, &receipt).await;
            }
            Err(e) => {
                self.ledger.release(&needs);
                self.board.set(order.id, OrderPhase::Failed);
                metrics::counter!("orders_failed").increment(1);
                tracing::error!(
                    error = %e,
                    customer_id = %order.customer_id,
                    "fulfillment fault, reservation released"
                );
                self.deliver_failure(&order, &e.to_string()).await;
            }
        }
        self.observe_duration(started);
    }

    fn issue_receipt(&self, order_id: OrderId, amount: Money) -> Receipt {
        let seq = self.receipt_seq.fetch_add(1, Ordering::Relaxed) + 1;
        Receipt {
            number: format!("RCP-{seq:04}"),
            order_id,
            amount,
            issued_at: Utc::now(),
        }
    }

    fn channel_for<'a>(&'a self, order: &'a Order) -> &'a str {
        order
            .notify_channel
            .as_deref()
            .unwrap_or(&self.settings.default_channel)
    }

    async fn deliver_ready(&self, order: &Order, receipt: &Receipt) {
        let channel = self.channel_for(order);
        if let Err(e) = self.notifier.notify_ready(channel, order).await {
            tracing::warn!(%channel, error = %e, "ready notification not delivered");
        }
        if let Err(e) = self.notifier.print_receipt(channel, receipt).await {
            tracing::warn!(%channel, error = %e, "receipt not delivered");
        }
    }

    async fn deliver_failure(&self, order: &Order, reason: &str) {
        let channel = self.channel_for(order);
        if let Err(e) = self.notifier.notify_failure(channel, order, reason).await {
            tracing::warn!(%channel, error = %e, "failure notification not delivered");
        }
    }

    fn observe_duration(&self, started: Instant) {
        metrics::histogram!("fulfillment_duration_seconds").record(started.elapsed().as_secs_f64());
    }
}
