//! Order intake.

use std::sync::{Arc, Mutex};

use common::OrderId;
use domain::{Order, OrderRequest};
use tokio::task::JoinHandle;

use crate::error::FulfillmentError;
use crate::services::notification::NotificationService;
use crate::services::payment::PaymentService;
use crate::services::preparation::PreparationService;
use crate::workflow::FulfillmentWorkflow;

/// Entry point accepting new orders.
///
/// `submit` assigns the order its identifier, reserves ingredients
/// synchronously, and hands the rest of the pipeline to a per-order
/// task — one slow preparation never delays intake of other orders.
pub struct OrderCounter<P, B, N>
where
    P: PaymentService,
    B: PreparationService,
    N: NotificationService,
{
    workflow: Arc<FulfillmentWorkflow<P, B, N>>,
    in_flight: Mutex<Vec<JoinHandle<()>>>,
}

impl<P, B, N> OrderCounter<P, B, N>
where
    P: PaymentService + 'static,
    B: PreparationService + 'static,
    N: NotificationService + 'static,
{
    /// Creates a counter in front of the given workflow.
    pub fn new(workflow: Arc<FulfillmentWorkflow<P, B, N>>) -> Self {
        Self {
            workflow,
            in_flight: Mutex::new(Vec::new()),
        }
    }

    /// Accepts an order.
    ///
    /// Returns the accepted order with its assigned identifier once the
    /// reservation holds, or the rejection naming the short ingredients.
    /// Payment, preparation, and the terminal notification proceed
    /// asynchronously.
    #[tracing::instrument(
        skip(self, request),
        fields(customer_id = %request.customer_id, beverage = %request.beverage)
    )]
    pub async fn submit(&self, request: OrderRequest) -> Result<Order, FulfillmentError> {
        let order = Order::new(OrderId::new(), request);
        let (recipe, needs) = self.workflow.reserve(&order).await?;
        tracing::info!(order_id = %order.id, "order accepted");

        let workflow = Arc::clone(&self.workflow);
        let accepted = order.clone();
        let handle = tokio::spawn(async move {
            workflow.fulfill_reserved(order, recipe, needs).await;
        });
        self.in_flight.lock().unwrap().push(handle);

        Ok(accepted)
    }

    /// Waits for every in-flight order to settle.
    ///
    /// A task that panicked is logged and abandoned; its order keeps
    /// whatever phase it last recorded.
    pub async fn drain(&self) {
        let handles: Vec<_> = std::mem::take(&mut *self.in_flight.lock().unwrap());
        for handle in handles {
            if let Err(e) = handle.await {
                tracing::error!(error = %e, "fulfillment task abandoned");
            }
        }
    }

    /// Number of orders handed off and not yet drained.
    pub fn in_flight(&self) -> usize {
        self.in_flight.lock().unwrap().len()
    }
}
