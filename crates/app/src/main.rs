//! Drink counter entry point.

mod config;

use std::sync::Arc;

use common::CustomerId;
use domain::{Beverage, OrderRequest, RecipeCatalog};
use fulfillment::{
    FulfillmentWorkflow, LogNotificationService, OrderCounter, PreparationStation,
    SimulatedPaymentService, WorkflowSettings,
};
use inventory::InventoryLedger;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::Config;

#[tokio::main]
async fn main() {
    // 1. Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // 2. Load configuration and build the pipeline
    let config = Config::from_env();
    tracing::info!(?config, "starting drink counter");

    let catalog = Arc::new(RecipeCatalog::standard());
    let ledger = Arc::new(InventoryLedger::new(config.initial_stock));
    let workflow = Arc::new(FulfillmentWorkflow::new(
        Arc::clone(&catalog),
        Arc::clone(&ledger),
        SimulatedPaymentService::new(config.approval_percent),
        PreparationStation::new(config.max_preparations)
            .with_time_scale(config.prep_time_scale),
        LogNotificationService,
        WorkflowSettings {
            default_channel: config.default_channel.clone(),
            payment_timeout: config.payment_timeout(),
        },
    ));
    let counter = OrderCounter::new(Arc::clone(&workflow));

    // 3. Take a round of orders
    let round = [
        (Beverage::Latte, 0),
        (Beverage::Espresso, 0),
        (Beverage::Mocha, 10),
        (Beverage::HotChocolate, 5),
        (Beverage::Cappuccino, 0),
        (Beverage::BlackTea, 0),
    ];
    for (beverage, sweetness) in round {
        let request = OrderRequest::new(CustomerId::new(), beverage).with_sweetness(sweetness);
        match counter.submit(request).await {
            Ok(order) => tracing::info!(order_id = %order.id, %beverage, "order taken"),
            Err(e) => tracing::warn!(%beverage, error = %e, "order turned away"),
        }
    }

    // 4. Wait for every order to settle, then report on the shelves
    counter.drain().await;

    for alert in ledger.low_stock(config.low_stock_threshold) {
        tracing::warn!(
            ingredient = %alert.ingredient,
            remaining = alert.remaining,
            "low stock"
        );
    }
    tracing::info!(stock = ?ledger.snapshot(), "closing stock");
}
