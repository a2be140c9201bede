//! Integration tests for the fulfillment pipeline.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use common::{CustomerId, OrderId};
use domain::{
    Beverage, Ingredient, IngredientAmounts, Money, Order, OrderPhase, OrderRequest, Payment,
    PaymentMethod, Recipe, RecipeCatalog,
};
use fulfillment::{
    DeliveryKind, FulfillmentError, FulfillmentWorkflow, InMemoryNotificationService, OrderCounter,
    PaymentService, PreparationService, PreparationStation, SimulatedPaymentService,
    WorkflowSettings,
};
use inventory::InventoryLedger;

type TestWorkflow =
    FulfillmentWorkflow<SimulatedPaymentService, PreparationStation, InMemoryNotificationService>;

struct TestHarness {
    counter: Arc<OrderCounter<SimulatedPaymentService, PreparationStation, InMemoryNotificationService>>,
    workflow: Arc<TestWorkflow>,
    ledger: Arc<InventoryLedger>,
    notifier: InMemoryNotificationService,
}

impl TestHarness {
    fn new(stock: IngredientAmounts, catalog: RecipeCatalog, approval_percent: u8) -> Self {
        let ledger = Arc::new(InventoryLedger::new(stock));
        let notifier = InMemoryNotificationService::new();
        let workflow = Arc::new(FulfillmentWorkflow::new(
            Arc::new(catalog),
            Arc::clone(&ledger),
            SimulatedPaymentService::with_seed(approval_percent, 7),
            PreparationStation::new(4).with_time_scale(0.0),
            notifier.clone(),
            WorkflowSettings {
                default_channel: "counter-test".to_string(),
                payment_timeout: Duration::from_millis(250),
            },
        ));
        Self {
            counter: Arc::new(OrderCounter::new(Arc::clone(&workflow))),
            workflow,
            ledger,
            notifier,
        }
    }

    async fn submit(&self, beverage: Beverage) -> Result<Order, FulfillmentError> {
        self.counter
            .submit(OrderRequest::new(CustomerId::new(), beverage))
            .await
    }
}

fn ample_stock() -> IngredientAmounts {
    IngredientAmounts::new()
        .with(Ingredient::Water, 5000)
        .with(Ingredient::Milk, 3000)
        .with(Ingredient::Coffee, 1000)
        .with(Ingredient::Cocoa, 500)
        .with(Ingredient::Tea, 200)
        .with(Ingredient::Sugar, 800)
}

/// A one-ingredient espresso used by the stock-accounting scenarios.
fn coffee_only_catalog(grams_per_cup: u32) -> RecipeCatalog {
    RecipeCatalog::new([Recipe::new(
        Beverage::Espresso,
        IngredientAmounts::new().with(Ingredient::Coffee, grams_per_cup),
        Duration::from_millis(1),
        Money::from_cents(250),
    )])
}

#[tokio::test]
async fn happy_path_completes_and_issues_receipt() {
    let h = TestHarness::new(ample_stock(), RecipeCatalog::standard(), 100);

    let order = h.submit(Beverage::Latte).await.unwrap();
    h.counter.drain().await;

    assert_eq!(h.workflow.board().phase(order.id), Some(OrderPhase::Completed));
    assert_eq!(h.notifier.ready_count(), 1);
    assert_eq!(h.notifier.receipt_count(), 1);
    assert_eq!(h.notifier.failure_count(), 0);

    // Consumed, not released: latte ingredients stay decremented.
    let stock = h.ledger.snapshot();
    assert_eq!(stock.get(Ingredient::Milk), 2800);
    assert_eq!(stock.get(Ingredient::Coffee), 982);
    assert_eq!(stock.get(Ingredient::Water), 4970);
}

#[tokio::test]
async fn low_stock_alert_appears_only_after_threshold_crossed() {
    // 200g of coffee at 20g per cup, threshold 50: five cups leave 100
    // (no alert), three more leave 40 (exactly one alert, for coffee).
    let stock = IngredientAmounts::new()
        .with(Ingredient::Water, 1000)
        .with(Ingredient::Milk, 500)
        .with(Ingredient::Coffee, 200)
        .with(Ingredient::Cocoa, 500)
        .with(Ingredient::Tea, 200)
        .with(Ingredient::Sugar, 800);
    let h = TestHarness::new(stock, coffee_only_catalog(20), 100);

    for _ in 0..5 {
        h.submit(Beverage::Espresso).await.unwrap();
    }
    h.counter.drain().await;
    assert_eq!(h.ledger.snapshot().get(Ingredient::Coffee), 100);
    assert!(h.ledger.low_stock(50).is_empty());

    for _ in 0..3 {
        h.submit(Beverage::Espresso).await.unwrap();
    }
    h.counter.drain().await;
    assert_eq!(h.ledger.snapshot().get(Ingredient::Coffee), 40);

    let alerts = h.ledger.low_stock(50);
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].ingredient, Ingredient::Coffee);
    assert_eq!(alerts[0].remaining, 40);
}

#[tokio::test]
async fn sweetness_never_touches_sugar_free_recipes() {
    let h = TestHarness::new(ample_stock(), RecipeCatalog::standard(), 100);

    let order = h
        .counter
        .submit(
            OrderRequest::new(CustomerId::new(), Beverage::BlackTea).with_sweetness(25),
        )
        .await
        .unwrap();
    h.counter.drain().await;

    assert_eq!(h.workflow.board().phase(order.id), Some(OrderPhase::Completed));
    assert_eq!(
        h.ledger.snapshot().get(Ingredient::Sugar),
        ample_stock().get(Ingredient::Sugar)
    );
}

#[tokio::test]
async fn shortage_rejects_synchronously_and_leaves_stock() {
    // 10g of coffee against a 15g recipe.
    let h = TestHarness::new(
        IngredientAmounts::new().with(Ingredient::Coffee, 10),
        coffee_only_catalog(15),
        100,
    );

    let error = h.submit(Beverage::Espresso).await.unwrap_err();
    match &error {
        FulfillmentError::Stock(stock_error) => {
            assert_eq!(stock_error.short_ingredients(), vec![Ingredient::Coffee]);
        }
        other => panic!("expected stock rejection, got {other}"),
    }

    assert_eq!(h.ledger.snapshot().get(Ingredient::Coffee), 10);
    assert_eq!(h.workflow.board().count_in(OrderPhase::RejectedStock), 1);
    assert_eq!(h.notifier.failure_count(), 1);
    assert_eq!(h.counter.in_flight(), 0);
}

#[tokio::test]
async fn zero_approval_releases_every_reservation() {
    let h = TestHarness::new(ample_stock(), RecipeCatalog::standard(), 0);

    let beverages = [
        Beverage::Espresso,
        Beverage::Latte,
        Beverage::Mocha,
        Beverage::HotChocolate,
        Beverage::BlackTea,
        Beverage::Cappuccino,
    ];
    let mut ids = Vec::new();
    for beverage in beverages {
        ids.push(h.submit(beverage).await.unwrap().id);
    }
    h.counter.drain().await;

    for id in ids {
        assert_eq!(h.workflow.board().phase(id), Some(OrderPhase::RejectedPayment));
    }
    assert_eq!(h.ledger.snapshot(), ample_stock());
    assert_eq!(h.notifier.failure_count(), beverages.len());
    assert_eq!(h.notifier.ready_count(), 0);
}

#[tokio::test]
async fn every_order_gets_exactly_one_terminal_notification() {
    // Approval is a coin flip; whatever mix of completions and declines
    // falls out, each order settles with exactly one terminal message.
    let h = TestHarness::new(ample_stock(), coffee_only_catalog(20), 50);

    let mut accepted = Vec::new();
    for _ in 0..8 {
        accepted.push(h.submit(Beverage::Espresso).await.unwrap().id);
    }
    h.counter.drain().await;

    for id in &accepted {
        assert_eq!(h.notifier.terminal_count_for(*id), 1);
    }
    let terminal_total = h.notifier.ready_count() + h.notifier.failure_count();
    assert_eq!(terminal_total, 8);

    // Released reservations (declines) are back on hand; consumed ones
    // are not.
    let completed = h.workflow.board().count_in(OrderPhase::Completed) as u32;
    assert_eq!(
        h.ledger.snapshot().get(Ingredient::Coffee),
        ample_stock().get(Ingredient::Coffee) - completed * 20
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_submissions_never_overdraw_shared_stock() {
    // 200g of coffee at 20g per cup: of fifty racing submissions exactly
    // ten can reserve, however the intake interleaves.
    let h = TestHarness::new(
        IngredientAmounts::new().with(Ingredient::Coffee, 200),
        coffee_only_catalog(20),
        100,
    );

    let submissions: Vec<_> = (0..50)
        .map(|_| {
            let counter = Arc::clone(&h.counter);
            tokio::spawn(async move {
                counter
                    .submit(OrderRequest::new(CustomerId::new(), Beverage::Espresso))
                    .await
                    .is_ok()
            })
        })
        .collect();

    let mut accepted = 0;
    for submission in submissions {
        if submission.await.unwrap() {
            accepted += 1;
        }
    }
    h.counter.drain().await;

    assert_eq!(accepted, 10);
    assert_eq!(h.ledger.snapshot().get(Ingredient::Coffee), 0);
    assert_eq!(h.workflow.board().count_in(OrderPhase::Completed), 10);
    assert_eq!(h.workflow.board().count_in(OrderPhase::RejectedStock), 40);
}

struct SlowPaymentService {
    delay: Duration,
}

#[async_trait]
impl PaymentService for SlowPaymentService {
    async fn charge(&self, order_id: OrderId, amount: Money, method: PaymentMethod) -> Payment {
        tokio::time::sleep(self.delay).await;
        Payment::approved(order_id, amount, method)
    }
}

#[tokio::test]
async fn payment_timeout_is_treated_as_decline() {
    let ledger = Arc::new(InventoryLedger::new(ample_stock()));
    let notifier = InMemoryNotificationService::new();
    let workflow = Arc::new(FulfillmentWorkflow::new(
        Arc::new(RecipeCatalog::standard()),
        Arc::clone(&ledger),
        SlowPaymentService {
            delay: Duration::from_millis(200),
        },
        PreparationStation::new(4).with_time_scale(0.0),
        notifier.clone(),
        WorkflowSettings {
            default_channel: "counter-test".to_string(),
            payment_timeout: Duration::from_millis(20),
        },
    ));
    let counter = OrderCounter::new(Arc::clone(&workflow));

    let order = counter
        .submit(OrderRequest::new(CustomerId::new(), Beverage::Latte))
        .await
        .unwrap();
    counter.drain().await;

    assert_eq!(workflow.board().phase(order.id), Some(OrderPhase::RejectedPayment));
    assert_eq!(ledger.snapshot(), ample_stock());
    assert_eq!(notifier.failure_count(), 1);
}

struct JammedStation;

#[async_trait]
impl PreparationService for JammedStation {
    async fn prepare(&self, _order: &Order, _recipe: &Recipe) -> Result<(), FulfillmentError> {
        Err(FulfillmentError::Preparation("grinder fault".into()))
    }
}

#[tokio::test]
async fn preparation_fault_fails_one_order_without_stalling_others() {
    let ledger = Arc::new(InventoryLedger::new(ample_stock()));
    let notifier = InMemoryNotificationService::new();
    let workflow = Arc::new(FulfillmentWorkflow::new(
        Arc::new(RecipeCatalog::standard()),
        Arc::clone(&ledger),
        SimulatedPaymentService::with_seed(100, 7),
        JammedStation,
        notifier.clone(),
        WorkflowSettings::default(),
    ));
    let counter = OrderCounter::new(Arc::clone(&workflow));

    let mut ids = Vec::new();
    for _ in 0..3 {
        let order = counter
            .submit(OrderRequest::new(CustomerId::new(), Beverage::Espresso))
            .await
            .unwrap();
        ids.push(order.id);
    }
    counter.drain().await;

    for id in ids {
        assert_eq!(workflow.board().phase(id), Some(OrderPhase::Failed));
        assert_eq!(notifier.terminal_count_for(id), 1);
    }
    // Every reservation was released on fault.
    assert_eq!(ledger.snapshot(), ample_stock());
    assert_eq!(notifier.receipt_count(), 0);
}

#[tokio::test]
async fn receipts_match_completed_orders() {
    let h = TestHarness::new(ample_stock(), RecipeCatalog::standard(), 100);

    let a = h.submit(Beverage::Espresso).await.unwrap();
    let b = h.submit(Beverage::Mocha).await.unwrap();
    h.counter.drain().await;

    let receipts: Vec<_> = h
        .notifier
        .deliveries()
        .into_iter()
        .filter(|d| matches!(d.kind, DeliveryKind::Receipt(_)))
        .collect();
    assert_eq!(receipts.len(), 2);
    let receipt_orders: Vec<OrderId> = receipts.iter().map(|d| d.order_id).collect();
    assert!(receipt_orders.contains(&a.id));
    assert!(receipt_orders.contains(&b.id));
}
