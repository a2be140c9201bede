//! Order fulfillment for the drink counter.
//!
//! An accepted order moves through reservation, payment, preparation,
//! and notification. Reservation happens synchronously at intake so the
//! submitter learns immediately whether the drink is procurable; the
//! remaining stages run on a per-order task. A payment decline or a
//! preparation fault releases the reservation before the order settles
//! in a terminal phase.

pub mod error;
pub mod intake;
pub mod services;
pub mod status;
pub mod workflow;

pub use error::FulfillmentError;
pub use intake::OrderCounter;
pub use services::{
    Delivery, DeliveryKind, InMemoryNotificationService, LogNotificationService,
    NotificationService, PaymentService, PreparationService, PreparationStation,
    SimulatedPaymentService,
};
pub use status::StatusBoard;
pub use workflow::{FulfillmentWorkflow, WorkflowSettings};
