//! Service traits and implementations for the fulfillment stages.

pub mod notification;
pub mod payment;
pub mod preparation;

pub use notification::{
    Delivery, DeliveryKind, InMemoryNotificationService, LogNotificationService,
    NotificationService,
};
pub use payment::{PaymentService, SimulatedPaymentService};
pub use preparation::{PreparationService, PreparationStation};
