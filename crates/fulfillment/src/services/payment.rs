//! Payment service trait and simulated implementation.

use std::sync::Mutex;

use async_trait::async_trait;
use common::OrderId;
use domain::{Money, Payment, PaymentMethod};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Trait for charging customers.
#[async_trait]
pub trait PaymentService: Send + Sync {
    /// Charges a customer for an order.
    ///
    /// A decline is reported on the returned `Payment`, never as an
    /// error; callers branch on `Payment::approved`.
    async fn charge(&self, order_id: OrderId, amount: Money, method: PaymentMethod) -> Payment;
}

/// Simulated gateway that approves a configurable percentage of charges.
///
/// The randomness source is injected at construction so tests can force
/// deterministic outcomes.
#[derive(Debug)]
pub struct SimulatedPaymentService {
    approval_percent: u8,
    rng: Mutex<StdRng>,
}

impl SimulatedPaymentService {
    /// Creates a gateway approving `approval_percent` of charges (0–100,
    /// clamped), seeded from entropy.
    pub fn new(approval_percent: u8) -> Self {
        Self::with_rng(approval_percent, StdRng::from_entropy())
    }

    /// Creates a gateway with a fixed seed for reproducible outcomes.
    pub fn with_seed(approval_percent: u8, seed: u64) -> Self {
        Self::with_rng(approval_percent, StdRng::seed_from_u64(seed))
    }

    fn with_rng(approval_percent: u8, rng: StdRng) -> Self {
        Self {
            approval_percent: approval_percent.min(100),
            rng: Mutex::new(rng),
        }
    }

    /// The configured approval percentage.
    pub fn approval_percent(&self) -> u8 {
        self.approval_percent
    }
}

#[async_trait]
impl PaymentService for SimulatedPaymentService {
    async fn charge(&self, order_id: OrderId, amount: Money, method: PaymentMethod) -> Payment {
        let roll: u8 = self.rng.lock().unwrap().gen_range(0..100);

        if roll < self.approval_percent {
            let payment = Payment::approved(order_id, amount, method);
            tracing::debug!(%order_id, %amount, txn = ?payment.transaction_ref, "charge approved");
            payment
        } else {
            tracing::debug!(%order_id, %amount, "charge declined");
            Payment::declined(order_id, amount, method)
        }
    }
}
