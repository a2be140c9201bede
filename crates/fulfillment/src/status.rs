//! Order disposition tracking.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use common::OrderId;
use domain::OrderPhase;

/// Records each order's current phase.
///
/// The `Order` value itself is immutable; its disposition lives here.
/// A terminal phase is absorbing — later writes for the same order are
/// ignored.
#[derive(Debug, Clone, Default)]
pub struct StatusBoard {
    inner: Arc<RwLock<HashMap<OrderId, OrderPhase>>>,
}

impl StatusBoard {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a phase for an order.
    pub fn set(&self, order_id: OrderId, phase: OrderPhase) {
        let mut board = self.inner.write().unwrap();
        match board.get(&order_id) {
            Some(current) if current.is_terminal() => {
                tracing::warn!(%order_id, %current, attempted = %phase, "phase change after terminal ignored");
            }
            _ => {
                board.insert(order_id, phase);
            }
        }
    }

    /// Returns the current phase for an order, if it was ever seen.
    pub fn phase(&self, order_id: OrderId) -> Option<OrderPhase> {
        self.inner.read().unwrap().get(&order_id).copied()
    }

    /// Returns true if the order reached a terminal phase.
    pub fn settled(&self, order_id: OrderId) -> bool {
        self.phase(order_id).is_some_and(|phase| phase.is_terminal())
    }

    /// Number of orders currently in the given phase.
    pub fn count_in(&self, phase: OrderPhase) -> usize {
        self.inner
            .read()
            .unwrap()
            .values()
            .filter(|&&p| p == phase)
            .count()
    }

    /// Number of orders the board has seen.
    pub fn len(&self) -> usize {
        self.inner.read().unwrap().len()
    }

    /// True if the board has seen no orders.
    pub fn is_empty(&self) -> bool {
        self.inner.read().unwrap().is_empty()
    }
}
