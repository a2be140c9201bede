//! The inventory ledger.

use std::sync::Mutex;

use domain::{Ingredient, IngredientAmounts};
use serde::Serialize;

use crate::error::{Shortfall, StockError};

/// An ingredient at or below the low-stock threshold.
///
/// Derived on demand from current stock; never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LowStockAlert {
    /// The ingredient running low.
    pub ingredient: Ingredient,
    /// Grams remaining.
    pub remaining: u32,
}

/// Owns the counter's stock levels.
///
/// All access goes through the ledger; one mutex covers the whole stock
/// table, and `reserve` runs its check and decrement inside a single
/// critical section. A failed reserve leaves stock untouched — there is
/// no partial decrement to roll back.
#[derive(Debug)]
pub struct InventoryLedger {
    stock: Mutex<IngredientAmounts>,
}

impl InventoryLedger {
    /// Creates a ledger with the given opening stock.
    pub fn new(initial: IngredientAmounts) -> Self {
        Self {
            stock: Mutex::new(initial),
        }
    }

    /// Returns true iff every requested ingredient is on hand in the
    /// requested quantity. Pure read; the answer may be stale by the
    /// time the caller acts on it — use [`reserve`](Self::reserve) to
    /// check and take atomically.
    pub fn has_enough(&self, needs: &IngredientAmounts) -> bool {
        let stock = self.stock.lock().unwrap();
        needs.iter().all(|(ingredient, grams)| stock.get(ingredient) >= grams)
    }

    /// Atomically checks and decrements stock by `needs`.
    ///
    /// On success returns the post-decrement snapshot. On shortage
    /// returns [`StockError::Insufficient`] naming every short
    /// ingredient and makes no change.
    pub fn reserve(&self, needs: &IngredientAmounts) -> Result<IngredientAmounts, StockError> {
        let mut stock = self.stock.lock().unwrap();

        let short: Vec<Shortfall> = needs
            .iter()
            .filter(|&(ingredient, grams)| stock.get(ingredient) < grams)
            .map(|(ingredient, grams)| Shortfall {
                ingredient,
                requested: grams,
                on_hand: stock.get(ingredient),
            })
            .collect();

        if !short.is_empty() {
            return Err(StockError::Insufficient { short });
        }

        for (ingredient, grams) in needs.iter() {
            stock.sub(ingredient, grams);
        }
        tracing::debug!(reserved = ?needs, "stock reserved");
        Ok(*stock)
    }

    /// Returns a reservation to stock.
    ///
    /// Callers invoke this at most once per reservation; the workflow's
    /// state machine enforces that, not the ledger.
    pub fn release(&self, needs: &IngredientAmounts) {
        let mut stock = self.stock.lock().unwrap();
        for (ingredient, grams) in needs.iter() {
            stock.add(ingredient, grams);
        }
        tracing::debug!(released = ?needs, "reservation released");
    }

    /// Every ingredient whose current quantity is at or below `threshold`.
    pub fn low_stock(&self, threshold: u32) -> Vec<LowStockAlert> {
        let stock = self.stock.lock().unwrap();
        Ingredient::ALL
            .into_iter()
            .filter(|&ingredient| stock.get(ingredient) <= threshold)
            .map(|ingredient| LowStockAlert {
                ingredient,
                remaining: stock.get(ingredient),
            })
            .collect()
    }

    /// Read-only copy of current stock.
    pub fn snapshot(&self) -> IngredientAmounts {
        *self.stock.lock().unwrap()
    }
}
