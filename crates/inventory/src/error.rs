//! Inventory error types.

use domain::Ingredient;
use thiserror::Error;

/// One ingredient the ledger could not cover.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shortfall {
    /// The short ingredient.
    pub ingredient: Ingredient,
    /// Grams the request asked for.
    pub requested: u32,
    /// Grams currently on hand.
    pub on_hand: u32,
}

impl std::fmt::Display for Shortfall {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} (need {}, have {})",
            self.ingredient, self.requested, self.on_hand
        )
    }
}

fn list_shortfalls(short: &[Shortfall]) -> String {
    short
        .iter()
        .map(Shortfall::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Errors that can occur during ledger operations.
#[derive(Debug, Clone, Error)]
pub enum StockError {
    /// The reservation could not be covered. Names every short ingredient;
    /// stock was left untouched.
    #[error("insufficient stock: {}", list_shortfalls(.short))]
    Insufficient {
        /// Every ingredient the request could not be covered for.
        short: Vec<Shortfall>,
    },
}

impl StockError {
    /// The ingredients named by an [`Insufficient`](Self::Insufficient) error.
    pub fn short_ingredients(&self) -> Vec<Ingredient> {
        match self {
            StockError::Insufficient { short } => short.iter().map(|s| s.ingredient).collect(),
        }
    }
}
