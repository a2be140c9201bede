//! Preparation service trait and the counter's station.

use std::sync::Arc;

use async_trait::async_trait;
use domain::{Order, Recipe};
use tokio::sync::Semaphore;

use crate::error::FulfillmentError;

/// Trait for the time-costly preparation step.
#[async_trait]
pub trait PreparationService: Send + Sync {
    /// Makes the drink. Completes after the recipe's preparation time;
    /// runs inside the per-order task, never on the intake path.
    async fn prepare(&self, order: &Order, recipe: &Recipe) -> Result<(), FulfillmentError>;
}

/// Station that sleeps for the recipe's preparation time, scaled by a
/// configurable factor, with a bounded number of drinks in the works at
/// once.
pub struct PreparationStation {
    permits: Arc<Semaphore>,
    time_scale: f64,
}

impl PreparationStation {
    /// Creates a station preparing at most `max_concurrent` drinks at a time.
    pub fn new(max_concurrent: usize) -> Self {
        Self {
            permits: Arc::new(Semaphore::new(max_concurrent)),
            time_scale: 1.0,
        }
    }

    /// Scales every preparation duration; `0.0` makes preparation instant.
    pub fn with_time_scale(mut self, scale: f64) -> Self {
        self.time_scale = scale.max(0.0);
        self
    }

    /// Number of free preparation slots.
    pub fn free_slots(&self) -> usize {
        self.permits.available_permits()
    }
}

#[async_trait]
impl PreparationService for PreparationStation {
    async fn prepare(&self, order: &Order, recipe: &Recipe) -> Result<(), FulfillmentError> {
        let _slot = self
            .permits
            .acquire()
            .await
            .map_err(|e| FulfillmentError::Preparation(format!("station closed: {e}")))?;

        let working_time = recipe.prep_time.mul_f64(self.time_scale);
        tracing::debug!(
            order_id = %order.id,
            beverage = %recipe.beverage,
            ?working_time,
            "preparing"
        );
        tokio::time::sleep(working_time).await;

        tracing::debug!(order_id = %order.id, "drink ready");
        Ok(())
    }
}
