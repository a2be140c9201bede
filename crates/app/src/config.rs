//! Application configuration loaded from environment variables.

use std::time::Duration;

use domain::{Ingredient, IngredientAmounts};

/// Counter configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `STOCK_<INGREDIENT>` — opening grams per ingredient (e.g. `STOCK_COFFEE`)
/// - `LOW_STOCK_THRESHOLD` — alert threshold in grams (default: `50`)
/// - `NOTIFY_CHANNEL` — default notification channel (default: `"counter"`)
/// - `APPROVAL_PERCENT` — payment approval percentage, clamped to 0–100 (default: `90`)
/// - `MAX_PREPARATIONS` — drinks in preparation at once (default: `4`)
/// - `PAYMENT_TIMEOUT_MS` — charge timeout before treating as declined (default: `5000`)
/// - `PREP_TIME_SCALE` — scales recipe preparation times (default: `1.0`)
#[derive(Debug, Clone)]
pub struct Config {
    pub initial_stock: IngredientAmounts,
    pub low_stock_threshold: u32,
    pub default_channel: String,
    pub approval_percent: u8,
    pub max_preparations: usize,
    pub payment_timeout_ms: u64,
    pub prep_time_scale: f64,
}

impl Config {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let mut initial_stock = defaults.initial_stock;
        for ingredient in Ingredient::ALL {
            let var = format!("STOCK_{}", ingredient.as_str().to_uppercase());
            if let Some(grams) = std::env::var(&var).ok().and_then(|v| v.parse().ok()) {
                initial_stock.set(ingredient, grams);
            }
        }

        Self {
            initial_stock,
            low_stock_threshold: env_parse("LOW_STOCK_THRESHOLD", defaults.low_stock_threshold),
            default_channel: std::env::var("NOTIFY_CHANNEL")
                .unwrap_or(defaults.default_channel),
            approval_percent: env_parse::<u8>("APPROVAL_PERCENT", defaults.approval_percent)
                .min(100),
            max_preparations: env_parse("MAX_PREPARATIONS", defaults.max_preparations),
            payment_timeout_ms: env_parse("PAYMENT_TIMEOUT_MS", defaults.payment_timeout_ms),
            prep_time_scale: env_parse("PREP_TIME_SCALE", defaults.prep_time_scale),
        }
    }

    /// The charge timeout as a `Duration`.
    pub fn payment_timeout(&self) -> Duration {
        Duration::from_millis(self.payment_timeout_ms)
    }
}

fn env_parse<T: std::str::FromStr>(var: &str, default: T) -> T {
    std::env::var(var)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            initial_stock: IngredientAmounts::new()
                .with(Ingredient::Water, 5000)
                .with(Ingredient::Milk, 3000)
                .with(Ingredient::Coffee, 1000)
                .with(Ingredient::Cocoa, 500)
                .with(Ingredient::Tea, 200)
                .with(Ingredient::Sugar, 800),
            low_stock_threshold: 50,
            default_channel: "counter".to_string(),
            approval_percent: 90,
            max_preparations: 4,
            payment_timeout_ms: 5000,
            prep_time_scale: 1.0,
        }
    }
}
