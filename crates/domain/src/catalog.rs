//! Beverages, recipes, and the recipe catalog.

use std::collections::HashMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::ingredient::{Ingredient, IngredientAmounts};
use crate::money::Money;

/// The closed set of beverages the counter can make.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Beverage {
    Espresso,
    Americano,
    Latte,
    Cappuccino,
    Mocha,
    HotChocolate,
    BlackTea,
}

impl Beverage {
    /// Returns the beverage name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Beverage::Espresso => "espresso",
            Beverage::Americano => "americano",
            Beverage::Latte => "latte",
            Beverage::Cappuccino => "cappuccino",
            Beverage::Mocha => "mocha",
            Beverage::HotChocolate => "hot_chocolate",
            Beverage::BlackTea => "black_tea",
        }
    }
}

impl std::fmt::Display for Beverage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How to make one beverage: required ingredients, preparation time, price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    /// The beverage this recipe makes.
    pub beverage: Beverage,

    /// Required quantity in grams per ingredient.
    pub ingredients: IngredientAmounts,

    /// How long preparation takes at the station.
    pub prep_time: Duration,

    /// Price charged for the finished drink.
    pub price: Money,
}

impl Recipe {
    /// Creates a new recipe.
    pub fn new(
        beverage: Beverage,
        ingredients: IngredientAmounts,
        prep_time: Duration,
        price: Money,
    ) -> Self {
        Self {
            beverage,
            ingredients,
            prep_time,
            price,
        }
    }

    /// Effective ingredient requirements for a given sweetness adjustment.
    ///
    /// The adjustment is extra grams of sugar, applied only when the base
    /// recipe already contains sugar; a sugar-free recipe ignores it.
    pub fn ingredients_for(&self, sweetness: u32) -> IngredientAmounts {
        let mut needs = self.ingredients;
        if needs.get(Ingredient::Sugar) > 0 {
            needs.add(Ingredient::Sugar, sweetness);
        }
        needs
    }
}

/// Immutable mapping from beverage kind to its recipe. Loaded once.
#[derive(Debug, Clone)]
pub struct RecipeCatalog {
    recipes: HashMap<Beverage, Recipe>,
}

impl RecipeCatalog {
    /// Creates a catalog from a list of recipes, keyed by beverage.
    pub fn new(recipes: impl IntoIterator<Item = Recipe>) -> Self {
        Self {
            recipes: recipes
                .into_iter()
                .map(|recipe| (recipe.beverage, recipe))
                .collect(),
        }
    }

    /// The standard counter menu.
    pub fn standard() -> Self {
        Self::new([
            Recipe::new(
                Beverage::Espresso,
                IngredientAmounts::new()
                    .with(Ingredient::Water, 30)
                    .with(Ingredient::Coffee, 18),
                Duration::from_secs(25),
                Money::from_cents(250),
            ),
            Recipe::new(
                Beverage::Americano,
                IngredientAmounts::new()
                    .with(Ingredient::Water, 150)
                    .with(Ingredient::Coffee, 18),
                Duration::from_secs(30),
                Money::from_cents(300),
            ),
            Recipe::new(
                Beverage::Latte,
                IngredientAmounts::new()
                    .with(Ingredient::Water, 30)
                    .with(Ingredient::Milk, 200)
                    .with(Ingredient::Coffee, 18),
                Duration::from_secs(45),
                Money::from_cents(420),
            ),
            Recipe::new(
                Beverage::Cappuccino,
                IngredientAmounts::new()
                    .with(Ingredient::Water, 30)
                    .with(Ingredient::Milk, 120)
                    .with(Ingredient::Coffee, 18),
                Duration::from_secs(40),
                Money::from_cents(400),
            ),
            Recipe::new(
                Beverage::Mocha,
                IngredientAmounts::new()
                    .with(Ingredient::Water, 30)
                    .with(Ingredient::Milk, 150)
                    .with(Ingredient::Coffee, 18)
                    .with(Ingredient::Cocoa, 20)
                    .with(Ingredient::Sugar, 15),
                Duration::from_secs(50),
                Money::from_cents(480),
            ),
            Recipe::new(
                Beverage::HotChocolate,
                IngredientAmounts::new()
                    .with(Ingredient::Milk, 220)
                    .with(Ingredient::Cocoa, 30)
                    .with(Ingredient::Sugar, 20),
                Duration::from_secs(35),
                Money::from_cents(380),
            ),
            Recipe::new(
                Beverage::BlackTea,
                IngredientAmounts::new()
                    .with(Ingredient::Water, 250)
                    .with(Ingredient::Tea, 5),
                Duration::from_secs(20),
                Money::from_cents(220),
            ),
        ])
    }

    /// Looks up the recipe for a beverage.
    pub fn recipe(&self, beverage: Beverage) -> Option<&Recipe> {
        self.recipes.get(&beverage)
    }

    /// Number of beverages on the menu.
    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    /// True if the catalog has no recipes.
    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}
