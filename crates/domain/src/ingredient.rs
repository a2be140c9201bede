//! Ingredients and the enum-indexed quantity table.

use serde::{Deserialize, Serialize};

/// The closed set of ingredients the counter stocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Ingredient {
    Water,
    Milk,
    Coffee,
    Cocoa,
    Tea,
    Sugar,
}

impl Ingredient {
    /// Number of ingredient kinds.
    pub const COUNT: usize = 6;

    /// Every ingredient, in declaration order.
    pub const ALL: [Self; Self::COUNT] = [
        Ingredient::Water,
        Ingredient::Milk,
        Ingredient::Coffee,
        Ingredient::Cocoa,
        Ingredient::Tea,
        Ingredient::Sugar,
    ];

    /// Position of this ingredient in an [`IngredientAmounts`] table.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Returns the ingredient name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Ingredient::Water => "water",
            Ingredient::Milk => "milk",
            Ingredient::Coffee => "coffee",
            Ingredient::Cocoa => "cocoa",
            Ingredient::Tea => "tea",
            Ingredient::Sugar => "sugar",
        }
    }
}

impl std::fmt::Display for Ingredient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Quantity in grams per ingredient, indexed by the closed [`Ingredient`] enum.
///
/// Used both for recipe requirements and for stock levels, so a reservation
/// is a plain element-wise subtraction of one table from another. Quantities
/// are unsigned; the table cannot represent a negative level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct IngredientAmounts([u32; Ingredient::COUNT]);

impl IngredientAmounts {
    /// Creates an empty table (every quantity zero).
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the quantity for an ingredient.
    pub fn get(&self, ingredient: Ingredient) -> u32 {
        self.0[ingredient.index()]
    }

    /// Sets the quantity for an ingredient.
    pub fn set(&mut self, ingredient: Ingredient, grams: u32) {
        self.0[ingredient.index()] = grams;
    }

    /// Builder-style [`set`](Self::set).
    pub fn with(mut self, ingredient: Ingredient, grams: u32) -> Self {
        self.set(ingredient, grams);
        self
    }

    /// Adds to the quantity for an ingredient.
    pub fn add(&mut self, ingredient: Ingredient, grams: u32) {
        self.0[ingredient.index()] += grams;
    }

    /// Subtracts from the quantity for an ingredient, clamping at zero.
    pub fn sub(&mut self, ingredient: Ingredient, grams: u32) {
        let slot = &mut self.0[ingredient.index()];
        *slot = slot.saturating_sub(grams);
    }

    /// Iterates over every ingredient with its quantity, including zeros.
    pub fn iter(&self) -> impl Iterator<Item = (Ingredient, u32)> + '_ {
        Ingredient::ALL.into_iter().map(move |i| (i, self.get(i)))
    }

    /// True if every quantity is zero.
    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|&q| q == 0)
    }
}
