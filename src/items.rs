//! Items

use rust_decimal::Decimal;
use serde::Deserialize;

/// A single line in the cart
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct CartItem {
    price: Decimal,
    category: String,
}

impl CartItem {
    /// Creates a new item with the given price and category
    pub fn new(price: Decimal, category: impl Into<String>) -> Self {
        Self {
            price,
            category: category.into(),
        }
    }

    /// Returns the price of the item
    pub fn price(&self) -> Decimal {
        self.price
    }

    /// Returns the category label of the item
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Whether the item belongs to the given category label
    pub fn in_category(&self, category: &str) -> bool {
        self.category == category
    }
}
