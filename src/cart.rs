//! Cart

use rust_decimal::Decimal;

use crate::{
    items::CartItem,
    pricing::{TotalPriceError, category_total, total_price},
};

/// Cart
#[derive(Debug, Clone, Default)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Create a new, empty cart.
    pub fn new() -> Self {
        Cart { items: Vec::new() }
    }

    /// Create a new cart with the given items.
    pub fn with_items(items: impl Into<Vec<CartItem>>) -> Self {
        Cart {
            items: items.into(),
        }
    }

    /// Calculate the subtotal of the cart.
    ///
    /// # Errors
    ///
    /// Returns a `TotalPriceError` if the sum overflows.
    pub fn subtotal(&self) -> Result<Decimal, TotalPriceError> {
        total_price(&self.items)
    }

    /// Calculate the subtotal of the items in one category.
    ///
    /// # Errors
    ///
    /// Returns a `TotalPriceError` if the sum overflows.
    pub fn category_subtotal(&self, category: &str) -> Result<Decimal, TotalPriceError> {
        category_total(&self.items, category)
    }

    /// The items in the cart, in the order they were added.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Iterate over the items in the cart.
    pub fn iter(&self) -> std::slice::Iter<'_, CartItem> {
        self.items.iter()
    }

    /// Get the number of items in the cart.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl From<Vec<CartItem>> for Cart {
    fn from(items: Vec<CartItem>) -> Self {
        Cart::with_items(items)
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a CartItem;
    type IntoIter = std::slice::Iter<'a, CartItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
