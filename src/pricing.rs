//! Prices

use rust_decimal::Decimal;
use thiserror::Error;

use crate::items::CartItem;

/// Errors that can occur while calculating total price.
#[derive(Debug, Error, PartialEq)]
pub enum TotalPriceError {
    /// The sum no longer fits in a decimal.
    #[error("total price overflowed")]
    Overflow,
}

/// Calculates the total price of a list of items
///
/// An empty list totals zero.
///
/// # Errors
///
/// - [`TotalPriceError::Overflow`]: the sum exceeded the decimal range.
pub fn total_price(items: &[CartItem]) -> Result<Decimal, TotalPriceError> {
    sum_prices(items.iter())
}

/// Calculates the total price of the items in a single category
///
/// # Errors
///
/// - [`TotalPriceError::Overflow`]: the sum exceeded the decimal range.
pub fn category_total(items: &[CartItem], category: &str) -> Result<Decimal, TotalPriceError> {
    sum_prices(items.iter().filter(|item| item.in_category(category)))
}

fn sum_prices<'a>(
    mut items: impl Iterator<Item = &'a CartItem>,
) -> Result<Decimal, TotalPriceError> {
    items.try_fold(Decimal::ZERO, |acc, item| {
        acc.checked_add(item.price())
            .ok_or(TotalPriceError::Overflow)
    })
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn test_items() -> [CartItem; 3] {
        [
            CartItem::new(Decimal::from(350), "Clothing"),
            CartItem::new(Decimal::from(250), "Accessories"),
            CartItem::new(Decimal::from(700), "Clothing"),
        ]
    }

    #[test]
    fn test_total_price() -> TestResult {
        assert_eq!(total_price(&test_items())?, Decimal::from(1300));

        Ok(())
    }

    #[test]
    fn test_total_price_empty() -> TestResult {
        assert_eq!(total_price(&[])?, Decimal::ZERO);

        Ok(())
    }

    #[test]
    fn test_category_total() -> TestResult {
        let items = test_items();

        assert_eq!(category_total(&items, "Clothing")?, Decimal::from(1050));
        assert_eq!(category_total(&items, "Electronics")?, Decimal::ZERO);

        Ok(())
    }

    #[test]
    fn test_total_price_overflow() {
        let items = [
            CartItem::new(Decimal::MAX, "A"),
            CartItem::new(Decimal::ONE, "A"),
        ];

        assert_eq!(total_price(&items), Err(TotalPriceError::Overflow));
    }
}
