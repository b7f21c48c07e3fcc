//! Discounts
//!
//! The five discount formulas a campaign can apply. Each is a pure function
//! over decimals; none of them clamp their inputs.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::{
    items::CartItem,
    pricing::{TotalPriceError, category_total},
};

/// Share of the total that redeemed points may cover.
const POINTS_CAP: Decimal = Decimal::from_parts(2, 0, 0, false, 1);

/// Errors specific to discount calculations.
#[derive(Debug, Error, PartialEq)]
pub enum DiscountError {
    /// A special campaign was configured with a zero "every X" threshold.
    #[error("special campaign threshold is zero; cannot divide the total by it")]
    DivisionByZero,

    /// Intermediate arithmetic left the decimal range.
    #[error("discount arithmetic overflowed")]
    Overflow,

    /// Errors bubbled up from total price calculation.
    #[error(transparent)]
    TotalPrice(#[from] TotalPriceError),
}

/// Subtract a fixed amount from the total, never going below zero.
///
/// # Errors
///
/// Returns [`DiscountError::Overflow`] if the subtraction leaves the decimal range.
pub fn fixed_amount(total: Decimal, amount: Decimal) -> Result<Decimal, DiscountError> {
    let discounted = total
        .checked_sub(amount)
        .ok_or(DiscountError::Overflow)?;

    Ok(discounted.max(Decimal::ZERO))
}

/// Take `percentage` percent off the total.
///
/// A percentage above 100 yields a negative total.
///
/// # Errors
///
/// Returns [`DiscountError::Overflow`] if the arithmetic leaves the decimal range.
pub fn percentage(total: Decimal, percentage: Decimal) -> Result<Decimal, DiscountError> {
    total
        .checked_mul(remaining_share(percentage)?)
        .ok_or(DiscountError::Overflow)
}

/// Take `percentage` percent off the subtotal of the items in `category`.
///
/// The result is the discounted category subtotal, not a discount amount.
/// Returns zero when no item matches.
///
/// # Errors
///
/// Returns an error if the category subtotal or the percentage arithmetic overflows.
pub fn percentage_by_category(
    items: &[CartItem],
    category: &str,
    percentage: Decimal,
) -> Result<Decimal, DiscountError> {
    let subtotal = category_total(items, category)?;

    self::percentage(subtotal, percentage)
}

/// Redeem customer points against the total, capped at 20% of the total.
///
/// # Errors
///
/// Returns [`DiscountError::Overflow`] if the arithmetic leaves the decimal range.
pub fn points(total: Decimal, points: Decimal) -> Result<Decimal, DiscountError> {
    let cap = total
        .checked_mul(POINTS_CAP)
        .ok_or(DiscountError::Overflow)?;

    total
        .checked_sub(points.min(cap))
        .ok_or(DiscountError::Overflow)
}

/// Discount `discount_y` for every whole `every_x` in the total.
///
/// Returns the discount amount, which the caller subtracts from the total.
///
/// # Errors
///
/// - [`DiscountError::DivisionByZero`]: `every_x` is zero.
/// - [`DiscountError::Overflow`]: the arithmetic leaves the decimal range.
pub fn special_campaign(
    total: Decimal,
    every_x: Decimal,
    discount_y: Decimal,
) -> Result<Decimal, DiscountError> {
    if every_x.is_zero() {
        return Err(DiscountError::DivisionByZero);
    }

    let multiples = total
        .checked_div(every_x)
        .ok_or(DiscountError::Overflow)?
        .floor();

    multiples
        .checked_mul(discount_y)
        .ok_or(DiscountError::Overflow)
}

/// `1 - percentage / 100`
fn remaining_share(percentage: Decimal) -> Result<Decimal, DiscountError> {
    let fraction = percentage
        .checked_div(Decimal::ONE_HUNDRED)
        .ok_or(DiscountError::Overflow)?;

    Decimal::ONE
        .checked_sub(fraction)
        .ok_or(DiscountError::Overflow)
}
