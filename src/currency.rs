//! Currency

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use rusty_money::{
    Money,
    iso::{self, Currency},
};
use thiserror::Error;

/// Decimal places shown for an amount.
const DISPLAY_SCALE: u32 = 2;

/// Errors that can occur while formatting an amount.
#[derive(Debug, Error, PartialEq)]
pub enum CurrencyError {
    /// The amount does not fit in minor units.
    #[error("amount {0} cannot be represented in minor units")]
    OutOfRange(Decimal),
}

/// The currency prices are quoted in.
pub fn currency() -> &'static Currency {
    iso::THB
}

/// Convert a raw amount to money, rounding half-to-even at the minor unit.
///
/// # Errors
///
/// Returns [`CurrencyError::OutOfRange`] if the amount does not fit in `i64` minor units.
pub fn to_money(amount: Decimal) -> Result<Money<'static, Currency>, CurrencyError> {
    let minor_units = amount
        .checked_mul(Decimal::ONE_HUNDRED)
        .map(|minor| minor.round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven))
        .and_then(|minor| minor.to_i64())
        .ok_or(CurrencyError::OutOfRange(amount))?;

    Ok(Money::from_minor(minor_units, currency()))
}

/// Format an amount for display, e.g. `"1400.00 THB"`.
///
/// # Errors
///
/// Returns [`CurrencyError::OutOfRange`] if the amount does not fit in `i64` minor units.
pub fn format_currency(amount: Decimal) -> Result<String, CurrencyError> {
    let money = to_money(amount)?;
    let fixed = Decimal::new(money.to_minor_units(), DISPLAY_SCALE);

    Ok(format!("{fixed} {}", money.currency().iso_alpha_code))
}
