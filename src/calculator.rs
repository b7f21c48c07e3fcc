//! Calculator
//!
//! Folds a list of campaigns into a cart's running total. Each category slot
//! (Coupon, On Top, Seasonal) is filled by the first campaign in list order
//! that names it; later campaigns for a filled slot are skipped without being
//! decoded.

use rust_decimal::Decimal;
use smallvec::SmallVec;
use thiserror::Error;

use crate::{
    campaigns::{
        Campaign, CampaignCategory, CampaignDiscount, CampaignError, CouponDiscount,
        OnTopDiscount, SeasonalDiscount,
    },
    cart::Cart,
    discounts::{self, DiscountError},
    pricing::TotalPriceError,
    receipt::{Application, Receipt},
};

/// Errors that abort a price calculation.
#[derive(Debug, Error, PartialEq)]
pub enum PricingError {
    /// A campaign selected for its slot could not be decoded.
    #[error("campaign #{index}: {source}")]
    Campaign {
        /// Position of the campaign in the list
        index: usize,
        /// Underlying decode error
        #[source]
        source: CampaignError,
    },

    /// A campaign's formula could not be evaluated.
    #[error("campaign #{index}: {source}")]
    Discount {
        /// Position of the campaign in the list
        index: usize,
        /// Underlying discount error
        #[source]
        source: DiscountError,
    },

    /// The cart subtotal could not be calculated.
    #[error(transparent)]
    TotalPrice(#[from] TotalPriceError),
}

impl PricingError {
    /// Position of the offending campaign, if a campaign caused the error.
    pub fn campaign_index(&self) -> Option<usize> {
        match self {
            PricingError::Campaign { index, .. } | PricingError::Discount { index, .. } => {
                Some(*index)
            }
            PricingError::TotalPrice(_) => None,
        }
    }
}

/// Which category slots have been consumed.
#[derive(Debug, Default, Clone, Copy)]
struct AppliedSlots {
    coupon: bool,
    on_top: bool,
    seasonal: bool,
}

impl AppliedSlots {
    fn slot(&mut self, category: CampaignCategory) -> &mut bool {
        match category {
            CampaignCategory::Coupon => &mut self.coupon,
            CampaignCategory::OnTop => &mut self.on_top,
            CampaignCategory::Seasonal => &mut self.seasonal,
        }
    }
}

/// Calculate the cart's final price after applying the campaigns.
///
/// # Errors
///
/// See [`price_cart`].
pub fn calculate_final_price(
    cart: &Cart,
    campaigns: &[Campaign],
) -> Result<Decimal, PricingError> {
    price_cart(cart, campaigns).map(|receipt| receipt.total())
}

/// Apply the campaigns to the cart and record what each slot did.
///
/// Campaigns with an unknown category label are skipped. A campaign with a
/// known category but an unknown type label fills its slot without changing
/// the total.
///
/// # Errors
///
/// - [`PricingError::TotalPrice`]: the cart subtotal overflowed.
/// - [`PricingError::Campaign`]: an applied campaign is missing a parameter its
///   formula needs, or the parameter has the wrong kind of value.
/// - [`PricingError::Discount`]: an applied formula failed, e.g. a special
///   campaign with a zero threshold.
pub fn price_cart(cart: &Cart, campaigns: &[Campaign]) -> Result<Receipt, PricingError> {
    let subtotal = cart.subtotal()?;

    let mut running_total = subtotal;
    let mut slots = AppliedSlots::default();
    let mut applications: SmallVec<[Application; 3]> = SmallVec::new();

    for (index, campaign) in campaigns.iter().enumerate() {
        let Some(category) = campaign.category() else {
            continue;
        };

        let applied = slots.slot(category);

        if *applied {
            continue;
        }

        let discount = campaign
            .discount(category)
            .map_err(|source| PricingError::Campaign { index, source })?;

        let total_after = apply_discount(&discount, running_total, cart)
            .map_err(|source| PricingError::Discount { index, source })?;

        applications.push(Application::new(
            index,
            campaign.kind(),
            discount,
            running_total,
            total_after,
        ));

        running_total = total_after;
        *applied = true;
    }

    Ok(Receipt::new(subtotal, running_total, applications))
}

/// Apply one decoded formula to the running total, returning the new total.
///
/// A percentage-by-category formula returns the discounted subtotal of that
/// category, which replaces the running total outright.
///
/// # Errors
///
/// Returns a [`DiscountError`] if the formula cannot be evaluated.
pub fn apply_discount(
    discount: &CampaignDiscount,
    running_total: Decimal,
    cart: &Cart,
) -> Result<Decimal, DiscountError> {
    match discount {
        CampaignDiscount::Coupon(CouponDiscount::FixedAmount { amount }) => {
            discounts::fixed_amount(running_total, *amount)
        }
        CampaignDiscount::Coupon(CouponDiscount::Percentage { percentage }) => {
            discounts::percentage(running_total, *percentage)
        }
        CampaignDiscount::OnTop(OnTopDiscount::PercentageByCategory {
            category,
            percentage,
        }) => discounts::percentage_by_category(cart.items(), category, *percentage),
        CampaignDiscount::OnTop(OnTopDiscount::Points { points }) => {
            discounts::points(running_total, *points)
        }
        CampaignDiscount::Seasonal(SeasonalDiscount::Special {
            every_x,
            discount_y,
        }) => {
            let amount = discounts::special_campaign(running_total, *every_x, *discount_y)?;

            running_total
                .checked_sub(amount)
                .ok_or(DiscountError::Overflow)
        }
        CampaignDiscount::Coupon(CouponDiscount::Unrecognised { .. })
        | CampaignDiscount::OnTop(OnTopDiscount::Unrecognised { .. })
        | CampaignDiscount::Seasonal(SeasonalDiscount::Unrecognised { .. }) => Ok(running_total),
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{campaigns::types::FIXED_AMOUNT, items::CartItem};

    use super::*;

    fn dec(value: i64) -> Decimal {
        Decimal::from(value)
    }

    fn cart() -> Cart {
        Cart::with_items(vec![
            CartItem::new(dec(1_000), "A"),
            CartItem::new(dec(500), "B"),
        ])
    }

    #[test]
    fn no_campaigns_returns_subtotal() -> TestResult {
        assert_eq!(calculate_final_price(&cart(), &[])?, dec(1_500));

        Ok(())
    }

    #[test]
    fn empty_cart_with_campaigns_is_zero() -> TestResult {
        let campaigns = [Campaign::new("Coupon", FIXED_AMOUNT).with_field("amount", dec(100))];

        assert_eq!(calculate_final_price(&Cart::new(), &campaigns)?, Decimal::ZERO);

        Ok(())
    }

    #[test]
    fn unknown_category_is_skipped() -> TestResult {
        let campaigns = [
            Campaign::new("Clearance", FIXED_AMOUNT).with_field("amount", dec(100)),
            Campaign::new("Coupon", FIXED_AMOUNT).with_field("amount", dec(10)),
        ];

        let receipt = price_cart(&cart(), &campaigns)?;

        assert_eq!(receipt.total(), dec(1_490));
        assert_eq!(receipt.applications().len(), 1);

        Ok(())
    }

    #[test]
    fn filled_slot_does_not_decode_later_campaigns() -> TestResult {
        let campaigns = [
            Campaign::new("Coupon", FIXED_AMOUNT).with_field("amount", dec(100)),
            // Missing `amount`, but never applied.
            Campaign::new("Coupon", FIXED_AMOUNT),
        ];

        assert_eq!(calculate_final_price(&cart(), &campaigns)?, dec(1_400));

        Ok(())
    }

    #[test]
    fn applied_campaign_missing_field_is_reported_with_index() {
        let campaigns = [
            Campaign::new("Seasonal", "Special campaigns")
                .with_parameter("Every X THB", dec(300)),
        ];

        let error = calculate_final_price(&cart(), &campaigns);

        assert_eq!(
            error,
            Err(PricingError::Campaign {
                index: 0,
                source: CampaignError::MissingField {
                    kind: "Special campaigns".to_string(),
                    field: "Discount Y THB",
                },
            })
        );
    }

    #[test]
    fn zero_threshold_is_division_by_zero() {
        let campaigns = [
            Campaign::new("Coupon", FIXED_AMOUNT).with_field("amount", dec(100)),
            Campaign::new("Seasonal", "Special campaigns")
                .with_parameter("Every X THB", Decimal::ZERO)
                .with_parameter("Discount Y THB", dec(20)),
        ];

        let result = calculate_final_price(&cart(), &campaigns);

        assert_eq!(
            result,
            Err(PricingError::Discount {
                index: 1,
                source: DiscountError::DivisionByZero,
            })
        );
        assert_eq!(
            result.as_ref().err().and_then(PricingError::campaign_index),
            Some(1)
        );
    }

    #[test]
    fn applications_record_before_and_after() -> TestResult {
        let campaigns = [
            Campaign::new("Coupon", "Percentage discount").with_field("percentage", dec(10)),
            Campaign::new("On Top", "Discount by points")
                .with_parameter("Customer points", dec(50)),
        ];

        let receipt = price_cart(&cart(), &campaigns)?;
        let totals: Vec<_> = receipt
            .applications()
            .iter()
            .map(|app| (app.index(), app.total_before(), app.total_after()))
            .collect();

        assert_eq!(
            totals,
            vec![(0, dec(1_500), dec(1_350)), (1, dec(1_350), dec(1_300))]
        );

        Ok(())
    }
}
