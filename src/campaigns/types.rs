//! Campaign Types
//!
//! One closed set of formulas per slot. A type label the slot does not know
//! decodes to `Unrecognised`, which still occupies the slot but leaves the
//! total unchanged.

use rust_decimal::Decimal;

use crate::campaigns::{Campaign, CampaignCategory, CampaignError};

/// `"Fixed amount"` coupon type label
pub const FIXED_AMOUNT: &str = "Fixed amount";

/// `"Percentage discount"` coupon type label
pub const PERCENTAGE_DISCOUNT: &str = "Percentage discount";

/// `"Percentage discount by item category"` on-top type label
pub const PERCENTAGE_BY_ITEM_CATEGORY: &str = "Percentage discount by item category";

/// `"Discount by points"` on-top type label
pub const DISCOUNT_BY_POINTS: &str = "Discount by points";

/// `"Special campaigns"` seasonal type label
pub const SPECIAL_CAMPAIGNS: &str = "Special campaigns";

const AMOUNT: &[&str] = &["amount"];
const PERCENTAGE: &[&str] = &["percentage", "Percentage"];
const ITEM_CATEGORY: &[&str] = &["category"];
const POINTS: &[&str] = &["Customer points", "points"];
const EVERY_X: &[&str] = &["Every X THB", "everyX"];
const DISCOUNT_Y: &[&str] = &["Discount Y THB", "discountY"];

/// Coupon formulas
#[derive(Clone, Debug, PartialEq)]
pub enum CouponDiscount {
    /// Take a fixed amount off the total.
    FixedAmount {
        /// Amount to subtract
        amount: Decimal,
    },

    /// Take a percentage off the total.
    Percentage {
        /// Percentage, where `10` means 10%
        percentage: Decimal,
    },

    /// Type label not known for coupons.
    Unrecognised {
        /// The type label as written
        kind: String,
    },
}

impl CouponDiscount {
    fn decode(campaign: &Campaign) -> Result<Self, CampaignError> {
        Ok(match campaign.kind() {
            FIXED_AMOUNT => CouponDiscount::FixedAmount {
                amount: campaign.number(AMOUNT)?,
            },
            PERCENTAGE_DISCOUNT => CouponDiscount::Percentage {
                percentage: campaign.number(PERCENTAGE)?,
            },
            other => CouponDiscount::Unrecognised {
                kind: other.to_string(),
            },
        })
    }
}

/// On-top formulas
#[derive(Clone, Debug, PartialEq)]
pub enum OnTopDiscount {
    /// Replace the total with the discounted subtotal of one item category.
    PercentageByCategory {
        /// Item category label
        category: String,

        /// Percentage, where `15` means 15%
        percentage: Decimal,
    },

    /// Redeem customer points, capped at 20% of the total.
    Points {
        /// Points to redeem, one point per currency unit
        points: Decimal,
    },

    /// Type label not known for on-top campaigns.
    Unrecognised {
        /// The type label as written
        kind: String,
    },
}

impl OnTopDiscount {
    fn decode(campaign: &Campaign) -> Result<Self, CampaignError> {
        Ok(match campaign.kind() {
            PERCENTAGE_BY_ITEM_CATEGORY => OnTopDiscount::PercentageByCategory {
                category: campaign.nested_text(ITEM_CATEGORY)?.to_string(),
                percentage: campaign.number(PERCENTAGE)?,
            },
            DISCOUNT_BY_POINTS => OnTopDiscount::Points {
                points: campaign.number(POINTS)?,
            },
            other => OnTopDiscount::Unrecognised {
                kind: other.to_string(),
            },
        })
    }
}

/// Seasonal formulas
#[derive(Clone, Debug, PartialEq)]
pub enum SeasonalDiscount {
    /// Discount `discount_y` for every whole `every_x` in the total.
    Special {
        /// Threshold the total is divided by
        every_x: Decimal,

        /// Discount per whole threshold
        discount_y: Decimal,
    },

    /// Type label not known for seasonal campaigns.
    Unrecognised {
        /// The type label as written
        kind: String,
    },
}

impl SeasonalDiscount {
    fn decode(campaign: &Campaign) -> Result<Self, CampaignError> {
        Ok(match campaign.kind() {
            SPECIAL_CAMPAIGNS => SeasonalDiscount::Special {
                every_x: campaign.number(EVERY_X)?,
                discount_y: campaign.number(DISCOUNT_Y)?,
            },
            other => SeasonalDiscount::Unrecognised {
                kind: other.to_string(),
            },
        })
    }
}

/// A campaign's formula, decoded for the slot it occupies.
#[derive(Clone, Debug, PartialEq)]
pub enum CampaignDiscount {
    /// Coupon slot
    Coupon(CouponDiscount),

    /// On Top slot
    OnTop(OnTopDiscount),

    /// Seasonal slot
    Seasonal(SeasonalDiscount),
}

impl CampaignDiscount {
    /// Decode the formula a campaign selects within the given slot.
    ///
    /// # Errors
    ///
    /// Returns a [`CampaignError`] if a parameter the formula needs is missing or malformed.
    pub fn decode(
        category: CampaignCategory,
        campaign: &Campaign,
    ) -> Result<Self, CampaignError> {
        match category {
            CampaignCategory::Coupon => CouponDiscount::decode(campaign).map(Self::Coupon),
            CampaignCategory::OnTop => OnTopDiscount::decode(campaign).map(Self::OnTop),
            CampaignCategory::Seasonal => SeasonalDiscount::decode(campaign).map(Self::Seasonal),
        }
    }

    /// The slot this formula occupies.
    pub fn category(&self) -> CampaignCategory {
        match self {
            CampaignDiscount::Coupon(_) => CampaignCategory::Coupon,
            CampaignDiscount::OnTop(_) => CampaignCategory::OnTop,
            CampaignDiscount::Seasonal(_) => CampaignCategory::Seasonal,
        }
    }

    /// Whether the type label was unknown for the slot.
    pub fn is_unrecognised(&self) -> bool {
        matches!(
            self,
            CampaignDiscount::Coupon(CouponDiscount::Unrecognised { .. })
                | CampaignDiscount::OnTop(OnTopDiscount::Unrecognised { .. })
                | CampaignDiscount::Seasonal(SeasonalDiscount::Unrecognised { .. })
        )
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn decodes_coupon_formulas() -> TestResult {
        let fixed = Campaign::new("Coupon", FIXED_AMOUNT).with_field("amount", Decimal::from(50));
        let percent =
            Campaign::new("Coupon", PERCENTAGE_DISCOUNT).with_field("percentage", Decimal::from(10));

        assert_eq!(
            fixed.discount(CampaignCategory::Coupon)?,
            CampaignDiscount::Coupon(CouponDiscount::FixedAmount {
                amount: Decimal::from(50)
            })
        );
        assert_eq!(
            percent.discount(CampaignCategory::Coupon)?,
            CampaignDiscount::Coupon(CouponDiscount::Percentage {
                percentage: Decimal::from(10)
            })
        );

        Ok(())
    }

    #[test]
    fn decodes_on_top_formulas() -> TestResult {
        let by_category = Campaign::new("On Top", PERCENTAGE_BY_ITEM_CATEGORY)
            .with_parameter("category", "Clothing")
            .with_parameter("Percentage", Decimal::from(15));
        let points = Campaign::new("On Top", DISCOUNT_BY_POINTS)
            .with_parameter("Customer points", Decimal::from(68));

        assert_eq!(
            by_category.discount(CampaignCategory::OnTop)?,
            CampaignDiscount::OnTop(OnTopDiscount::PercentageByCategory {
                category: "Clothing".to_string(),
                percentage: Decimal::from(15),
            })
        );
        assert_eq!(
            points.discount(CampaignCategory::OnTop)?,
            CampaignDiscount::OnTop(OnTopDiscount::Points {
                points: Decimal::from(68)
            })
        );

        Ok(())
    }

    #[test]
    fn decodes_seasonal_formula_with_either_key_style() -> TestResult {
        let labelled = Campaign::new("Seasonal", SPECIAL_CAMPAIGNS)
            .with_parameter("Every X THB", Decimal::from(300))
            .with_parameter("Discount Y THB", Decimal::from(40));
        let short = Campaign::new("Seasonal", SPECIAL_CAMPAIGNS)
            .with_parameter("everyX", Decimal::from(300))
            .with_parameter("discountY", Decimal::from(40));

        let expected = CampaignDiscount::Seasonal(SeasonalDiscount::Special {
            every_x: Decimal::from(300),
            discount_y: Decimal::from(40),
        });

        assert_eq!(labelled.discount(CampaignCategory::Seasonal)?, expected);
        assert_eq!(short.discount(CampaignCategory::Seasonal)?, expected);

        Ok(())
    }

    #[test]
    fn unknown_type_is_unrecognised_not_an_error() -> TestResult {
        let campaign = Campaign::new("Coupon", "Buy one get one");
        let discount = campaign.discount(CampaignCategory::Coupon)?;

        assert!(discount.is_unrecognised());
        assert_eq!(discount.category(), CampaignCategory::Coupon);

        Ok(())
    }

    #[test]
    fn type_labels_are_scoped_to_their_slot() -> TestResult {
        let campaign = Campaign::new("Seasonal", FIXED_AMOUNT).with_field("amount", Decimal::from(50));

        assert_eq!(
            campaign.discount(CampaignCategory::Seasonal)?,
            CampaignDiscount::Seasonal(SeasonalDiscount::Unrecognised {
                kind: FIXED_AMOUNT.to_string()
            })
        );

        Ok(())
    }

    #[test]
    fn known_type_without_parameters_is_missing_field() {
        let campaign = Campaign::new("On Top", DISCOUNT_BY_POINTS);

        assert_eq!(
            campaign.discount(CampaignCategory::OnTop),
            Err(CampaignError::MissingField {
                kind: DISCOUNT_BY_POINTS.to_string(),
                field: "Customer points",
            })
        );
    }
}
