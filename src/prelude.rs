//! Discount campaigns prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    calculator::{PricingError, apply_discount, calculate_final_price, price_cart},
    campaigns::{
        Campaign, CampaignCategory, CampaignDiscount, CampaignError, CouponDiscount,
        OnTopDiscount, ParameterValue, SeasonalDiscount,
    },
    cart::Cart,
    currency::{CurrencyError, format_currency},
    discounts::DiscountError,
    items::CartItem,
    loader::{LoadError, load_campaigns, load_cart, load_cart_items},
    pricing::TotalPriceError,
    receipt::{Application, Receipt, ReceiptError},
};
