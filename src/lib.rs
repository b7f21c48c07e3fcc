//! Discount Campaigns
//!
//! Prices a cart by applying at most one Coupon, one On Top and one Seasonal
//! campaign, each chosen as the first campaign of its category in list order.

pub mod app;
pub mod calculator;
pub mod campaigns;
pub mod cart;
pub mod config;
pub mod currency;
pub mod discounts;
pub mod items;
pub mod loader;
pub mod logging;
pub mod prelude;
pub mod pricing;
pub mod receipt;
