//! Campaigns
//!
//! A [`Campaign`] is kept as loaded: a category label, a type label and a bag
//! of parameters. It is only decoded into a typed [`CampaignDiscount`] once
//! the calculator decides to apply it, so parameters of campaigns that are
//! never applied are never inspected.

use std::{fmt, str::FromStr};

use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

pub mod parameters;
pub mod types;

pub use parameters::{ParameterValue, Parameters};
pub use types::{CampaignDiscount, CouponDiscount, OnTopDiscount, SeasonalDiscount};

/// Errors raised while decoding a campaign's parameters.
#[derive(Debug, Error, PartialEq)]
pub enum CampaignError {
    /// The campaign's formula needs a parameter the record does not have.
    #[error("campaign `{kind}` is missing field `{field}`")]
    MissingField {
        /// Campaign type label
        kind: String,
        /// Key of the absent parameter
        field: &'static str,
    },

    /// The parameter exists but holds the wrong kind of value.
    #[error("campaign `{kind}` field `{field}` should be {expected}, got `{found}`")]
    InvalidField {
        /// Campaign type label
        kind: String,
        /// Key of the offending parameter
        field: &'static str,
        /// What the formula needed
        expected: &'static str,
        /// What the record held
        found: String,
    },
}

/// The slot a campaign competes for. At most one campaign per slot is applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CampaignCategory {
    /// Coupon
    Coupon,

    /// On Top
    OnTop,

    /// Seasonal
    Seasonal,
}

impl CampaignCategory {
    /// All categories, in priority order.
    pub const ALL: [CampaignCategory; 3] = [
        CampaignCategory::Coupon,
        CampaignCategory::OnTop,
        CampaignCategory::Seasonal,
    ];

    /// The label used for this category in campaign documents.
    pub fn label(self) -> &'static str {
        match self {
            CampaignCategory::Coupon => "Coupon",
            CampaignCategory::OnTop => "On Top",
            CampaignCategory::Seasonal => "Seasonal",
        }
    }
}

impl fmt::Display for CampaignCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A category label that is not one of the known slots.
#[derive(Debug, Error, PartialEq)]
#[error("unknown campaign category `{0}`")]
pub struct UnknownCategory(pub String);

impl FromStr for CampaignCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CampaignCategory::ALL
            .into_iter()
            .find(|category| category.label() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// A discount campaign as it appears in the campaigns document.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Campaign {
    category: String,

    #[serde(rename = "type")]
    kind: String,

    /// Nested `parameters` mapping
    #[serde(default)]
    parameters: Parameters,

    /// Every other top-level key
    #[serde(flatten)]
    fields: Parameters,
}

impl Campaign {
    /// Create a campaign with the given category and type labels and no parameters.
    pub fn new(category: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            kind: kind.into(),
            parameters: Parameters::default(),
            fields: Parameters::default(),
        }
    }

    /// Add a value to the nested `parameters` mapping.
    #[must_use]
    pub fn with_parameter(
        mut self,
        key: impl Into<String>,
        value: impl Into<ParameterValue>,
    ) -> Self {
        self.parameters.insert(key.into(), value.into());
        self
    }

    /// Add a top-level value next to `category` and `type`.
    #[must_use]
    pub fn with_field(
        mut self,
        key: impl Into<String>,
        value: impl Into<ParameterValue>,
    ) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Category label as written in the document.
    pub fn category_label(&self) -> &str {
        &self.category
    }

    /// Parsed category, or `None` when the label is not a known slot.
    pub fn category(&self) -> Option<CampaignCategory> {
        self.category.parse().ok()
    }

    /// Type label selecting the discount formula.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Decode this campaign's formula for the given slot.
    ///
    /// # Errors
    ///
    /// Returns a [`CampaignError`] if the formula's parameters are missing or malformed.
    pub fn discount(
        &self,
        category: CampaignCategory,
    ) -> Result<CampaignDiscount, CampaignError> {
        CampaignDiscount::decode(category, self)
    }

    /// Look up a number, trying each key in the nested parameters and then at top level.
    ///
    /// The first key names the parameter in errors.
    pub(crate) fn number(
        &self,
        keys: &'static [&'static str],
    ) -> Result<Decimal, CampaignError> {
        let (field, value) = self.lookup(keys, true)?;

        value.as_number().ok_or_else(|| self.invalid(field, "a number", value))
    }

    /// Look up text in the nested parameters only.
    pub(crate) fn nested_text(
        &self,
        keys: &'static [&'static str],
    ) -> Result<&str, CampaignError> {
        let (field, value) = self.lookup(keys, false)?;

        value.as_text().ok_or_else(|| self.invalid(field, "text", value))
    }

    fn lookup(
        &self,
        keys: &'static [&'static str],
        include_top_level: bool,
    ) -> Result<(&'static str, &ParameterValue), CampaignError> {
        let canonical = keys.first().copied().unwrap_or_default();

        let nested = keys.iter().find_map(|key| self.parameters.get(*key));
        let top_level = || {
            keys.iter()
                .find_map(|key| self.fields.get(*key))
                .filter(|_| include_top_level)
        };

        nested
            .or_else(top_level)
            .map(|value| (canonical, value))
            .ok_or_else(|| CampaignError::MissingField {
                kind: self.kind.clone(),
                field: canonical,
            })
    }

    fn invalid(
        &self,
        field: &'static str,
        expected: &'static str,
        found: &ParameterValue,
    ) -> CampaignError {
        CampaignError::InvalidField {
            kind: self.kind.clone(),
            field,
            expected,
            found: found.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn category_labels_round_trip() -> TestResult {
        for category in CampaignCategory::ALL {
            assert_eq!(category.label().parse::<CampaignCategory>()?, category);
        }

        Ok(())
    }

    #[test]
    fn unknown_category_label_is_rejected() {
        assert_eq!(
            "OnTop".parse::<CampaignCategory>(),
            Err(UnknownCategory("OnTop".to_string()))
        );
        assert_eq!(Campaign::new("Clearance", "Fixed amount").category(), None);
    }

    #[test]
    fn deserializes_top_level_and_nested_values() -> TestResult {
        let coupon: Campaign = serde_json::from_str(
            r#"{"category": "Coupon", "type": "Fixed amount", "amount": 50}"#,
        )?;
        let on_top: Campaign = serde_json::from_str(
            r#"{
                "category": "On Top",
                "type": "Percentage discount by item category",
                "parameters": {"category": "Clothing", "Percentage": 15}
            }"#,
        )?;

        assert_eq!(coupon.category(), Some(CampaignCategory::Coupon));
        assert_eq!(coupon.kind(), "Fixed amount");
        assert_eq!(coupon.number(&["amount"])?, Decimal::from(50));

        assert_eq!(on_top.category(), Some(CampaignCategory::OnTop));
        assert_eq!(on_top.nested_text(&["category"])?, "Clothing");
        assert_eq!(
            on_top.number(&["percentage", "Percentage"])?,
            Decimal::from(15)
        );

        Ok(())
    }

    #[test]
    fn nested_parameters_win_over_top_level() -> TestResult {
        let campaign = Campaign::new("Coupon", "Fixed amount")
            .with_field("amount", Decimal::from(10))
            .with_parameter("amount", Decimal::from(20));

        assert_eq!(campaign.number(&["amount"])?, Decimal::from(20));

        Ok(())
    }

    #[test]
    fn missing_field_names_the_first_key() {
        let campaign = Campaign::new("Seasonal", "Special campaigns");

        assert_eq!(
            campaign.number(&["Every X THB", "everyX"]),
            Err(CampaignError::MissingField {
                kind: "Special campaigns".to_string(),
                field: "Every X THB",
            })
        );
    }

    #[test]
    fn nested_text_ignores_top_level_keys() {
        let campaign = Campaign::new("On Top", "Percentage discount by item category")
            .with_field("category", "Clothing");

        assert!(matches!(
            campaign.nested_text(&["category"]),
            Err(CampaignError::MissingField { field: "category", .. })
        ));
    }

    #[test]
    fn wrong_value_kind_is_invalid() {
        let campaign = Campaign::new("Coupon", "Fixed amount").with_field("amount", "fifty");

        assert_eq!(
            campaign.number(&["amount"]),
            Err(CampaignError::InvalidField {
                kind: "Fixed amount".to_string(),
                field: "amount",
                expected: "a number",
                found: "fifty".to_string(),
            })
        );
    }
}
