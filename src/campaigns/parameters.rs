//! Campaign Parameters

use std::fmt;

use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use serde::Deserialize;

/// Formula parameters keyed by their label in the source document.
pub type Parameters = FxHashMap<String, ParameterValue>;

/// A single campaign parameter value.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ParameterValue {
    /// Text value, such as an item category label
    Text(String),

    /// Numeric value, such as an amount or percentage
    Number(Decimal),

    /// Anything else the document carries (lists, booleans, nested maps)
    Other(serde_json::Value),
}

impl ParameterValue {
    /// Return the value as a number, if it is one.
    pub fn as_number(&self) -> Option<Decimal> {
        match self {
            ParameterValue::Number(number) => Some(*number),
            ParameterValue::Text(_) | ParameterValue::Other(_) => None,
        }
    }

    /// Return the value as text, if it is text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ParameterValue::Text(text) => Some(text),
            ParameterValue::Number(_) | ParameterValue::Other(_) => None,
        }
    }
}

impl From<Decimal> for ParameterValue {
    fn from(value: Decimal) -> Self {
        ParameterValue::Number(value)
    }
}

impl From<&str> for ParameterValue {
    fn from(value: &str) -> Self {
        ParameterValue::Text(value.to_string())
    }
}

impl From<String> for ParameterValue {
    fn from(value: String) -> Self {
        ParameterValue::Text(value)
    }
}

impl fmt::Display for ParameterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterValue::Text(text) => f.write_str(text),
            ParameterValue::Number(number) => write!(f, "{number}"),
            ParameterValue::Other(value) => write!(f, "{value}"),
        }
    }
}
