//! Calculator configuration

use std::path::PathBuf;

use clap::{Args, Parser};

/// Log output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    /// Compact, human-readable logs.
    Compact,

    /// Structured JSON logs.
    Json,
}

/// Logging settings.
#[derive(Debug, Clone, Args)]
pub struct LoggingConfig {
    /// Log level or filter directives (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,

    /// Log format (compact, json)
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Compact,
        }
    }
}

/// Input document locations.
#[derive(Debug, Clone, Args)]
pub struct InputConfig {
    /// Cart items document (JSON, or YAML by extension)
    #[arg(long, env = "CART_ITEMS_PATH", default_value = "data/cart_items.json")]
    pub cart_items: PathBuf,

    /// Discount campaigns document (JSON, or YAML by extension)
    #[arg(
        long,
        env = "DISCOUNT_CAMPAIGNS_PATH",
        default_value = "data/discount_campaigns.json"
    )]
    pub campaigns: PathBuf,
}

/// Discount calculator configuration
#[derive(Debug, Clone, Parser)]
#[command(
    name = "discount-campaigns",
    about = "Apply Coupon, On Top and Seasonal campaigns to a cart",
    long_about = None
)]
pub struct CalculatorConfig {
    /// Input documents.
    #[command(flatten)]
    pub inputs: InputConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Print a per-campaign receipt to stdout
    #[arg(long, env = "PRINT_RECEIPT")]
    pub receipt: bool,
}

impl CalculatorConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Configuration for the given documents with default logging.
    pub fn for_documents(cart_items: impl Into<PathBuf>, campaigns: impl Into<PathBuf>) -> Self {
        Self {
            inputs: InputConfig {
                cart_items: cart_items.into(),
                campaigns: campaigns.into(),
            },
            logging: LoggingConfig::default(),
            receipt: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn flags_override_defaults() -> TestResult {
        let config = CalculatorConfig::try_parse_from([
            "discount-campaigns",
            "--cart-items",
            "cart.yml",
            "--campaigns",
            "campaigns.yml",
            "--log-format",
            "json",
            "--log-level",
            "debug",
            "--receipt",
        ])?;

        assert_eq!(config.inputs.cart_items, PathBuf::from("cart.yml"));
        assert_eq!(config.inputs.campaigns, PathBuf::from("campaigns.yml"));
        assert_eq!(config.logging.log_format, LogFormat::Json);
        assert_eq!(config.logging.log_level, "debug");
        assert!(config.receipt);

        Ok(())
    }

    #[test]
    fn unknown_log_format_is_rejected() {
        let result =
            CalculatorConfig::try_parse_from(["discount-campaigns", "--log-format", "pretty"]);

        assert!(result.is_err());
    }

    #[test]
    fn for_documents_uses_default_logging() {
        let config = CalculatorConfig::for_documents("a.json", "b.json");

        assert_eq!(config.logging.log_level, "info");
        assert_eq!(config.logging.log_format, LogFormat::Compact);
        assert!(!config.receipt);
    }
}
