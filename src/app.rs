//! Application runner
//!
//! Loads the two input documents, prices the cart and reports the final
//! price. Logs through whatever dispatcher the caller has in scope.

use std::io;

use thiserror::Error;
use tracing::{error, info};

use crate::{
    calculator::{PricingError, price_cart},
    config::CalculatorConfig,
    currency::{CurrencyError, format_currency},
    loader::{LoadError, load_campaigns, load_cart},
    receipt::{Receipt, ReceiptError},
};

/// Errors that end a run.
#[derive(Debug, Error)]
pub enum AppError {
    /// An input document could not be loaded.
    #[error(transparent)]
    Load(#[from] LoadError),

    /// The cart could not be priced.
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// The final price could not be formatted.
    #[error(transparent)]
    Currency(#[from] CurrencyError),

    /// The receipt could not be written.
    #[error(transparent)]
    Receipt(#[from] ReceiptError),
}

/// Price the configured cart, logging progress and the final price.
///
/// When the configuration asks for a receipt it is written to `out`.
///
/// # Errors
///
/// Returns an [`AppError`] if a document cannot be loaded, the cart cannot be
/// priced, or the output cannot be written. Every error is logged before it is
/// returned.
pub fn run(config: &CalculatorConfig, out: impl io::Write) -> Result<Receipt, AppError> {
    let cart = load_cart(&config.inputs.cart_items)
        .inspect_err(|error| log_load_error("Cart items", error))?;

    info!(items = cart.len(), "Cart items loaded successfully.");

    let campaigns = load_campaigns(&config.inputs.campaigns)
        .inspect_err(|error| log_load_error("Discount campaigns", error))?;

    info!(
        campaigns = campaigns.len(),
        "Discount campaigns loaded successfully."
    );

    let receipt = price_cart(&cart, &campaigns).inspect_err(|error| {
        error!(
            campaign = error.campaign_index(),
            "Failed to calculate final price: {error}"
        );
    })?;

    for app in receipt.applications() {
        info!(
            slot = %app.category(),
            campaign = app.index(),
            kind = app.kind(),
            before = %app.total_before(),
            after = %app.total_after(),
            "Campaign applied."
        );
    }

    let final_price = format_currency(receipt.total())
        .inspect_err(|error| error!("Failed to format final price: {error}"))?;

    info!("Final price after applying discounts: {final_price}");

    if config.receipt {
        receipt
            .write_to(out)
            .inspect_err(|error| error!("Failed to write receipt: {error}"))?;
    }

    Ok(receipt)
}

fn log_load_error(document: &str, error: &LoadError) {
    let path = error.path().display();

    if error.is_not_found() {
        error!("Error: {document} file '{path}' not found.");
    } else {
        error!("Error: {error}");
    }
}
