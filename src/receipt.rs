//! Receipt

use std::io;

use rust_decimal::Decimal;
use smallvec::SmallVec;
use tabled::{
    builder::Builder,
    settings::{
        Alignment, Style,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    campaigns::{CampaignCategory, CampaignDiscount},
    currency::{CurrencyError, format_currency},
};

/// Errors that can occur when reporting on a receipt.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// Subtotal minus total left the decimal range.
    #[error("savings overflowed")]
    Overflow,

    /// An amount could not be formatted.
    #[error(transparent)]
    Currency(#[from] CurrencyError),

    /// IO error
    #[error("IO error")]
    IO,
}

/// One filled category slot.
#[derive(Debug, Clone, PartialEq)]
pub struct Application {
    /// Position of the campaign in the campaign list
    index: usize,

    /// Type label as written in the campaign
    kind: String,

    /// Decoded formula
    discount: CampaignDiscount,

    /// Running total before this campaign
    total_before: Decimal,

    /// Running total after this campaign
    total_after: Decimal,
}

impl Application {
    /// Record a filled slot.
    pub fn new(
        index: usize,
        kind: impl Into<String>,
        discount: CampaignDiscount,
        total_before: Decimal,
        total_after: Decimal,
    ) -> Self {
        Self {
            index,
            kind: kind.into(),
            discount,
            total_before,
            total_after,
        }
    }

    /// Position of the campaign in the campaign list
    pub fn index(&self) -> usize {
        self.index
    }

    /// Slot that was filled
    pub fn category(&self) -> CampaignCategory {
        self.discount.category()
    }

    /// Type label as written in the campaign
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Decoded formula
    pub fn discount(&self) -> &CampaignDiscount {
        &self.discount
    }

    /// Running total before this campaign
    pub fn total_before(&self) -> Decimal {
        self.total_before
    }

    /// Running total after this campaign
    pub fn total_after(&self) -> Decimal {
        self.total_after
    }

    /// How much this campaign took off the running total.
    ///
    /// Negative when the campaign raised it, which a percentage-by-category
    /// campaign can do. `None` on overflow.
    pub fn effect(&self) -> Option<Decimal> {
        self.total_before.checked_sub(self.total_after)
    }
}

/// Outcome of pricing a cart.
#[derive(Debug, Clone, PartialEq)]
pub struct Receipt {
    /// Cart total before any campaign
    subtotal: Decimal,

    /// Final price after all applied campaigns
    total: Decimal,

    /// Filled slots, in the order they were filled
    applications: SmallVec<[Application; 3]>,
}

impl Receipt {
    /// Create a new receipt with the given details.
    pub fn new(
        subtotal: Decimal,
        total: Decimal,
        applications: SmallVec<[Application; 3]>,
    ) -> Self {
        Self {
            subtotal,
            total,
            applications,
        }
    }

    /// Cart total before any campaign
    pub fn subtotal(&self) -> Decimal {
        self.subtotal
    }

    /// Final price after all applied campaigns
    pub fn total(&self) -> Decimal {
        self.total
    }

    /// Filled slots, in the order they were filled
    pub fn applications(&self) -> &[Application] {
        &self.applications
    }

    /// The application that filled a slot, if any.
    pub fn application(&self, category: CampaignCategory) -> Option<&Application> {
        self.applications
            .iter()
            .find(|app| app.category() == category)
    }

    /// Calculate the savings made by applying campaigns.
    ///
    /// # Errors
    ///
    /// Returns [`ReceiptError::Overflow`] if the subtraction leaves the decimal range.
    pub fn savings(&self) -> Result<Decimal, ReceiptError> {
        self.subtotal
            .checked_sub(self.total)
            .ok_or(ReceiptError::Overflow)
    }

    /// Writes the receipt as a table followed by a summary.
    ///
    /// # Errors
    ///
    /// Returns an error if an amount cannot be formatted or the output cannot be written.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), ReceiptError> {
        let mut builder = Builder::default();

        builder.push_record(["Slot", "Campaign", "Type", "Before", "After", "Savings"]);

        for app in &self.applications {
            let effect = app.effect().ok_or(ReceiptError::Overflow)?;
            let kind = if app.discount().is_unrecognised() {
                format!("{} (not applied)", app.kind())
            } else {
                app.kind().to_string()
            };

            builder.push_record([
                app.category().to_string(),
                format!("#{}", app.index() + 1),
                kind,
                format_currency(app.total_before())?,
                format_currency(app.total_after())?,
                format_currency(effect)?,
            ]);
        }

        let mut table = builder.build();

        table.with(Style::rounded());
        table.modify(Columns::new(3..6), Alignment::right());
        table.modify(Rows::first(), Alignment::center());

        writeln!(out, "\n{table}").map_err(|_err| ReceiptError::IO)?;

        write_summary_line(&mut out, "Subtotal:", &format_currency(self.subtotal)?)?;
        write_summary_line(&mut out, "Total:", &format_currency(self.total)?)?;
        write_summary_line(&mut out, "Savings:", &format_currency(self.savings()?)?)?;

        writeln!(out).map_err(|_err| ReceiptError::IO)
    }
}

fn write_summary_line(
    out: &mut impl io::Write,
    label: &str,
    value: &str,
) -> Result<(), ReceiptError> {
    writeln!(out, " {label:<10}{value:>20}").map_err(|_err| ReceiptError::IO)
}
