//! Market data sources.
//!
//! Defines the `MarketSource` trait the quote service pulls lender
//! offers from, and the delimited-text loader that backs it on disk.

pub mod csv;

use crate::types::{LoanQuoteError, Offer};

pub use self::csv::{CsvFormat, CsvMarketFile};

/// Abstraction over anything that can supply a lender panel.
///
/// Implementors return offers in source order; the engine does its own
/// ranking, so no ordering is expected here.
#[cfg_attr(test, mockall::automock)]
pub trait MarketSource {
    /// Load the current panel of offers.
    fn offers(&self) -> Result<Vec<Offer>, LoanQuoteError>;

    /// Source identifier for logging.
    fn name(&self) -> String;
}
