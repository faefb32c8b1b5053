//! Quote service — loads a lender panel from a market source and runs
//! the quote engine over it.

use rust_decimal::Decimal;
use tracing::info;

use super::quote::QuoteEngine;
use crate::market::MarketSource;
use crate::types::{LoanQuoteError, Quote, QuoteRequest};

pub struct QuoteService<S> {
    source: S,
    engine: QuoteEngine,
}

impl<S: MarketSource> QuoteService<S> {
    pub fn new(source: S, engine: QuoteEngine) -> Self {
        Self { source, engine }
    }

    pub fn engine(&self) -> &QuoteEngine {
        &self.engine
    }

    /// Load the current panel and quote `requested_amount` against it.
    /// Source errors (missing file, bad rows) propagate unchanged.
    pub fn quote(&self, requested_amount: Decimal) -> Result<Quote, LoanQuoteError> {
        let offers = self.source.offers()?;
        info!(
            source = %self.source.name(),
            lenders = offers.len(),
            requested = %requested_amount,
            "Found lenders"
        );

        let request = QuoteRequest::new(requested_amount).with_offers(offers);
        self.engine.quote_request(&request)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
