//! Shared types for the loan quoting engine.
//!
//! These types form the data model used across all modules: lender
//! offers coming out of the market loader, the quote request handed to
//! the engine, and the quote it hands back.

use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;

// ---------------------------------------------------------------------------
// Offer
// ---------------------------------------------------------------------------

/// A single lender's offer: a fixed amount available at a fixed annual rate.
///
/// Immutable once built. The only way in is [`Offer::new`], which enforces
/// a non-empty name and a non-negative amount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Offer {
    name: String,
    /// Annual rate as a fraction (0.075 = 7.5%).
    rate: Decimal,
    amount_available: Decimal,
}

impl Offer {
    /// Build an offer. The rate sign is deliberately not checked here;
    /// see [`crate::engine::QuotePolicy`].
    pub fn new(
        name: impl Into<String>,
        rate: Decimal,
        amount_available: Decimal,
    ) -> Result<Self, LoanQuoteError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(LoanQuoteError::InvalidArgument(
                "lender name cannot be empty".to_string(),
            ));
        }
        if amount_available < Decimal::ZERO {
            return Err(LoanQuoteError::InvalidArgument(format!(
                "lender '{name}' has negative amount available: {amount_available}"
            )));
        }
        Ok(Self {
            name,
            rate,
            amount_available,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rate(&self) -> Decimal {
        self.rate
    }

    pub fn amount_available(&self) -> Decimal {
        self.amount_available
    }
}

impl fmt::Display for Offer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Lender: {} ({}% on {})",
            self.name,
            (self.rate * Decimal::ONE_HUNDRED).normalize(),
            self.amount_available,
        )
    }
}

// ---------------------------------------------------------------------------
// Quote request
// ---------------------------------------------------------------------------

/// A requested loan amount plus the panel of offers to fund it from.
///
/// The panel is optional: a request that never had offers attached is
/// rejected by the engine, while an attached-but-empty panel simply
/// yields an unavailable quote.
#[derive(Debug, Clone, PartialEq)]
pub struct QuoteRequest {
    offers: Option<Vec<Offer>>,
    requested_amount: Decimal,
}

impl QuoteRequest {
    pub fn new(requested_amount: Decimal) -> Self {
        Self {
            offers: None,
            requested_amount,
        }
    }

    /// Attach the lender panel.
    pub fn with_offers(mut self, offers: Vec<Offer>) -> Self {
        self.offers = Some(offers);
        self
    }

    pub fn offers(&self) -> Option<&[Offer]> {
        self.offers.as_deref()
    }

    pub fn requested_amount(&self) -> Decimal {
        self.requested_amount
    }
}

// ---------------------------------------------------------------------------
// Quote
// ---------------------------------------------------------------------------

/// One draw against an offer while funding a quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Allocation {
    pub lender: String,
    pub rate: Decimal,
    pub amount: Decimal,
    /// True when the offer had more available than was drawn.
    pub partial: bool,
}

/// Outcome of a quote request.
///
/// `rate` is only present when the panel could fund the full amount;
/// an unavailable quote has no rate at all rather than a 0% one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quote {
    requested_amount: Decimal,
    rate: Option<Decimal>,
    allocations: Vec<Allocation>,
}

impl Quote {
    /// A funded quote at the given weighted rate.
    pub fn available(requested_amount: Decimal, rate: Decimal, allocations: Vec<Allocation>) -> Self {
        Self {
            requested_amount,
            rate: Some(rate),
            allocations,
        }
    }

    /// The panel cannot fund `requested_amount`.
    pub fn unavailable(requested_amount: Decimal) -> Self {
        Self {
            requested_amount,
            rate: None,
            allocations: Vec::new(),
        }
    }

    pub fn is_available(&self) -> bool {
        self.rate.is_some()
    }

    pub fn rate(&self) -> Option<Decimal> {
        self.rate
    }

    pub fn requested_amount(&self) -> Decimal {
        self.requested_amount
    }

    /// Draws in the order they were made (lowest rate first).
    pub fn allocations(&self) -> &[Allocation] {
        &self.allocations
    }

    /// Sum of all draws. Equals `requested_amount` for a funded, non-degenerate quote.
    pub fn total_borrowed(&self) -> Decimal {
        self.allocations.iter().map(|a| a.amount).sum()
    }
}

impl fmt::Display for Quote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.rate {
            Some(rate) => write!(
                f,
                "Quote: {} at {}% from {} lender(s)",
                self.requested_amount,
                (rate * Decimal::ONE_HUNDRED).normalize(),
                self.allocations.len(),
            ),
            None => write!(f, "Quote: {} unavailable", self.requested_amount),
        }
    }
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Domain-specific error types for the quoting library.
#[derive(Debug, thiserror::Error)]
pub enum LoanQuoteError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Market data not found: {0}")]
    NotFound(String),

    #[error("Format error on line {line}: {message}")]
    Format { line: usize, message: String },

    #[error("Failed to read market data from {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
