//! Rate matching.
//!
//! Funds a requested amount from the cheapest offers first, drawing the
//! last offer only partially, and prices the loan at the amount-weighted
//! average of the rates actually drawn.

use std::ops::ControlFlow;

use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::types::{Allocation, LoanQuoteError, Offer, Quote, QuoteRequest};

// ---------------------------------------------------------------------------
// Policy
// ---------------------------------------------------------------------------

/// Input checks applied before matching.
///
/// The default accepts everything the matcher can process, including
/// negative rates and non-positive amounts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QuotePolicy {
    /// Fail with `InvalidArgument` if any offer carries a rate below zero.
    pub reject_negative_rates: bool,
    /// Fail with `InvalidArgument` if the requested amount is zero or negative.
    pub reject_non_positive_amount: bool,
}

impl QuotePolicy {
    /// Reject every degenerate input.
    pub fn strict() -> Self {
        Self {
            reject_negative_rates: true,
            reject_non_positive_amount: true,
        }
    }

    fn check(&self, offers: &[Offer], requested_amount: Decimal) -> Result<(), LoanQuoteError> {
        if self.reject_non_positive_amount && requested_amount <= Decimal::ZERO {
            return Err(LoanQuoteError::InvalidArgument(format!(
                "requested amount must be positive, got {requested_amount}"
            )));
        }
        if self.reject_negative_rates {
            if let Some(offer) = offers.iter().find(|o| o.rate() < Decimal::ZERO) {
                return Err(LoanQuoteError::InvalidArgument(format!(
                    "lender '{}' has negative rate {}",
                    offer.name(),
                    offer.rate()
                )));
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Fill accumulator
// ---------------------------------------------------------------------------

/// Running state while walking the rate-ordered offers.
#[derive(Debug, Default)]
struct Fill {
    borrowed: Decimal,
    /// Sum of rate * amount drawn.
    weighted: Decimal,
    allocations: Vec<Allocation>,
}

impl Fill {
    /// Draw from one offer. Breaks once `requested` is fully funded.
    fn draw(mut self, offer: &Offer, requested: Decimal) -> ControlFlow<Result<Fill, LoanQuoteError>, Fill> {
        let remaining = requested - self.borrowed;
        let partial = remaining < offer.amount_available();
        let drawn = if partial { remaining } else { offer.amount_available() };

        let weighted = offer
            .rate()
            .checked_mul(drawn)
            .and_then(|interest| self.weighted.checked_add(interest));
        let Some(weighted) = weighted else {
            return ControlFlow::Break(Err(LoanQuoteError::InvalidArgument(format!(
                "weighted rate overflows at lender '{}'",
                offer.name()
            ))));
        };

        self.weighted = weighted;
        self.borrowed += drawn;

        if !drawn.is_zero() {
            debug!(
                lender = offer.name(),
                rate = %offer.rate(),
                drawn = %drawn,
                partial,
                "Offer drawn"
            );
            self.allocations.push(Allocation {
                lender: offer.name().to_string(),
                rate: offer.rate(),
                amount: drawn,
                partial,
            });
        }

        if self.borrowed == requested {
            ControlFlow::Break(Ok(self))
        } else {
            ControlFlow::Continue(self)
        }
    }
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Quotes loans against a lender panel. Stateless apart from its policy,
/// so one engine can serve any number of requests.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuoteEngine {
    policy: QuotePolicy,
}

impl QuoteEngine {
    pub fn new(policy: QuotePolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &QuotePolicy {
        &self.policy
    }

    /// Quote a request. A request with no panel attached is an
    /// `InvalidArgument`; an empty panel is just unavailable.
    pub fn quote_request(&self, request: &QuoteRequest) -> Result<Quote, LoanQuoteError> {
        let offers = request.offers().ok_or_else(|| {
            LoanQuoteError::InvalidArgument("offers must be provided".to_string())
        })?;
        self.quote(offers, request.requested_amount())
    }

    /// Quote `requested_amount` against `offers`.
    ///
    /// The caller's slice is never reordered; matching runs on a
    /// stably sorted copy of references, so equal rates are drawn in
    /// input order.
    pub fn quote(&self, offers: &[Offer], requested_amount: Decimal) -> Result<Quote, LoanQuoteError> {
        self.policy.check(offers, requested_amount)?;

        if offers.is_empty() {
            debug!(requested = %requested_amount, "Empty lender panel");
            return Ok(Quote::unavailable(requested_amount));
        }

        let total_available = offers
            .iter()
            .try_fold(Decimal::ZERO, |acc, o| acc.checked_add(o.amount_available()))
            .ok_or_else(|| {
                LoanQuoteError::InvalidArgument("total amount available overflows".to_string())
            })?;

        if total_available < requested_amount {
            info!(
                requested = %requested_amount,
                available = %total_available,
                lenders = offers.len(),
                "Insufficient funds in lender panel"
            );
            return Ok(Quote::unavailable(requested_amount));
        }

        // Nothing to borrow, so nothing to weight by.
        if requested_amount <= Decimal::ZERO {
            debug!(requested = %requested_amount, "Non-positive amount quoted at zero rate");
            return Ok(Quote::available(requested_amount, Decimal::ZERO, Vec::new()));
        }

        let mut ranked: Vec<&Offer> = offers.iter().collect();
        ranked.sort_by(|a, b| a.rate().cmp(&b.rate()));

        let fill = match ranked
            .into_iter()
            .try_fold(Fill::default(), |fill, offer| fill.draw(offer, requested_amount))
        {
            ControlFlow::Break(done) => done?,
            ControlFlow::Continue(fill) => fill,
        };

        let rate = fill.weighted.checked_div(fill.borrowed).ok_or_else(|| {
            LoanQuoteError::InvalidArgument("weighted rate cannot be computed".to_string())
        })?;

        info!(
            requested = %requested_amount,
            rate = %rate,
            lenders_drawn = fill.allocations.len(),
            "Quote available"
        );

        Ok(Quote::available(requested_amount, rate, fill.allocations))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
