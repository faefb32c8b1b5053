//! Quote rendering for the command line.
//!
//! Text output is the two-line summary a borrower reads; JSON output is
//! one object per quote for scripting.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use crate::config::{OutputConfig, OutputFormat};
use crate::types::{Allocation, Quote};

/// Printed when the panel cannot fund the loan.
pub const UNAVAILABLE_MESSAGE: &str = "It is not possible to provide a quote at this time.";

#[derive(Debug, Serialize)]
struct QuoteSummary<'a> {
    available: bool,
    requested_amount: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    rate: Option<Decimal>,
    allocations: &'a [Allocation],
}

/// Render a quote in the configured format.
pub fn render(quote: &Quote, output: &OutputConfig) -> serde_json::Result<String> {
    match output.format {
        OutputFormat::Text => Ok(render_text(quote, output.rate_decimals)),
        OutputFormat::Json => render_json(quote),
    }
}

pub fn render_text(quote: &Quote, rate_decimals: u32) -> String {
    match quote.rate() {
        Some(rate) => format!(
            "Requested amount: {}\nRate: {}",
            quote.requested_amount(),
            format_percent(rate, rate_decimals)
        ),
        None => UNAVAILABLE_MESSAGE.to_string(),
    }
}

pub fn render_json(quote: &Quote) -> serde_json::Result<String> {
    serde_json::to_string(&QuoteSummary {
        available: quote.is_available(),
        requested_amount: quote.requested_amount(),
        rate: quote.rate(),
        allocations: quote.allocations(),
    })
}

/// `0.07004` with 1 decimal -> `7.0%`. Halves round away from zero.
pub fn format_percent(rate: Decimal, decimals: u32) -> String {
    let pct = (rate * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.*}%", decimals as usize, pct)
}
