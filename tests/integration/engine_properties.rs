//! Property-based tests for the quote engine.
//!
//! Panels are drawn from a narrow rate grid (0.00..0.19) so equal rates
//! are common, and amounts include zero and fractional values.

use loanquote::engine::QuoteEngine;
use loanquote::types::{LoanQuoteError, Offer, QuoteRequest};
use proptest::prelude::*;
use rust_decimal::Decimal;

// ============================================================================
// Strategies
// ============================================================================

fn amount() -> impl Strategy<Value = Decimal> {
    prop_oneof![
        1 => Just(Decimal::ZERO),
        4 => (1i64..50_000).prop_map(|cents| Decimal::new(cents, 2)),
    ]
}

/// Offers are named `L<index>` so input position can be recovered.
fn panel(max_len: usize) -> impl Strategy<Value = Vec<Offer>> {
    prop::collection::vec((0i64..20, amount()), 0..max_len).prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (rate, amount))| {
                Offer::new(format!("L{i}"), Decimal::new(rate, 2), amount).unwrap()
            })
            .collect()
    })
}

fn requested() -> impl Strategy<Value = Decimal> {
    (1i64..600_000).prop_map(|cents| Decimal::new(cents, 2))
}

fn total(offers: &[Offer]) -> Decimal {
    offers.iter().map(Offer::amount_available).sum()
}

fn position(name: &str) -> usize {
    name[1..].parse().unwrap()
}

/// `pct` percent of the panel total, to the cent.
fn share_of(offers: &[Offer], pct: u32) -> Decimal {
    (total(offers) * Decimal::from(pct) / Decimal::ONE_HUNDRED).round_dp(2)
}

// ============================================================================
// Availability
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    /// Funded exactly when the panel is non-empty and covers the request.
    #[test]
    fn available_iff_panel_covers_request(offers in panel(12), requested in requested()) {
        let quote = QuoteEngine::default().quote(&offers, requested).unwrap();
        let covered = !offers.is_empty() && total(&offers) >= requested;
        prop_assert_eq!(quote.is_available(), covered);
        if covered {
            prop_assert_eq!(quote.total_borrowed(), requested);
        } else {
            prop_assert_eq!(quote.rate(), None);
            prop_assert!(quote.allocations().is_empty());
        }
    }

    /// One cent more than the panel holds is never funded.
    #[test]
    fn unavailable_just_beyond_total(offers in panel(12)) {
        let requested = total(&offers) + Decimal::new(1, 2);
        let quote = QuoteEngine::default().quote(&offers, requested).unwrap();
        prop_assert!(!quote.is_available());
    }

    /// Empty panels are unavailable; absent panels are rejected.
    #[test]
    fn empty_and_absent_panels(requested in requested()) {
        let engine = QuoteEngine::default();

        let empty = QuoteRequest::new(requested).with_offers(Vec::new());
        prop_assert!(!engine.quote_request(&empty).unwrap().is_available());

        let absent = QuoteRequest::new(requested);
        prop_assert!(matches!(
            engine.quote_request(&absent),
            Err(LoanQuoteError::InvalidArgument(_))
        ));
    }
}

// ============================================================================
// Allocation
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    /// The weighted rate sits between the cheapest and dearest draw.
    #[test]
    fn rate_between_drawn_rates(offers in panel(12), pct in 1u32..=100) {
        let requested = share_of(&offers, pct);
        prop_assume!(requested > Decimal::ZERO);

        let quote = QuoteEngine::default().quote(&offers, requested).unwrap();
        let rate = quote.rate().unwrap();
        let min = quote.allocations().iter().map(|a| a.rate).min().unwrap();
        let max = quote.allocations().iter().map(|a| a.rate).max().unwrap();
        prop_assert!(rate >= min && rate <= max, "{} outside [{}, {}]", rate, min, max);
    }

    /// Draws run cheapest first, only the last may be partial, and no
    /// undrawn funded offer is cheaper than anything drawn.
    #[test]
    fn cheapest_first_single_partial(offers in panel(12), pct in 1u32..=100) {
        let requested = share_of(&offers, pct);
        prop_assume!(requested > Decimal::ZERO);

        let quote = QuoteEngine::default().quote(&offers, requested).unwrap();
        let allocations = quote.allocations();
        let (last, rest) = allocations.split_last().unwrap();

        prop_assert!(rest.iter().all(|a| !a.partial));
        prop_assert!(allocations.iter().all(|a| a.amount > Decimal::ZERO));
        prop_assert!(allocations.windows(2).all(|w| w[0].rate <= w[1].rate));

        let undrawn_min = offers
            .iter()
            .filter(|o| o.amount_available() > Decimal::ZERO)
            .filter(|o| allocations.iter().all(|a| a.lender != o.name()))
            .map(Offer::rate)
            .min();
        if let Some(undrawn_min) = undrawn_min {
            prop_assert!(last.rate <= undrawn_min);
        }
    }

    /// Equal rates are drawn in input order.
    #[test]
    fn ties_drawn_in_input_order(offers in panel(12), pct in 1u32..=100) {
        let requested = share_of(&offers, pct);
        prop_assume!(requested > Decimal::ZERO);

        let quote = QuoteEngine::default().quote(&offers, requested).unwrap();
        for pair in quote.allocations().windows(2) {
            if pair[0].rate == pair[1].rate {
                prop_assert!(position(&pair[0].lender) < position(&pair[1].lender));
            }
        }
    }
}

// ============================================================================
// Ordering and determinism
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    /// Reordering the panel never changes the rate.
    #[test]
    fn input_order_does_not_change_rate(
        offers in panel(12),
        pct in 1u32..=100,
        shift in 0usize..12,
    ) {
        let requested = share_of(&offers, pct);
        prop_assume!(requested > Decimal::ZERO);
        let engine = QuoteEngine::default();
        let expected = engine.quote(&offers, requested).unwrap().rate();

        let reversed: Vec<Offer> = offers.iter().rev().cloned().collect();
        prop_assert_eq!(engine.quote(&reversed, requested).unwrap().rate(), expected);

        let mut rotated = offers.clone();
        rotated.rotate_left(shift % offers.len());
        prop_assert_eq!(engine.quote(&rotated, requested).unwrap().rate(), expected);
    }

    /// Identical inputs give identical quotes.
    #[test]
    fn repeat_quotes_identical(offers in panel(12), requested in requested()) {
        let engine = QuoteEngine::default();
        prop_assert_eq!(
            engine.quote(&offers, requested).unwrap(),
            engine.quote(&offers, requested).unwrap()
        );
    }
}
