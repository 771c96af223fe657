//! Optimal reserve price search.
//!
//! Treats a set of observed bidder valuations as an empirical value
//! distribution and searches every observed valuation (plus the seller's
//! own value) as a candidate reserve. Expected revenue under the
//! single-draw model:
//!
//! ```text
//! E[rev](r) = p(r) * r + (1 - p(r)) * seller_value
//! ```
//!
//! where `p(r)` is the fraction of observed valuations at or above `r` —
//! the probability the item sells at reserve `r` — and the seller keeps
//! its own value when unsold. The search returns the revenue-maximizing
//! reserve together with the full candidate table for display.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One evaluated reserve candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReserveCandidate {
    pub reserve: Decimal,
    /// Probability of sale at this reserve, in [0, 1].
    pub sale_probability: Decimal,
    pub expected_revenue: Decimal,
}

/// Result of the reserve search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReserveSearch {
    pub best_reserve: Decimal,
    pub expected_revenue: Decimal,
    /// All candidates in ascending reserve order.
    pub candidates: Vec<ReserveCandidate>,
}

/// Search the observed valuations for the revenue-maximizing reserve.
///
/// Candidates are the distinct observed valuations plus `seller_value`,
/// evaluated in ascending order; ties in expected revenue keep the lower
/// reserve. With no observations the seller's own value is the only
/// candidate: the item is never sold and the seller retains it.
#[must_use]
pub fn optimal_reserve(valuations: &[Decimal], seller_value: Decimal) -> ReserveSearch {
    let mut candidates_in: Vec<Decimal> = valuations.to_vec();
    candidates_in.push(seller_value);
    candidates_in.sort_unstable();
    candidates_in.dedup();

    let n = Decimal::from(valuations.len().max(1) as u64);

    let mut candidates = Vec::with_capacity(candidates_in.len());
    let mut best: Option<(Decimal, Decimal)> = None;

    for reserve in candidates_in {
        let meeting = Decimal::from(valuations.iter().filter(|v| **v >= reserve).count() as u64);
        // Divide once, at the end: dividing first rounds the quotient
        // and the rounding error leaks into every expected revenue.
        let expected = (meeting * reserve + (n - meeting) * seller_value) / n;
        let p = meeting / n;

        candidates.push(ReserveCandidate {
            reserve,
            sale_probability: p,
            expected_revenue: expected,
        });

        // Strict comparison keeps the lowest reserve on revenue ties.
        if best.is_none_or(|(_, rev)| expected > rev) {
            best = Some((reserve, expected));
        }
    }

    let (best_reserve, expected_revenue) =
        best.expect("candidate list always contains the seller value");

    tracing::debug!(
        observations = valuations.len(),
        %best_reserve,
        %expected_revenue,
        "reserve search complete"
    );

    ReserveSearch {
        best_reserve,
        expected_revenue,
        candidates,
    }
}
