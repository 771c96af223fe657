//! Bid shading strategies for first-price-equivalent formats.
//!
//! First-price and Dutch auctions have no dominant truthful strategy;
//! equilibrium bids shade below true value. The classic symmetric
//! risk-neutral approximation is `value * (n-1)/n` for n bidders. That
//! is a modeling simplification, not a per-instance derivation from a
//! value distribution, so it lives behind a trait: alternative shading
//! models can be substituted without touching the auction logic.

use rust_decimal::Decimal;

/// Maps a true valuation to an equilibrium bid.
pub trait ShadingStrategy {
    /// The bid a rational bidder with `value` submits against
    /// `n_bidders` total participants (itself included).
    fn shade(&self, value: Decimal, n_bidders: usize) -> Decimal;
}

/// Symmetric risk-neutral equilibrium shading: `value * (n-1)/n`.
///
/// A lone bidder shades to zero under this formula — the textbook
/// consequence of facing no competition, kept as-is.
#[derive(Debug, Clone, Copy, Default)]
pub struct RiskNeutralShading;

impl ShadingStrategy for RiskNeutralShading {
    fn shade(&self, value: Decimal, n_bidders: usize) -> Decimal {
        if n_bidders == 0 {
            return Decimal::ZERO;
        }
        let n = Decimal::from(n_bidders as u64);
        value * (n - Decimal::ONE) / n
    }
}

/// Bids true value unchanged. Useful as a baseline in teaching scenarios
/// and for testing the formats independently of shading.
#[derive(Debug, Clone, Copy, Default)]
pub struct TruthfulShading;

impl ShadingStrategy for TruthfulShading {
    fn shade(&self, value: Decimal, _n_bidders: usize) -> Decimal {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(n: i64) -> Decimal {
        Decimal::new(n, 0)
    }

    #[test]
    fn risk_neutral_shades_by_bidder_count() {
        let s = RiskNeutralShading;
        assert_eq!(s.shade(dec(10), 2), dec(5));
        assert_eq!(s.shade(dec(9), 3), dec(6));
    }

    #[test]
    fn lone_bidder_shades_to_zero() {
        let s = RiskNeutralShading;
        assert_eq!(s.shade(dec(10), 1), Decimal::ZERO);
    }

    #[test]
    fn truthful_is_identity() {
        let s = TruthfulShading;
        assert_eq!(s.shade(dec(10), 7), dec(10));
    }
}
