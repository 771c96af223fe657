//! Bidders, items, and auction outcomes.
//!
//! All economic quantities are `Decimal` — valuations, payments, revenue,
//! and welfare never touch floating point.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{AgoraError, BidderId, ItemId, Result};

/// An auction bidder with per-item valuations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bidder {
    pub id: BidderId,
    /// Per-item values, index-aligned with the caller's item list.
    pub valuations: Vec<Decimal>,
    /// Informational in this engine: no format enforces budgets.
    pub budget: Option<Decimal>,
    /// Risk coefficient, `>= 0`. Informational: the engine assumes
    /// risk-neutral valuations unless a format explicitly models shading.
    pub risk: Option<Decimal>,
}

impl Bidder {
    #[must_use]
    pub fn new(id: impl Into<BidderId>, valuations: Vec<Decimal>) -> Self {
        Self {
            id: id.into(),
            valuations,
            budget: None,
            risk: None,
        }
    }

    /// Valuation for the item at `index`. Out-of-range reads are zero, so
    /// short valuation lists behave as "no interest" rather than an error.
    #[must_use]
    pub fn valuation(&self, index: usize) -> Decimal {
        self.valuations.get(index).copied().unwrap_or(Decimal::ZERO)
    }
}

/// An item up for auction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    /// Minimum acceptable payment. `None` means no reserve.
    pub reserve_price: Option<Decimal>,
}

impl Item {
    #[must_use]
    pub fn new(id: impl Into<ItemId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            reserve_price: None,
        }
    }

    #[must_use]
    pub fn with_reserve(
        id: impl Into<ItemId>,
        name: impl Into<String>,
        reserve: Decimal,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            reserve_price: Some(reserve),
        }
    }

    /// Effective reserve: zero when no reserve is set.
    #[must_use]
    pub fn reserve(&self) -> Decimal {
        self.reserve_price.unwrap_or(Decimal::ZERO)
    }
}

/// Opt-in structural validation for a bidder/item set: unique ids,
/// non-negative valuations and reserves, valuation lists index-aligned
/// with the item list. The formats never call this themselves.
pub fn validate_auction_input(bidders: &[Bidder], items: &[Item]) -> Result<()> {
    let mut item_ids = HashSet::new();
    for item in items {
        if !item_ids.insert(&item.id) {
            return Err(AgoraError::DuplicateItem(item.id.clone()));
        }
        if item.reserve() < Decimal::ZERO {
            return Err(AgoraError::NegativeReserve(item.id.clone()));
        }
    }
    let mut bidder_ids = HashSet::new();
    for bidder in bidders {
        if !bidder_ids.insert(&bidder.id) {
            return Err(AgoraError::DuplicateBidder(bidder.id.clone()));
        }
        if bidder.valuations.len() != items.len() {
            return Err(AgoraError::ValuationCountMismatch {
                bidder: bidder.id.clone(),
                expected: items.len(),
                got: bidder.valuations.len(),
            });
        }
        for (index, v) in bidder.valuations.iter().enumerate() {
            if *v < Decimal::ZERO {
                return Err(AgoraError::NegativeValuation {
                    bidder: bidder.id.clone(),
                    index,
                });
            }
        }
    }
    Ok(())
}

/// The result of an auction or allocation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuctionOutcome {
    /// Bidder -> items won. Each item appears under at most one bidder.
    pub allocations: BTreeMap<BidderId, BTreeSet<ItemId>>,
    /// Bidder -> amount owed. Always non-negative.
    pub payments: BTreeMap<BidderId, Decimal>,
    /// Sum of all payments.
    pub revenue: Decimal,
    /// Sum of realized valuations over allocated items.
    pub welfare: Decimal,
    /// Asserted by the producing algorithm, not independently re-derived.
    pub is_efficient: bool,
}

impl AuctionOutcome {
    /// The shared no-sale outcome: nothing met reserve. Empty allocations
    /// and payments, zero revenue and welfare — never an error.
    #[must_use]
    pub fn no_sale() -> Self {
        Self {
            allocations: BTreeMap::new(),
            payments: BTreeMap::new(),
            revenue: Decimal::ZERO,
            welfare: Decimal::ZERO,
            is_efficient: false,
        }
    }

    /// Single-winner outcome, the common case for the classical formats.
    #[must_use]
    pub fn single_winner(
        winner: BidderId,
        item: ItemId,
        payment: Decimal,
        welfare: Decimal,
        is_efficient: bool,
    ) -> Self {
        let mut allocations = BTreeMap::new();
        allocations.insert(winner.clone(), BTreeSet::from([item]));
        let mut payments = BTreeMap::new();
        payments.insert(winner, payment);
        Self {
            allocations,
            payments,
            revenue: payment,
            welfare,
            is_efficient,
        }
    }

    #[must_use]
    pub fn winner_of(&self, item: &ItemId) -> Option<&BidderId> {
        self.allocations
            .iter()
            .find(|(_, items)| items.contains(item))
            .map(|(bidder, _)| bidder)
    }

    #[must_use]
    pub fn payment_of(&self, bidder: &BidderId) -> Decimal {
        self.payments.get(bidder).copied().unwrap_or(Decimal::ZERO)
    }

    #[must_use]
    pub fn is_no_sale(&self) -> bool {
        self.allocations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valuation_out_of_range_is_zero() {
        let b = Bidder::new("b1", vec![Decimal::new(10, 0)]);
        assert_eq!(b.valuation(0), Decimal::new(10, 0));
        assert_eq!(b.valuation(5), Decimal::ZERO);
    }

    #[test]
    fn missing_reserve_is_zero() {
        let item = Item::new("i1", "painting");
        assert_eq!(item.reserve(), Decimal::ZERO);
        let reserved = Item::with_reserve("i2", "sculpture", Decimal::new(5, 0));
        assert_eq!(reserved.reserve(), Decimal::new(5, 0));
    }

    #[test]
    fn no_sale_outcome_is_empty() {
        let outcome = AuctionOutcome::no_sale();
        assert!(outcome.is_no_sale());
        assert_eq!(outcome.revenue, Decimal::ZERO);
        assert_eq!(outcome.welfare, Decimal::ZERO);
    }

    #[test]
    fn single_winner_outcome_wires_revenue() {
        let outcome = AuctionOutcome::single_winner(
            BidderId::new("b1"),
            ItemId::new("i1"),
            Decimal::new(7, 0),
            Decimal::new(10, 0),
            true,
        );
        assert_eq!(outcome.revenue, Decimal::new(7, 0));
        assert_eq!(outcome.winner_of(&ItemId::new("i1")), Some(&BidderId::new("b1")));
        assert_eq!(outcome.payment_of(&BidderId::new("b1")), Decimal::new(7, 0));
    }

    #[test]
    fn validate_rejects_misaligned_valuations() {
        let bidders = vec![Bidder::new("b1", vec![Decimal::ONE])];
        let items = vec![Item::new("i1", "a"), Item::new("i2", "b")];
        assert!(matches!(
            validate_auction_input(&bidders, &items),
            Err(AgoraError::ValuationCountMismatch { .. })
        ));
    }

    #[test]
    fn validate_rejects_negative_valuation() {
        let bidders = vec![Bidder::new("b1", vec![Decimal::new(-1, 0)])];
        let items = vec![Item::new("i1", "a")];
        assert!(matches!(
            validate_auction_input(&bidders, &items),
            Err(AgoraError::NegativeValuation { .. })
        ));
    }

    #[test]
    fn serde_roundtrip_outcome() {
        let outcome = AuctionOutcome::single_winner(
            BidderId::new("b1"),
            ItemId::new("i1"),
            Decimal::new(7, 0),
            Decimal::new(10, 0),
            false,
        );
        let json = serde_json::to_string(&outcome).unwrap();
        let back: AuctionOutcome = serde_json::from_str(&json).unwrap();
        assert_eq!(outcome, back);
    }
}
