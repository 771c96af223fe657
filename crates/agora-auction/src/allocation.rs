//! Greedy efficient allocation under reserve prices.
//!
//! Enumerates every (bidder, item) valuation pair, sorts descending by
//! value, and assigns greedily: an item goes to the highest-value still
//! unassigned bidder whose value meets the item's reserve. Each bidder
//! wins at most one item.
//!
//! This is welfare-optimal in the single-unit-per-bidder setting. For
//! general bundle valuations it is a heuristic, not full combinatorial
//! winner determination — a documented limitation of the engine.

use std::collections::{BTreeMap, HashSet};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use agora_types::{Bidder, BidderId, Item, ItemId};

/// An item-to-bidder assignment with its realized welfare.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GreedyAllocation {
    /// Item -> winning bidder. Unassigned items are absent.
    pub assignments: BTreeMap<ItemId, BidderId>,
    /// Sum of winning bidders' valuations for their assigned items.
    pub welfare: Decimal,
}

impl GreedyAllocation {
    #[must_use]
    pub fn winner_of(&self, item: &ItemId) -> Option<&BidderId> {
        self.assignments.get(item)
    }

    /// The items assigned to `bidder`.
    #[must_use]
    pub fn items_of(&self, bidder: &BidderId) -> Vec<&ItemId> {
        self.assignments
            .iter()
            .filter(|(_, b)| *b == bidder)
            .map(|(item, _)| item)
            .collect()
    }
}

/// Compute the greedy value-ranked allocation.
///
/// Ties in value break deterministically by input position (earlier
/// bidder first, then earlier item). Valuations below the item's reserve
/// never win; zero and negative valuations never win either, so an
/// absent valuation entry behaves as "no interest".
#[must_use]
pub fn efficient_allocation(bidders: &[Bidder], items: &[Item]) -> GreedyAllocation {
    // (value, bidder index, item index), sorted best-first.
    let mut ranked: Vec<(Decimal, usize, usize)> = Vec::with_capacity(bidders.len() * items.len());
    for (b_idx, bidder) in bidders.iter().enumerate() {
        for (i_idx, item) in items.iter().enumerate() {
            let value = bidder.valuation(i_idx);
            if value >= item.reserve() && value > Decimal::ZERO {
                ranked.push((value, b_idx, i_idx));
            }
        }
    }
    ranked.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)).then(a.2.cmp(&b.2)));

    let mut assignments = BTreeMap::new();
    let mut taken_items: HashSet<usize> = HashSet::new();
    let mut taken_bidders: HashSet<usize> = HashSet::new();
    let mut welfare = Decimal::ZERO;

    for (value, b_idx, i_idx) in ranked {
        if taken_items.contains(&i_idx) || taken_bidders.contains(&b_idx) {
            continue;
        }
        taken_items.insert(i_idx);
        taken_bidders.insert(b_idx);
        assignments.insert(items[i_idx].id.clone(), bidders[b_idx].id.clone());
        welfare += value;
    }

    tracing::debug!(
        bidders = bidders.len(),
        items = items.len(),
        assigned = assignments.len(),
        %welfare,
        "greedy allocation complete"
    );

    GreedyAllocation {
        assignments,
        welfare,
    }
}
