//! Vickrey-Clarke-Groves payments over the greedy allocator.
//!
//! Each winner pays the externality it imposes on everyone else: the
//! welfare the others would realize without it, minus the welfare the
//! others actually realize. Under this rule truthful bidding is a
//! dominant strategy and payments are individually rational — stated as
//! contract, inherited from the VCG theorem, not re-derived here.

use std::collections::{BTreeMap, BTreeSet};

use rust_decimal::Decimal;

use agora_types::{AuctionOutcome, Bidder, Item};

use crate::allocation::efficient_allocation;

/// Run a VCG auction: greedy-efficient allocation plus Clarke-pivot
/// payments.
///
/// For each winning bidder i:
///
/// ```text
/// payment_i = max(0, welfare(others, i excluded) - welfare(others, i present))
/// ```
///
/// Non-winners pay nothing and are absent from the payment map. If no
/// valuation meets any reserve the result is the shared no-sale outcome.
#[must_use]
pub fn vcg_auction(bidders: &[Bidder], items: &[Item]) -> AuctionOutcome {
    let baseline = efficient_allocation(bidders, items);
    if baseline.assignments.is_empty() {
        return AuctionOutcome::no_sale();
    }

    let mut allocations: BTreeMap<_, BTreeSet<_>> = BTreeMap::new();
    for (item, winner) in &baseline.assignments {
        allocations
            .entry(winner.clone())
            .or_default()
            .insert(item.clone());
    }

    let mut payments = BTreeMap::new();
    let mut revenue = Decimal::ZERO;

    for (winner, won_items) in &allocations {
        let winner_value: Decimal = won_items
            .iter()
            .map(|item| {
                let i_idx = items
                    .iter()
                    .position(|i| &i.id == item)
                    .expect("allocated items come from the input list");
                bidders
                    .iter()
                    .find(|b| &b.id == winner)
                    .map_or(Decimal::ZERO, |b| b.valuation(i_idx))
            })
            .sum();

        // Welfare of everyone else in the actual allocation.
        let others_with = baseline.welfare - winner_value;

        // Optimal welfare of everyone else with the winner excluded.
        let others: Vec<Bidder> = bidders
            .iter()
            .filter(|b| &b.id != winner)
            .cloned()
            .collect();
        let others_without = efficient_allocation(&others, items).welfare;

        let payment = (others_without - others_with).max(Decimal::ZERO);
        revenue += payment;
        payments.insert(winner.clone(), payment);
    }

    AuctionOutcome {
        allocations,
        payments,
        revenue,
        welfare: baseline.welfare,
        is_efficient: true,
    }
}
