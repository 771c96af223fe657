//! Classical single-item auction formats.
//!
//! Second-price (Vickrey), first-price sealed-bid, English ascending, and
//! Dutch descending. All four read each bidder's **first** valuation
//! (`valuation(0)`) — single-item formats by construction — and share the
//! no-sale rule: if nothing meets the reserve, the outcome is
//! [`AuctionOutcome::no_sale`], never an error.
//!
//! English is strategically equivalent to second-price and Dutch to
//! first-price under private values; the simulations here make that
//! equivalence visible rather than assuming it.

use rust_decimal::Decimal;

use agora_types::{AuctionOutcome, Bidder, Item};

use crate::shading::ShadingStrategy;

/// Highest valuation and its bidder index, ties to the earlier bidder.
fn best_bid(bids: &[Decimal]) -> Option<(usize, Decimal)> {
    let mut best: Option<(usize, Decimal)> = None;
    for (idx, &bid) in bids.iter().enumerate() {
        match best {
            Some((_, b)) if bid <= b => {}
            _ => best = Some((idx, bid)),
        }
    }
    best
}

/// Second-highest value in `bids`, counting duplicates of the maximum.
fn second_highest(bids: &[Decimal], winner_idx: usize) -> Option<Decimal> {
    bids.iter()
        .enumerate()
        .filter(|(idx, _)| *idx != winner_idx)
        .map(|(_, &b)| b)
        .max()
}

/// Second-price (Vickrey) sealed-bid auction.
///
/// Winner: highest valuation meeting reserve. Payment: the greater of the
/// second-highest valuation and the reserve. Truthful bidding is a
/// dominant strategy.
#[must_use]
pub fn second_price(bidders: &[Bidder], item: &Item) -> AuctionOutcome {
    let values: Vec<Decimal> = bidders.iter().map(|b| b.valuation(0)).collect();
    let Some((winner_idx, high)) = best_bid(&values) else {
        return AuctionOutcome::no_sale();
    };
    if high < item.reserve() {
        return AuctionOutcome::no_sale();
    }
    let runner_up = second_highest(&values, winner_idx).unwrap_or(Decimal::ZERO);
    let payment = runner_up.max(item.reserve());
    AuctionOutcome::single_winner(
        bidders[winner_idx].id.clone(),
        item.id.clone(),
        payment,
        high,
        true,
    )
}

/// First-price sealed-bid auction with equilibrium bid shading.
///
/// Every bidder submits `strategy.shade(value, n)`; the highest shaded
/// bid meeting reserve wins and pays its own bid. Monotone shading keeps
/// the allocation efficient: the highest-value bidder still wins.
#[must_use]
pub fn first_price(
    bidders: &[Bidder],
    item: &Item,
    strategy: &dyn ShadingStrategy,
) -> AuctionOutcome {
    let n = bidders.len();
    let bids: Vec<Decimal> = bidders
        .iter()
        .map(|b| strategy.shade(b.valuation(0), n))
        .collect();
    let Some((winner_idx, bid)) = best_bid(&bids) else {
        return AuctionOutcome::no_sale();
    };
    if bid < item.reserve() {
        return AuctionOutcome::no_sale();
    }
    AuctionOutcome::single_winner(
        bidders[winner_idx].id.clone(),
        item.id.clone(),
        bid,
        bidders[winner_idx].valuation(0),
        true,
    )
}

/// English (ascending clock) auction.
///
/// The clock starts at the reserve and rises by `increment` while at
/// least two bidders would stay in at the next tick. The winner is the
/// highest-valuation bidder; the hammer price is where the last rival
/// dropped out (the reserve itself if nobody contested).
///
/// A non-positive increment degenerates to the sealed second-price rule.
#[must_use]
pub fn english(bidders: &[Bidder], item: &Item, increment: Decimal) -> AuctionOutcome {
    let values: Vec<Decimal> = bidders.iter().map(|b| b.valuation(0)).collect();
    let Some((winner_idx, high)) = best_bid(&values) else {
        return AuctionOutcome::no_sale();
    };
    if high < item.reserve() {
        return AuctionOutcome::no_sale();
    }
    let runner_up = second_highest(&values, winner_idx).unwrap_or(Decimal::ZERO);

    let payment = if increment <= Decimal::ZERO {
        runner_up.max(item.reserve())
    } else {
        let mut price = item.reserve();
        // Rise while the runner-up would still bid at the next tick.
        while runner_up >= price + increment && price + increment <= high {
            price += increment;
        }
        price
    };

    tracing::debug!(
        winner = %bidders[winner_idx].id,
        %payment,
        "english auction settled"
    );

    AuctionOutcome::single_winner(
        bidders[winner_idx].id.clone(),
        item.id.clone(),
        payment,
        high,
        true,
    )
}

/// Dutch (descending clock) auction.
///
/// The clock starts at `start` and falls by `decrement` until the first
/// bidder whose shaded threshold meets the price accepts, or the price
/// would fall below the reserve. Strategically equivalent to first-price:
/// the highest shaded threshold accepts first.
///
/// A non-positive decrement never descends: the clock is stuck, so the
/// only possible sale is an immediate acceptance at `start`.
#[must_use]
pub fn dutch(
    bidders: &[Bidder],
    item: &Item,
    start: Decimal,
    decrement: Decimal,
    strategy: &dyn ShadingStrategy,
) -> AuctionOutcome {
    let n = bidders.len();
    let thresholds: Vec<Decimal> = bidders
        .iter()
        .map(|b| strategy.shade(b.valuation(0), n))
        .collect();
    let Some((winner_idx, threshold)) = best_bid(&thresholds) else {
        return AuctionOutcome::no_sale();
    };

    let mut price = start;
    loop {
        if price < item.reserve() {
            return AuctionOutcome::no_sale();
        }
        if threshold >= price {
            break;
        }
        if decrement <= Decimal::ZERO {
            return AuctionOutcome::no_sale();
        }
        price -= decrement;
    }

    AuctionOutcome::single_winner(
        bidders[winner_idx].id.clone(),
        item.id.clone(),
        price,
        bidders[winner_idx].valuation(0),
        true,
    )
}
