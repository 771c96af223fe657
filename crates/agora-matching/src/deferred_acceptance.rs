//! Gale-Shapley deferred acceptance.
//!
//! The core solver: takes a `TwoSidedMarket` and produces a `Matching`
//! that is stable and proposer-optimal among all stable matchings. Covers
//! both one-to-one (marriage) and many-to-one (hospitals/residents)
//! markets through participant capacities.
//!
//! ```text
//! deferred_acceptance(TwoSidedMarket) -> Matching
//! ```
//!
//! ## Tolerant input handling
//!
//! Preference entries naming unknown participants are unacceptable and
//! skipped. A participant absent from a receiver's list is never accepted
//! by it. Empty preference lists and zero capacities simply leave
//! participants unmatched — no input raises an error.

use std::collections::{HashMap, VecDeque};

use agora_types::{Matching, TwoSidedMarket};

/// Run proposer-proposing deferred acceptance.
///
/// ## Algorithm
///
/// 1. Every proposer starts free with a pointer at the top of its list
/// 2. A free proposer with remaining capacity proposes to its next
///    unproposed receiver
/// 3. A receiver under capacity holds the proposal; a receiver at capacity
///    compares the proposer against its worst held match by rank and
///    swaps if the newcomer is preferred, freeing the displaced proposer
/// 4. Repeat until no proposer has both spare capacity and an unexhausted
///    preference list
///
/// ## Guarantees
///
/// The result is stable (no blocking pair exists) and proposer-optimal:
/// every proposer does at least as well as in any other stable matching,
/// and receivers get their pessimal stable outcome. Run the market through
/// [`TwoSidedMarket::reversed`] for the receiver-optimal matching.
#[must_use]
pub fn deferred_acceptance(market: &TwoSidedMarket) -> Matching {
    let receiver_index: HashMap<_, usize> = market
        .receivers
        .iter()
        .enumerate()
        .map(|(i, r)| (&r.id, i))
        .collect();

    // Per-receiver rank tables for O(1) proposer comparison.
    let receiver_rank: Vec<HashMap<_, usize>> = market
        .receivers
        .iter()
        .map(|r| {
            r.preferences
                .iter()
                .enumerate()
                .map(|(rank, p)| (p, rank))
                .collect()
        })
        .collect();

    // Mutable solver state, indexed by position in the input vectors.
    let mut next_choice = vec![0usize; market.proposers.len()];
    let mut held_count = vec![0usize; market.proposers.len()];
    let mut held: Vec<Vec<usize>> = vec![Vec::new(); market.receivers.len()];

    let mut free: VecDeque<usize> = (0..market.proposers.len()).collect();

    while let Some(p_idx) = free.pop_front() {
        let proposer = &market.proposers[p_idx];
        let capacity = proposer.capacity as usize;

        while held_count[p_idx] < capacity && next_choice[p_idx] < proposer.preferences.len() {
            let target = &proposer.preferences[next_choice[p_idx]];
            next_choice[p_idx] += 1;

            // Unknown receiver: unacceptable, skip.
            let Some(&r_idx) = receiver_index.get(target) else {
                continue;
            };
            // Proposer absent from the receiver's list: never accepted.
            let Some(&my_rank) = receiver_rank[r_idx].get(&proposer.id) else {
                continue;
            };

            let receiver = &market.receivers[r_idx];
            let r_capacity = receiver.capacity as usize;
            if r_capacity == 0 {
                continue;
            }

            if held[r_idx].len() < r_capacity {
                held[r_idx].push(p_idx);
                held_count[p_idx] += 1;
                continue;
            }

            // At capacity: find the worst held proposer by rank.
            let (worst_slot, &worst_idx) = held[r_idx]
                .iter()
                .enumerate()
                .max_by_key(|&(_, &held_p)| receiver_rank[r_idx][&market.proposers[held_p].id])
                .expect("receiver at nonzero capacity holds at least one proposal");

            if my_rank < receiver_rank[r_idx][&market.proposers[worst_idx].id] {
                held[r_idx][worst_slot] = p_idx;
                held_count[p_idx] += 1;
                held_count[worst_idx] -= 1;
                // The displaced proposer re-enters the pool.
                free.push_back(worst_idx);
            }
            // Otherwise rejected outright; pointer already advanced.
        }
    }

    let mut matching = Matching::new();
    for (r_idx, proposals) in held.iter().enumerate() {
        for &p_idx in proposals {
            matching.pair(&market.proposers[p_idx].id, &market.receivers[r_idx].id);
        }
    }

    tracing::debug!(
        proposers = market.proposers.len(),
        receivers = market.receivers.len(),
        pairs = matching.pair_count(),
        "deferred acceptance complete"
    );

    matching
}
