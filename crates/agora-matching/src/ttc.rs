//! Top Trading Cycle for housing/endowment markets.
//!
//! Each remaining agent points to its most-preferred remaining house; each
//! remaining house points to its current owner. Every node on a cycle
//! trades: the agent receives the house it points to. Matched agents and
//! houses leave the market and the graph is rebuilt until nobody remains.
//!
//! The allocation is bijective and Pareto-efficient, and the mechanism is
//! strategy-proof (Roth 1982) — stated as contract, not re-derived here.

use std::collections::{BTreeMap, HashMap, HashSet};

use agora_types::{HousingMarket, ItemId, ParticipantId};

/// Run Top Trading Cycle. Returns agent -> assigned house.
///
/// An agent whose preference list is exhausted (or names only departed or
/// unknown houses) points at its own endowment, forming a self-cycle and
/// keeping its house. Every agent therefore receives exactly one house.
#[must_use]
pub fn top_trading_cycle(market: &HousingMarket) -> BTreeMap<ParticipantId, ItemId> {
    let mut assignment = BTreeMap::new();
    let mut remaining: Vec<usize> = (0..market.agents.len()).collect();

    let owner_index: HashMap<&ItemId, usize> = market
        .agents
        .iter()
        .enumerate()
        .map(|(i, a)| (&a.endowment, i))
        .collect();

    let mut cycles_found = 0usize;

    while !remaining.is_empty() {
        let remaining_houses: HashSet<&ItemId> = remaining
            .iter()
            .map(|&i| &market.agents[i].endowment)
            .collect();

        // Pointer graph: agent index -> agent index owning its target house.
        let mut points_to: HashMap<usize, (usize, &ItemId)> = HashMap::new();
        for &a_idx in &remaining {
            let agent = &market.agents[a_idx];
            let target = agent
                .preferences
                .iter()
                .find(|h| remaining_houses.contains(h))
                .unwrap_or(&agent.endowment);
            // The target house's owner is remaining by construction.
            let owner = owner_index[target];
            points_to.insert(a_idx, (owner, target));
        }

        // Walk agent -> house -> owner until a node repeats; the repeated
        // suffix is a cycle. Starting anywhere in a functional graph of
        // finite size must reach one.
        let start = remaining[0];
        let mut seen_order: Vec<usize> = Vec::new();
        let mut seen_set: HashSet<usize> = HashSet::new();
        let mut cursor = start;
        while seen_set.insert(cursor) {
            seen_order.push(cursor);
            cursor = points_to[&cursor].0;
        }
        let cycle_start = seen_order
            .iter()
            .position(|&a| a == cursor)
            .expect("walk re-entered a visited node");
        let cycle: Vec<usize> = seen_order[cycle_start..].to_vec();

        // Everyone on the cycle receives the house it points to.
        let mut matched: HashSet<usize> = HashSet::new();
        for &a_idx in &cycle {
            let (_, house) = points_to[&a_idx];
            assignment.insert(market.agents[a_idx].id.clone(), house.clone());
            matched.insert(a_idx);
        }
        remaining.retain(|a| !matched.contains(a));
        cycles_found += 1;
    }

    tracing::debug!(
        agents = market.agents.len(),
        cycles = cycles_found,
        "top trading cycle complete"
    );

    assignment
}
