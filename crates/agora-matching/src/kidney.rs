//! Kidney-exchange cycle finder.
//!
//! Donor-patient pairs form a directed compatibility graph: an edge
//! (a, b) means pair a's donor can give to pair b's patient. Depth-first
//! search finds cycles; each discovered cycle is realized as a
//! simultaneous donation chain and its pairs leave the pool.
//!
//! Real programs cap cycle length (usually 2-3) because every transplant
//! in a cycle happens at once; the cap is a caller policy here, passed as
//! `max_cycle_len` rather than hard-coded.

use std::collections::{HashMap, HashSet};

use agora_types::{KidneyPool, ParticipantId};

/// Find and realize donation cycles greedily.
///
/// Pairs are scanned in input order; from each unmatched pair a DFS looks
/// for a cycle returning to it, visiting only unmatched pairs and, when
/// `max_cycle_len` is `Some(k)`, paths of at most k pairs. The first cycle
/// found is realized and its pairs removed; the scan restarts until no
/// cycle remains.
///
/// Returns the realized cycles in discovery order. Each cycle lists its
/// pairs in donation order: cycle[i]'s donor gives to cycle[i+1]'s
/// patient, wrapping around. Edges naming pairs outside the pool are
/// ignored. `None` means unrestricted cycle length.
#[must_use]
pub fn kidney_exchange(
    pool: &KidneyPool,
    max_cycle_len: Option<usize>,
) -> Vec<Vec<ParticipantId>> {
    let members: HashSet<&ParticipantId> = pool.pairs.iter().collect();
    let mut adjacency: HashMap<&ParticipantId, Vec<&ParticipantId>> = HashMap::new();
    for (from, to) in &pool.compatibility {
        if members.contains(from) && members.contains(to) {
            adjacency.entry(from).or_default().push(to);
        }
    }

    let cap = max_cycle_len.unwrap_or(usize::MAX);
    let mut remaining: HashSet<&ParticipantId> = pool.pairs.iter().collect();
    let mut cycles = Vec::new();

    if cap == 0 {
        return cycles;
    }

    loop {
        let mut found = None;
        for start in &pool.pairs {
            if !remaining.contains(start) {
                continue;
            }
            let mut path = vec![start];
            if dfs(start, start, &mut path, &remaining, &adjacency, cap) {
                found = Some(path.into_iter().cloned().collect::<Vec<_>>());
                break;
            }
        }
        let Some(cycle) = found else { break };
        for pair in &cycle {
            remaining.remove(pair);
        }
        cycles.push(cycle);
    }

    tracing::debug!(
        pairs = pool.pairs.len(),
        cycles = cycles.len(),
        "kidney exchange complete"
    );

    cycles
}

/// Extend `path` from `current` looking for an edge back to `start`.
/// `path` holds the cycle-so-far including `current`.
fn dfs<'a>(
    current: &'a ParticipantId,
    start: &'a ParticipantId,
    path: &mut Vec<&'a ParticipantId>,
    remaining: &HashSet<&ParticipantId>,
    adjacency: &HashMap<&ParticipantId, Vec<&'a ParticipantId>>,
    cap: usize,
) -> bool {
    let Some(neighbors) = adjacency.get(current) else {
        return false;
    };
    for &next in neighbors {
        if next == start {
            return true;
        }
        if path.len() < cap && remaining.contains(next) && !path.contains(&next) {
            path.push(next);
            if dfs(next, start, path, remaining, adjacency, cap) {
                return true;
            }
            path.pop();
        }
    }
    false
}
