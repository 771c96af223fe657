//! Blocking-pair stability check.
//!
//! A matching is stable iff no cross-side pair would jointly defect: two
//! participants, not matched to each other, who would both accept the
//! other over their current situation. This check is exact — it
//! enumerates every cross-side pair — and deterministic: the same market
//! and matching always produce the same blocking-pair list in the same
//! order.

use serde::{Deserialize, Serialize};

use agora_types::{BlockingPair, Matching, Participant, ParticipantId, TwoSidedMarket};

/// Result of a stability check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StabilityReport {
    pub blocking_pairs: Vec<BlockingPair>,
    pub is_stable: bool,
}

/// Scan every cross-side pair for mutual incentive to defect.
///
/// A participant would accept a candidate iff the candidate appears in
/// its preference list AND either it has spare capacity or it strictly
/// prefers the candidate to its worst current partner. Partners that do
/// not appear in the preference list count as worst possible, so any
/// ranked candidate beats them.
#[must_use]
pub fn check_stability(market: &TwoSidedMarket, matching: &Matching) -> StabilityReport {
    let mut blocking_pairs = Vec::new();

    for proposer in &market.proposers {
        for receiver in &market.receivers {
            if matching.is_matched_pair(&proposer.id, &receiver.id) {
                continue;
            }
            if would_accept(proposer, &receiver.id, matching)
                && would_accept(receiver, &proposer.id, matching)
            {
                blocking_pairs.push(BlockingPair::new(
                    proposer.id.clone(),
                    receiver.id.clone(),
                    format!(
                        "{} and {} both prefer each other to their current matches",
                        proposer.id, receiver.id
                    ),
                ));
            }
        }
    }

    tracing::debug!(
        pairs_checked = market.proposers.len() * market.receivers.len(),
        blocking = blocking_pairs.len(),
        "stability check complete"
    );

    StabilityReport {
        is_stable: blocking_pairs.is_empty(),
        blocking_pairs,
    }
}

/// Whether `who` would take `candidate` given its current matches.
fn would_accept(who: &Participant, candidate: &ParticipantId, matching: &Matching) -> bool {
    // Unranked candidates are unacceptable, full stop.
    let Some(candidate_rank) = who.rank_of(candidate) else {
        return false;
    };

    let partners = matching.partners(&who.id);
    if partners.len() < who.capacity as usize {
        return true;
    }
    if who.capacity == 0 {
        return false;
    }

    // At capacity: accept iff strictly better than the worst held match.
    // A partner missing from the preference list ranks worst possible.
    let worst_rank = partners
        .iter()
        .map(|p| who.rank_of(p).unwrap_or(usize::MAX))
        .max()
        .unwrap_or(usize::MAX);
    candidate_rank < worst_rank
}

#[cfg(test)]
mod tests {
    use agora_types::ParticipantId;

    use super::*;

    fn pid(s: &str) -> ParticipantId {
        ParticipantId::new(s)
    }

    fn prefs(ids: &[&str]) -> Vec<ParticipantId> {
        ids.iter().map(|s| pid(s)).collect()
    }

    fn two_by_two() -> TwoSidedMarket {
        TwoSidedMarket::new(
            vec![
                Participant::new("m1", prefs(&["w1", "w2"])),
                Participant::new("m2", prefs(&["w1", "w2"])),
            ],
            vec![
                Participant::new("w1", prefs(&["m1", "m2"])),
                Participant::new("w2", prefs(&["m1", "m2"])),
            ],
        )
    }

    #[test]
    fn assortative_matching_is_stable() {
        let market = two_by_two();
        let mut matching = Matching::new();
        matching.pair(&pid("m1"), &pid("w1"));
        matching.pair(&pid("m2"), &pid("w2"));
        let report = check_stability(&market, &matching);
        assert!(report.is_stable);
        assert!(report.blocking_pairs.is_empty());
    }

    #[test]
    fn crossed_matching_has_blocking_pair() {
        // m1 and w1 rank each other first but are matched elsewhere.
        let market = two_by_two();
        let mut matching = Matching::new();
        matching.pair(&pid("m1"), &pid("w2"));
        matching.pair(&pid("m2"), &pid("w1"));
        let report = check_stability(&market, &matching);
        assert!(!report.is_stable);
        assert_eq!(report.blocking_pairs.len(), 1);
        let bp = &report.blocking_pairs[0];
        assert_eq!(bp.first, pid("m1"));
        assert_eq!(bp.second, pid("w1"));
    }

    #[test]
    fn unmatched_mutual_acceptables_block() {
        let market = TwoSidedMarket::new(
            vec![Participant::new("m1", prefs(&["w1"]))],
            vec![Participant::new("w1", prefs(&["m1"]))],
        );
        let report = check_stability(&market, &Matching::new());
        assert!(!report.is_stable);
    }

    #[test]
    fn unacceptable_candidates_never_block() {
        // Neither ranks the other: empty matching is stable.
        let market = TwoSidedMarket::new(
            vec![Participant::new("m1", prefs(&["w2"]))],
            vec![Participant::new("w1", prefs(&["m2"]))],
        );
        let report = check_stability(&market, &Matching::new());
        assert!(report.is_stable);
    }

    #[test]
    fn spare_capacity_accepts_any_ranked_candidate() {
        let market = TwoSidedMarket::new(
            vec![Participant::new("d1", prefs(&["h1"]))],
            vec![Participant::with_capacity("h1", prefs(&["d1"]), 3)],
        );
        let report = check_stability(&market, &Matching::new());
        assert!(!report.is_stable, "unfilled hospital slot blocks");
    }

    #[test]
    fn zero_capacity_participant_never_blocks() {
        let market = TwoSidedMarket::new(
            vec![Participant::new("m1", prefs(&["w1"]))],
            vec![Participant::with_capacity("w1", prefs(&["m1"]), 0)],
        );
        let report = check_stability(&market, &Matching::new());
        assert!(report.is_stable);
    }

    #[test]
    fn check_is_idempotent() {
        let market = two_by_two();
        let mut matching = Matching::new();
        matching.pair(&pid("m1"), &pid("w2"));
        matching.pair(&pid("m2"), &pid("w1"));
        let first = check_stability(&market, &matching);
        let second = check_stability(&market, &matching);
        assert_eq!(first, second);
    }
}
