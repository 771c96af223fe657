//! Adjacent-transposition strategy-proofness probe.
//!
//! Re-runs a mechanism after swapping two adjacent entries in one
//! participant's reported preference list. If any manipulated run leaves
//! that participant better off **under its true preferences**, the
//! mechanism is not strategy-proof for it.
//!
//! Only adjacent transpositions are probed, not the full permutation
//! space — tagged [`CheckScope::PairwiseApproximate`] in the report.

use serde::{Deserialize, Serialize};

use agora_types::{Matching, Participant, ParticipantId, TwoSidedMarket};

use crate::CheckScope;

/// A misreport that improved the manipulator's outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manipulation {
    /// The adjacent entries that were transposed in the reported list.
    pub swapped: (ParticipantId, ParticipantId),
    /// Partner ranks (under true preferences) from the truthful run.
    pub truthful_ranks: Vec<usize>,
    /// Partner ranks (under true preferences) from the manipulated run.
    pub manipulated_ranks: Vec<usize>,
}

/// Result of the strategy-proofness probe for one participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyReport {
    pub scope: CheckScope,
    pub participant: ParticipantId,
    /// Misreports that strictly improved the participant's outcome.
    pub manipulations: Vec<Manipulation>,
    /// No probed misreport helped. With `PairwiseApproximate` scope this
    /// does not prove strategy-proofness.
    pub no_manipulation_found: bool,
}

/// Probe whether `participant` can gain by transposing adjacent entries
/// in its reported preference list.
///
/// `mechanism` is any pure function from market to matching — pass
/// `deferred_acceptance` or `boston_mechanism` to compare their
/// incentive properties. Outcomes are compared as sorted rank vectors
/// under the participant's true preferences, padded with worst-possible
/// ranks up to capacity, so fewer or worse matches always lose.
pub fn probe_strategy_proofness<F>(
    mechanism: F,
    market: &TwoSidedMarket,
    participant: &ParticipantId,
) -> StrategyReport
where
    F: Fn(&TwoSidedMarket) -> Matching,
{
    let Some(truthful) = market.participant(participant) else {
        // Unknown participant: nothing to manipulate.
        return StrategyReport {
            scope: CheckScope::PairwiseApproximate,
            participant: participant.clone(),
            manipulations: Vec::new(),
            no_manipulation_found: true,
        };
    };
    let truthful = truthful.clone();

    let honest_matching = mechanism(market);
    let truthful_ranks = outcome_ranks(&truthful, &honest_matching);

    let mut manipulations = Vec::new();

    for i in 0..truthful.preferences.len().saturating_sub(1) {
        let mut manipulated = market.clone();
        let reported = manipulated
            .proposers
            .iter_mut()
            .chain(manipulated.receivers.iter_mut())
            .find(|p| &p.id == participant)
            .expect("participant located above");
        reported.preferences.swap(i, i + 1);
        let swapped = (
            reported.preferences[i + 1].clone(),
            reported.preferences[i].clone(),
        );

        let manipulated_matching = mechanism(&manipulated);
        // Evaluate against the TRUE list, not the reported one.
        let manipulated_ranks = outcome_ranks(&truthful, &manipulated_matching);

        if manipulated_ranks < truthful_ranks {
            manipulations.push(Manipulation {
                swapped,
                truthful_ranks: truthful_ranks.clone(),
                manipulated_ranks,
            });
        }
    }

    StrategyReport {
        scope: CheckScope::PairwiseApproximate,
        participant: participant.clone(),
        no_manipulation_found: manipulations.is_empty(),
        manipulations,
    }
}

/// Sorted true-preference ranks of the participant's matched partners,
/// padded to capacity with `usize::MAX` so lexicographic comparison
/// favors more and better matches.
fn outcome_ranks(truthful: &Participant, matching: &Matching) -> Vec<usize> {
    let mut ranks: Vec<usize> = matching
        .partners(&truthful.id)
        .iter()
        .map(|p| truthful.rank_of(p).unwrap_or(usize::MAX))
        .collect();
    ranks.sort_unstable();
    ranks.resize(truthful.capacity as usize, usize::MAX);
    ranks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pid(s: &str) -> ParticipantId {
        ParticipantId::new(s)
    }

    fn prefs(ids: &[&str]) -> Vec<ParticipantId> {
        ids.iter().map(|s| pid(s)).collect()
    }

    /// A toy "mechanism" that gives w1 to whichever man ranks her last —
    /// trivially manipulable.
    fn perverse_mechanism(market: &TwoSidedMarket) -> Matching {
        let mut matching = Matching::new();
        if let Some(winner) = market
            .proposers
            .iter()
            .max_by_key(|p| p.rank_of(&pid("w1")).unwrap_or(0))
        {
            matching.pair(&winner.id, &pid("w1"));
        }
        matching
    }

    #[test]
    fn perverse_mechanism_is_flagged() {
        let market = TwoSidedMarket::new(
            vec![
                Participant::new("m1", prefs(&["w1", "w2"])),
                Participant::new("m2", prefs(&["w1", "w2"])),
            ],
            vec![
                Participant::new("w1", prefs(&["m1", "m2"])),
                Participant::new("w2", prefs(&["m1", "m2"])),
            ],
        );
        // Truthfully both men rank w1 at 0 and the tie goes to m2. By
        // demoting w1 in the reported list, m1 wins her while truly
        // ranking her first.
        let report = probe_strategy_proofness(perverse_mechanism, &market, &pid("m1"));
        assert!(!report.no_manipulation_found);
        let manip = &report.manipulations[0];
        assert_eq!(manip.swapped, (pid("w1"), pid("w2")));
        assert!(manip.manipulated_ranks < manip.truthful_ranks);
    }

    #[test]
    fn constant_mechanism_is_not_flagged() {
        let market = TwoSidedMarket::new(
            vec![Participant::new("m1", prefs(&["w1", "w2"]))],
            vec![
                Participant::new("w1", prefs(&["m1"])),
                Participant::new("w2", prefs(&["m1"])),
            ],
        );
        let constant = |m: &TwoSidedMarket| {
            let mut matching = Matching::new();
            matching.pair(&m.proposers[0].id, &pid("w1"));
            matching
        };
        let report = probe_strategy_proofness(constant, &market, &pid("m1"));
        assert!(report.no_manipulation_found);
        assert!(report.manipulations.is_empty());
    }

    #[test]
    fn unknown_participant_reports_clean() {
        let market = TwoSidedMarket::new(vec![], vec![]);
        let report =
            probe_strategy_proofness(|_: &TwoSidedMarket| Matching::new(), &market, &pid("ghost"));
        assert!(report.no_manipulation_found);
    }

    #[test]
    fn report_scope_is_approximate() {
        let market = TwoSidedMarket::new(vec![], vec![]);
        let report =
            probe_strategy_proofness(|_: &TwoSidedMarket| Matching::new(), &market, &pid("x"));
        assert_eq!(report.scope, CheckScope::PairwiseApproximate);
    }
}
