//! Pairwise Pareto-efficiency probe.
//!
//! For every pair of same-side participants with at least one match each,
//! tests whether exchanging one matched partner would strictly improve
//! both by their own preference ranks. Any such swap is an available
//! improvement, so the matching is not Pareto-efficient.
//!
//! This probes pairwise swaps only, not arbitrary reallocations — a
//! necessary-but-not-sufficient efficiency test, tagged
//! [`CheckScope::PairwiseApproximate`] in the report.

use serde::{Deserialize, Serialize};

use agora_types::{Matching, Participant, ParticipantId, TwoSidedMarket};

use crate::CheckScope;

/// A partner exchange that would strictly improve both participants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapImprovement {
    pub first: ParticipantId,
    /// The partner `first` would give away.
    pub first_gives: ParticipantId,
    pub second: ParticipantId,
    /// The partner `second` would give away.
    pub second_gives: ParticipantId,
}

/// Result of the Pareto probe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParetoReport {
    pub scope: CheckScope,
    pub improvements: Vec<SwapImprovement>,
    /// No pairwise improvement found. With `PairwiseApproximate` scope
    /// this does not prove full Pareto efficiency.
    pub no_pairwise_improvement: bool,
}

/// Probe both sides of the market for mutually improving partner swaps.
#[must_use]
pub fn pareto_improvements(market: &TwoSidedMarket, matching: &Matching) -> ParetoReport {
    let mut improvements = Vec::new();
    for side in [&market.proposers, &market.receivers] {
        scan_side(side, matching, &mut improvements);
    }
    ParetoReport {
        scope: CheckScope::PairwiseApproximate,
        no_pairwise_improvement: improvements.is_empty(),
        improvements,
    }
}

fn scan_side(
    side: &[Participant],
    matching: &Matching,
    improvements: &mut Vec<SwapImprovement>,
) {
    for (i, a) in side.iter().enumerate() {
        for b in &side[i + 1..] {
            let a_partners = matching.partners(&a.id);
            let b_partners = matching.partners(&b.id);
            for pa in &a_partners {
                for pb in &b_partners {
                    // Strict improvement for both sides of the swap.
                    if a.prefers(pb, pa) && b.prefers(pa, pb) {
                        improvements.push(SwapImprovement {
                            first: a.id.clone(),
                            first_gives: pa.clone(),
                            second: b.id.clone(),
                            second_gives: pb.clone(),
                        });
                    }
                }
            }
        }
    }
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

    #[test]
    fn mutually_beneficial_swap_is_reported() {
        // m1 holds w2 but wants w1; m2 holds w1 but wants w2.
        let market = TwoSidedMarket::new(
            vec![
                Participant::new("m1", prefs(&["w1", "w2"])),
                Participant::new("m2", prefs(&["w2", "w1"])),
            ],
            vec![
                Participant::new("w1", prefs(&["m1", "m2"])),
                Participant::new("w2", prefs(&["m2", "m1"])),
            ],
        );
        let mut matching = Matching::new();
        matching.pair(&pid("m1"), &pid("w2"));
        matching.pair(&pid("m2"), &pid("w1"));
        let report = pareto_improvements(&market, &matching);
        assert!(!report.no_pairwise_improvement);
        assert_eq!(report.scope, CheckScope::PairwiseApproximate);

        let swap = &report.improvements[0];
        assert_eq!(swap.first, pid("m1"));
        assert_eq!(swap.first_gives, pid("w2"));
        assert_eq!(swap.second, pid("m2"));
        assert_eq!(swap.second_gives, pid("w1"));
    }

    #[test]
    fn aligned_matching_has_no_improvement() {
        let market = TwoSidedMarket::new(
            vec![
                Participant::new("m1", prefs(&["w1", "w2"])),
                Participant::new("m2", prefs(&["w2", "w1"])),
            ],
            vec![
                Participant::new("w1", prefs(&["m1", "m2"])),
                Participant::new("w2", prefs(&["m2", "m1"])),
            ],
        );
        let mut matching = Matching::new();
        matching.pair(&pid("m1"), &pid("w1"));
        matching.pair(&pid("m2"), &pid("w2"));
        let report = pareto_improvements(&market, &matching);
        assert!(report.no_pairwise_improvement);
        assert!(report.improvements.is_empty());
    }

    #[test]
    fn one_sided_gain_is_not_an_improvement() {
        // m1 wants the swap, m2 does not. Pareto requires both.
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
        let mut matching = Matching::new();
        matching.pair(&pid("m1"), &pid("w2"));
        matching.pair(&pid("m2"), &pid("w1"));
        let report = pareto_improvements(&market, &matching);
        assert!(report.no_pairwise_improvement);
    }

    #[test]
    fn unmatched_participants_are_skipped() {
        let market = TwoSidedMarket::new(
            vec![
                Participant::new("m1", prefs(&["w1"])),
                Participant::new("m2", prefs(&["w1"])),
            ],
            vec![Participant::new("w1", prefs(&["m1", "m2"]))],
        );
        let report = pareto_improvements(&market, &Matching::new());
        assert!(report.no_pairwise_improvement);
    }
}
