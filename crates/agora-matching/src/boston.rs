//! The Boston mechanism (immediate acceptance).
//!
//! Processes preference ranks in rounds: in round k, every participant
//! with spare capacity applies to its k-th choice, and each receiver
//! immediately accepts applicants up to remaining capacity in its own
//! priority order, rejecting the rest permanently. There is no deferral
//! and no re-entry.
//!
//! This mechanism is **not** guaranteed stable or strategy-proof. It
//! exists to demonstrate mechanism non-equivalence against deferred
//! acceptance: a participant can profit from ranking a safer school first.

use std::collections::HashMap;

use agora_types::{Matching, TwoSidedMarket};

/// Run the Boston (immediate acceptance) mechanism.
///
/// Round k: still-unmatched proposers apply to their k-th choice; each
/// receiver ranks the round's applicants by its own list, fills remaining
/// capacity top-down, and rejects the rest for good. Terminates after the
/// longest preference list is exhausted.
#[must_use]
pub fn boston_mechanism(market: &TwoSidedMarket) -> Matching {
    let receiver_index: HashMap<_, usize> = market
        .receivers
        .iter()
        .enumerate()
        .map(|(i, r)| (&r.id, i))
        .collect();

    let mut proposer_slots: Vec<usize> = market
        .proposers
        .iter()
        .map(|p| p.capacity as usize)
        .collect();
    let mut receiver_slots: Vec<usize> = market
        .receivers
        .iter()
        .map(|r| r.capacity as usize)
        .collect();

    let rounds = market
        .proposers
        .iter()
        .map(|p| p.preferences.len())
        .max()
        .unwrap_or(0);

    let mut matching = Matching::new();

    for round in 0..rounds {
        // Collect this round's applicants per receiver.
        let mut applicants: Vec<Vec<usize>> = vec![Vec::new(); market.receivers.len()];
        for (p_idx, proposer) in market.proposers.iter().enumerate() {
            if proposer_slots[p_idx] == 0 {
                continue;
            }
            let Some(target) = proposer.preferences.get(round) else {
                continue;
            };
            let Some(&r_idx) = receiver_index.get(target) else {
                continue;
            };
            applicants[r_idx].push(p_idx);
        }

        // Each receiver accepts in its own priority order, permanently.
        for (r_idx, mut round_applicants) in applicants.into_iter().enumerate() {
            let receiver = &market.receivers[r_idx];
            // Unranked applicants are unacceptable.
            round_applicants
                .retain(|&p_idx| receiver.rank_of(&market.proposers[p_idx].id).is_some());
            round_applicants.sort_by_key(|&p_idx| receiver.rank_of(&market.proposers[p_idx].id));

            for p_idx in round_applicants {
                if receiver_slots[r_idx] == 0 {
                    break;
                }
                receiver_slots[r_idx] -= 1;
                proposer_slots[p_idx] -= 1;
                matching.pair(&market.proposers[p_idx].id, &receiver.id);
            }
        }
    }

    matching
}

#[cfg(test)]
mod tests {
    use agora_types::{Participant, ParticipantId};

    use super::*;

    fn pid(s: &str) -> ParticipantId {
        ParticipantId::new(s)
    }

    fn prefs(ids: &[&str]) -> Vec<ParticipantId> {
        ids.iter().map(|s| pid(s)).collect()
    }

    #[test]
    fn first_choices_are_locked_in_round_one() {
        // s2 takes w1 in round one; s1's later claim on w1 is void even
        // though w1 prefers s1 — the hallmark instability of Boston.
        let market = TwoSidedMarket::new(
            vec![
                Participant::new("s1", prefs(&["w2", "w1"])),
                Participant::new("s2", prefs(&["w1", "w2"])),
            ],
            vec![
                Participant::new("w1", prefs(&["s1", "s2"])),
                Participant::new("w2", prefs(&["s2", "s1"])),
            ],
        );
        let matching = boston_mechanism(&market);
        assert!(matching.is_matched_pair(&pid("s1"), &pid("w2")));
        assert!(matching.is_matched_pair(&pid("s2"), &pid("w1")));
    }

    #[test]
    fn contested_first_choice_goes_to_higher_priority() {
        let market = TwoSidedMarket::new(
            vec![
                Participant::new("s1", prefs(&["w1", "w2"])),
                Participant::new("s2", prefs(&["w1", "w2"])),
            ],
            vec![
                Participant::new("w1", prefs(&["s2", "s1"])),
                Participant::new("w2", prefs(&["s1", "s2"])),
            ],
        );
        let matching = boston_mechanism(&market);
        assert!(matching.is_matched_pair(&pid("s2"), &pid("w1")));
        // s1 rejected in round one, lands its second choice in round two.
        assert!(matching.is_matched_pair(&pid("s1"), &pid("w2")));
    }

    #[test]
    fn capacity_fills_across_rounds() {
        let market = TwoSidedMarket::new(
            vec![
                Participant::new("s1", prefs(&["school"])),
                Participant::new("s2", prefs(&["other", "school"])),
            ],
            vec![
                Participant::with_capacity("school", prefs(&["s1", "s2"]), 2),
                Participant::with_capacity("other", prefs(&[]), 1),
            ],
        );
        let matching = boston_mechanism(&market);
        // s2's round-one application to "other" fails (unranked there),
        // so it joins "school" in round two.
        assert_eq!(matching.match_count(&pid("school")), 2);
    }

    #[test]
    fn differs_from_deferred_acceptance() {
        // s3 grabs B as a round-one first choice and keeps it under
        // Boston, even though B ranks s2 higher. Deferred acceptance lets
        // s2 displace s3 later.
        let market = TwoSidedMarket::new(
            vec![
                Participant::new("s1", prefs(&["A", "B", "C"])),
                Participant::new("s2", prefs(&["A", "B", "C"])),
                Participant::new("s3", prefs(&["B", "A", "C"])),
            ],
            vec![
                Participant::new("A", prefs(&["s1", "s2", "s3"])),
                Participant::new("B", prefs(&["s1", "s2", "s3"])),
                Participant::new("C", prefs(&["s1", "s2", "s3"])),
            ],
        );
        let boston = boston_mechanism(&market);
        assert!(boston.is_matched_pair(&pid("s1"), &pid("A")));
        assert!(boston.is_matched_pair(&pid("s3"), &pid("B")));
        assert!(boston.is_matched_pair(&pid("s2"), &pid("C")));

        let da = crate::deferred_acceptance(&market);
        assert!(da.is_matched_pair(&pid("s2"), &pid("B")));
        assert_ne!(boston, da);
    }

    #[test]
    fn empty_market_is_empty() {
        let matching = boston_mechanism(&TwoSidedMarket::new(vec![], vec![]));
        assert!(matching.is_empty());
    }
}
