//! The matching produced by a solver, and the blocking-pair diagnostic.
//!
//! A [`Matching`] is a symmetric pairing map: for every matched pair
//! (a, b), b appears in a's partner set iff a appears in b's. The map's
//! mutators preserve that invariant; nothing else in the engine writes to
//! the underlying storage directly.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::ParticipantId;

/// A symmetric matching between the two sides of a market.
///
/// `BTreeMap`/`BTreeSet` keep iteration deterministic, so repeated
/// verification of the same matching visits pairs in the same order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Matching {
    pairs: BTreeMap<ParticipantId, BTreeSet<ParticipantId>>,
}

impl Matching {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Match `a` with `b`, symmetrically. Idempotent.
    pub fn pair(&mut self, a: &ParticipantId, b: &ParticipantId) {
        self.pairs.entry(a.clone()).or_default().insert(b.clone());
        self.pairs.entry(b.clone()).or_default().insert(a.clone());
    }

    /// Dissolve the pair (a, b), symmetrically. No-op if not matched.
    pub fn unpair(&mut self, a: &ParticipantId, b: &ParticipantId) {
        if let Some(set) = self.pairs.get_mut(a) {
            set.remove(b);
            if set.is_empty() {
                self.pairs.remove(a);
            }
        }
        if let Some(set) = self.pairs.get_mut(b) {
            set.remove(a);
            if set.is_empty() {
                self.pairs.remove(b);
            }
        }
    }

    /// The partners currently matched to `id`. Empty for unmatched ids.
    #[must_use]
    pub fn partners(&self, id: &ParticipantId) -> BTreeSet<ParticipantId> {
        self.pairs.get(id).cloned().unwrap_or_default()
    }

    /// Number of partners matched to `id`.
    #[must_use]
    pub fn match_count(&self, id: &ParticipantId) -> usize {
        self.pairs.get(id).map_or(0, BTreeSet::len)
    }

    #[must_use]
    pub fn is_matched_pair(&self, a: &ParticipantId, b: &ParticipantId) -> bool {
        self.pairs.get(a).is_some_and(|set| set.contains(b))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// All (participant, partner-set) entries, both directions included.
    pub fn iter(&self) -> impl Iterator<Item = (&ParticipantId, &BTreeSet<ParticipantId>)> {
        self.pairs.iter()
    }

    /// Total number of distinct matched pairs.
    #[must_use]
    pub fn pair_count(&self) -> usize {
        self.pairs.values().map(BTreeSet::len).sum::<usize>() / 2
    }
}

/// A pair of participants who would both rather be matched to each other
/// than stay with their current assignments. Diagnostic only: produced by
/// the verifier, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockingPair {
    pub first: ParticipantId,
    pub second: ParticipantId,
    /// Human-readable justification for display in the teaching UI.
    pub reason: String,
}

impl BlockingPair {
    #[must_use]
    pub fn new(first: ParticipantId, second: ParticipantId, reason: impl Into<String>) -> Self {
        Self {
            first,
            second,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pid(s: &str) -> ParticipantId {
        ParticipantId::new(s)
    }

    #[test]
    fn pair_is_symmetric() {
        let mut m = Matching::new();
        m.pair(&pid("m1"), &pid("w1"));
        assert!(m.is_matched_pair(&pid("m1"), &pid("w1")));
        assert!(m.is_matched_pair(&pid("w1"), &pid("m1")));
        assert_eq!(m.pair_count(), 1);
    }

    #[test]
    fn unpair_removes_both_directions() {
        let mut m = Matching::new();
        m.pair(&pid("m1"), &pid("w1"));
        m.unpair(&pid("w1"), &pid("m1"));
        assert!(m.is_empty());
        assert_eq!(m.match_count(&pid("m1")), 0);
    }

    #[test]
    fn pair_is_idempotent() {
        let mut m = Matching::new();
        m.pair(&pid("m1"), &pid("w1"));
        m.pair(&pid("m1"), &pid("w1"));
        assert_eq!(m.match_count(&pid("m1")), 1);
        assert_eq!(m.pair_count(), 1);
    }

    #[test]
    fn many_to_one_partner_sets() {
        let mut m = Matching::new();
        m.pair(&pid("hospital"), &pid("d1"));
        m.pair(&pid("hospital"), &pid("d2"));
        assert_eq!(m.match_count(&pid("hospital")), 2);
        assert_eq!(m.match_count(&pid("d1")), 1);
        assert_eq!(m.pair_count(), 2);
    }

    #[test]
    fn serde_roundtrip() {
        let mut m = Matching::new();
        m.pair(&pid("m1"), &pid("w1"));
        let json = serde_json::to_string(&m).unwrap();
        let back: Matching = serde_json::from_str(&json).unwrap();
        assert_eq!(m, back);
    }
}
