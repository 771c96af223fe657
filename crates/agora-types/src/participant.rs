//! Participants and two-sided matching markets.
//!
//! A [`Participant`] carries an ordered preference list (most-preferred
//! first) and a capacity. A [`TwoSidedMarket`] is two disjoint sets of
//! participants — proposers and receivers — whose preference lists refer
//! across the divide.
//!
//! Rank semantics: position in the preference list, lower is better. An
//! entry absent from a preference list has no rank and is **unacceptable**:
//! it is never proposed to and never accepted. This is also how unknown
//! identifiers are tolerated: they simply never match, rather than error.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::{AgoraError, ParticipantId, Result};

/// A matching-market participant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Participant {
    pub id: ParticipantId,
    /// Ordered partner ids, most-preferred first. No duplicates.
    pub preferences: Vec<ParticipantId>,
    /// Maximum number of simultaneous matches. One-to-one markets use 1.
    pub capacity: u32,
}

impl Participant {
    /// Single-capacity participant (the one-to-one case).
    #[must_use]
    pub fn new(id: impl Into<ParticipantId>, preferences: Vec<ParticipantId>) -> Self {
        Self {
            id: id.into(),
            preferences,
            capacity: 1,
        }
    }

    /// Participant with an explicit capacity (many-to-one markets:
    /// hospitals, schools).
    #[must_use]
    pub fn with_capacity(
        id: impl Into<ParticipantId>,
        preferences: Vec<ParticipantId>,
        capacity: u32,
    ) -> Self {
        Self {
            id: id.into(),
            preferences,
            capacity,
        }
    }

    /// Rank of `other` in this participant's preferences. `None` means
    /// unacceptable (never matched, regardless of circumstances).
    #[must_use]
    pub fn rank_of(&self, other: &ParticipantId) -> Option<usize> {
        self.preferences.iter().position(|p| p == other)
    }

    /// Whether this participant prefers `a` to `b`. Unacceptable entries
    /// lose to any ranked entry; two unacceptable entries tie (false).
    #[must_use]
    pub fn prefers(&self, a: &ParticipantId, b: &ParticipantId) -> bool {
        match (self.rank_of(a), self.rank_of(b)) {
            (Some(ra), Some(rb)) => ra < rb,
            (Some(_), None) => true,
            _ => false,
        }
    }
}

/// A two-sided market: proposers on one side, receivers on the other.
///
/// Which side proposes matters: deferred acceptance is optimal for the
/// proposing side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TwoSidedMarket {
    pub proposers: Vec<Participant>,
    pub receivers: Vec<Participant>,
}

impl TwoSidedMarket {
    #[must_use]
    pub fn new(proposers: Vec<Participant>, receivers: Vec<Participant>) -> Self {
        Self {
            proposers,
            receivers,
        }
    }

    #[must_use]
    pub fn proposer(&self, id: &ParticipantId) -> Option<&Participant> {
        self.proposers.iter().find(|p| &p.id == id)
    }

    #[must_use]
    pub fn receiver(&self, id: &ParticipantId) -> Option<&Participant> {
        self.receivers.iter().find(|p| &p.id == id)
    }

    /// Look up a participant on either side.
    #[must_use]
    pub fn participant(&self, id: &ParticipantId) -> Option<&Participant> {
        self.proposer(id).or_else(|| self.receiver(id))
    }

    /// The market with proposer and receiver roles swapped. Running
    /// deferred acceptance on the reversed market yields the
    /// receiver-optimal stable matching of the original.
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self {
            proposers: self.receivers.clone(),
            receivers: self.proposers.clone(),
        }
    }

    /// Opt-in structural validation: unique ids per side, no duplicate
    /// preference entries, no empty identifiers. The solvers never call
    /// this themselves — they are total over unvalidated input.
    pub fn validate(&self) -> Result<()> {
        for side in [&self.proposers, &self.receivers] {
            let mut seen = HashSet::new();
            for p in side {
                if p.id.as_str().is_empty() {
                    return Err(AgoraError::EmptyIdentifier);
                }
                if !seen.insert(&p.id) {
                    return Err(AgoraError::DuplicateParticipant(p.id.clone()));
                }
                let mut prefs = HashSet::new();
                for entry in &p.preferences {
                    if !prefs.insert(entry) {
                        return Err(AgoraError::DuplicatePreference {
                            participant: p.id.clone(),
                            entry: entry.clone(),
                        });
                    }
                }
            }
        }
        Ok(())
    }
}
