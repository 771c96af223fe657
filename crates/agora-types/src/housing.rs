//! Endowment markets: housing (Top Trading Cycle) and kidney exchange.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::{AgoraError, ItemId, ParticipantId, Result};

/// An agent in a housing market: owns one house, ranks all houses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HousingAgent {
    pub id: ParticipantId,
    /// The house this agent currently owns.
    pub endowment: ItemId,
    /// Ordered house ids, most-preferred first. Houses absent from the
    /// list are unacceptable; an agent always finds its own endowment
    /// acceptable as a fallback in practice, but that is the caller's
    /// modeling choice, not enforced here.
    pub preferences: Vec<ItemId>,
}

impl HousingAgent {
    #[must_use]
    pub fn new(
        id: impl Into<ParticipantId>,
        endowment: impl Into<ItemId>,
        preferences: Vec<ItemId>,
    ) -> Self {
        Self {
            id: id.into(),
            endowment: endowment.into(),
            preferences,
        }
    }

    #[must_use]
    pub fn rank_of(&self, house: &ItemId) -> Option<usize> {
        self.preferences.iter().position(|h| h == house)
    }
}

/// A housing market: every agent starts with exactly one house.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HousingMarket {
    pub agents: Vec<HousingAgent>,
}

impl HousingMarket {
    #[must_use]
    pub fn new(agents: Vec<HousingAgent>) -> Self {
        Self { agents }
    }

    #[must_use]
    pub fn agent(&self, id: &ParticipantId) -> Option<&HousingAgent> {
        self.agents.iter().find(|a| &a.id == id)
    }

    /// The agent who currently owns `house`.
    #[must_use]
    pub fn owner_of(&self, house: &ItemId) -> Option<&HousingAgent> {
        self.agents.iter().find(|a| &a.endowment == house)
    }

    /// Opt-in structural validation: unique agent ids, unique endowments.
    pub fn validate(&self) -> Result<()> {
        let mut ids = HashSet::new();
        let mut houses = HashSet::new();
        for agent in &self.agents {
            if agent.id.as_str().is_empty() {
                return Err(AgoraError::EmptyIdentifier);
            }
            if !ids.insert(&agent.id) {
                return Err(AgoraError::DuplicateParticipant(agent.id.clone()));
            }
            if !houses.insert(&agent.endowment) {
                return Err(AgoraError::DuplicateEndowment {
                    house: agent.endowment.clone(),
                });
            }
        }
        Ok(())
    }
}

/// A kidney-exchange pool: donor-patient pairs plus directed compatibility
/// edges. An edge (a, b) means the donor of pair `a` is compatible with
/// the patient of pair `b`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KidneyPool {
    pub pairs: Vec<ParticipantId>,
    pub compatibility: Vec<(ParticipantId, ParticipantId)>,
}

impl KidneyPool {
    #[must_use]
    pub fn new(
        pairs: Vec<ParticipantId>,
        compatibility: Vec<(ParticipantId, ParticipantId)>,
    ) -> Self {
        Self {
            pairs,
            compatibility,
        }
    }

    /// Pairs whose patient can receive from `donor_pair`'s donor.
    /// Edges naming unknown pairs are silently excluded.
    #[must_use]
    pub fn compatible_with(&self, donor_pair: &ParticipantId) -> Vec<&ParticipantId> {
        self.compatibility
            .iter()
            .filter(|(from, to)| from == donor_pair && self.pairs.contains(to))
            .map(|(_, to)| to)
            .collect()
    }
}
