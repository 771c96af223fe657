//! Report scope tags.

use serde::{Deserialize, Serialize};

/// How thoroughly a verification covered the property it checks.
///
/// Pareto efficiency and strategy-proofness are universally quantified
/// over all reallocations / all preference reports; the probes here cover
/// pairwise swaps and adjacent transpositions only. The tag keeps that
/// limitation explicit in the returned data so a caller can never mistake
/// the probe for a full proof.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CheckScope {
    /// Every case covered; an empty finding list is a proof.
    Exact,
    /// Pairwise / adjacent-transposition probe; an empty finding list is
    /// necessary but not sufficient evidence.
    PairwiseApproximate,
}

impl std::fmt::Display for CheckScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Exact => write!(f, "EXACT"),
            Self::PairwiseApproximate => write!(f, "PAIRWISE_APPROXIMATE"),
        }
    }
}
