//! Error types for the Agora engine.
//!
//! All errors use the `AG_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by subsystem:
//! - 1xx: Matching-market model errors
//! - 3xx: Auction model errors
//!
//! The algorithms themselves are total functions over loosely-validated
//! input (unknown references are treated as unacceptable, degenerate
//! markets produce empty results). These errors are only produced by the
//! opt-in `validate()` methods on the model types, so callers choose
//! between fail-fast and tolerant behavior.

use thiserror::Error;

use crate::{BidderId, ItemId, ParticipantId};

/// Central error enum for all Agora model validation.
#[derive(Debug, Error)]
pub enum AgoraError {
    // =================================================================
    // Matching-Market Model Errors (1xx)
    // =================================================================
    /// Two participants on the same side share an identifier.
    #[error("AG_ERR_100: Duplicate participant id: {0}")]
    DuplicateParticipant(ParticipantId),

    /// A preference list names the same partner twice.
    #[error("AG_ERR_101: Duplicate preference entry {entry} for participant {participant}")]
    DuplicatePreference {
        participant: ParticipantId,
        entry: ParticipantId,
    },

    /// An identifier is the empty string.
    #[error("AG_ERR_102: Empty identifier")]
    EmptyIdentifier,

    /// Two housing agents claim the same endowment.
    #[error("AG_ERR_103: House {house} endowed to more than one agent")]
    DuplicateEndowment { house: ItemId },

    // =================================================================
    // Auction Model Errors (3xx)
    // =================================================================
    /// Two bidders share an identifier.
    #[error("AG_ERR_300: Duplicate bidder id: {0}")]
    DuplicateBidder(BidderId),

    /// Two items share an identifier.
    #[error("AG_ERR_301: Duplicate item id: {0}")]
    DuplicateItem(ItemId),

    /// A valuation is negative.
    #[error("AG_ERR_302: Negative valuation for bidder {bidder} at item index {index}")]
    NegativeValuation { bidder: BidderId, index: usize },

    /// A reserve price is negative.
    #[error("AG_ERR_303: Negative reserve price on item {0}")]
    NegativeReserve(ItemId),

    /// A bidder's valuation list is not index-aligned with the item list.
    #[error("AG_ERR_304: Bidder {bidder} has {got} valuations for {expected} items")]
    ValuationCountMismatch {
        bidder: BidderId,
        expected: usize,
        got: usize,
    },
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, AgoraError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_contains_prefix() {
        let err = AgoraError::DuplicateParticipant(ParticipantId::new("m1"));
        let msg = format!("{err}");
        assert!(msg.starts_with("AG_ERR_100"), "Got: {msg}");
        assert!(msg.contains("m1"));
    }

    #[test]
    fn valuation_mismatch_display() {
        let err = AgoraError::ValuationCountMismatch {
            bidder: BidderId::new("b1"),
            expected: 3,
            got: 2,
        };
        let msg = format!("{err}");
        assert!(msg.contains("AG_ERR_304"));
        assert!(msg.contains('3'));
        assert!(msg.contains('2'));
    }

    #[test]
    fn all_errors_have_ag_err_prefix() {
        let errors: Vec<Box<dyn std::error::Error>> = vec![
            Box::new(AgoraError::EmptyIdentifier),
            Box::new(AgoraError::DuplicateBidder(BidderId::new("b"))),
            Box::new(AgoraError::NegativeReserve(ItemId::new("i"))),
            Box::new(AgoraError::DuplicateEndowment {
                house: ItemId::new("h1"),
            }),
        ];
        for err in errors {
            let msg = format!("{err}");
            assert!(msg.starts_with("AG_ERR_"), "Error missing prefix: {msg}");
        }
    }
}
