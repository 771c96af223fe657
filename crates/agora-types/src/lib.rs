//! # agora-types
//!
//! Shared market-model types for the **Agora** market-design engine.
//!
//! This crate is the leaf dependency of the workspace — every other crate
//! depends on it. It defines:
//!
//! - **Identifiers**: [`ParticipantId`], [`BidderId`], [`ItemId`]
//! - **Matching model**: [`Participant`], [`TwoSidedMarket`], [`Matching`], [`BlockingPair`]
//! - **Endowment model**: [`HousingAgent`], [`HousingMarket`], [`KidneyPool`]
//! - **Auction model**: [`Bidder`], [`Item`], [`AuctionOutcome`]
//! - **Errors**: [`AgoraError`] with `AG_ERR_` prefix codes
//!
//! Everything is a plain value type: constructed fresh per invocation from
//! caller-supplied data, never mutated by the engine, never retained
//! between calls.

pub mod auction;
pub mod error;
pub mod housing;
pub mod ids;
pub mod matching;
pub mod participant;

// Re-export all primary types at crate root for ergonomic imports:
//   use agora_types::{Participant, TwoSidedMarket, Matching, Bidder, ...};

pub use auction::*;
pub use error::*;
pub use housing::*;
pub use ids::*;
pub use matching::*;
pub use participant::*;
