//! # agora-auction
//!
//! **Allocation engine and auction format library for Agora.**
//!
//! Two layers over the shared bidder/item model:
//!
//! - **Allocation engine**: [`efficient_allocation`] (greedy welfare
//!   maximization under reserve prices) and [`vcg_auction`]
//!   (Clarke-pivot pricing on top of it)
//! - **Format library**: [`second_price`], [`first_price`], [`english`],
//!   [`dutch`], and [`optimal_reserve`]
//!
//! First-price-equivalent formats take a [`ShadingStrategy`] so the
//! baked-in `value * (n-1)/n` equilibrium approximation
//! ([`RiskNeutralShading`]) can be swapped without touching the auction
//! logic.
//!
//! Shared failure rule: when no bid meets the reserve, every function
//! returns the no-sale outcome — empty allocations and payments, zero
//! revenue and welfare — never an error.

pub mod allocation;
pub mod formats;
pub mod reserve;
pub mod shading;
pub mod vcg;

pub use allocation::{GreedyAllocation, efficient_allocation};
pub use formats::{dutch, english, first_price, second_price};
pub use reserve::{ReserveCandidate, ReserveSearch, optimal_reserve};
pub use shading::{RiskNeutralShading, ShadingStrategy, TruthfulShading};
pub use vcg::vcg_auction;
