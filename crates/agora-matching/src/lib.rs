//! # agora-matching
//!
//! **Stable matching solvers for Agora.**
//!
//! Four mechanisms over the shared market model, all pure functions:
//!
//! - [`deferred_acceptance`] — Gale-Shapley, one-to-one and many-to-one;
//!   stable and proposer-optimal
//! - [`boston_mechanism`] — immediate acceptance; deliberately neither
//!   stable nor strategy-proof, for contrast in teaching
//! - [`top_trading_cycle`] — endowment reallocation; Pareto-efficient
//!   and strategy-proof
//! - [`kidney_exchange`] — DFS cycle cover over a compatibility graph
//!   with a caller-supplied cycle-length cap
//!
//! No solver validates input beyond the tolerant rules in `agora-types`:
//! unknown references are unacceptable, degenerate markets produce empty
//! results, nothing errors.

pub mod boston;
pub mod deferred_acceptance;
pub mod kidney;
pub mod ttc;

pub use boston::boston_mechanism;
pub use deferred_acceptance::deferred_acceptance;
pub use kidney::kidney_exchange;
pub use ttc::top_trading_cycle;
