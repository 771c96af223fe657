//! # agora-verify
//!
//! **Market verifier for Agora.**
//!
//! Consumes a market model plus a produced matching and checks its
//! economic properties:
//!
//! - [`check_stability`] — exact blocking-pair enumeration
//! - [`pareto_improvements`] — pairwise partner-swap probe
//! - [`probe_strategy_proofness`] — adjacent-transposition misreport probe
//!
//! The efficiency and strategy-proofness checks are approximations of
//! universally-quantified properties; their reports carry a
//! [`CheckScope`] tag so the limitation travels with the data.

pub mod pareto;
pub mod report;
pub mod stability;
pub mod strategy;

pub use pareto::{ParetoReport, SwapImprovement, pareto_improvements};
pub use report::CheckScope;
pub use stability::{StabilityReport, check_stability};
pub use strategy::{Manipulation, StrategyReport, probe_strategy_proofness};
