//! Outcome tracking, cost accounting and the stats snapshot built from them.

/// Cost accounting
pub mod cost;
/// Outcome history
pub mod outcomes;
/// Stats snapshot
pub mod report;

pub use cost::{CostAccountant, CostSummary};
pub use outcomes::{OutcomeRecord, OutcomeTracker, TierPerformance};
pub use report::RoutingStats;
