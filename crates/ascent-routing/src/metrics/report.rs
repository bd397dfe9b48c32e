//! Router statistics snapshot.

use super::cost::CostSummary;
use crate::cache::CacheStats;
use ascent_core::TierTable;
use serde::Serialize;

/// Snapshot of router activity returned by `stats`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoutingStats {
    /// Outcomes held in the bounded history
    pub total_decisions: usize,
    /// Outcomes per selected tier
    pub tier_distribution: TierTable<usize>,
    /// Mean confidence of the recorded decisions
    pub average_confidence: f64,
    /// Share of recorded decisions with at most one tier left to escalate to
    pub escalation_rate: f64,
    /// Share of recorded decisions that succeeded
    pub success_rate: f64,
    /// Success rate per tier, `None` for tiers without outcomes
    pub tier_success_rates: TierTable<Option<f64>>,
    /// Cumulative cost figures
    pub cost: CostSummary,
    /// Decision cache counters
    pub cache: CacheStats,
}

impl RoutingStats {
    /// Cumulative estimated savings versus always using the top tier.
    pub fn cost_savings(&self) -> f64 {
        self.cost.saved
    }
}
