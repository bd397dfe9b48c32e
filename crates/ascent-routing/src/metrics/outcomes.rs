//! Bounded history of reported routing outcomes.

use super::cost::CostSummary;
use super::report::RoutingStats;
use crate::cache::CacheStats;
use ascent_core::{RoutingDecision, Tier, TierTable};
use serde::Serialize;
use std::collections::VecDeque;
use std::time::SystemTime;

/// Fallback chains this short or shorter count as nearly exhausted.
const NEAR_EXHAUSTED_CHAIN_LEN: usize = 1;

/// Feedback for one executed decision.
#[derive(Debug, Clone, Serialize)]
pub struct OutcomeRecord {
    /// The decision that was executed
    pub decision: RoutingDecision,
    /// Whether execution succeeded
    pub success: bool,
    /// Caller-defined quality score, stored as given
    pub quality: f64,
    /// When the outcome was recorded
    pub timestamp: SystemTime,
}

/// Success counters for one tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct TierPerformance {
    /// Outcomes recorded for the tier
    pub samples: usize,
    /// Outcomes that succeeded
    pub successes: usize,
}

impl TierPerformance {
    /// Empirical success rate, `None` without samples.
    pub fn success_rate(&self) -> Option<f64> {
        (self.samples > 0).then(|| self.successes as f64 / self.samples as f64)
    }

    fn add(&mut self, success: bool) {
        self.samples += 1;
        if success {
            self.successes += 1;
        }
    }

    fn remove(&mut self, success: bool) {
        self.samples = self.samples.saturating_sub(1);
        if success {
            self.successes = self.successes.saturating_sub(1);
        }
    }
}

/// Append-only outcome history capped at `max_records`, oldest dropped first.
///
/// Per-tier counters are kept in step with the retained records so confidence
/// lookups never scan the history.
#[derive(Debug, Clone)]
pub struct OutcomeTracker {
    records: VecDeque<OutcomeRecord>,
    max_records: usize,
    performance: TierTable<TierPerformance>,
}

impl OutcomeTracker {
    /// Creates an empty tracker retaining at most `max_records` outcomes.
    pub fn new(max_records: usize) -> Self {
        Self {
            records: VecDeque::new(),
            max_records: max_records.max(1),
            performance: TierTable::default(),
        }
    }

    /// Appends an outcome, evicting the oldest records beyond capacity.
    ///
    /// Cache invalidation for failures is the caller's job; the tracker only
    /// keeps history.
    pub fn record(&mut self, decision: RoutingDecision, success: bool, quality: f64) {
        self.performance
            .get_mut(decision.selected_tier())
            .add(success);
        self.records.push_back(OutcomeRecord {
            decision,
            success,
            quality,
            timestamp: SystemTime::now(),
        });

        while self.records.len() > self.max_records {
            if let Some(evicted) = self.records.pop_front() {
                self.performance
                    .get_mut(evicted.decision.selected_tier())
                    .remove(evicted.success);
            }
        }
    }

    /// Success counters for `tier` over the retained history.
    pub fn performance(&self, tier: Tier) -> TierPerformance {
        *self.performance.get(tier)
    }

    /// Success counters for every tier.
    pub fn all_performance(&self) -> TierTable<TierPerformance> {
        self.performance
    }

    /// Retained records, oldest first.
    pub fn records(&self) -> impl Iterator<Item = &OutcomeRecord> {
        self.records.iter()
    }

    /// Number of retained outcomes.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no outcomes are retained.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Drops all history and per-tier counters.
    pub fn clear(&mut self) {
        self.records.clear();
        self.performance = TierTable::default();
    }

    /// Builds a stats snapshot from the retained history plus the cost and
    /// cache figures owned elsewhere.
    pub fn stats(&self, cost: CostSummary, cache: CacheStats) -> RoutingStats {
        let total = self.records.len();
        let mut tier_distribution = TierTable::<usize>::default();
        let mut confidence_sum = 0.0;
        let mut near_exhausted = 0_usize;
        let mut successes = 0_usize;

        for record in &self.records {
            *tier_distribution.get_mut(record.decision.selected_tier()) += 1;
            confidence_sum += record.decision.confidence();
            if record.decision.fallback_chain().len() <= NEAR_EXHAUSTED_CHAIN_LEN {
                near_exhausted += 1;
            }
            if record.success {
                successes += 1;
            }
        }

        let ratio = |count: f64| if total == 0 { 0.0 } else { count / total as f64 };

        RoutingStats {
            total_decisions: total,
            tier_distribution,
            average_confidence: ratio(confidence_sum),
            escalation_rate: ratio(near_exhausted as f64),
            success_rate: ratio(successes as f64),
            tier_success_rates: TierTable::from_fn(|tier| self.performance(tier).success_rate()),
            cost,
            cache,
        }
    }
}

impl Default for OutcomeTracker {
    fn default() -> Self {
        Self::new(10_000)
    }
}
