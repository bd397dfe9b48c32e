//! Running cost totals versus always using the top tier.

use crate::config::default_costs;
use ascent_core::{Tier, TierTable};
use serde::Serialize;

/// Cost totals at a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct CostSummary {
    /// Cost units spent on the selected tiers
    pub used: f64,
    /// Cost units saved compared to selecting the top tier every time
    pub saved: f64,
    /// Selections per tier
    pub selections: TierTable<u64>,
}

impl CostSummary {
    /// Fraction of the top-tier baseline that was saved.
    pub fn savings_ratio(&self) -> f64 {
        let baseline = self.used + self.saved;
        if baseline > 0.0 { self.saved / baseline } else { 0.0 }
    }
}

/// Additive bookkeeping over a per-tier unit cost table.
#[derive(Debug, Clone)]
pub struct CostAccountant {
    costs: TierTable<f64>,
    summary: CostSummary,
}

impl CostAccountant {
    /// Creates an accountant over per-tier unit costs.
    pub fn new(costs: TierTable<f64>) -> Self {
        Self {
            costs,
            summary: CostSummary::default(),
        }
    }

    /// Records one selection of `tier`.
    pub fn track_selection(&mut self, tier: Tier) {
        let cost = *self.costs.get(tier);
        let top_cost = *self.costs.get(Tier::highest());

        self.summary.used += cost;
        self.summary.saved += (top_cost - cost).max(0.0);
        *self.summary.selections.get_mut(tier) += 1;
    }

    /// Unit cost of `tier`.
    pub fn unit_cost(&self, tier: Tier) -> f64 {
        *self.costs.get(tier)
    }

    /// Current totals.
    pub fn summary(&self) -> CostSummary {
        self.summary
    }

    /// Zeroes every total.
    pub fn reset(&mut self) {
        self.summary = CostSummary::default();
    }
}

impl Default for CostAccountant {
    fn default() -> Self {
        Self::new(default_costs())
    }
}
