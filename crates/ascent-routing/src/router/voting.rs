//! Weighted consensus across every tier for low-confidence routing.
//!
//! Each tier's confidence is multiplied by that tier's weight and the largest
//! tally wins. This is a local weighted pick, not a distributed vote.

use crate::config::VotingConfig;
use ascent_core::{Tier, TierTable};

/// Result of a consensus vote.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Vote {
    /// The best single tier is confident enough; use the normal route
    Defer {
        /// Tier with the highest raw confidence
        best: Tier,
        /// Its confidence
        confidence: f64,
    },
    /// Confidence was below threshold; the weighted tally picked a tier
    Consensus {
        /// Winning tier
        tier: Tier,
        /// Raw confidence of the winning tier
        confidence: f64,
        /// Best raw confidence across all tiers
        best_confidence: f64,
        /// Weighted tally per tier
        tallies: TierTable<f64>,
    },
}

impl Vote {
    /// Tier the vote points at.
    pub const fn tier(&self) -> Tier {
        match self {
            Self::Defer { best, .. } => *best,
            Self::Consensus { tier, .. } => *tier,
        }
    }
}

/// Picks a tier by weighted confidence when no single tier is confident.
#[derive(Debug, Clone)]
pub struct ConsensusVoter {
    config: VotingConfig,
}

impl ConsensusVoter {
    /// Creates a voter with the given threshold and weights.
    pub fn new(config: VotingConfig) -> Self {
        Self { config }
    }

    /// Whether voting is switched on.
    pub const fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// Confidence at or above which the vote defers.
    pub const fn threshold(&self) -> f64 {
        self.config.threshold
    }

    /// Votes over per-tier confidences.
    ///
    /// Ties go to the higher tier: under uncertainty the more capable tier is
    /// preferred.
    pub fn vote(&self, confidences: &TierTable<f64>) -> Vote {
        let (best, best_confidence) = Self::arg_max(confidences);
        if best_confidence >= self.config.threshold {
            return Vote::Defer {
                best,
                confidence: best_confidence,
            };
        }

        let tallies = TierTable::from_fn(|tier| {
            confidences.get(tier) * self.config.weights.get(tier)
        });
        let (tier, _) = Self::arg_max(&tallies);

        Vote::Consensus {
            tier,
            confidence: *confidences.get(tier),
            best_confidence,
            tallies,
        }
    }

    fn arg_max(values: &TierTable<f64>) -> (Tier, f64) {
        values.iter().fold(
            (Tier::lowest(), f64::NEG_INFINITY),
            |(best_tier, best_value), (tier, value)| {
                if *value >= best_value {
                    (tier, *value)
                } else {
                    (best_tier, best_value)
                }
            },
        )
    }
}

impl Default for ConsensusVoter {
    fn default() -> Self {
        Self::new(VotingConfig::default())
    }
}
