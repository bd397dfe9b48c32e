//! Confidence that a tier suits a given complexity.
//!
//! Two inputs: how close the complexity sits to the centre of the tier's
//! band, and, once enough outcomes exist, how often the tier has succeeded.

use super::bands::{Band, default_bands};
use crate::config::ConfidenceConfig;
use crate::metrics::TierPerformance;
use ascent_core::{Tier, TierTable};

/// Estimates routing confidence in `[0, 1]`.
#[derive(Debug, Clone)]
pub struct ConfidenceEstimator {
    config: ConfidenceConfig,
    bands: TierTable<Band>,
}

impl ConfidenceEstimator {
    /// Creates an estimator over the given bands.
    pub fn new(config: ConfidenceConfig, bands: TierTable<Band>) -> Self {
        Self { config, bands }
    }

    /// Confidence from band position alone.
    ///
    /// `1.0` at the band centre, `1 - max_distance_penalty` at either edge,
    /// and lower still outside the band. Out-of-band values matter when every
    /// tier is evaluated for a vote.
    pub fn band_confidence(&self, tier: Tier, complexity: f64) -> f64 {
        let band = self.bands.get(tier);
        let half_width = band.half_width();
        if half_width <= 0.0 || complexity.is_nan() {
            return 0.0;
        }

        let distance = (complexity - band.midpoint()).abs() / half_width;
        (1.0 - self.config.max_distance_penalty * distance).clamp(0.0, 1.0)
    }

    /// Confidence for routing a task of `complexity` to `tier`.
    ///
    /// Blends in the tier's empirical success rate once it has at least
    /// `min_history_samples` outcomes, so tiers with a poor record score lower
    /// for the same complexity.
    pub fn estimate(&self, tier: Tier, complexity: f64, performance: TierPerformance) -> f64 {
        let positional = self.band_confidence(tier, complexity);

        let blended = match performance.success_rate() {
            Some(rate) if performance.samples >= self.config.min_history_samples => {
                let weight = self.config.history_weight;
                positional.mul_add(1.0 - weight, rate * weight)
            }
            _ => positional,
        };

        blended.clamp(0.0, 1.0)
    }

    /// Confidence for every tier at once.
    pub fn estimate_all(
        &self,
        complexity: f64,
        performance: &TierTable<TierPerformance>,
    ) -> TierTable<f64> {
        TierTable::from_fn(|tier| self.estimate(tier, complexity, *performance.get(tier)))
    }
}

impl Default for ConfidenceEstimator {
    fn default() -> Self {
        Self::new(ConfidenceConfig::default(), default_bands())
    }
}
