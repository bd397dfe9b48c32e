//! Threshold bands mapping complexity scores to tiers.
//!
//! Bands share their endpoints: a score equal to a band's `max` belongs to
//! that band, and the next band starts just above it. The lowest band also
//! owns `0`.
use ascent_core::{Result, RoutingError, Tier, TierTable};
use serde::{Deserialize, Serialize};

/// Lower bound of the complexity scale.
pub const MIN_COMPLEXITY: f64 = 0.0;
/// Upper bound of the complexity scale.
pub const MAX_COMPLEXITY: f64 = 100.0;

/// Complexity range assigned to one tier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Band {
    /// Exclusive lower bound (inclusive for the lowest band)
    pub min: f64,
    /// Inclusive upper bound
    pub max: f64,
}

impl Band {
    /// Creates a band spanning `min..=max`.
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Centre of the band.
    pub fn midpoint(&self) -> f64 {
        f64::midpoint(self.min, self.max)
    }

    /// Distance from the centre to either edge.
    pub fn half_width(&self) -> f64 {
        (self.max - self.min) / 2.0
    }
}

/// Default bands: fast up to 20, balanced up to 70, capable up to 100.
pub fn default_bands() -> TierTable<Band> {
    TierTable::new(
        Band::new(0.0, 20.0),
        Band::new(20.0, 70.0),
        Band::new(70.0, MAX_COMPLEXITY),
    )
}

/// Checks that bands are contiguous, ordered, and cover `[0, 100]`.
///
/// # Errors
/// Returns `RoutingError::InvalidBands` describing the first problem found.
pub fn validate_bands(bands: &TierTable<Band>) -> Result<()> {
    let mut expected_min = MIN_COMPLEXITY;

    for (tier, band) in bands.iter() {
        if !band.min.is_finite() || !band.max.is_finite() {
            return Err(RoutingError::InvalidBands(format!(
                "{tier} band has a non-finite bound"
            )));
        }
        if band.min >= band.max {
            return Err(RoutingError::InvalidBands(format!(
                "{tier} band is empty: min {} >= max {}",
                band.min, band.max
            )));
        }
        if (band.min - expected_min).abs() > f64::EPSILON {
            return Err(RoutingError::InvalidBands(format!(
                "{tier} band starts at {} but the previous band ends at {expected_min}",
                band.min
            )));
        }
        expected_min = band.max;
    }

    if (expected_min - MAX_COMPLEXITY).abs() > f64::EPSILON {
        return Err(RoutingError::InvalidBands(format!(
            "bands end at {expected_min} instead of {MAX_COMPLEXITY}"
        )));
    }

    Ok(())
}

/// Maps complexity scores onto tiers.
#[derive(Debug, Clone)]
pub struct TierSelector {
    bands: TierTable<Band>,
}

impl TierSelector {
    /// Creates a selector over validated bands.
    ///
    /// # Errors
    /// Returns an error if the bands are not contiguous over `[0, 100]`.
    pub fn new(bands: TierTable<Band>) -> Result<Self> {
        validate_bands(&bands)?;
        Ok(Self { bands })
    }

    pub(crate) const fn from_validated(bands: TierTable<Band>) -> Self {
        Self { bands }
    }

    /// Selects the lowest tier whose band ceiling is at or above `complexity`.
    ///
    /// Scores above every ceiling (or NaN) go to the highest tier, so the
    /// mapping stays monotonic.
    pub fn select(&self, complexity: f64) -> Tier {
        Tier::ALL
            .into_iter()
            .find(|tier| self.bands.get(*tier).max >= complexity)
            .unwrap_or_else(Tier::highest)
    }

    /// Whether `complexity` falls inside the band owned by `tier`.
    pub fn contains(&self, tier: Tier, complexity: f64) -> bool {
        let band = self.bands.get(tier);
        let above_floor = if tier == Tier::lowest() {
            complexity >= band.min
        } else {
            complexity > band.min
        };
        above_floor && complexity <= band.max
    }

    /// Band owned by `tier`.
    pub fn band(&self, tier: Tier) -> Band {
        *self.bands.get(tier)
    }

    /// All bands, one per tier.
    pub fn bands(&self) -> &TierTable<Band> {
        &self.bands
    }
}

impl Default for TierSelector {
    fn default() -> Self {
        Self::from_validated(default_bands())
    }
}
