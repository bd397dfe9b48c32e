//! Execution tiers and per-tier lookup tables.
//!
//! Tiers are a closed set. Anything keyed by tier (bands, costs, weights,
//! counters) goes through [`TierTable`] so every tier is handled by an
//! exhaustive match instead of a string lookup.
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Processing tier a task can be routed to.
///
/// Variants are declared in escalation order, so the derived ordering is the
/// escalation order: `Fast < Balanced < Capable`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// Cheap, low latency tier for simple work
    Fast,
    /// Middle tier trading cost against capability
    Balanced,
    /// Most capable and most expensive tier
    Capable,
}

impl Tier {
    /// Every tier in ascending order.
    pub const ALL: [Self; 3] = [Self::Fast, Self::Balanced, Self::Capable];

    /// Position of this tier in [`Tier::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Fast => 0,
            Self::Balanced => 1,
            Self::Capable => 2,
        }
    }

    /// Next tier up for escalation, `None` at the top.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Fast => Some(Self::Balanced),
            Self::Balanced => Some(Self::Capable),
            Self::Capable => None,
        }
    }

    /// The cheapest tier.
    #[must_use]
    pub const fn lowest() -> Self {
        Self::Fast
    }

    /// The most capable tier.
    #[must_use]
    pub const fn highest() -> Self {
        Self::Capable
    }

    /// Whether nothing sits above this tier.
    #[must_use]
    pub const fn is_highest(self) -> bool {
        matches!(self, Self::Capable)
    }

    /// Lowercase name, matching the serialized form.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Fast => "fast",
            Self::Balanced => "balanced",
            Self::Capable => "capable",
        }
    }
}

impl Display for Tier {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.name())
    }
}

/// One value per tier.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TierTable<T> {
    /// Value for [`Tier::Fast`]
    pub fast: T,
    /// Value for [`Tier::Balanced`]
    pub balanced: T,
    /// Value for [`Tier::Capable`]
    pub capable: T,
}

impl<T> TierTable<T> {
    /// Creates a table from one value per tier, lowest first.
    pub const fn new(fast: T, balanced: T, capable: T) -> Self {
        Self {
            fast,
            balanced,
            capable,
        }
    }

    /// Builds a table by evaluating `value` for every tier.
    pub fn from_fn(mut value: impl FnMut(Tier) -> T) -> Self {
        Self {
            fast: value(Tier::Fast),
            balanced: value(Tier::Balanced),
            capable: value(Tier::Capable),
        }
    }

    /// Value for `tier`.
    pub const fn get(&self, tier: Tier) -> &T {
        match tier {
            Tier::Fast => &self.fast,
            Tier::Balanced => &self.balanced,
            Tier::Capable => &self.capable,
        }
    }

    /// Mutable value for `tier`.
    pub fn get_mut(&mut self, tier: Tier) -> &mut T {
        match tier {
            Tier::Fast => &mut self.fast,
            Tier::Balanced => &mut self.balanced,
            Tier::Capable => &mut self.capable,
        }
    }

    /// Iterates `(tier, value)` pairs in ascending tier order.
    pub fn iter(&self) -> impl Iterator<Item = (Tier, &T)> {
        Tier::ALL.into_iter().map(move |tier| (tier, self.get(tier)))
    }
}
