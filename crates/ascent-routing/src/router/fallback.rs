use ascent_core::Tier;

/// Builds escalation paths above a tier.
#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackChainBuilder;

impl FallbackChainBuilder {
    /// Creates a builder.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Every tier strictly above `tier`, ascending. Empty for the top tier.
    pub fn build_chain(&self, tier: Tier) -> Vec<Tier> {
        Tier::ALL
            .into_iter()
            .filter(|candidate| *candidate > tier)
            .collect()
    }
}
