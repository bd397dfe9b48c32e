//! Routing decisions handed back to callers.
use crate::tier::Tier;
use serde::Serialize;

/// Marker appended to the reasoning of decisions served from the cache.
pub const CACHE_HIT_MARKER: &str = "(cache hit)";

/// Outcome of routing a task to a tier.
///
/// Decisions are immutable. Escalation and cache replay produce new values;
/// an old decision is never edited in place. The constructor enforces the
/// invariants: complexity in `[0, 100]`, confidence in `[0, 1]`, and a fallback
/// chain that is strictly increasing and lies entirely above the selected tier.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoutingDecision {
    selected_tier: Tier,
    complexity: f64,
    confidence: f64,
    reasoning: String,
    fallback_chain: Vec<Tier>,
    from_cache: bool,
}

impl RoutingDecision {
    /// Creates a decision, normalizing out-of-range values.
    pub fn new(
        selected_tier: Tier,
        complexity: f64,
        confidence: f64,
        reasoning: String,
        mut fallback_chain: Vec<Tier>,
    ) -> Self {
        fallback_chain.retain(|tier| *tier > selected_tier);
        fallback_chain.sort_unstable();
        fallback_chain.dedup();

        Self {
            selected_tier,
            complexity: clamp_or_zero(complexity, 100.0),
            confidence: clamp_or_zero(confidence, 1.0),
            reasoning,
            fallback_chain,
            from_cache: false,
        }
    }

    /// Copy of this decision annotated as replayed from the cache.
    #[must_use]
    pub fn as_cache_hit(&self) -> Self {
        let mut replay = self.clone();
        if !replay.from_cache {
            replay.reasoning = format!("{} {CACHE_HIT_MARKER}", replay.reasoning);
            replay.from_cache = true;
        }
        replay
    }

    /// Tier chosen to handle the task.
    pub const fn selected_tier(&self) -> Tier {
        self.selected_tier
    }

    /// Complexity score in `[0, 100]`.
    pub const fn complexity(&self) -> f64 {
        self.complexity
    }

    /// Confidence in `[0, 1]`.
    pub const fn confidence(&self) -> f64 {
        self.confidence
    }

    /// Human readable explanation of how the tier was chosen.
    pub fn reasoning(&self) -> &str {
        &self.reasoning
    }

    /// Tiers to escalate to, ascending.
    pub fn fallback_chain(&self) -> &[Tier] {
        &self.fallback_chain
    }

    /// Whether this decision was replayed from the cache.
    pub const fn from_cache(&self) -> bool {
        self.from_cache
    }

    /// First tier of the fallback chain.
    pub fn next_tier(&self) -> Option<Tier> {
        self.fallback_chain.first().copied()
    }

    /// Whether there is nowhere left to escalate to.
    pub fn is_at_highest_tier(&self) -> bool {
        self.fallback_chain.is_empty()
    }
}

fn clamp_or_zero(value: f64, max: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, max)
    }
}
