//! Adaptive routing of tasks to capability tiers.
//!
//! A task is scored for complexity, mapped onto a tier through threshold
//! bands, and given a confidence and an escalation path. Decisions are cached
//! briefly, outcomes feed back into confidence, and a weighted vote across
//! tiers can take over when no single tier is confident.

/// Task analysis and complexity scoring
pub mod analyzer;
/// Routing decision cache
pub mod cache;
/// Router configuration
pub mod config;
/// Outcome tracking, cost accounting and stats
pub mod metrics;
/// Tier selection and the router itself
pub mod router;

pub use analyzer::ComplexityScorer;
pub use ascent_core::{
    Constraints, QualityGate, Result, RoutingDecision, RoutingError, SecurityLevel,
    TaskDefinition, Tier, TierTable,
};
pub use cache::{CacheStats, DecisionCache, task_signature};
pub use config::{
    CacheConfig, ConfidenceConfig, ConstraintWeights, HistoryConfig, RouterConfig, ScoringConfig,
    VotingConfig,
};
pub use metrics::{
    CostAccountant, CostSummary, OutcomeRecord, OutcomeTracker, RoutingStats, TierPerformance,
};
pub use router::{
    AdaptiveRouter, Band, ConfidenceEstimator, ConsensusVoter, FallbackChainBuilder, RouterState,
    TierRouter, TierSelector, Vote,
};
