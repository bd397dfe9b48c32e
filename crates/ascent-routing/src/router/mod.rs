/// The adaptive router
pub mod adaptive;
/// Complexity threshold bands and tier selection
pub mod bands;
/// Confidence estimation
pub mod confidence;
/// Escalation paths
pub mod fallback;
/// Consensus voting
pub mod voting;

use crate::metrics::RoutingStats;
use ascent_core::{RoutingDecision, TaskDefinition};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use adaptive::AdaptiveRouter;
pub use bands::{Band, TierSelector};
pub use confidence::ConfidenceEstimator;
pub use fallback::FallbackChainBuilder;
pub use voting::{ConsensusVoter, Vote};

/// Lifecycle of a router.
///
/// Routing happens inside each call and returns the router to `Ready`; there
/// is no terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RouterState {
    /// Constructed, not yet initialized
    Created,
    /// Initialized and accepting calls
    Ready,
}

/// Routes tasks to tiers and learns from reported outcomes.
///
/// None of these operations block on I/O; they are async so callers can treat
/// the router like any other awaited collaborator.
#[async_trait]
pub trait TierRouter: Send + Sync {
    /// Route a task to a tier, reusing a cached decision when one is live.
    async fn route(&self, task: &TaskDefinition) -> RoutingDecision;

    /// Route a task, letting every tier vote when confidence is low.
    async fn route_with_voting(&self, task: &TaskDefinition) -> RoutingDecision;

    /// Produce the next decision along `decision`'s fallback chain.
    ///
    /// `reason` is diagnostic only. At the top tier the returned decision keeps
    /// the same tier and says so in its reasoning.
    async fn escalate(&self, decision: &RoutingDecision, reason: &str) -> RoutingDecision;

    /// Report how executing `decision` went.
    async fn record_outcome(&self, decision: &RoutingDecision, success: bool, quality: f64);

    /// Snapshot of routing activity.
    async fn stats(&self) -> RoutingStats;
}
