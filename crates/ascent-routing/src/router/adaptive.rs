//! Adaptive tier router combining scoring, selection, confidence, caching and
//! outcome feedback.

use super::bands::TierSelector;
use super::confidence::ConfidenceEstimator;
use super::fallback::FallbackChainBuilder;
use super::voting::{ConsensusVoter, Vote};
use super::{RouterState, TierRouter};
use crate::analyzer::ComplexityScorer;
use crate::cache::{DecisionCache, task_signature};
use crate::config::RouterConfig;
use crate::metrics::{CostAccountant, OutcomeTracker, RoutingStats};
use ascent_core::{Result, RoutingDecision, TaskDefinition, Tier, TierTable};
use async_trait::async_trait;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};

/// Router owning its cache, outcome history and cost totals.
///
/// Each instance is independent; share one by wrapping it in an `Arc`. The
/// cache and history are read-modify-write structures, so every mutation goes
/// through a lock. Locks are taken one at a time and never held across each
/// other.
pub struct AdaptiveRouter {
    scorer: ComplexityScorer,
    selector: TierSelector,
    estimator: ConfidenceEstimator,
    fallback: FallbackChainBuilder,
    voter: ConsensusVoter,
    state: RwLock<RouterState>,
    cache: RwLock<DecisionCache>,
    outcomes: RwLock<OutcomeTracker>,
    costs: Mutex<CostAccountant>,
}

impl AdaptiveRouter {
    /// Creates a router from validated configuration.
    ///
    /// # Errors
    /// Returns an error if the configuration fails validation.
    pub fn new(config: RouterConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_validated(config))
    }

    fn from_validated(config: RouterConfig) -> Self {
        Self {
            scorer: ComplexityScorer::new(config.scoring),
            selector: TierSelector::from_validated(config.bands),
            estimator: ConfidenceEstimator::new(config.confidence, config.bands),
            fallback: FallbackChainBuilder::new(),
            voter: ConsensusVoter::new(config.voting),
            state: RwLock::new(RouterState::Created),
            cache: RwLock::new(DecisionCache::new(config.cache)),
            outcomes: RwLock::new(OutcomeTracker::new(config.history.max_records)),
            costs: Mutex::new(CostAccountant::new(config.costs)),
        }
    }

    /// Clears cache, history and cost totals, and marks the router ready.
    pub async fn initialize(&self) {
        let mut state = self.state.write().await;
        self.reset().await;
        *state = RouterState::Ready;
        info!("Tier router initialized");
    }

    /// Current lifecycle state.
    pub async fn state(&self) -> RouterState {
        *self.state.read().await
    }

    async fn ensure_ready(&self) {
        if *self.state.read().await == RouterState::Ready {
            return;
        }
        let mut state = self.state.write().await;
        if *state == RouterState::Created {
            self.reset().await;
            *state = RouterState::Ready;
            debug!("Tier router initialized on first use");
        }
    }

    async fn reset(&self) {
        self.cache.write().await.clear();
        self.outcomes.write().await.clear();
        self.costs.lock().await.reset();
    }

    /// Complexity score for a task.
    pub fn score(&self, task: &TaskDefinition) -> f64 {
        self.scorer.score(task)
    }

    /// Tier the threshold bands pick for a complexity.
    pub fn select(&self, complexity: f64) -> Tier {
        self.selector.select(complexity)
    }

    /// Escalation path above `tier`.
    pub fn build_chain(&self, tier: Tier) -> Vec<Tier> {
        self.fallback.build_chain(tier)
    }

    /// Confidence for routing a task of `complexity` to `tier`, using the
    /// current outcome history.
    pub async fn estimate(&self, tier: Tier, complexity: f64) -> f64 {
        let performance = self.outcomes.read().await.performance(tier);
        self.estimator.estimate(tier, complexity, performance)
    }

    /// Tier a consensus vote picks for `task`.
    ///
    /// When some tier is confident enough the vote defers, and the threshold
    /// pick is returned instead.
    pub async fn vote(&self, task: &TaskDefinition) -> Tier {
        let complexity = self.scorer.score(task);
        match self.run_vote(complexity).await {
            Vote::Defer { .. } => self.selector.select(complexity),
            Vote::Consensus { tier, .. } => tier,
        }
    }

    async fn run_vote(&self, complexity: f64) -> Vote {
        let performance = self.outcomes.read().await.all_performance();
        let confidences = self.estimator.estimate_all(complexity, &performance);
        self.voter.vote(&confidences)
    }

    /// Fresh decision for a task, bypassing the cache.
    async fn decide(&self, task: &TaskDefinition) -> RoutingDecision {
        let complexity = self.scorer.score(task);
        let tier = self.selector.select(complexity);
        let confidence = self.estimate(tier, complexity).await;
        let reasoning = format!(
            "Complexity {complexity:.1} for task type '{}' falls in the {tier} band \
             (confidence {confidence:.2})",
            task.task_type()
        );
        RoutingDecision::new(
            tier,
            complexity,
            confidence,
            reasoning,
            self.fallback.build_chain(tier),
        )
    }

    async fn track_selection(&self, tier: Tier) {
        self.costs.lock().await.track_selection(tier);
    }
}

impl Default for AdaptiveRouter {
    fn default() -> Self {
        Self::from_validated(RouterConfig::default())
    }
}

#[async_trait]
impl TierRouter for AdaptiveRouter {
    async fn route(&self, task: &TaskDefinition) -> RoutingDecision {
        self.ensure_ready().await;
        let key = task_signature(task);

        let (cached, seen) = {
            let mut cache = self.cache.write().await;
            (cache.get(&key), cache.generations())
        };
        if let Some(decision) = cached {
            debug!(
                task_type = task.task_type(),
                tier = %decision.selected_tier(),
                "Decision served from cache"
            );
            self.track_selection(decision.selected_tier()).await;
            return decision;
        }

        let decision = self.decide(task).await;
        self.cache
            .write()
            .await
            .put_if_current(key, decision.clone(), &seen);
        self.track_selection(decision.selected_tier()).await;

        info!(
            task_type = task.task_type(),
            tier = %decision.selected_tier(),
            complexity = decision.complexity(),
            confidence = decision.confidence(),
            "Routing decision"
        );

        decision
    }

    async fn route_with_voting(&self, task: &TaskDefinition) -> RoutingDecision {
        if !self.voter.is_enabled() {
            return self.route(task).await;
        }
        self.ensure_ready().await;

        let complexity = self.scorer.score(task);
        let Vote::Consensus {
            tier,
            confidence,
            best_confidence,
            tallies,
        } = self.run_vote(complexity).await
        else {
            return self.route(task).await;
        };

        let reasoning = format!(
            "Consensus vote selected {tier} for complexity {complexity:.1}: best single-tier \
             confidence {best_confidence:.2} is below threshold {:.2} (tallies {})",
            self.voter.threshold(),
            format_tallies(&tallies)
        );
        let decision = RoutingDecision::new(
            tier,
            complexity,
            confidence,
            reasoning,
            self.fallback.build_chain(tier),
        );
        self.track_selection(tier).await;

        info!(
            task_type = task.task_type(),
            tier = %tier,
            complexity,
            confidence,
            "Consensus routing decision"
        );

        decision
    }

    async fn escalate(&self, decision: &RoutingDecision, reason: &str) -> RoutingDecision {
        self.ensure_ready().await;
        let current = decision.selected_tier();

        let Some((&next, remaining)) = decision.fallback_chain().split_first() else {
            warn!(tier = %current, reason, "Escalation requested at highest tier");
            self.track_selection(current).await;
            return RoutingDecision::new(
                current,
                decision.complexity(),
                decision.confidence(),
                format!("Already at highest tier ({current}); cannot escalate: {reason}"),
                Vec::new(),
            );
        };

        let confidence = self.estimate(next, decision.complexity()).await;
        let escalated = RoutingDecision::new(
            next,
            decision.complexity(),
            confidence,
            format!("Escalated from {current} to {next}: {reason}"),
            remaining.to_vec(),
        );
        self.track_selection(next).await;

        info!(from = %current, to = %next, reason, "Escalated routing decision");

        escalated
    }

    async fn record_outcome(&self, decision: &RoutingDecision, success: bool, quality: f64) {
        self.ensure_ready().await;
        self.outcomes
            .write()
            .await
            .record(decision.clone(), success, quality);

        if !success {
            let tier = decision.selected_tier();
            let removed = self.cache.write().await.invalidate_tier(tier);
            debug!(tier = %tier, removed, "Invalidated cached decisions after failure");
        }
    }

    async fn stats(&self) -> RoutingStats {
        self.ensure_ready().await;
        let cost = self.costs.lock().await.summary();
        let cache = self.cache.read().await.stats();
        self.outcomes.read().await.stats(cost, cache)
    }
}

fn format_tallies(tallies: &TierTable<f64>) -> String {
    tallies
        .iter()
        .map(|(tier, tally)| format!("{tier}={tally:.2}"))
        .collect::<Vec<_>>()
        .join(", ")
}
