//! Consensus voting through `route_with_voting`.

#![allow(
    clippy::tests_outside_test_module,
    clippy::missing_panics_doc,
    missing_docs,
    reason = "Integration tests have different conventions"
)]

use crate::common::*;
use ascent_routing::{RouterConfig, Tier, TierRouter, TierTable, VotingConfig};

#[tokio::test]
async fn test_band_edge_task_is_decided_by_vote() {
    init_tracing();
    let router = ready_router().await;
    // 70 is the balanced upper edge: both neighbours sit at 0.7
    let work = task("security");

    let routed = router.route(&work).await;
    let voted = router.route_with_voting(&work).await;

    assert_eq!(routed.selected_tier(), Tier::Balanced);
    assert_eq!(voted.selected_tier(), Tier::Capable);
    assert_close(voted.complexity(), 70.0);
    assert_close(voted.confidence(), 0.7);
    assert!(voted.fallback_chain().is_empty());
    assert!(voted.reasoning().contains("Consensus"));
    assert!(!voted.from_cache());
}

#[tokio::test]
async fn test_consensus_decisions_are_not_cached() {
    let router = ready_router().await;
    let work = task("security");

    router.route_with_voting(&work).await;
    let again = router.route_with_voting(&work).await;

    assert!(!again.from_cache());
    let stats = router.stats().await;
    assert_eq!(stats.cache.entries, 0);
    assert_eq!(stats.cost.selections, TierTable::new(0, 0, 2));
}

#[tokio::test]
async fn test_confident_task_defers_to_route() {
    let router = ready_router().await;
    let work = task("implementation");

    let first = router.route_with_voting(&work).await;
    let second = router.route_with_voting(&work).await;

    assert_eq!(first.selected_tier(), Tier::Balanced);
    assert!(!first.reasoning().contains("Consensus"));
    assert!(second.from_cache());
}

#[tokio::test]
async fn test_low_confidence_can_keep_threshold_tier() {
    let router = ready_router().await;
    // balanced 0.76 against capable 0.6 * 1.2
    let decision = router.route_with_voting(&task("optimization")).await;

    assert_eq!(decision.selected_tier(), Tier::Balanced);
    assert_close(decision.confidence(), 0.76);
    assert!(decision.reasoning().contains("Consensus"));
    assert_eq!(decision.fallback_chain(), &[Tier::Capable]);
}

#[tokio::test]
async fn test_failing_tier_loses_the_vote() {
    let router = ready_router().await;
    let capable = router.route(&hardened_security_task()).await;
    for _ in 0..10 {
        router.record_outcome(&capable, false, 0.0).await;
    }

    // capable now 0.7 * 0.7 = 0.49, weighted 0.588 against balanced 0.7
    assert_eq!(router.vote(&task("security")).await, Tier::Balanced);
}

#[tokio::test]
async fn test_disabled_voting_matches_route() {
    let config = RouterConfig {
        voting: VotingConfig {
            enabled: false,
            ..VotingConfig::default()
        },
        ..RouterConfig::default()
    };
    let router = router_with(config).await;

    let decision = router.route_with_voting(&task("security")).await;

    assert_eq!(decision.selected_tier(), Tier::Balanced);
    assert!(!decision.reasoning().contains("Consensus"));
}

#[tokio::test]
async fn test_zero_threshold_always_defers() {
    let config = RouterConfig {
        voting: VotingConfig {
            threshold: 0.0,
            ..VotingConfig::default()
        },
        ..RouterConfig::default()
    };
    let router = router_with(config).await;

    assert_eq!(router.vote(&task("security")).await, Tier::Balanced);
}
