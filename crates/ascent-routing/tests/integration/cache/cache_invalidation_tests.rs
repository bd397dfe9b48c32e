//! Cache behaviour observed through the router: expiry, invalidation on
//! failure, and configuration switches.

#![allow(
    clippy::tests_outside_test_module,
    clippy::missing_panics_doc,
    missing_docs,
    reason = "Integration tests have different conventions"
)]

use crate::common::*;
use ascent_routing::{CacheConfig, RouterConfig, Tier, TierRouter, task_signature};
use std::time::Duration;
use tokio::time::sleep;

#[tokio::test]
async fn test_failure_invalidates_only_failed_tier() {
    init_tracing();
    let router = ready_router().await;
    let fast_work = task("formatting");
    let balanced_work = task("implementation");

    router.route(&fast_work).await;
    let balanced = router.route(&balanced_work).await;
    assert_eq!(router.stats().await.cache.entries, 2);

    router.record_outcome(&balanced, false, 0.2).await;

    let stats = router.stats().await;
    assert_eq!(stats.cache.entries, 1);
    assert_eq!(stats.cache.invalidations, 1);

    assert!(router.route(&fast_work).await.from_cache());
    let rerouted = router.route(&balanced_work).await;
    assert!(!rerouted.from_cache());
    assert_eq!(rerouted.selected_tier(), Tier::Balanced);
}

#[tokio::test]
async fn test_success_keeps_cache() {
    let router = ready_router().await;
    let work = task("bugfix");

    let decision = router.route(&work).await;
    router.record_outcome(&decision, true, 1.0).await;

    assert!(router.route(&work).await.from_cache());
    assert_eq!(router.stats().await.cache.invalidations, 0);
}

#[tokio::test]
async fn test_failure_of_cached_copy_invalidates_original() {
    let router = ready_router().await;
    let work = task("research");

    router.route(&work).await;
    let replayed = router.route(&work).await;
    assert!(replayed.from_cache());

    router.record_outcome(&replayed, false, 0.0).await;

    assert!(!router.route(&work).await.from_cache());
}

#[tokio::test]
async fn test_unbounded_ttl_caches_without_expiry() {
    let config = RouterConfig {
        cache: CacheConfig {
            ttl_seconds: u64::MAX,
            ..CacheConfig::default()
        },
        ..RouterConfig::default()
    };
    let router = router_with(config).await;
    let work = task("review");

    let first = router.route(&work).await;
    let second = router.route(&work).await;

    assert!(!first.from_cache());
    assert!(second.from_cache());
    assert_eq!(router.stats().await.cache.entries, 1);
}

#[tokio::test]
async fn test_entries_expire_after_ttl() {
    let config = RouterConfig {
        cache: CacheConfig {
            ttl_seconds: 1,
            ..CacheConfig::default()
        },
        ..RouterConfig::default()
    };
    let router = router_with(config).await;
    let work = task("testing");

    router.route(&work).await;
    assert!(router.route(&work).await.from_cache());

    sleep(Duration::from_millis(1_100)).await;

    assert!(!router.route(&work).await.from_cache());
}

#[tokio::test]
async fn test_disabled_cache_always_routes_fresh() {
    let config = RouterConfig {
        cache: CacheConfig {
            enabled: false,
            ..CacheConfig::default()
        },
        ..RouterConfig::default()
    };
    let router = router_with(config).await;
    let work = task("review");

    for _ in 0..3 {
        assert!(!router.route(&work).await.from_cache());
    }
    assert_eq!(router.stats().await.cache.entries, 0);
}

#[tokio::test]
async fn test_capacity_is_bounded() {
    let config = RouterConfig {
        cache: CacheConfig {
            max_entries: 5,
            ..CacheConfig::default()
        },
        ..RouterConfig::default()
    };
    let router = router_with(config).await;

    for index in 0..12 {
        router.route(&task(&format!("custom-{index}"))).await;
    }

    assert_eq!(router.stats().await.cache.entries, 5);
}

#[test]
fn test_signature_ignores_type_case_and_whitespace() {
    assert_eq!(
        task_signature(&task("Implementation")),
        task_signature(&task("  implementation "))
    );
    assert_ne!(
        task_signature(&task("implementation")),
        task_signature(&task("refactoring"))
    );
}

#[test]
fn test_signature_depends_on_constraints() {
    let plain = task("security");
    let hardened = hardened_security_task();

    assert_ne!(task_signature(&plain), task_signature(&hardened));
    assert_eq!(task_signature(&hardened), task_signature(&hardened_security_task()));
}

#[tokio::test]
async fn test_reinitialize_clears_cache() {
    let router = ready_router().await;
    let work = task("optimization");
    router.route(&work).await;

    router.initialize().await;

    let decision = router.route(&work).await;
    assert!(!decision.from_cache());
    assert_eq!(decision.selected_tier(), Tier::Balanced);
}
