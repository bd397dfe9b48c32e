//! Loading, saving and validating router configuration files.

#![allow(
    clippy::tests_outside_test_module,
    clippy::missing_panics_doc,
    clippy::unwrap_used,
    clippy::expect_used,
    missing_docs,
    reason = "Integration tests have different conventions"
)]

use crate::common::*;
use ascent_routing::{AdaptiveRouter, Band, RouterConfig, RoutingError, Tier, TierRouter};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_save_and_load_round_trip() {
    let dir = TempDir::new().expect("create temp dir");
    let path = dir.path().join("nested").join("config.toml");

    let mut config = RouterConfig::default();
    config.cache.ttl_seconds = 120;
    config.scoring.task_weights.insert("migration".to_owned(), 60.0);
    config.save_to_file(&path).unwrap();

    let contents = fs::read_to_string(&path).unwrap();
    assert!(contents.starts_with("# Ascent Router Configuration"));

    let loaded = RouterConfig::load_from_file(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_partial_file_fills_defaults() {
    let dir = TempDir::new().expect("create temp dir");
    let path = dir.path().join("config.toml");
    fs::write(&path, "[cache]\nttl_seconds = 5\n\n[voting]\nthreshold = 0.6\n").unwrap();

    let loaded = RouterConfig::load_from_file(&path).unwrap();

    assert_eq!(loaded.cache.ttl_seconds, 5);
    assert!(loaded.cache.enabled);
    assert_close(loaded.voting.threshold, 0.6);
    assert_eq!(loaded.bands, RouterConfig::default().bands);
}

#[test]
fn test_overlapping_bands_are_rejected_on_load() {
    let dir = TempDir::new().expect("create temp dir");
    let path = dir.path().join("config.toml");
    fs::write(
        &path,
        "[bands.fast]\nmin = 0.0\nmax = 30.0\n\n\
         [bands.balanced]\nmin = 20.0\nmax = 70.0\n\n\
         [bands.capable]\nmin = 70.0\nmax = 100.0\n",
    )
    .unwrap();

    let error = RouterConfig::load_from_file(&path).unwrap_err();

    assert!(matches!(error, RoutingError::InvalidBands(_)));
    assert!(error.is_config_error());
}

#[test]
fn test_malformed_file_is_a_parse_error() {
    let dir = TempDir::new().expect("create temp dir");
    let path = dir.path().join("config.toml");
    fs::write(&path, "[cache\nttl_seconds = ").unwrap();

    let error = RouterConfig::load_from_file(&path).unwrap_err();

    assert!(!error.is_config_error());
    assert!(error.to_string().contains("Failed to parse config"));
}

#[test]
fn test_missing_file_is_an_io_error() {
    let dir = TempDir::new().expect("create temp dir");

    let error = RouterConfig::load_from_file(&dir.path().join("absent.toml")).unwrap_err();

    assert!(matches!(error, RoutingError::Io(_)));
}

#[test]
fn test_router_rejects_gapped_bands() {
    let mut config = RouterConfig::default();
    config.bands.balanced = Band::new(25.0, 70.0);

    assert!(matches!(
        AdaptiveRouter::new(config),
        Err(RoutingError::InvalidBands(_))
    ));
}

#[test]
fn test_router_rejects_out_of_range_voting_threshold() {
    let mut config = RouterConfig::default();
    config.voting.threshold = 1.5;

    let error = AdaptiveRouter::new(config).err().expect("threshold above 1");
    assert!(matches!(error, RoutingError::InvalidConfig(_)));
}

#[tokio::test]
async fn test_custom_bands_change_selection() {
    let mut config = RouterConfig::default();
    config.bands.fast = Band::new(0.0, 50.0);
    config.bands.balanced = Band::new(50.0, 90.0);
    config.bands.capable = Band::new(90.0, 100.0);
    let router = router_with(config).await;

    assert_eq!(router.route(&task("implementation")).await.selected_tier(), Tier::Fast);
    assert_eq!(router.route(&task("architecture")).await.selected_tier(), Tier::Balanced);
    assert_eq!(
        router.route(&hardened_security_task()).await.selected_tier(),
        Tier::Capable
    );
}

#[tokio::test]
async fn test_custom_task_weights_are_used() {
    let mut config = RouterConfig::default();
    config.scoring.task_weights.insert("migration".to_owned(), 85.0);
    let router = router_with(config).await;

    let decision = router.route(&task("Migration")).await;

    assert_close(decision.complexity(), 85.0);
    assert_eq!(decision.selected_tier(), Tier::Capable);
}
