//! Common test utilities and helpers for ascent-routing tests
#![cfg_attr(
    test,
    allow(
        dead_code,
        clippy::expect_used,
        clippy::unwrap_used,
        clippy::panic,
        clippy::missing_panics_doc,
        clippy::missing_errors_doc,
        clippy::print_stdout,
        clippy::print_stderr,
        clippy::tests_outside_test_module,
        reason = "Test allows"
    )
)]

use ascent_routing::{
    AdaptiveRouter, Constraints, QualityGate, RouterConfig, SecurityLevel, TaskDefinition,
};
use serde_json::Value;
use std::env;
use std::sync::Once;
use tracing_subscriber::{EnvFilter, fmt};

/// Task of the given type with no constraints or input.
pub fn task(task_type: &str) -> TaskDefinition {
    TaskDefinition::new(task_type.to_owned())
}

/// Task carrying the given constraints.
pub fn constrained_task(task_type: &str, constraints: Constraints) -> TaskDefinition {
    task(task_type).with_constraints(constraints)
}

/// Security task with strict security and 95% coverage (scores 95).
pub fn hardened_security_task() -> TaskDefinition {
    constrained_task(
        "security",
        Constraints::default()
            .with_security_level(SecurityLevel::Strict)
            .with_required_coverage(95.0),
    )
}

/// Refactoring task with a chaos quality gate (scores 65).
pub fn chaos_refactoring_task() -> TaskDefinition {
    constrained_task(
        "refactoring",
        Constraints::default().with_quality_gate(QualityGate::Chaos),
    )
}

/// Task whose serialized input exceeds `bytes`.
pub fn task_with_payload(task_type: &str, bytes: usize) -> TaskDefinition {
    task(task_type).with_input_field("payload".to_owned(), Value::String("x".repeat(bytes)))
}

/// Router with default configuration, already initialized.
pub async fn ready_router() -> AdaptiveRouter {
    let router = AdaptiveRouter::default();
    router.initialize().await;
    router
}

/// Router with the given configuration, already initialized.
pub async fn router_with(config: RouterConfig) -> AdaptiveRouter {
    let router = AdaptiveRouter::new(config).unwrap();
    router.initialize().await;
    router
}

/// Asserts two floats agree to within `1e-9`.
pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

// ----------------------------------------------------------------------------
// Tracing initialization for tests
// ----------------------------------------------------------------------------

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for tests (idempotent).
/// Honors `RUST_LOG` if set, otherwise defaults to "debug".
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        let filter = env::var("RUST_LOG").unwrap_or_else(|_| "debug".to_owned());
        if fmt()
            .with_env_filter(EnvFilter::new(filter))
            .with_test_writer()
            .try_init()
            .is_err()
        {
            // tracing already initialized in this process
        }
    });
}
