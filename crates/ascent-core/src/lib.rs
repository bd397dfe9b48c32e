//! Core types for the ascent tier router.
//!
//! This crate provides the tier hierarchy, task definitions, routing
//! decisions and error types shared by the router and its callers.

/// Routing decisions.
pub mod decision;
/// Error types and result definitions.
pub mod error;
/// Task definitions and constraints.
pub mod task;
/// Tier hierarchy and per-tier tables.
pub mod tier;

pub use decision::{CACHE_HIT_MARKER, RoutingDecision};
pub use error::{Result, RoutingError};
pub use task::{Constraints, QualityGate, SecurityLevel, TaskDefinition};
pub use tier::{Tier, TierTable};
