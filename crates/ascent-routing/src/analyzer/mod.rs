//! Task analysis: complexity scoring.

/// Complexity scoring
pub mod complexity;

pub use complexity::ComplexityScorer;
