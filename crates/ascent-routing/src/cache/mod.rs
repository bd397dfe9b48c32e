//! Short-lived memoization of routing decisions.
//!
//! Decisions are keyed by a task signature built from the task type and its
//! constraints, so repeated submissions of the same kind of work reuse the
//! earlier decision until it expires or its tier is invalidated.

/// Cache storage implementation
pub mod storage;

pub use storage::{CacheEntry, CacheStats, DecisionCache};

use ascent_core::TaskDefinition;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash as _, Hasher as _};

/// Order-independent canonical form of a task's routing-relevant fields.
pub fn canonical_signature(task: &TaskDefinition) -> String {
    let constraints = task
        .constraints()
        .map(|constraints| constraints.canonical())
        .unwrap_or_default();
    format!(
        "type={}|{constraints}",
        task.task_type().trim().to_lowercase()
    )
}

/// Cache key for a task: a hash of [`canonical_signature`].
pub fn task_signature(task: &TaskDefinition) -> String {
    let mut hasher = DefaultHasher::default();
    canonical_signature(task).hash(&mut hasher);
    format!("{:016x}", hasher.finish())
}
