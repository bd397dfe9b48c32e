use crate::config::ScoringConfig;
use crate::router::bands::{MAX_COMPLEXITY, MIN_COMPLEXITY};
use ascent_core::{Constraints, QualityGate, SecurityLevel, TaskDefinition};

/// Coverage at or above which the high coverage increment applies.
const HIGH_COVERAGE: f64 = 90.0;
/// Coverage at or above which the moderate coverage increment applies.
const MODERATE_COVERAGE: f64 = 70.0;
/// Duration budget (seconds) treated as a long running task.
const LONG_DURATION_SECS: u64 = 30 * 60;
/// Increment for inputs above `large_input_bytes`.
const LARGE_INPUT_WEIGHT: f64 = 10.0;
/// Increment for inputs above `very_large_input_bytes`.
const VERY_LARGE_INPUT_WEIGHT: f64 = 20.0;

/// Scores task complexity on a 0-100 scale.
///
/// Pure function of the task: a base weight for its type, increments for
/// each constraint signal, and an increment for large input payloads.
#[derive(Debug, Clone, Default)]
pub struct ComplexityScorer {
    config: ScoringConfig,
}

impl ComplexityScorer {
    /// Creates a scorer with the given weights.
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    /// Score a task
    pub fn score(&self, task: &TaskDefinition) -> f64 {
        let mut score = self.base_complexity(task.task_type());

        if let Some(constraints) = task.constraints() {
            score += self.score_constraints(constraints);
        }
        score += self.score_input_size(task.input_size_bytes());

        score.clamp(MIN_COMPLEXITY, MAX_COMPLEXITY)
    }

    /// Base complexity for a task type. Unknown types get the default.
    pub fn base_complexity(&self, task_type: &str) -> f64 {
        let normalized = task_type.trim().to_lowercase();
        self.config
            .task_weights
            .get(&normalized)
            .copied()
            .unwrap_or(self.config.default_complexity)
    }

    fn score_constraints(&self, constraints: &Constraints) -> f64 {
        let weights = &self.config.constraint_weights;
        let mut score = 0.0;

        score += match constraints.security_level {
            Some(SecurityLevel::Strict) => weights.strict_security,
            Some(SecurityLevel::Elevated) => weights.elevated_security,
            Some(SecurityLevel::Standard) | None => 0.0,
        };

        score += match constraints.required_coverage {
            Some(coverage) if coverage >= HIGH_COVERAGE => weights.high_coverage,
            Some(coverage) if coverage >= MODERATE_COVERAGE => weights.moderate_coverage,
            _ => 0.0,
        };

        score += match constraints.quality_gate {
            Some(QualityGate::Chaos) => weights.chaos_gate,
            Some(QualityGate::Strict) => weights.strict_gate,
            Some(QualityGate::Standard) | None => 0.0,
        };

        if constraints
            .max_duration
            .is_some_and(|seconds| seconds >= LONG_DURATION_SECS)
        {
            score += weights.long_duration;
        }

        score
    }

    fn score_input_size(&self, size_bytes: usize) -> f64 {
        if size_bytes > self.config.very_large_input_bytes {
            VERY_LARGE_INPUT_WEIGHT
        } else if size_bytes > self.config.large_input_bytes {
            LARGE_INPUT_WEIGHT
        } else {
            0.0
        }
    }
}
