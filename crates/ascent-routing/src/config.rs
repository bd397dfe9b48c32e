//! Configuration types for scoring, tier bands, confidence, caching, history,
//! voting and cost accounting.

use crate::router::bands::{Band, MAX_COMPLEXITY, default_bands, validate_bands};
use ascent_core::{Result, RoutingError, TierTable};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Complete router configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouterConfig {
    /// Complexity band per tier
    pub bands: TierTable<Band>,
    /// Complexity scoring configuration
    pub scoring: ScoringConfig,
    /// Confidence estimation configuration
    pub confidence: ConfidenceConfig,
    /// Decision cache configuration
    pub cache: CacheConfig,
    /// Outcome history configuration
    pub history: HistoryConfig,
    /// Consensus voting configuration
    pub voting: VotingConfig,
    /// Relative unit cost per tier
    pub costs: TierTable<f64>,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            bands: default_bands(),
            scoring: ScoringConfig::default(),
            confidence: ConfidenceConfig::default(),
            cache: CacheConfig::default(),
            history: HistoryConfig::default(),
            voting: VotingConfig::default(),
            costs: default_costs(),
        }
    }
}

/// Default unit costs: fast 1, balanced 5, capable 20.
pub const fn default_costs() -> TierTable<f64> {
    TierTable::new(1.0, 5.0, 20.0)
}

/// Complexity scoring configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Base complexity per task type (matched case-insensitively)
    pub task_weights: BTreeMap<String, f64>,
    /// Base complexity for task types missing from `task_weights`
    pub default_complexity: f64,
    /// Increments applied for constraint signals
    pub constraint_weights: ConstraintWeights,
    /// Serialized input size (bytes) above which a task counts as large
    pub large_input_bytes: usize,
    /// Serialized input size (bytes) above which a task counts as very large
    pub very_large_input_bytes: usize,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        let task_weights = [
            ("formatting", 10.0),
            ("documentation", 15.0),
            ("testing", 30.0),
            ("review", 30.0),
            ("bugfix", 35.0),
            ("research", 40.0),
            ("implementation", 45.0),
            ("refactoring", 55.0),
            ("optimization", 65.0),
            ("security", 70.0),
            ("architecture", 80.0),
        ]
        .into_iter()
        .map(|(task_type, weight)| (task_type.to_owned(), weight))
        .collect();

        Self {
            task_weights,
            default_complexity: 50.0,
            constraint_weights: ConstraintWeights::default(),
            large_input_bytes: 5_000,
            very_large_input_bytes: 10_000,
        }
    }
}

/// Complexity added for each constraint signal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConstraintWeights {
    /// `securityLevel = strict`
    pub strict_security: f64,
    /// `securityLevel = elevated`
    pub elevated_security: f64,
    /// `requiredCoverage >= 90`
    pub high_coverage: f64,
    /// `requiredCoverage >= 70`
    pub moderate_coverage: f64,
    /// `qualityGate = chaos`
    pub chaos_gate: f64,
    /// `qualityGate = strict`
    pub strict_gate: f64,
    /// `maxDuration >= 30 minutes`
    pub long_duration: f64,
}

impl Default for ConstraintWeights {
    fn default() -> Self {
        Self {
            strict_security: 15.0,
            elevated_security: 5.0,
            high_coverage: 10.0,
            moderate_coverage: 5.0,
            chaos_gate: 10.0,
            strict_gate: 5.0,
            long_duration: 5.0,
        }
    }
}

impl ConstraintWeights {
    fn values(&self) -> [f64; 7] {
        [
            self.strict_security,
            self.elevated_security,
            self.high_coverage,
            self.moderate_coverage,
            self.chaos_gate,
            self.strict_gate,
            self.long_duration,
        ]
    }
}

/// Confidence estimation configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfidenceConfig {
    /// Penalty applied when complexity sits exactly on a band edge
    pub max_distance_penalty: f64,
    /// Share of the estimate taken from the tier's historical success rate
    pub history_weight: f64,
    /// Outcomes needed for a tier before its history is blended in
    pub min_history_samples: usize,
}

impl Default for ConfidenceConfig {
    fn default() -> Self {
        Self {
            max_distance_penalty: 0.3,
            history_weight: 0.3,
            min_history_samples: 10,
        }
    }
}

/// Decision cache configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Whether caching is enabled
    pub enabled: bool,
    /// Time-to-live for cache entries in seconds
    pub ttl_seconds: u64,
    /// Entry count above which `put` sweeps expired entries
    pub max_entries: usize,
}

impl CacheConfig {
    /// TTL as a duration.
    pub const fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_seconds)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            ttl_seconds: 60,
            max_entries: 1_000,
        }
    }
}

/// Outcome history configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Maximum retained outcome records; oldest are dropped first
    pub max_records: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_records: 10_000,
        }
    }
}

/// Consensus voting configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VotingConfig {
    /// Whether `route_with_voting` runs the vote at all
    pub enabled: bool,
    /// Best single-tier confidence at or above which the vote defers to `route`
    pub threshold: f64,
    /// Weight applied to each tier's confidence when tallying
    pub weights: TierTable<f64>,
}

impl Default for VotingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            threshold: 0.8,
            weights: TierTable::new(0.8, 1.0, 1.2),
        }
    }
}

impl RouterConfig {
    /// Get the default config directory path (`~/.ascent`)
    ///
    /// # Errors
    /// Returns an error if the home directory cannot be determined
    pub fn config_dir() -> Result<PathBuf> {
        use dirs::home_dir;
        let home = home_dir()
            .ok_or_else(|| RoutingError::Other("Could not determine home directory".to_owned()))?;
        Ok(home.join(".ascent"))
    }

    /// Get the default config file path (`~/.ascent/config.toml`)
    ///
    /// # Errors
    /// Returns an error if the home directory cannot be determined
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Load config from the default location, creating it with defaults if missing.
    ///
    /// # Errors
    /// Returns an error if the config cannot be read, parsed, validated or created
    pub fn load_or_create() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            Self::load_from_file(&config_path)
        } else {
            let config = Self::default();
            config.save_to_file(&config_path)?;
            Ok(config)
        }
    }

    /// Load and validate config from a specific file
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, parsed or validated
    pub fn load_from_file(path: &Path) -> Result<Self> {
        use toml::from_str;
        let contents = fs::read_to_string(path)?;
        let config: Self = from_str(&contents)
            .map_err(|error| RoutingError::Other(format!("Failed to parse config: {error}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Save config to a specific file
    ///
    /// # Errors
    /// Returns an error if the file cannot be written
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        use toml::to_string_pretty;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = to_string_pretty(self)
            .map_err(|error| RoutingError::Other(format!("Failed to serialize config: {error}")))?;

        let header = "# Ascent Router Configuration\n\
                      # This file is automatically generated on first run\n\
                      # Edit this file to tune tier bands, weights and cache settings\n\n";

        fs::write(path, format!("{header}{contents}"))?;

        Ok(())
    }

    /// Checks every value the router relies on.
    ///
    /// # Errors
    /// Returns `InvalidBands` for broken bands and `InvalidConfig` for any
    /// other out-of-range value.
    pub fn validate(&self) -> Result<()> {
        validate_bands(&self.bands)?;

        let scoring = &self.scoring;
        for (task_type, weight) in &scoring.task_weights {
            ensure_in_range(&format!("task weight '{task_type}'"), *weight, MAX_COMPLEXITY)?;
        }
        ensure_in_range("default_complexity", scoring.default_complexity, MAX_COMPLEXITY)?;
        for weight in scoring.constraint_weights.values() {
            ensure_in_range("constraint weight", weight, MAX_COMPLEXITY)?;
        }
        if scoring.very_large_input_bytes < scoring.large_input_bytes {
            return Err(RoutingError::InvalidConfig(
                "very_large_input_bytes must not be below large_input_bytes".to_owned(),
            ));
        }

        ensure_in_range(
            "max_distance_penalty",
            self.confidence.max_distance_penalty,
            1.0,
        )?;
        ensure_in_range("history_weight", self.confidence.history_weight, 1.0)?;

        if self.cache.max_entries == 0 {
            return Err(RoutingError::InvalidConfig(
                "cache.max_entries must be positive".to_owned(),
            ));
        }
        if self.history.max_records == 0 {
            return Err(RoutingError::InvalidConfig(
                "history.max_records must be positive".to_owned(),
            ));
        }

        ensure_in_range("voting.threshold", self.voting.threshold, 1.0)?;
        for (tier, weight) in self.voting.weights.iter() {
            ensure_in_range(&format!("voting weight for {tier}"), *weight, f64::MAX)?;
        }
        for (tier, cost) in self.costs.iter() {
            ensure_in_range(&format!("cost for {tier}"), *cost, f64::MAX)?;
        }

        Ok(())
    }
}

fn ensure_in_range(name: &str, value: f64, max: f64) -> Result<()> {
    if value.is_finite() && (0.0..=max).contains(&value) {
        Ok(())
    } else {
        Err(RoutingError::InvalidConfig(format!(
            "{name} must be within [0, {max}], got {value}"
        )))
    }
}
