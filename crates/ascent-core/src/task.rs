//! Task definitions submitted for routing.
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::result::Result as StdResult;

/// A unit of work submitted to the router.
///
/// Immutable once built; the router only reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskDefinition {
    #[serde(rename = "type")]
    task_type: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    input: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    constraints: Option<Constraints>,
}

impl TaskDefinition {
    /// Creates a task of the given type with no input or constraints.
    #[must_use]
    pub fn new(task_type: String) -> Self {
        Self {
            task_type,
            description: String::new(),
            input: Map::new(),
            constraints: None,
        }
    }

    /// Sets the free-form description. Not used for routing.
    #[must_use]
    pub fn with_description(mut self, description: String) -> Self {
        self.description = description;
        self
    }

    /// Replaces the input payload.
    #[must_use]
    pub fn with_input(mut self, input: Map<String, Value>) -> Self {
        self.input = input;
        self
    }

    /// Adds a single input field.
    #[must_use]
    pub fn with_input_field(mut self, key: String, value: Value) -> Self {
        self.input.insert(key, value);
        self
    }

    /// Attaches constraints.
    #[must_use]
    pub fn with_constraints(mut self, constraints: Constraints) -> Self {
        self.constraints = Some(constraints);
        self
    }

    /// Declared task type, as submitted.
    pub fn task_type(&self) -> &str {
        &self.task_type
    }

    /// Free-form description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Input payload.
    pub fn input(&self) -> &Map<String, Value> {
        &self.input
    }

    /// Constraints, if any were given.
    pub fn constraints(&self) -> Option<&Constraints> {
        self.constraints.as_ref()
    }

    /// Size of the input payload once serialized to JSON.
    pub fn input_size_bytes(&self) -> usize {
        serde_json::to_vec(&self.input).map_or(0, |bytes| bytes.len())
    }
}

/// Required security posture for a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SecurityLevel {
    /// No special handling
    Standard,
    /// Sensitive data or permissions involved
    Elevated,
    /// Security critical work
    Strict,
}

/// Quality gate the task output must pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QualityGate {
    /// Regular checks
    Standard,
    /// Tightened checks
    Strict,
    /// Chaos or robustness validation
    #[serde(alias = "robustness")]
    Chaos,
}

/// Optional task constraints. Every present field raises complexity.
///
/// Deserialization is lenient: a field with the wrong shape or an unknown
/// value is treated as absent instead of failing the whole task.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Constraints {
    /// Maximum allowed duration in seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_duration: Option<u64>,
    /// Required test coverage percentage (0-100)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_coverage: Option<f64>,
    /// Required security posture
    #[serde(skip_serializing_if = "Option::is_none")]
    pub security_level: Option<SecurityLevel>,
    /// Quality gate the output must pass
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality_gate: Option<QualityGate>,
}

impl Constraints {
    /// Parses constraints from arbitrary JSON, dropping malformed fields.
    pub fn from_value(value: &Value) -> Self {
        let Some(fields) = value.as_object() else {
            return Self::default();
        };

        Self {
            max_duration: fields.get("maxDuration").and_then(Value::as_u64),
            required_coverage: fields
                .get("requiredCoverage")
                .and_then(Value::as_f64)
                .filter(|coverage| coverage.is_finite()),
            security_level: parse_lenient(fields.get("securityLevel")),
            quality_gate: parse_lenient(fields.get("qualityGate")),
        }
    }

    /// Sets the duration budget in seconds.
    #[must_use]
    pub fn with_max_duration(mut self, seconds: u64) -> Self {
        self.max_duration = Some(seconds);
        self
    }

    /// Sets the required coverage percentage.
    #[must_use]
    pub fn with_required_coverage(mut self, coverage: f64) -> Self {
        self.required_coverage = Some(coverage);
        self
    }

    /// Sets the security level.
    #[must_use]
    pub fn with_security_level(mut self, level: SecurityLevel) -> Self {
        self.security_level = Some(level);
        self
    }

    /// Sets the quality gate.
    #[must_use]
    pub fn with_quality_gate(mut self, gate: QualityGate) -> Self {
        self.quality_gate = Some(gate);
        self
    }

    /// True when no field is set.
    pub fn is_empty(&self) -> bool {
        self.max_duration.is_none()
            && self.required_coverage.is_none()
            && self.security_level.is_none()
            && self.quality_gate.is_none()
    }

    /// Order-independent textual form, fields sorted by name.
    ///
    /// Two constraint sets that compare equal always produce the same string,
    /// regardless of the field order they were submitted in.
    pub fn canonical(&self) -> String {
        let mut fields = Vec::with_capacity(4);
        if let Some(seconds) = self.max_duration {
            fields.push(format!("maxDuration={seconds}"));
        }
        if let Some(gate) = self.quality_gate {
            fields.push(format!("qualityGate={gate:?}"));
        }
        if let Some(coverage) = self.required_coverage {
            fields.push(format!("requiredCoverage={coverage}"));
        }
        if let Some(level) = self.security_level {
            fields.push(format!("securityLevel={level:?}"));
        }
        fields.join(";")
    }
}

impl<'de> Deserialize<'de> for Constraints {
    fn deserialize<D>(deserializer: D) -> StdResult<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_value(&value))
    }
}

fn parse_lenient<T: DeserializeOwned>(value: Option<&Value>) -> Option<T> {
    value.and_then(|raw| T::deserialize(raw).ok())
}
