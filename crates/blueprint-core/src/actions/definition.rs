use crate::actions::configuration::{ActionConfiguration, ActionKind};
use crate::environment::WorkflowEnvironment;
use crate::error::BlueprintError;
use crate::options::{ConfigWarning, WarnLevel};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ---------------------------------------------------------------------------
// Compute
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ComputeConfiguration {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub r#type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fleet: Option<String>,
}

/// Compute binding: an inline declaration or the bare name of a fleet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Compute {
    Fleet(String),
    Inline(ComputeConfiguration),
}

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct InputsDefinition {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub variables: Vec<InputVariable>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub artifacts: Vec<String>,
    /// Input kinds without a typed field (e.g. `Packages`).
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct InputVariable {
    pub name: String,
    pub value: String,
}

// ---------------------------------------------------------------------------
// Outputs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OutputDefinition {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub artifacts: Vec<Artifact>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reports: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_discover_reports: Option<AutoDiscoverReportDefinition>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub variables: Vec<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

impl OutputDefinition {
    pub fn produces_artifact(&self, name: &str) -> bool {
        self.artifacts.iter().any(|a| a.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Artifact {
    pub name: String,
    pub files: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AutoDiscoverReportDefinition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report_name_prefix: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub include_paths: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclude_paths: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success_criteria: Option<SuccessCriteriaDefinition>,
}

// ---------------------------------------------------------------------------
// Success criteria
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
    Informational,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct VulnerabilityThreshold {
    pub severity: Severity,
    pub number: u32,
}

/// Thresholds a report must meet. Percentages are 0–100.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SuccessCriteriaDefinition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pass_rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_coverage: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch_coverage: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vulnerabilities: Option<VulnerabilityThreshold>,
}

impl SuccessCriteriaDefinition {
    /// Report percentages outside 0–100. Never rejects the criteria.
    pub fn validate(&self) -> Vec<ConfigWarning> {
        [
            ("PassRate", self.pass_rate),
            ("LineCoverage", self.line_coverage),
            ("BranchCoverage", self.branch_coverage),
        ]
        .into_iter()
        .filter_map(|(field, value)| match value {
            Some(v) if !(0.0..=100.0).contains(&v) => Some(ConfigWarning {
                level: WarnLevel::Warning,
                message: format!("success criteria {field} is {v}, expected 0-100"),
            }),
            _ => None,
        })
        .collect()
    }
}

// ---------------------------------------------------------------------------
// ActionDefinition
// ---------------------------------------------------------------------------

/// One action of a workflow. `Configuration` is read back according to the
/// kind of action `Identifier` names.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", try_from = "RawActionDefinition")]
pub struct ActionDefinition {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compute: Option<Compute>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub configuration: Option<ActionConfiguration>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub depends_on: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inputs: Option<InputsDefinition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outputs: Option<OutputDefinition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment: Option<WorkflowEnvironment>,
}

impl ActionDefinition {
    pub fn kind(&self) -> Option<ActionKind> {
        self.identifier
            .as_deref()
            .and_then(ActionKind::from_identifier)
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawActionDefinition {
    #[serde(default)]
    identifier: Option<String>,
    #[serde(default)]
    compute: Option<Compute>,
    #[serde(default)]
    configuration: Option<serde_yaml::Value>,
    #[serde(default)]
    depends_on: Vec<String>,
    #[serde(default)]
    inputs: Option<InputsDefinition>,
    #[serde(default)]
    outputs: Option<OutputDefinition>,
    #[serde(default)]
    environment: Option<WorkflowEnvironment>,
}

impl TryFrom<RawActionDefinition> for ActionDefinition {
    type Error = BlueprintError;

    fn try_from(raw: RawActionDefinition) -> Result<Self, Self::Error> {
        let kind = raw.identifier.as_deref().and_then(ActionKind::from_identifier);
        let configuration = raw
            .configuration
            .map(|value| ActionConfiguration::from_value(kind, value))
            .transpose()?;
        Ok(Self {
            identifier: raw.identifier,
            compute: raw.compute,
            configuration,
            depends_on: raw.depends_on,
            inputs: raw.inputs,
            outputs: raw.outputs,
            environment: raw.environment,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
