use crate::actions::identifier::{lookup, registered_actions};
use crate::actions::payload::convert_payload_to_text;
use crate::error::{BlueprintError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

// ---------------------------------------------------------------------------
// ActionKind
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActionKind {
    Build,
    CfnDeploy,
    Test,
    CdkDeploy,
    CdkBootstrap,
    PublishBlueprint,
}

impl ActionKind {
    pub fn all() -> &'static [ActionKind] {
        &[
            ActionKind::Build,
            ActionKind::CfnDeploy,
            ActionKind::Test,
            ActionKind::CdkDeploy,
            ActionKind::CdkBootstrap,
            ActionKind::PublishBlueprint,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ActionKind::Build => "build",
            ActionKind::CfnDeploy => "cfn-deploy",
            ActionKind::Test => "test",
            ActionKind::CdkDeploy => "cdk-deploy",
            ActionKind::CdkBootstrap => "cdk-bootstrap",
            ActionKind::PublishBlueprint => "publish-blueprint",
        }
    }

    /// Registry key used to resolve this kind's action identifier.
    pub fn canonical_identifier(self) -> &'static str {
        match self {
            ActionKind::Build => "aws/build@v1",
            ActionKind::CfnDeploy => "aws/cfn-deploy@v1",
            ActionKind::Test => "aws/managed-test@v1",
            ActionKind::CdkDeploy => "aws/cdk-deploy@v1",
            ActionKind::CdkBootstrap => "aws/cdk-bootstrap@v1",
            ActionKind::PublishBlueprint => "aws/publish-blueprint-action@v1",
        }
    }

    /// Kind of the action an identifier refers to. Accepts aliases, canonical
    /// names, and the concrete per-tier identifiers.
    pub fn from_identifier(identifier: &str) -> Option<ActionKind> {
        let entry = lookup(identifier).or_else(|| {
            registered_actions()
                .iter()
                .find(|e| e.default == identifier || e.prod == identifier)
        })?;
        ActionKind::all()
            .iter()
            .copied()
            .find(|k| k.canonical_identifier() == entry.canonical)
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ActionKind {
    type Err = BlueprintError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "build" => Ok(ActionKind::Build),
            "cfn-deploy" | "deploy" => Ok(ActionKind::CfnDeploy),
            "test" => Ok(ActionKind::Test),
            "cdk-deploy" => Ok(ActionKind::CdkDeploy),
            "cdk-bootstrap" => Ok(ActionKind::CdkBootstrap),
            "publish-blueprint" => Ok(ActionKind::PublishBlueprint),
            _ => Err(BlueprintError::UnknownActionKind(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Build / test
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Step {
    pub run: String,
}

impl Step {
    pub fn run(command: impl Into<String>) -> Self {
        Self {
            run: command.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ContainerImage {
    pub registry: String,
    pub image: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BuildActionConfiguration {
    #[serde(default)]
    pub steps: Vec<Step>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container: Option<ContainerImage>,
    /// Keys without a typed field, kept so a read workflow writes back intact.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

impl BuildActionConfiguration {
    pub fn from_commands<I, S>(commands: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            steps: commands.into_iter().map(Step::run).collect(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TestActionConfiguration {
    #[serde(default)]
    pub steps: Vec<Step>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

// ---------------------------------------------------------------------------
// CloudFormation deploy
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CfnDeployActionConfiguration {
    pub parameters: CfnDeployParameters,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct CfnDeployParameters {
    pub region: String,
    pub name: String,
    pub template: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role_arn: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capabilities: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameter_overrides: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub no_fail_on_empty_changeset: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub no_execute_changeset: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub termination_protection: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

impl CfnDeployParameters {
    pub fn new(
        region: impl Into<String>,
        stack_name: impl Into<String>,
        template: impl Into<String>,
    ) -> Self {
        Self {
            region: region.into(),
            name: stack_name.into(),
            template: template.into(),
            ..Self::default()
        }
    }

    /// Set `parameter-overrides` from a string or structured payload.
    /// Other payload shapes leave the field unset.
    pub fn with_parameter_overrides(mut self, overrides: &serde_json::Value) -> Self {
        self.parameter_overrides = convert_payload_to_text(overrides);
        self
    }
}

// ---------------------------------------------------------------------------
// CDK deploy / bootstrap
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CdkDeployActionConfiguration {
    pub stack_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cdk_root_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cfn_output_variables: Option<String>,
}

impl CdkDeployActionConfiguration {
    pub fn new(stack_name: impl Into<String>) -> Self {
        Self {
            stack_name: stack_name.into(),
            ..Self::default()
        }
    }

    pub fn with_context(mut self, context: &serde_json::Value) -> Self {
        self.context = convert_payload_to_text(context);
        self
    }

    pub fn with_tags(mut self, tags: &serde_json::Value) -> Self {
        self.tags = convert_payload_to_text(tags);
        self
    }

    pub fn with_cfn_output_variables(mut self, variables: &serde_json::Value) -> Self {
        self.cfn_output_variables = convert_payload_to_text(variables);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CdkBootstrapActionConfiguration {
    pub region: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cdk_cli_version: Option<String>,
}

// ---------------------------------------------------------------------------
// Publish blueprint
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PublishBlueprintActionConfiguration {
    pub artifact_package_path: String,
    #[serde(rename = "PackageJSONPath")]
    pub package_json_path: String,
    pub input_artifact_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_in_seconds: Option<u32>,
}

// ---------------------------------------------------------------------------
// ActionConfiguration
// ---------------------------------------------------------------------------

/// Configuration payload of an action, one variant per action kind.
///
/// Serializes as the bare payload; the kind is carried by the action's
/// `Identifier`, not by the payload. `Raw` holds payloads for actions this
/// crate has no typed shape for.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ActionConfiguration {
    Build(BuildActionConfiguration),
    CfnDeploy(CfnDeployActionConfiguration),
    Test(TestActionConfiguration),
    CdkDeploy(CdkDeployActionConfiguration),
    CdkBootstrap(CdkBootstrapActionConfiguration),
    PublishBlueprint(PublishBlueprintActionConfiguration),
    Raw(serde_yaml::Value),
}

impl ActionConfiguration {
    pub fn kind(&self) -> Option<ActionKind> {
        match self {
            ActionConfiguration::Build(_) => Some(ActionKind::Build),
            ActionConfiguration::CfnDeploy(_) => Some(ActionKind::CfnDeploy),
            ActionConfiguration::Test(_) => Some(ActionKind::Test),
            ActionConfiguration::CdkDeploy(_) => Some(ActionKind::CdkDeploy),
            ActionConfiguration::CdkBootstrap(_) => Some(ActionKind::CdkBootstrap),
            ActionConfiguration::PublishBlueprint(_) => Some(ActionKind::PublishBlueprint),
            ActionConfiguration::Raw(_) => None,
        }
    }

    /// Parse a payload into the shape for `kind`; `None` keeps it raw.
    pub fn from_value(kind: Option<ActionKind>, value: serde_yaml::Value) -> Result<Self> {
        let Some(kind) = kind else {
            return Ok(ActionConfiguration::Raw(value));
        };
        let invalid = |e: serde_yaml::Error| BlueprintError::InvalidConfiguration {
            kind: kind.to_string(),
            reason: e.to_string(),
        };
        let config = match kind {
            ActionKind::Build => {
                ActionConfiguration::Build(serde_yaml::from_value(value).map_err(invalid)?)
            }
            ActionKind::CfnDeploy => {
                ActionConfiguration::CfnDeploy(serde_yaml::from_value(value).map_err(invalid)?)
            }
            ActionKind::Test => {
                ActionConfiguration::Test(serde_yaml::from_value(value).map_err(invalid)?)
            }
            ActionKind::CdkDeploy => {
                ActionConfiguration::CdkDeploy(serde_yaml::from_value(value).map_err(invalid)?)
            }
            ActionKind::CdkBootstrap => {
                ActionConfiguration::CdkBootstrap(serde_yaml::from_value(value).map_err(invalid)?)
            }
            ActionKind::PublishBlueprint => ActionConfiguration::PublishBlueprint(
                serde_yaml::from_value(value).map_err(invalid)?,
            ),
        };
        Ok(config)
    }
}

impl From<BuildActionConfiguration> for ActionConfiguration {
    fn from(c: BuildActionConfiguration) -> Self {
        ActionConfiguration::Build(c)
    }
}

impl From<CfnDeployActionConfiguration> for ActionConfiguration {
    fn from(c: CfnDeployActionConfiguration) -> Self {
        ActionConfiguration::CfnDeploy(c)
    }
}

impl From<TestActionConfiguration> for ActionConfiguration {
    fn from(c: TestActionConfiguration) -> Self {
        ActionConfiguration::Test(c)
    }
}

impl From<CdkDeployActionConfiguration> for ActionConfiguration {
    fn from(c: CdkDeployActionConfiguration) -> Self {
        ActionConfiguration::CdkDeploy(c)
    }
}

impl From<CdkBootstrapActionConfiguration> for ActionConfiguration {
    fn from(c: CdkBootstrapActionConfiguration) -> Self {
        ActionConfiguration::CdkBootstrap(c)
    }
}

impl From<PublishBlueprintActionConfiguration> for ActionConfiguration {
    fn from(c: PublishBlueprintActionConfiguration) -> Self {
        ActionConfiguration::PublishBlueprint(c)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
