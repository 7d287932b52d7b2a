use crate::actions::configuration::{
    ActionKind, BuildActionConfiguration, CfnDeployActionConfiguration, CfnDeployParameters,
    ContainerImage,
};
use crate::actions::definition::{ActionDefinition, InputsDefinition, OutputDefinition};
use crate::actions::identifier::{resolve, Tier};
use crate::environment::WorkflowEnvironment;
use crate::error::Result;
use crate::paths;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

pub const SCHEMA_VERSION: &str = "1.0";

// ---------------------------------------------------------------------------
// Triggers
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TriggerType {
    Push,
    PullRequest,
    Schedule,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TriggerDefinition {
    pub r#type: TriggerType,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub branches: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub files_changed: Vec<String>,
}

// ---------------------------------------------------------------------------
// WorkflowDefinition
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct WorkflowDefinition {
    pub schema_version: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub triggers: Vec<TriggerDefinition>,
    #[serde(default)]
    pub actions: BTreeMap<String, ActionDefinition>,
}

/// A workflow with the current schema version, no triggers and no actions.
pub fn empty_workflow() -> WorkflowDefinition {
    WorkflowDefinition {
        schema_version: SCHEMA_VERSION.to_string(),
        name: String::new(),
        triggers: Vec::new(),
        actions: BTreeMap::new(),
    }
}

/// Parameters for [`WorkflowDefinition::add_build_action`].
#[derive(Debug, Clone, Default)]
pub struct BuildActionParams {
    pub action_name: String,
    pub tier: Tier,
    pub steps: Vec<String>,
    pub container: Option<ContainerImage>,
    pub inputs: Option<InputsDefinition>,
    pub outputs: Option<OutputDefinition>,
    pub environment: Option<WorkflowEnvironment>,
}

/// Parameters for [`WorkflowDefinition::add_cfn_deploy_action`].
#[derive(Debug, Clone, Default)]
pub struct CfnDeployActionParams {
    pub action_name: String,
    pub tier: Tier,
    pub parameters: CfnDeployParameters,
    pub inputs: Option<InputsDefinition>,
    pub environment: Option<WorkflowEnvironment>,
}

impl WorkflowDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..empty_workflow()
        }
    }

    /// Run the workflow on pushes to any of `branches`.
    pub fn add_branch_trigger<I, S>(&mut self, branches: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.triggers.push(TriggerDefinition {
            r#type: TriggerType::Push,
            branches: branches.into_iter().map(Into::into).collect(),
            files_changed: Vec::new(),
        });
    }

    /// Insert (or replace) an action under `name`.
    pub fn add_action(&mut self, name: impl Into<String>, action: ActionDefinition) {
        let name = name.into();
        if self.actions.contains_key(&name) {
            tracing::warn!(workflow = %self.name, action = %name, "replacing existing action");
        }
        self.actions.insert(name, action);
    }

    pub fn add_build_action(&mut self, params: BuildActionParams) {
        let configuration = BuildActionConfiguration {
            container: params.container,
            ..BuildActionConfiguration::from_commands(params.steps)
        };
        let action = ActionDefinition {
            identifier: Some(resolve(
                ActionKind::Build.canonical_identifier(),
                params.tier.as_str(),
            )),
            configuration: Some(configuration.into()),
            inputs: params.inputs,
            outputs: params.outputs,
            environment: params.environment,
            ..ActionDefinition::default()
        };
        tracing::debug!(action = %params.action_name, "adding build action");
        self.add_action(params.action_name, action);
    }

    /// Add a CloudFormation deploy action. It depends on every action already
    /// in the workflow that produces one of its input artifacts.
    pub fn add_cfn_deploy_action(&mut self, params: CfnDeployActionParams) {
        let depends_on = params
            .inputs
            .as_ref()
            .map(|inputs| self.producers_of(&inputs.artifacts))
            .unwrap_or_default();
        let action = ActionDefinition {
            identifier: Some(resolve(
                ActionKind::CfnDeploy.canonical_identifier(),
                params.tier.as_str(),
            )),
            configuration: Some(
                CfnDeployActionConfiguration {
                    parameters: params.parameters,
                }
                .into(),
            ),
            depends_on,
            inputs: params.inputs,
            environment: params.environment,
            ..ActionDefinition::default()
        };
        tracing::debug!(action = %params.action_name, "adding cloudformation deploy action");
        self.add_action(params.action_name, action);
    }

    /// Names of actions whose outputs include any of `artifacts`.
    pub fn producers_of(&self, artifacts: &[String]) -> Vec<String> {
        self.actions
            .iter()
            .filter(|(_, action)| {
                action
                    .outputs
                    .as_ref()
                    .is_some_and(|o| artifacts.iter().any(|a| o.produces_artifact(a)))
            })
            .map(|(name, _)| name.clone())
            .collect()
    }

    /// Path of this workflow relative to the repository root.
    pub fn file_name(&self) -> PathBuf {
        paths::workflow_file(&self.name)
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn from_yaml(data: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(data)?)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::configuration::ActionConfiguration;
    use crate::actions::definition::Artifact;

    fn build_params(tier: Tier) -> BuildActionParams {
        BuildActionParams {
            action_name: "build_for_prod".to_string(),
            tier,
            steps: vec!["sam build".to_string()],
            inputs: Some(InputsDefinition {
                sources: vec!["WorkflowSource".to_string()],
                ..InputsDefinition::default()
            }),
            outputs: Some(OutputDefinition {
                artifacts: vec![Artifact {
                    name: "build_result".to_string(),
                    files: vec!["**/*".to_string()],
                }],
                ..OutputDefinition::default()
            }),
            ..BuildActionParams::default()
        }
    }

    fn deploy_params(tier: Tier, artifact: &str) -> CfnDeployActionParams {
        CfnDeployActionParams {
            action_name: "deploy_to_prod".to_string(),
            tier,
            parameters: CfnDeployParameters::new("us-west-2", "stack", "packaged.yaml"),
            inputs: Some(InputsDefinition {
                artifacts: vec![artifact.to_string()],
                ..InputsDefinition::default()
            }),
            environment: None,
        }
    }

    #[test]
    fn empty_workflow_has_schema_version() {
        let wf = empty_workflow();
        assert_eq!(wf.schema_version, "1.0");
        assert!(wf.triggers.is_empty());
        assert!(wf.actions.is_empty());
    }

    #[test]
    fn branch_trigger_is_push() {
        let mut wf = WorkflowDefinition::new("build-and-release");
        wf.add_branch_trigger(["main"]);
        let yaml = wf.to_yaml().unwrap();
        assert!(yaml.contains("- Type: PUSH\n  Branches:\n  - main"));
    }

    #[test]
    fn build_action_uses_tier_identifier() {
        let mut wf = WorkflowDefinition::new("wf");
        wf.add_build_action(build_params(Tier::Default));
        assert_eq!(
            wf.actions["build_for_prod"].identifier.as_deref(),
            Some("aws/build-beta@v1")
        );

        let mut wf = WorkflowDefinition::new("wf");
        wf.add_build_action(build_params(Tier::Prod));
        let action = &wf.actions["build_for_prod"];
        assert_eq!(action.identifier.as_deref(), Some("aws/build@v1"));
        assert!(matches!(
            action.configuration,
            Some(ActionConfiguration::Build(ref c)) if c.steps.len() == 1
        ));
    }

    #[test]
    fn deploy_depends_on_artifact_producer() {
        let mut wf = WorkflowDefinition::new("wf");
        wf.add_build_action(build_params(Tier::Prod));
        wf.add_cfn_deploy_action(deploy_params(Tier::Prod, "build_result"));
        let deploy = &wf.actions["deploy_to_prod"];
        assert_eq!(deploy.depends_on, vec!["build_for_prod".to_string()]);
        assert_eq!(deploy.identifier.as_deref(), Some("aws/cfn-deploy@v1"));
    }

    #[test]
    fn deploy_without_producer_has_no_dependencies() {
        let mut wf = WorkflowDefinition::new("wf");
        wf.add_cfn_deploy_action(deploy_params(Tier::Default, "missing"));
        assert!(wf.actions["deploy_to_prod"].depends_on.is_empty());
    }

    #[test]
    fn yaml_roundtrip() {
        let mut wf = WorkflowDefinition::new("build-and-release");
        wf.add_branch_trigger(["main"]);
        wf.add_build_action(build_params(Tier::Default));
        wf.add_cfn_deploy_action(deploy_params(Tier::Default, "build_result"));
        let yaml = wf.to_yaml().unwrap();
        assert!(yaml.starts_with("SchemaVersion: '1.0'\nName: build-and-release\n"));
        let parsed = WorkflowDefinition::from_yaml(&yaml).unwrap();
        assert_eq!(parsed, wf);
    }

    #[test]
    fn file_name_under_workflows_dir() {
        let wf = WorkflowDefinition::new("build-and-release");
        assert_eq!(
            wf.file_name(),
            PathBuf::from(".codecatalyst/workflows/build-and-release.yaml")
        );
    }

    #[test]
    fn untyped_keys_survive_yaml_roundtrip() {
        let yaml = r#"SchemaVersion: '1.0'
Name: build-and-release
Actions:
  build_for_prod:
    Identifier: aws/build@v1
    Inputs:
      Sources:
      - WorkflowSource
      Packages:
        NpmConfiguration:
          PackageRegistries:
          - PackagesRepository: main
    Configuration:
      Steps:
      - Run: sam build
      Caching:
        FileCaching:
          node_modules:
            Path: node_modules
  deploy_to_prod:
    Identifier: aws/cfn-deploy@v1
    Configuration:
      parameters:
        region: us-west-2
        name: orders-api
        template: packaged.yaml
        monitor-timeout-in-minutes: 60
"#;
        let wf = WorkflowDefinition::from_yaml(yaml).unwrap();
        let build = &wf.actions["build_for_prod"];
        assert!(build.inputs.as_ref().unwrap().extra.contains_key("Packages"));
        match &build.configuration {
            Some(ActionConfiguration::Build(config)) => {
                assert_eq!(config.steps.len(), 1);
                assert!(config.extra.contains_key("Caching"));
            }
            other => panic!("expected build configuration, got {other:?}"),
        }
        match &wf.actions["deploy_to_prod"].configuration {
            Some(ActionConfiguration::CfnDeploy(config)) => {
                assert_eq!(config.parameters.name, "orders-api");
                assert_eq!(
                    config.parameters.extra.get("monitor-timeout-in-minutes"),
                    Some(&serde_yaml::Value::from(60))
                );
            }
            other => panic!("expected cfn-deploy configuration, got {other:?}"),
        }

        let written = wf.to_yaml().unwrap();
        assert!(written.contains("PackagesRepository: main"));
        assert!(written.contains("Path: node_modules"));
        assert!(written.contains("monitor-timeout-in-minutes: 60"));
        assert_eq!(WorkflowDefinition::from_yaml(&written).unwrap(), wf);
    }
}
