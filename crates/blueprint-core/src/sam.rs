//! SAM serverless application blueprint.
//!
//! Produces a repository containing a SAM template for one Lambda function,
//! the SAM CLI setup script used by the build action, and a
//! `build-and-release` workflow that builds, packages and deploys the stack.

use crate::actions::configuration::CfnDeployParameters;
use crate::actions::definition::{
    Artifact, AutoDiscoverReportDefinition, InputsDefinition, OutputDefinition,
    SuccessCriteriaDefinition,
};
use crate::environment::WorkflowEnvironment;
use crate::error::Result;
use crate::options::BlueprintOptions;
use crate::paths;
use crate::runtime::{runtime_mapping, RuntimeMapping};
use crate::scaffold::Scaffold;
use crate::workflow::{BuildActionParams, CfnDeployActionParams, WorkflowDefinition};

pub const WORKFLOW_NAME: &str = "build-and-release";
pub const OUTPUT_ARTIFACT: &str = "build_result";
pub const DEFAULT_BRANCH: &str = "main";
pub const REGION: &str = "us-west-2";
pub const PACKAGED_TEMPLATE: &str = ".aws-sam/build/packaged.yaml";

const ENVIRONMENT_PLACEHOLDER: &str = "<<PUT_YOUR_ENVIRONMENT_NAME_HERE>>";
// Blank value the workflow editor shows as "not yet connected".
const UNSET: &str = " ";

pub const SETUP_SAM_SCRIPT: &str = r#"#!/usr/bin/env bash
echo "Setting up sam"

yum install unzip -y

curl -LO https://github.com/aws/aws-sam-cli/releases/latest/download/aws-sam-cli-linux-x86_64.zip
unzip -qq aws-sam-cli-linux-x86_64.zip -d sam-installation-directory

./sam-installation-directory/install; export AWS_DEFAULT_REGION=us-west-2
"#;

/// Build the full scaffold for `options`.
pub fn synth(options: &BlueprintOptions) -> Result<Scaffold> {
    let repo = options.repository_name();
    let mapping = runtime_mapping(options.runtime);
    tracing::info!(
        repository = repo,
        runtime = %options.runtime,
        tier = %options.tier(),
        "synthesizing sam serverless blueprint"
    );

    let mut scaffold = Scaffold::new();
    scaffold.add_file(paths::setup_sam_script(repo), SETUP_SAM_SCRIPT)?;
    scaffold.add_file(paths::sam_template(repo), sam_template(options, mapping))?;

    let workflow = create_workflow(options);
    scaffold.add_file(
        paths::repository_workflow_file(repo, &workflow.name),
        workflow.to_yaml()?,
    )?;
    Ok(scaffold)
}

/// The `build-and-release` workflow: SAM build and package, then a
/// CloudFormation deploy of the packaged template.
pub fn create_workflow(options: &BlueprintOptions) -> WorkflowDefinition {
    let tier = options.tier();
    let env_name = strip_spaces(&options.environment.name);
    let connection = options.environment.aws_account_connection.as_ref();
    let connection_name = connection.map_or(UNSET, |c| c.name.as_str());
    let build_role = connection
        .and_then(|c| c.build_role.as_ref())
        .map_or(UNSET, |r| r.name.as_str());
    let deploy_role = connection
        .and_then(|c| c.deploy_role.as_ref())
        .map_or(UNSET, |r| r.name.as_str());

    let mut workflow = WorkflowDefinition::new(WORKFLOW_NAME);
    workflow.add_branch_trigger([DEFAULT_BRANCH]);

    let build_env_name = non_blank(&options.environment.name).unwrap_or(ENVIRONMENT_PLACEHOLDER);
    workflow.add_build_action(BuildActionParams {
        action_name: format!("build_for_{env_name}"),
        tier,
        steps: vec![
            ". ./.aws/scripts/setup-sam.sh".to_string(),
            "sam build --template-file template.yaml".to_string(),
            "cd .aws-sam/build/".to_string(),
            format!(
                "sam package --output-template-file packaged.yaml --resolve-s3 \
                 --template-file template.yaml --region {REGION}"
            ),
        ],
        container: None,
        inputs: Some(InputsDefinition {
            sources: vec!["WorkflowSource".to_string()],
            ..InputsDefinition::default()
        }),
        outputs: Some(OutputDefinition {
            auto_discover_reports: Some(AutoDiscoverReportDefinition {
                enabled: Some(true),
                report_name_prefix: Some("AutoDiscovered".to_string()),
                include_paths: vec!["**/*".to_string()],
                exclude_paths: Vec::new(),
                success_criteria: Some(SuccessCriteriaDefinition {
                    pass_rate: Some(100.0),
                    line_coverage: Some(70.0),
                    branch_coverage: Some(50.0),
                    vulnerabilities: None,
                }),
            }),
            artifacts: vec![Artifact {
                name: OUTPUT_ARTIFACT.to_string(),
                files: vec!["**/*".to_string()],
            }],
            ..OutputDefinition::default()
        }),
        environment: Some(
            WorkflowEnvironment::new(build_env_name).with_connection(connection_name, build_role),
        ),
    });

    let deploy_env_name = non_blank(&options.environment.name).unwrap_or(UNSET);
    workflow.add_cfn_deploy_action(CfnDeployActionParams {
        action_name: format!("deploy_to_{env_name}"),
        tier,
        parameters: CfnDeployParameters {
            no_fail_on_empty_changeset: Some("1".to_string()),
            ..CfnDeployParameters::new(
                REGION,
                options.cloud_formation_stack_name.clone(),
                PACKAGED_TEMPLATE,
            )
        },
        inputs: Some(InputsDefinition {
            artifacts: vec![OUTPUT_ARTIFACT.to_string()],
            ..InputsDefinition::default()
        }),
        environment: Some(
            WorkflowEnvironment::new(deploy_env_name).with_connection(connection_name, deploy_role),
        ),
    });

    workflow
}

/// SAM template with one API-triggered function and its outputs.
pub fn sam_template(options: &BlueprintOptions, mapping: &RuntimeMapping) -> String {
    let lambda = &options.lambda.function_name;
    let header = "Transform: AWS::Serverless-2016-10-31\n\
                  Description: lambdas\n\
                  Globals:\n  Function:\n    Timeout: 20\n";

    let resources = format!(
        "Resources:
  {lambda}Function:
    Type: AWS::Serverless::Function
    Properties:
      CodeUri: {lambda}/{code_uri}
      Runtime: {runtime}
      Handler: {handler}
      Description: {lambda}
      Events:
          {lambda}:
             Type: Api
             Properties:
                Path: /{lambda}
                Method: get{props}",
        code_uri = mapping.code_uri,
        runtime = mapping.runtime,
        handler = mapping.handler,
        props = mapping.template_props,
    );

    let outputs = format!(
        "Outputs:
# ServerlessRestApi is an implicit API created out of Events key under Serverless::Function
  {lambda}Api:
    Description: \"API Gateway endpoint URL for Prod stage for {lambda} function\"
    Value: !Sub \"https://${{ServerlessRestApi}}.execute-api.${{AWS::Region}}.amazonaws.com/Prod/{lambda}/\"
  {lambda}Function:
    Description: \"{lambda} Lambda Function ARN\"
    Value: !GetAtt {lambda}Function.Arn
  {lambda}FunctionIamRole:
    Description: \"Implicit IAM Role created for {lambda} function\"
    Value: !GetAtt {lambda}FunctionRole.Arn"
    );

    format!("{header}{resources}\n{outputs}\n")
}

fn strip_spaces(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}

fn non_blank(s: &str) -> Option<&str> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
