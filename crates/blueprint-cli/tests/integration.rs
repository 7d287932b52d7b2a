#![allow(deprecated)]
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn blueprint(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("blueprint").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("BLUEPRINT_OUTDIR")
        .env_remove("RUST_LOG");
    cmd
}

const VALID_OPTIONS: &str = r#"
runtime: Node.js 14
cloudFormationStackName: orders-api
environment:
  name: production
  awsAccountConnection:
    name: main-account
    deployRole:
      name: sam-deploy
    buildRole:
      name: sam-build
code:
  sourceRepositoryName: orders
lambda:
  functionName: orders
"#;

// ---------------------------------------------------------------------------
// blueprint resolve
// ---------------------------------------------------------------------------

#[test]
fn resolve_alias_default_tier() {
    let dir = TempDir::new().unwrap();
    blueprint(&dir)
        .args(["resolve", "build"])
        .assert()
        .success()
        .stdout("aws/build-beta@v1\n");
}

#[test]
fn resolve_prod_tier() {
    let dir = TempDir::new().unwrap();
    blueprint(&dir)
        .args(["resolve", "aws/cfn-deploy@v1", "--tier", "prod"])
        .assert()
        .success()
        .stdout("aws/cfn-deploy@v1\n");
}

#[test]
fn resolve_unknown_passes_through() {
    let dir = TempDir::new().unwrap();
    blueprint(&dir)
        .args(["resolve", "unknown-action", "--tier", "prod"])
        .assert()
        .success()
        .stdout("unknown-action\n");
}

#[test]
fn resolve_logs_quietly_by_default() {
    let dir = TempDir::new().unwrap();
    blueprint(&dir)
        .args(["resolve", "unknown-action"])
        .assert()
        .success()
        .stderr(predicate::str::is_empty());
}

#[test]
fn rust_log_enables_debug_output() {
    let dir = TempDir::new().unwrap();
    blueprint(&dir)
        .env("RUST_LOG", "debug")
        .args(["resolve", "unknown-action"])
        .assert()
        .success()
        .stdout("unknown-action\n")
        .stderr(predicate::str::contains("passing through"));
}

#[test]
fn resolve_json() {
    let dir = TempDir::new().unwrap();
    let out = blueprint(&dir)
        .args(["--json", "resolve", "test", "--tier", "gamma"])
        .output()
        .unwrap();
    assert!(out.status.success());
    let value: serde_yaml::Value = serde_yaml::from_slice(&out.stdout).unwrap();
    assert_eq!(value["resolved"].as_str(), Some("aws/managed-test-gamma@v1"));
    assert_eq!(value["registered"].as_bool(), Some(true));
    assert_eq!(value["kind"].as_str(), Some("test"));
}

// ---------------------------------------------------------------------------
// blueprint actions
// ---------------------------------------------------------------------------

#[test]
fn actions_lists_registry() {
    let dir = TempDir::new().unwrap();
    blueprint(&dir)
        .arg("actions")
        .assert()
        .success()
        .stdout(predicate::str::contains("aws/cdk-bootstrap-gamma@v1"))
        .stdout(predicate::str::contains("publishBlueprint"));
}

// ---------------------------------------------------------------------------
// blueprint options / validate
// ---------------------------------------------------------------------------

#[test]
fn options_init_is_idempotent() {
    let dir = TempDir::new().unwrap();
    blueprint(&dir)
        .args(["options", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("created"));
    assert!(dir.path().join("blueprint.yaml").exists());

    blueprint(&dir)
        .args(["options", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("exists"));
}

#[test]
fn validate_accepts_valid_options() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("blueprint.yaml"), VALID_OPTIONS).unwrap();
    blueprint(&dir)
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("No warnings"));
}

#[test]
fn validate_rejects_bad_function_name() {
    let dir = TempDir::new().unwrap();
    let bad = VALID_OPTIONS.replace("functionName: orders", "functionName: not-valid");
    std::fs::write(dir.path().join("blueprint.yaml"), bad).unwrap();
    blueprint(&dir)
        .arg("validate")
        .assert()
        .failure()
        .stdout(predicate::str::contains("lambda.functionName"));
}

#[test]
fn validate_missing_file_fails() {
    let dir = TempDir::new().unwrap();
    blueprint(&dir)
        .args(["validate", "--options", "missing.yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing.yaml"));
}

// ---------------------------------------------------------------------------
// blueprint synth
// ---------------------------------------------------------------------------

#[test]
fn synth_writes_project() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("blueprint.yaml"), VALID_OPTIONS).unwrap();
    blueprint(&dir)
        .args(["synth", "--options", "blueprint.yaml", "--outdir", "out"])
        .assert()
        .success();

    let repo = dir.path().join("out/orders");
    assert!(repo.join(".aws/scripts/setup-sam.sh").exists());
    let template = std::fs::read_to_string(repo.join("template.yaml")).unwrap();
    assert!(template.contains("ordersFunction:"));

    let workflow =
        std::fs::read_to_string(repo.join(".codecatalyst/workflows/build-and-release.yaml"))
            .unwrap();
    let value: serde_yaml::Value = serde_yaml::from_str(&workflow).unwrap();
    assert_eq!(value["Name"].as_str(), Some("build-and-release"));
    assert_eq!(
        value["Actions"]["build_for_production"]["Identifier"].as_str(),
        Some("aws/build-beta@v1")
    );
    assert_eq!(
        value["Actions"]["deploy_to_production"]["DependsOn"][0].as_str(),
        Some("build_for_production")
    );
    assert_eq!(
        value["Actions"]["deploy_to_production"]["Configuration"]["parameters"]["name"].as_str(),
        Some("orders-api")
    );
}

#[test]
fn synth_tier_override() {
    let dir = TempDir::new().unwrap();
    blueprint(&dir)
        .args(["synth", "--outdir", "out", "--tier", "prod"])
        .assert()
        .success();

    let workflow = std::fs::read_to_string(
        dir.path()
            .join("out/sam-lambda/.codecatalyst/workflows/build-and-release.yaml"),
    )
    .unwrap();
    assert!(workflow.contains("Identifier: aws/build@v1"));
    assert!(workflow.contains("Identifier: aws/cfn-deploy@v1"));
}

#[test]
fn synth_refuses_invalid_options() {
    let dir = TempDir::new().unwrap();
    let bad = VALID_OPTIONS.replace("orders-api", "9-bad-stack");
    std::fs::write(dir.path().join("blueprint.yaml"), bad).unwrap();
    blueprint(&dir)
        .args(["synth", "--options", "blueprint.yaml", "--outdir", "out"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("validation found errors"));
    assert!(!dir.path().join("out").exists());
}
