use crate::actions::identifier::Tier;
use crate::error::{BlueprintError, Result};
use crate::io;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::sync::OnceLock;

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

// ---------------------------------------------------------------------------
// Runtime
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Runtime {
    #[serde(rename = "Node.js 14")]
    Nodejs14,
    #[serde(rename = "Java 11 Maven")]
    Java11Maven,
    #[serde(rename = "Java 11 Gradle")]
    Java11Gradle,
}

impl Runtime {
    pub fn all() -> &'static [Runtime] {
        &[Runtime::Nodejs14, Runtime::Java11Maven, Runtime::Java11Gradle]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Runtime::Nodejs14 => "Node.js 14",
            Runtime::Java11Maven => "Java 11 Maven",
            Runtime::Java11Gradle => "Java 11 Gradle",
        }
    }
}

impl fmt::Display for Runtime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Runtime {
    type Err = BlueprintError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Runtime::all()
            .iter()
            .copied()
            .find(|r| r.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| BlueprintError::UnknownRuntime(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Nested option groups
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleRef {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountConnection {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deploy_role: Option<RoleRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build_role: Option<RoleRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentOptions {
    #[serde(default = "default_environment_name")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aws_account_connection: Option<AccountConnection>,
}

fn default_environment_name() -> String {
    "production".to_string()
}

impl Default for EnvironmentOptions {
    fn default() -> Self {
        Self {
            name: default_environment_name(),
            aws_account_connection: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeOptions {
    #[serde(default = "default_repository_name")]
    pub source_repository_name: String,
}

fn default_repository_name() -> String {
    "sam-lambda".to_string()
}

impl Default for CodeOptions {
    fn default() -> Self {
        Self {
            source_repository_name: default_repository_name(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LambdaOptions {
    #[serde(default = "default_function_name")]
    pub function_name: String,
}

fn default_function_name() -> String {
    "samfunction".to_string()
}

impl Default for LambdaOptions {
    fn default() -> Self {
        Self {
            function_name: default_function_name(),
        }
    }
}

// ---------------------------------------------------------------------------
// BlueprintOptions
// ---------------------------------------------------------------------------

/// Options of the SAM serverless blueprint, read from `blueprint.yaml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlueprintOptions {
    #[serde(default = "default_runtime")]
    pub runtime: Runtime,
    #[serde(default = "default_stack_name")]
    pub cloud_formation_stack_name: String,
    #[serde(default)]
    pub environment: EnvironmentOptions,
    #[serde(default)]
    pub code: CodeOptions,
    #[serde(default)]
    pub lambda: LambdaOptions,
    /// Rollout tier used to resolve action identifiers (`default` or `prod`).
    #[serde(default = "default_action_tier")]
    pub action_tier: String,
}

fn default_runtime() -> Runtime {
    Runtime::Nodejs14
}

fn default_stack_name() -> String {
    "sam-serverless-stack".to_string()
}

fn default_action_tier() -> String {
    Tier::Default.as_str().to_string()
}

impl Default for BlueprintOptions {
    fn default() -> Self {
        Self {
            runtime: default_runtime(),
            cloud_formation_stack_name: default_stack_name(),
            environment: EnvironmentOptions::default(),
            code: CodeOptions::default(),
            lambda: LambdaOptions::default(),
            action_tier: default_action_tier(),
        }
    }
}

impl BlueprintOptions {
    /// Load options from `path`, applying defaults and sanitizing the
    /// repository name.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(BlueprintError::OptionsNotFound(path.display().to_string()));
        }
        let data = std::fs::read_to_string(path)?;
        Self::from_yaml(&data)
    }

    pub fn from_yaml(data: &str) -> Result<Self> {
        let mut options: BlueprintOptions = serde_yaml::from_str(data)?;
        options.code.source_repository_name = sanitize_path(&options.code.source_repository_name);
        Ok(options)
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        io::atomic_write(path, self.to_yaml()?.as_bytes())
    }

    /// Tier for action identifiers. Unregistered values fall back to `default`.
    pub fn tier(&self) -> Tier {
        Tier::parse(&self.action_tier).unwrap_or_default()
    }

    /// Repository directory name, falling back when sanitizing left nothing.
    pub fn repository_name(&self) -> &str {
        if self.code.source_repository_name.is_empty() {
            "sam-lambda"
        } else {
            &self.code.source_repository_name
        }
    }

    /// Validate options against the wizard's field rules.
    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        if !stack_name_re().is_match(&self.cloud_formation_stack_name) {
            warnings.push(error(format!(
                "cloudFormationStackName '{}': must start with a letter and contain only \
                 alphanumeric characters and dashes",
                self.cloud_formation_stack_name
            )));
        }

        let repo = &self.code.source_repository_name;
        if !repository_name_re().is_match(repo) || repo.ends_with(".git") {
            warnings.push(error(format!(
                "code.sourceRepositoryName '{repo}': must contain only alphanumeric characters, \
                 periods, underscores and dashes, be at most 100 characters, and not end in .git"
            )));
        }

        if !function_name_re().is_match(&self.lambda.function_name) {
            warnings.push(error(format!(
                "lambda.functionName '{}': must contain only alphanumeric characters and be at \
                 most 56 characters",
                self.lambda.function_name
            )));
        }

        if self.environment.name.trim().is_empty() {
            warnings.push(warning(
                "environment.name is empty; workflow actions will use a placeholder environment"
                    .to_string(),
            ));
        }

        match &self.environment.aws_account_connection {
            None => warnings.push(warning(
                "environment.awsAccountConnection is not set; workflow actions will not be able \
                 to reach an AWS account"
                    .to_string(),
            )),
            Some(conn) => {
                if conn.build_role.is_none() {
                    warnings.push(warning(format!(
                        "connection '{}' has no buildRole",
                        conn.name
                    )));
                }
                if conn.deploy_role.is_none() {
                    warnings.push(warning(format!(
                        "connection '{}' has no deployRole",
                        conn.name
                    )));
                }
            }
        }

        if Tier::parse(&self.action_tier).is_none() {
            warnings.push(warning(format!(
                "actionTier '{}' is not registered; using 'default'",
                self.action_tier
            )));
        }

        warnings
    }
}

fn error(message: String) -> ConfigWarning {
    ConfigWarning {
        level: WarnLevel::Error,
        message,
    }
}

fn warning(message: String) -> ConfigWarning {
    ConfigWarning {
        level: WarnLevel::Warning,
        message,
    }
}

/// Remove every `.`, `/` and space.
pub fn sanitize_path(path: &str) -> String {
    path.chars().filter(|c| !matches!(c, '.' | '/' | ' ')).collect()
}

// ---------------------------------------------------------------------------
// Field patterns
// ---------------------------------------------------------------------------

static STACK_NAME_RE: OnceLock<Regex> = OnceLock::new();
static REPOSITORY_NAME_RE: OnceLock<Regex> = OnceLock::new();
static FUNCTION_NAME_RE: OnceLock<Regex> = OnceLock::new();

fn stack_name_re() -> &'static Regex {
    STACK_NAME_RE.get_or_init(|| Regex::new(r"^[a-zA-Z][a-zA-Z0-9-]{1,100}$").unwrap())
}

fn repository_name_re() -> &'static Regex {
    REPOSITORY_NAME_RE.get_or_init(|| Regex::new(r"^[a-zA-Z0-9_.-]{1,100}$").unwrap())
}

fn function_name_re() -> &'static Regex {
    FUNCTION_NAME_RE.get_or_init(|| Regex::new(r"^[a-zA-Z0-9]{1,56}$").unwrap())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn connected() -> BlueprintOptions {
        BlueprintOptions {
            environment: EnvironmentOptions {
                name: "production".to_string(),
                aws_account_connection: Some(AccountConnection {
                    name: "main-account".to_string(),
                    deploy_role: Some(RoleRef {
                        name: "sam-deploy".to_string(),
                    }),
                    build_role: Some(RoleRef {
                        name: "sam-build".to_string(),
                    }),
                }),
            },
            ..BlueprintOptions::default()
        }
    }

    #[test]
    fn defaults_from_empty_yaml() {
        let options = BlueprintOptions::from_yaml("{}").unwrap();
        assert_eq!(options, BlueprintOptions::default());
        assert_eq!(options.runtime, Runtime::Nodejs14);
        assert_eq!(options.tier(), Tier::Default);
    }

    #[test]
    fn parses_wizard_field_names() {
        let yaml = r#"
runtime: Java 11 Gradle
cloudFormationStackName: orders-api
environment:
  name: staging
  awsAccountConnection:
    name: acct
    buildRole:
      name: build
code:
  sourceRepositoryName: my.repo/name
lambda:
  functionName: orders
actionTier: prod
"#;
        let options = BlueprintOptions::from_yaml(yaml).unwrap();
        assert_eq!(options.runtime, Runtime::Java11Gradle);
        assert_eq!(options.cloud_formation_stack_name, "orders-api");
        assert_eq!(options.code.source_repository_name, "myreponame");
        assert_eq!(options.tier(), Tier::Prod);
        let conn = options.environment.aws_account_connection.unwrap();
        assert_eq!(conn.build_role.unwrap().name, "build");
        assert!(conn.deploy_role.is_none());
    }

    #[test]
    fn unknown_runtime_rejected() {
        assert!(BlueprintOptions::from_yaml("runtime: Python 3\n").is_err());
        assert!("python 3".parse::<Runtime>().is_err());
        assert_eq!("node.js 14".parse::<Runtime>().unwrap(), Runtime::Nodejs14);
    }

    #[test]
    fn sanitize_path_strips_separators() {
        assert_eq!(sanitize_path("my repo/v1.0"), "myrepov10");
        assert_eq!(sanitize_path("plain"), "plain");
    }

    #[test]
    fn repository_name_fallback() {
        let options = BlueprintOptions::from_yaml("code:\n  sourceRepositoryName: './.'\n").unwrap();
        assert_eq!(options.repository_name(), "sam-lambda");
    }

    #[test]
    fn valid_options_have_no_warnings() {
        assert!(connected().validate().is_empty());
    }

    #[test]
    fn invalid_fields_are_errors() {
        let mut options = connected();
        options.cloud_formation_stack_name = "1-starts-with-digit".to_string();
        options.lambda.function_name = "has-dash".to_string();
        options.code.source_repository_name = "repo.git".to_string();
        let errors: Vec<_> = options
            .validate()
            .into_iter()
            .filter(|w| w.level == WarnLevel::Error)
            .collect();
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn missing_connection_and_tier_are_warnings() {
        let options = BlueprintOptions {
            action_tier: "gamma".to_string(),
            ..BlueprintOptions::default()
        };
        let warnings = options.validate();
        assert!(warnings.iter().all(|w| w.level == WarnLevel::Warning));
        assert!(warnings.iter().any(|w| w.message.contains("awsAccountConnection")));
        assert!(warnings.iter().any(|w| w.message.contains("gamma")));
        assert_eq!(options.tier(), Tier::Default);
    }

    #[test]
    fn save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("blueprint.yaml");
        let options = connected();
        options.save(&path).unwrap();
        assert_eq!(BlueprintOptions::load(&path).unwrap(), options);
    }

    #[test]
    fn load_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = BlueprintOptions::load(&dir.path().join("nope.yaml")).unwrap_err();
        assert!(matches!(err, BlueprintError::OptionsNotFound(_)));
    }
}
