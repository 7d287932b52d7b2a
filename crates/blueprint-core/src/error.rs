use thiserror::Error;

#[derive(Debug, Error)]
pub enum BlueprintError {
    #[error("options file not found: {0}")]
    OptionsNotFound(String),

    #[error("unknown runtime '{0}': expected one of 'Node.js 14', 'Java 11 Maven', 'Java 11 Gradle'")]
    UnknownRuntime(String),

    #[error("unknown action kind: {0}")]
    UnknownActionKind(String),

    #[error("invalid configuration for {kind} action: {reason}")]
    InvalidConfiguration { kind: String, reason: String },

    #[error("invalid scaffold path '{0}': must be relative and stay inside the output directory")]
    InvalidScaffoldPath(String),

    #[error("invalid options: {0}")]
    InvalidOptions(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, BlueprintError>;
