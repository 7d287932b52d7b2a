use serde::{Deserialize, Serialize};

/// Binds an action to a deployment environment and the account connections
/// it may use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct WorkflowEnvironment {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub connections: Vec<EnvironmentConnection>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EnvironmentConnection {
    pub name: String,
    pub role: String,
}

impl WorkflowEnvironment {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            connections: Vec::new(),
        }
    }

    pub fn with_connection(mut self, name: impl Into<String>, role: impl Into<String>) -> Self {
        self.connections.push(EnvironmentConnection {
            name: name.into(),
            role: role.into(),
        });
        self
    }
}
