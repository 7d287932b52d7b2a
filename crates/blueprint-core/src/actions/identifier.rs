use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Tier
// ---------------------------------------------------------------------------

/// Rollout stage of an action's implementation. `Default` is the
/// pre-release build, `Prod` the generally available one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    #[default]
    Default,
    Prod,
}

impl Tier {
    pub fn as_str(self) -> &'static str {
        match self {
            Tier::Default => "default",
            Tier::Prod => "prod",
        }
    }

    /// Lenient parse: only `default` and `prod` are registered.
    pub fn parse(s: &str) -> Option<Tier> {
        match s {
            "default" => Some(Tier::Default),
            "prod" => Some(Tier::Prod),
            _ => None,
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Identifier table
// ---------------------------------------------------------------------------

/// One registered action: its fully-qualified name, the short aliases that
/// refer to it, and the concrete identifier for each tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionIdentifierEntry {
    pub canonical: &'static str,
    pub aliases: &'static [&'static str],
    pub default: &'static str,
    pub prod: &'static str,
}

impl ActionIdentifierEntry {
    pub fn for_tier(&self, tier: Tier) -> &'static str {
        match tier {
            Tier::Default => self.default,
            Tier::Prod => self.prod,
        }
    }

    pub fn matches(&self, identifier: &str) -> bool {
        self.canonical == identifier || self.aliases.contains(&identifier)
    }
}

static ACTION_IDENTIFIERS: &[ActionIdentifierEntry] = &[
    ActionIdentifierEntry {
        canonical: "aws/build@v1",
        aliases: &["build"],
        default: "aws/build-beta@v1",
        prod: "aws/build@v1",
    },
    ActionIdentifierEntry {
        canonical: "aws/managed-test@v1",
        aliases: &["test"],
        default: "aws/managed-test-gamma@v1",
        prod: "aws/managed-test@v1",
    },
    ActionIdentifierEntry {
        canonical: "aws/cfn-deploy@v1",
        aliases: &["deploy"],
        default: "aws/cfn-deploy-gamma@v1",
        prod: "aws/cfn-deploy@v1",
    },
    ActionIdentifierEntry {
        canonical: "aws/cdk-deploy@v1",
        aliases: &["cdkDeploy"],
        default: "aws/cdk-deploy-gamma@v1",
        prod: "aws/cdk-deploy@v1",
    },
    ActionIdentifierEntry {
        canonical: "aws/cdk-bootstrap@v1",
        aliases: &["cdkBootstrap"],
        default: "aws/cdk-bootstrap-gamma@v1",
        prod: "aws/cdk-bootstrap@v1",
    },
    ActionIdentifierEntry {
        canonical: "aws/publish-blueprint-action@v1",
        aliases: &["publishBlueprint"],
        default: "aws/publish-blueprint-action@v1",
        prod: "aws/publish-blueprint-action@v1",
    },
    ActionIdentifierEntry {
        canonical: "aws/github-actions-runner@v1",
        aliases: &[],
        default: "aws/github-actions-runner-beta@v1",
        prod: "aws/github-actions-runner@v1",
    },
];

/// All registered actions, in registration order.
pub fn registered_actions() -> &'static [ActionIdentifierEntry] {
    ACTION_IDENTIFIERS
}

/// Find the entry whose canonical name or one of whose aliases is `identifier`.
pub fn lookup(identifier: &str) -> Option<&'static ActionIdentifierEntry> {
    ACTION_IDENTIFIERS.iter().find(|e| e.matches(identifier))
}

/// Resolve an action name to the concrete identifier for `tier`.
///
/// Unregistered identifiers are returned unchanged. A tier other than
/// `default` or `prod` falls back to the `default` identifier. Never fails.
pub fn resolve(identifier: &str, tier: &str) -> String {
    let Some(entry) = lookup(identifier) else {
        tracing::debug!(identifier, "unregistered action identifier, passing through");
        return identifier.to_string();
    };
    let tier = Tier::parse(tier).unwrap_or_else(|| {
        tracing::debug!(identifier, tier, "unregistered tier, using default");
        Tier::Default
    });
    entry.for_tier(tier).to_string()
}

/// `resolve` with the implicit `default` tier.
pub fn resolve_default(identifier: &str) -> String {
    resolve(identifier, Tier::Default.as_str())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
