//! In-memory form of `.gdev/gdev.setup.yaml`.

use serde::{Deserialize, Serialize};

/// Ordered list of provisioning steps plus run-wide settings.
/// Unknown fields are ignored everywhere except in `settings`, so configs may
/// carry extra documentation such as a step `description`.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct SetupPlan {
    #[serde(default)]
    pub settings: SetupSettings,
    #[serde(default)]
    pub steps: Vec<StepDefinition>,
}

/// Optional `settings:` block. Missing fields fall back to defaults.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct SetupSettings {
    /// Shell used as `<shell> -c <command>`.
    pub shell: String,
    /// Kill any single step or fix command that runs longer than this.
    pub command_timeout_secs: Option<u64>,
}

impl Default for SetupSettings {
    fn default() -> Self {
        Self {
            shell: "bash".to_string(),
            command_timeout_secs: None,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct StepDefinition {
    pub key: String,
    pub command: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fixes: Vec<FixDefinition>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub known_issues: Vec<KnownIssue>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct FixDefinition {
    pub key: String,
    pub command: String,
}

/// Documented problem/solution pair shown once a step runs out of fixes.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct KnownIssue {
    pub key: String,
    pub problem: String,
    pub solution: String,
}
