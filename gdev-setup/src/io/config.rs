//! Setup configuration stored under `.gdev/gdev.setup.yaml`.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, anyhow, bail};
use tracing::debug;

use crate::core::invariants::validate_plan;
use crate::plan::{SetupPlan, SetupSettings};

/// Config location relative to the project root.
pub const CONFIG_RELATIVE_PATH: &str = ".gdev/gdev.setup.yaml";

pub fn default_config_path(project_root: &Path) -> PathBuf {
    project_root.join(CONFIG_RELATIVE_PATH)
}

/// Load, parse and validate a setup plan.
pub fn load_plan(path: &Path) -> Result<SetupPlan> {
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let plan = parse_plan(&contents).with_context(|| format!("load {}", path.display()))?;
    debug!(path = %path.display(), steps = plan.steps.len(), "setup plan loaded");
    Ok(plan)
}

/// Parse and validate a plan from YAML text.
pub fn parse_plan(contents: &str) -> Result<SetupPlan> {
    let plan: SetupPlan = serde_yaml::from_str(contents).context("parse setup yaml")?;
    let errors = validate_plan(&plan);
    if !errors.is_empty() {
        bail!("invalid setup config:\n- {}", errors.join("\n- "));
    }
    Ok(plan)
}

/// Per-command timeout after applying a command-line override.
pub fn effective_timeout(
    settings: &SetupSettings,
    override_secs: Option<u64>,
) -> Result<Option<Duration>> {
    match override_secs.or(settings.command_timeout_secs) {
        Some(0) => Err(anyhow!("command timeout must be > 0")),
        Some(secs) => Ok(Some(Duration::from_secs(secs))),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_reads_plan_from_project_config() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = default_config_path(temp.path());
        fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
        fs::write(
            &path,
            "steps:\n  - key: foo\n    command: 'true'\n  - key: bar\n    command: 'true'\n",
        )
        .expect("write");

        let plan = load_plan(&path).expect("load");
        let keys: Vec<&str> = plan.steps.iter().map(|s| s.key.as_str()).collect();
        assert_eq!(keys, vec!["foo", "bar"]);
    }

    #[test]
    fn load_missing_file_names_the_path() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = default_config_path(temp.path());

        let err = load_plan(&path).unwrap_err();
        assert!(format!("{err:#}").contains("gdev.setup.yaml"));
    }

    #[test]
    fn parse_reports_every_invariant_violation() {
        let yaml = r"
steps:
  - key: foo
    command: 'true'
  - key: foo
    command: ''
";
        let err = parse_plan(yaml).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("duplicate step key 'foo'"));
        assert!(message.contains("command must not be empty"));
    }

    #[test]
    fn parse_accepts_free_form_keys_and_extra_fields() {
        let yaml = r"
steps:
  - key: install deps
    description: fetch packages
    command: 'true'
    fixes:
      - key: npm:install
        command: 'true'
";
        let plan = parse_plan(yaml).expect("parse");
        assert_eq!(plan.steps[0].key, "install deps");
        assert_eq!(plan.steps[0].fixes[0].key, "npm:install");
    }

    #[test]
    fn parse_rejects_malformed_yaml() {
        let err = parse_plan("steps: [").unwrap_err();
        assert!(err.to_string().contains("parse setup yaml"));
    }

    #[test]
    fn timeout_override_wins_over_settings() {
        let settings = SetupSettings {
            command_timeout_secs: Some(60),
            ..SetupSettings::default()
        };

        assert_eq!(
            effective_timeout(&settings, None).expect("timeout"),
            Some(Duration::from_secs(60))
        );
        assert_eq!(
            effective_timeout(&settings, Some(5)).expect("timeout"),
            Some(Duration::from_secs(5))
        );
        assert_eq!(
            effective_timeout(&SetupSettings::default(), None).expect("timeout"),
            None
        );
        assert!(effective_timeout(&settings, Some(0)).is_err());
    }
}
