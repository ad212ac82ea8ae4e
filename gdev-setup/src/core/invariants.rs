//! Semantic checks on a parsed plan that serde cannot express.

use std::collections::HashSet;

use crate::plan::{SetupPlan, StepDefinition};

/// Check plan invariants:
/// - Step keys are unique; fix keys are unique within their step
/// - Keys are non-empty and contain no `/` or NUL (they end up in log file names)
/// - Commands are non-blank
/// - `settings.shell` is non-blank and `command-timeout-secs > 0`
pub fn validate_plan(plan: &SetupPlan) -> Vec<String> {
    let mut errors = Vec::new();

    if plan.settings.shell.trim().is_empty() {
        errors.push("settings.shell must not be empty".to_string());
    }
    if plan.settings.command_timeout_secs == Some(0) {
        errors.push("settings.command-timeout-secs must be > 0".to_string());
    }

    let mut seen = HashSet::new();
    for (index, step) in plan.steps.iter().enumerate() {
        let path = format!("steps[{index}]");
        if !seen.insert(step.key.as_str()) {
            errors.push(format!("{path}: duplicate step key '{}'", step.key));
        }
        validate_step(step, &path, &mut errors);
    }
    errors
}

fn validate_step(step: &StepDefinition, path: &str, errors: &mut Vec<String>) {
    if let Some(problem) = key_problem(&step.key) {
        errors.push(format!("{path}: step key {problem}"));
    }
    if step.command.trim().is_empty() {
        errors.push(format!("{path} ('{}'): command must not be empty", step.key));
    }

    let mut seen = HashSet::new();
    for (index, fix) in step.fixes.iter().enumerate() {
        let fix_path = format!("{path}.fixes[{index}]");
        if !seen.insert(fix.key.as_str()) {
            errors.push(format!(
                "{fix_path}: duplicate fix key '{}' in step '{}'",
                fix.key, step.key
            ));
        }
        if let Some(problem) = key_problem(&fix.key) {
            errors.push(format!("{fix_path}: fix key {problem}"));
        }
        if fix.command.trim().is_empty() {
            errors.push(format!("{fix_path} ('{}'): command must not be empty", fix.key));
        }
    }
}

fn key_problem(key: &str) -> Option<String> {
    if key.is_empty() {
        return Some("must not be empty".to_string());
    }
    if key.contains(['/', '\0']) {
        return Some(format!("must not contain '/' or NUL (got '{}')", key.escape_default()));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{fix, step};

    #[test]
    fn valid_plan_has_no_errors() {
        let plan = SetupPlan {
            steps: vec![
                step("foo", "true").with_fixes(vec![fix("a", "true"), fix("b", "true")]),
                step("bar", "true").with_fixes(vec![fix("a", "true")]),
            ],
            ..SetupPlan::default()
        };

        assert!(validate_plan(&plan).is_empty());
    }

    #[test]
    fn reports_duplicate_keys() {
        let plan = SetupPlan {
            steps: vec![
                step("foo", "true").with_fixes(vec![fix("a", "true"), fix("a", "true")]),
                step("foo", "true"),
            ],
            ..SetupPlan::default()
        };

        let errors = validate_plan(&plan);
        assert!(errors.iter().any(|e| e.contains("duplicate fix key 'a'")));
        assert!(errors.iter().any(|e| e.contains("duplicate step key 'foo'")));
    }

    #[test]
    fn reports_unsafe_keys_and_blank_commands() {
        let plan = SetupPlan {
            steps: vec![
                step("../escape", "true"),
                step("nul\0byte", "true"),
                step("blank", "  ").with_fixes(vec![fix("", "true")]),
            ],
            ..SetupPlan::default()
        };

        let errors = validate_plan(&plan);
        assert_eq!(errors.len(), 4, "{errors:?}");
        assert!(errors.iter().any(|e| e.contains("got '../escape'")));
        assert!(errors.iter().any(|e| e.contains("got 'nul\\u{0}byte'")));
        assert!(errors.iter().any(|e| e.contains("('blank'): command must not be empty")));
        assert!(errors.iter().any(|e| e.contains("fix key must not be empty")));
    }

    #[test]
    fn accepts_keys_with_spaces_and_punctuation() {
        let plan = SetupPlan {
            steps: vec![
                step("install deps", "true").with_fixes(vec![fix("npm:install", "true")]),
                step("db (local)", "true"),
            ],
            ..SetupPlan::default()
        };

        assert!(validate_plan(&plan).is_empty());
    }

    #[test]
    fn reports_invalid_settings() {
        let mut plan = SetupPlan::default();
        plan.settings.shell = " ".to_string();
        plan.settings.command_timeout_secs = Some(0);

        let errors = validate_plan(&plan);
        assert_eq!(errors.len(), 2);
    }
}
