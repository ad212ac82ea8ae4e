//! Surfacing documented known issues once a step runs out of fixes.

use crate::core::events::{NumberedIssue, SetupEvent};
use crate::plan::StepDefinition;

/// Emit the step's known issues, numbered from 1 in declared order.
///
/// Emits nothing when the step documents no issues. Purely informational.
pub fn report_known_issues<F: FnMut(&SetupEvent)>(step: &StepDefinition, on_event: &mut F) {
    if step.known_issues.is_empty() {
        return;
    }

    let issues = step
        .known_issues
        .iter()
        .enumerate()
        .map(|(index, issue)| NumberedIssue {
            number: index + 1,
            key: issue.key.clone(),
            problem: issue.problem.clone(),
            solution: issue.solution.clone(),
        })
        .collect();
    on_event(&SetupEvent::KnownIssues {
        step: step.key.clone(),
        issues,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{known_issue, step};

    #[test]
    fn no_known_issues_emits_nothing() {
        let mut events = Vec::new();
        report_known_issues(&step("foo", "true"), &mut |e: &SetupEvent| {
            events.push(e.clone());
        });
        assert!(events.is_empty());
    }

    #[test]
    fn issues_are_numbered_in_declared_order() {
        let foo = step("foo", "false").with_known_issues(vec![
            known_issue("missing", "file is missing", "create it"),
            known_issue("cosmic", "bit flipped", "wait"),
        ]);
        let mut events = Vec::new();

        report_known_issues(&foo, &mut |e: &SetupEvent| events.push(e.clone()));

        assert_eq!(events.len(), 1);
        let SetupEvent::KnownIssues { step, issues } = &events[0] else {
            panic!("expected known issues event, got {:?}", events[0]);
        };
        assert_eq!(step, "foo");
        let numbered: Vec<(usize, &str)> = issues
            .iter()
            .map(|issue| (issue.number, issue.key.as_str()))
            .collect();
        assert_eq!(numbered, vec![(1, "missing"), (2, "cosmic")]);
        assert_eq!(issues[1].solution, "wait");
    }
}
