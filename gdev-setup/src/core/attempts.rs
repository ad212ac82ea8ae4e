//! Per-step bookkeeping of consumed fixes.

use std::collections::HashSet;

use crate::core::types::FixOutcome;

/// Fixes consumed while resolving a single step.
///
/// A fix is consumed when it finished as [`FixOutcome::Success`] or
/// [`FixOutcome::Failed`]; consumed fixes are never run again for the same step.
/// Skipped fixes are not tracked and stay eligible for later failure cycles.
/// The set only grows, and a fresh state is used for every step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepAttemptState {
    keys: HashSet<String>,
    consumed: Vec<(String, FixOutcome)>,
}

impl StepAttemptState {
    /// Record the outcome of a fix. Returns `true` if the fix became consumed.
    pub fn record(&mut self, key: &str, outcome: FixOutcome) -> bool {
        if !outcome.consumes_fix() || !self.keys.insert(key.to_string()) {
            return false;
        }
        self.consumed.push((key.to_string(), outcome));
        true
    }

    pub fn was_attempted(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    /// Consumed fix keys in the order they were recorded.
    pub fn attempted(&self) -> impl Iterator<Item = &str> {
        self.consumed.iter().map(|(key, _)| key.as_str())
    }

    /// Keys of fixes that succeeded, in the order they ran.
    pub fn applied(&self) -> impl Iterator<Item = &str> {
        self.consumed
            .iter()
            .filter(|(_, outcome)| *outcome == FixOutcome::Success)
            .map(|(key, _)| key.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_and_failed_are_consumed() {
        let mut state = StepAttemptState::default();

        assert!(state.record("a", FixOutcome::Success));
        assert!(state.record("b", FixOutcome::Failed));

        assert!(state.was_attempted("a"));
        assert!(state.was_attempted("b"));
        assert_eq!(state.attempted().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(state.applied().collect::<Vec<_>>(), vec!["a"]);
    }

    #[test]
    fn skipped_is_not_consumed() {
        let mut state = StepAttemptState::default();

        assert!(!state.record("maybe", FixOutcome::Skipped));
        assert!(!state.was_attempted("maybe"));
        assert_eq!(state.attempted().count(), 0);
    }

    #[test]
    fn key_is_recorded_at_most_once() {
        let mut state = StepAttemptState::default();

        assert!(state.record("a", FixOutcome::Failed));
        assert!(!state.record("a", FixOutcome::Success));

        assert_eq!(state.attempted().collect::<Vec<_>>(), vec!["a"]);
        assert_eq!(state.applied().count(), 0);
    }
}
