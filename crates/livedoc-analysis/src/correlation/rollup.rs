//! Bottom-up status rollup.
//!
//! A max-reduction over `Status::severity` after folding by
//! [`RollupOptions`]: order-independent, associative, and idempotent.

use livedoc_core::model::{Feature, RollupOptions, Scenario, Status};

/// Reduce child statuses to a container status.
/// No children, or only `NotExecuted` children, gives `NotExecuted`.
pub fn rollup<I>(statuses: I, options: RollupOptions) -> Status
where
    I: IntoIterator<Item = Status>,
{
    statuses
        .into_iter()
        .map(|s| s.fold(options))
        .max_by_key(|s| s.severity())
        .unwrap_or(Status::NotExecuted)
}

/// Recompute every container status of `feature` from its instance runs.
///
/// Instance runs are left untouched, so applying this twice is a no-op.
pub fn apply_rollup(feature: &mut Feature, options: RollupOptions) {
    for scenario in feature.scenarios.iter_mut() {
        rollup_scenario(scenario, options);
    }
    for rule in feature.rules.iter_mut() {
        for scenario in rule.scenarios.iter_mut() {
            rollup_scenario(scenario, options);
        }
        rule.status = rollup(rule.scenarios.iter().map(|s| s.status), options);
    }
    feature.status = rollup(
        feature
            .scenarios
            .iter()
            .map(|s| s.status)
            .chain(feature.rules.iter().map(|r| r.status)),
        options,
    );
}

fn rollup_scenario(scenario: &mut Scenario, options: RollupOptions) {
    if !scenario.is_outline() {
        for (i, step) in scenario.steps.iter_mut().enumerate() {
            step.status = scenario.run.steps.get(i).copied().unwrap_or_default();
        }
        scenario.status = rollup([scenario.run.status], options);
        return;
    }

    for example in scenario.examples.iter_mut() {
        example.status = rollup(example.rows.iter().map(|r| r.run.status), options);
    }
    // Template steps show the worst raw status of that step across rows.
    for (i, step) in scenario.steps.iter_mut().enumerate() {
        step.status = rollup(
            scenario
                .examples
                .iter()
                .flat_map(|e| e.rows.iter())
                .map(|r| r.run.steps.get(i).copied().unwrap_or_default()),
            RollupOptions::default(),
        );
    }
    scenario.status = rollup(scenario.examples.iter().map(|e| e.status), options);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precedence() {
        let opts = RollupOptions::default();
        assert_eq!(rollup([Status::Passed, Status::Failed, Status::Pending], opts), Status::Failed);
        assert_eq!(rollup([Status::Skipped, Status::Pending], opts), Status::Pending);
        assert_eq!(rollup([Status::Passed, Status::Skipped], opts), Status::Skipped);
        assert_eq!(rollup([Status::Passed, Status::NotExecuted], opts), Status::Passed);
        assert_eq!(rollup([], opts), Status::NotExecuted);
        assert_eq!(rollup([Status::NotExecuted], opts), Status::NotExecuted);
    }

    #[test]
    fn test_skipped_ignored_when_disabled() {
        let opts = RollupOptions {
            include_skipped: false,
            include_pending: true,
        };
        assert_eq!(rollup([Status::Passed, Status::Skipped], opts), Status::Passed);
        assert_eq!(rollup([Status::Skipped, Status::Pending], opts), Status::Pending);
    }

    #[test]
    fn test_pending_ignored_when_disabled() {
        let opts = RollupOptions {
            include_skipped: true,
            include_pending: false,
        };
        assert_eq!(rollup([Status::Pending, Status::Undefined], opts), Status::Passed);
        assert_eq!(rollup([Status::Pending, Status::Skipped], opts), Status::Skipped);
    }
}
