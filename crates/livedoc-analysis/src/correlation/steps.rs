//! Step statuses of one scenario instance from one execution record.

use livedoc_core::model::{ExecutionRecord, RollupOptions, ScenarioRun, Status};

use super::rollup::rollup;

/// Build the run of an instance with `background` inherited steps and
/// `own` steps from the record that matched it.
///
/// Per-step outcomes align by ordinal, background first. Without them the
/// first step takes the scenario outcome and, when that is not `Passed`,
/// the remaining steps are `Skipped`.
pub fn instance_run(
    record: &ExecutionRecord,
    background: usize,
    own: usize,
    options: RollupOptions,
) -> ScenarioRun {
    let total = background + own;
    let statuses = if record.steps.is_empty() {
        scenario_level(Status::from(record.outcome), total)
    } else {
        step_level(record, total)
    };

    let status = rollup(
        statuses
            .iter()
            .copied()
            .chain(std::iter::once(Status::from(record.outcome))),
        options,
    );

    let mut background_steps = statuses;
    let steps = background_steps.split_off(background.min(background_steps.len()));

    ScenarioRun {
        status,
        outcome: Some(record.outcome),
        background_steps,
        steps,
        duration: record.duration,
        failure: record.failure.clone(),
        source: Some(record.source.clone()),
    }
}

fn scenario_level(outcome: Status, total: usize) -> Vec<Status> {
    let rest = if outcome == Status::Passed {
        Status::Passed
    } else {
        Status::Skipped
    };
    (0..total)
        .map(|i| if i == 0 { outcome } else { rest })
        .collect()
}

/// Outcomes beyond `total` are ignored. Missing positions are `Skipped`
/// after a non-passed step and `NotExecuted` otherwise.
fn step_level(record: &ExecutionRecord, total: usize) -> Vec<Status> {
    let mut halted = false;
    (0..total)
        .map(|i| match record.steps.get(i) {
            Some(outcome) => {
                let status = Status::from(*outcome);
                if status != Status::Passed {
                    halted = true;
                }
                status
            }
            None if halted => Status::Skipped,
            None => Status::NotExecuted,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use livedoc_core::model::Outcome;

    fn record(outcome: Outcome, steps: Vec<Outcome>) -> ExecutionRecord {
        ExecutionRecord::new("r.json", "test", "s", outcome).with_steps(steps)
    }

    #[test]
    fn test_scenario_level_failure_skips_the_rest() {
        let run = instance_run(&record(Outcome::Failed, vec![]), 0, 3, RollupOptions::default());
        assert_eq!(run.steps, vec![Status::Failed, Status::Skipped, Status::Skipped]);
        assert_eq!(run.status, Status::Failed);
    }

    #[test]
    fn test_scenario_level_pass() {
        let run = instance_run(&record(Outcome::Passed, vec![]), 1, 2, RollupOptions::default());
        assert_eq!(run.background_steps, vec![Status::Passed]);
        assert_eq!(run.steps, vec![Status::Passed, Status::Passed]);
        assert_eq!(run.status, Status::Passed);
    }

    #[test]
    fn test_step_level_splits_background() {
        let run = instance_run(
            &record(Outcome::Failed, vec![Outcome::Passed, Outcome::Failed]),
            1,
            3,
            RollupOptions::default(),
        );
        assert_eq!(run.background_steps, vec![Status::Passed]);
        assert_eq!(run.steps, vec![Status::Failed, Status::Skipped, Status::Skipped]);
    }

    #[test]
    fn test_short_passing_report_leaves_tail_not_executed() {
        let run = instance_run(&record(Outcome::Passed, vec![Outcome::Passed]), 0, 2, RollupOptions::default());
        assert_eq!(run.steps, vec![Status::Passed, Status::NotExecuted]);
        assert_eq!(run.status, Status::Passed);
    }

    #[test]
    fn test_hook_failure_surfaces_in_instance_status() {
        let run = instance_run(
            &record(Outcome::Failed, vec![Outcome::Passed, Outcome::Passed]),
            0,
            2,
            RollupOptions::default(),
        );
        assert_eq!(run.steps, vec![Status::Passed, Status::Passed]);
        assert_eq!(run.status, Status::Failed);
    }
}
