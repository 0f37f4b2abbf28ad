//! The correlation pass over a whole feature set.

use livedoc_core::model::{ExecutionRecord, Feature, RollupOptions, Scenario, ScenarioRun};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::matching::{Lookup, ScenarioIndex, ScenarioRef};
use super::rollup::apply_rollup;
use super::steps::instance_run;
use super::warnings::CorrelationWarning;

/// Outcome of one correlation pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CorrelationReport {
    pub warnings: Vec<CorrelationWarning>,
    /// Records that contributed to an instance status.
    pub matched: usize,
    /// Records matched to an outline but excluded (excess or unresolved row).
    pub orphaned: usize,
    /// Records that matched no scenario.
    pub unmatched: usize,
    /// Records that matched several scenarios.
    pub ambiguous: usize,
}

/// A record assigned to a scenario, with the row its name pointed at.
#[derive(Clone, Copy)]
struct Assigned {
    record: usize,
    row_hint: Option<usize>,
}

/// Decorate `features` in place with statuses derived from `records`.
///
/// Every instance gets a [`ScenarioRun`]: the worst matching record's, or
/// a `NotExecuted` one. Containers are then rolled up with `options`.
/// Every scenario left without any result gets a `NotExecuted` warning;
/// `verbose` also reports outlines with only some rows missing.
pub fn correlate(
    features: &mut [Feature],
    records: &[ExecutionRecord],
    options: RollupOptions,
    verbose: bool,
) -> CorrelationReport {
    let mut report = CorrelationReport::default();
    let mut assigned: FxHashMap<ScenarioRef, Vec<Assigned>> = FxHashMap::default();

    {
        let index = ScenarioIndex::build(features);
        for (ri, record) in records.iter().enumerate() {
            match index.lookup(record) {
                Lookup::Unique(candidate) => {
                    assigned.entry(candidate.at).or_default().push(Assigned {
                        record: ri,
                        row_hint: candidate.row_hint,
                    });
                }
                Lookup::Ambiguous(labels) => {
                    tracing::debug!(scenario = %record.scenario_name, candidates = labels.len(), "ambiguous result");
                    report.ambiguous += 1;
                    report.warnings.push(CorrelationWarning::ambiguous(record, &labels));
                }
                Lookup::NotFound => {
                    tracing::debug!(scenario = %record.scenario_name, source = %record.source, "unmatched result");
                    report.unmatched += 1;
                    report.warnings.push(CorrelationWarning::unmatched(record));
                }
            }
        }
    }

    for (fi, feature) in features.iter_mut().enumerate() {
        let feature_bg = feature.background.as_ref().map_or(0, |b| b.steps.len());
        let path = feature.path.clone();

        for (si, scenario) in feature.scenarios.iter_mut().enumerate() {
            let at = ScenarioRef { feature: fi, rule: None, scenario: si };
            let ctx = Context {
                path: &path,
                background: feature_bg,
                records,
                options,
                verbose,
            };
            ctx.apply(scenario, assigned.get(&at).map(Vec::as_slice).unwrap_or(&[]), &mut report);
        }

        for (ri, rule) in feature.rules.iter_mut().enumerate() {
            let rule_bg = rule.background.as_ref().map_or(0, |b| b.steps.len());
            for (si, scenario) in rule.scenarios.iter_mut().enumerate() {
                let at = ScenarioRef { feature: fi, rule: Some(ri), scenario: si };
                let ctx = Context {
                    path: &path,
                    background: feature_bg + rule_bg,
                    records,
                    options,
                    verbose,
                };
                ctx.apply(scenario, assigned.get(&at).map(Vec::as_slice).unwrap_or(&[]), &mut report);
            }
        }

        apply_rollup(feature, options);
    }

    tracing::info!(
        records = records.len(),
        matched = report.matched,
        orphaned = report.orphaned,
        unmatched = report.unmatched,
        ambiguous = report.ambiguous,
        warnings = report.warnings.len(),
        "correlation complete"
    );
    report
}

/// Per-scenario inputs shared by the plain and outline paths.
struct Context<'a> {
    path: &'a str,
    background: usize,
    records: &'a [ExecutionRecord],
    options: RollupOptions,
    verbose: bool,
}

impl Context<'_> {
    fn apply(&self, scenario: &mut Scenario, assigned: &[Assigned], report: &mut CorrelationReport) {
        if scenario.is_outline() {
            self.apply_outline(scenario, assigned, report);
        } else {
            scenario.run = self.run_for(assigned.iter().map(|a| a.record), scenario.steps.len());
            report.matched += assigned.len();
            if assigned.is_empty() {
                report
                    .warnings
                    .push(CorrelationWarning::not_executed(self.path, &scenario.name, 1, 1));
            }
        }
    }

    /// The worst of the given records, or a `NotExecuted` run.
    fn run_for(&self, records: impl Iterator<Item = usize>, own_steps: usize) -> ScenarioRun {
        let worst = records
            .map(|i| &self.records[i])
            .reduce(|a, b| if b.outcome.severity() > a.outcome.severity() { b } else { a });
        match worst {
            Some(record) => instance_run(record, self.background, own_steps, self.options),
            None => ScenarioRun::not_executed(self.background, own_steps),
        }
    }

    /// Row resolution: explicit index, then row line, then bound name; the
    /// rest pair positionally with the still-free rows in declaration order.
    fn apply_outline(&self, scenario: &mut Scenario, assigned: &[Assigned], report: &mut CorrelationReport) {
        let row_lines: Vec<u32> = scenario.rows().map(|(_, r)| r.line).collect();
        let total = row_lines.len();
        let mut per_row: Vec<Vec<usize>> = vec![Vec::new(); total];
        let mut positional: Vec<usize> = Vec::new();

        for a in assigned {
            let record = &self.records[a.record];
            let row = match record.example_index {
                Some(index) if index < total => Some(index),
                Some(index) => {
                    report.orphaned += 1;
                    report
                        .warnings
                        .push(CorrelationWarning::unresolved(self.path, record, index, total));
                    continue;
                }
                None => record
                    .line
                    .and_then(|line| row_lines.iter().position(|l| *l == line))
                    .or(a.row_hint),
            };
            match row {
                Some(row) => per_row[row].push(a.record),
                None => positional.push(a.record),
            }
        }

        if !positional.is_empty() {
            let free: Vec<usize> = (0..total).filter(|r| per_row[*r].is_empty()).collect();
            if positional.len() != free.len() {
                report.warnings.push(CorrelationWarning::count_mismatch(
                    self.path,
                    &scenario.name,
                    free.len(),
                    positional.len(),
                ));
            }
            if positional.len() > free.len() {
                let excess = positional.len() - free.len();
                tracing::debug!(scenario = %scenario.name, excess, "excluding excess outline results");
                report.orphaned += excess;
            }
            for (row, record) in free.into_iter().zip(positional) {
                per_row[row].push(record);
            }
        }

        let own_steps = scenario.steps.len();
        let mut missing = 0;
        let mut row_runs = per_row.into_iter();
        for example in scenario.examples.iter_mut() {
            for row in example.rows.iter_mut() {
                let records = row_runs.next().unwrap_or_default();
                if records.is_empty() {
                    missing += 1;
                }
                report.matched += records.len();
                row.run = self.run_for(records.into_iter(), own_steps);
            }
        }
        scenario.run = ScenarioRun::default();

        if missing > 0 && (missing == total || self.verbose) {
            report
                .warnings
                .push(CorrelationWarning::not_executed(self.path, &scenario.name, missing, total));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use livedoc_core::model::{Example, ExampleRow, Outcome, ScenarioKind, Status, Step};

    fn outline(rows: usize) -> Feature {
        Feature {
            name: "Eating".into(),
            path: "eat.feature".into(),
            scenarios: vec![Scenario {
                name: "eat <n>".into(),
                line: 2,
                kind: ScenarioKind::Outline,
                steps: vec![Step { text: "eat <n>".into(), ..Default::default() }],
                examples: vec![Example {
                    header: vec!["n".into()],
                    rows: (0..rows)
                        .map(|i| ExampleRow {
                            line: 10 + i as u32,
                            cells: vec![i.to_string()],
                            ..Default::default()
                        })
                        .collect(),
                    ..Default::default()
                }],
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    fn record(outcome: Outcome) -> ExecutionRecord {
        ExecutionRecord::new("r.json", "test", "eat <n>", outcome).with_feature_path("eat.feature")
    }

    fn row_statuses(feature: &Feature) -> Vec<Status> {
        feature.scenarios[0].rows().map(|(_, r)| r.run.status).collect()
    }

    #[test]
    fn test_explicit_index_beats_position() {
        let mut features = vec![outline(3)];
        let records = vec![
            record(Outcome::Failed).with_example_index(2),
            record(Outcome::Passed),
            record(Outcome::Skipped),
        ];
        let report = correlate(&mut features, &records, RollupOptions::default(), false);
        assert_eq!(row_statuses(&features[0]), vec![Status::Passed, Status::Skipped, Status::Failed]);
        assert_eq!(report.matched, 3);
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_row_line_identifies_instance() {
        let mut features = vec![outline(2)];
        let records = vec![record(Outcome::Failed).with_line(11)];
        correlate(&mut features, &records, RollupOptions::default(), false);
        assert_eq!(row_statuses(&features[0]), vec![Status::NotExecuted, Status::Failed]);
    }

    #[test]
    fn test_bound_name_identifies_instance() {
        let mut features = vec![outline(3)];
        let records = vec![ExecutionRecord::new("r.json", "test", "eat 1", Outcome::Pending)];
        let report = correlate(&mut features, &records, RollupOptions::default(), false);
        assert_eq!(
            row_statuses(&features[0]),
            vec![Status::NotExecuted, Status::Pending, Status::NotExecuted]
        );
        assert_eq!(report.matched, 1);
    }

    #[test]
    fn test_out_of_range_index_is_orphaned() {
        let mut features = vec![outline(1)];
        let records = vec![record(Outcome::Failed).with_example_index(5)];
        let report = correlate(&mut features, &records, RollupOptions::default(), false);
        assert_eq!(report.orphaned, 1);
        assert_eq!(report.warnings[0].kind, super::super::WarningKind::UnresolvedExample);
        assert_eq!(features[0].status, Status::NotExecuted);
    }

    #[test]
    fn test_unexecuted_outline_warns_without_verbose() {
        let mut features = vec![outline(2)];
        let report = correlate(&mut features, &[], RollupOptions::default(), false);
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(report.warnings[0].kind, super::super::WarningKind::NotExecuted);
        assert!(report.warnings[0].message.contains("2 of 2"));
    }

    #[test]
    fn test_partial_outline_is_quiet_without_verbose() {
        let mut features = vec![outline(2)];
        let records = vec![record(Outcome::Passed).with_example_index(0)];
        let report = correlate(&mut features, &records, RollupOptions::default(), false);
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_verbose_reports_missing_rows() {
        let mut features = vec![outline(2)];
        let records = vec![record(Outcome::Passed).with_example_index(0)];
        let report = correlate(&mut features, &records, RollupOptions::default(), true);
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(report.warnings[0].kind, super::super::WarningKind::NotExecuted);
        assert!(report.warnings[0].message.contains("1 of 2"));
    }
}
