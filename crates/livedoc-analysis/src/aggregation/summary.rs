//! Whole-run, per-feature, and per-tag counts.

use std::collections::{BTreeMap, BTreeSet};

use livedoc_core::model::{Example, Feature, RollupOptions, Rule, ScenarioRun, Scenario, Status};
use serde::{Deserialize, Serialize};

use super::counts::StatusCounts;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureSummary {
    pub path: String,
    pub name: String,
    pub status: Status,
    /// One entry per concrete instance (plain scenario or example row).
    pub scenarios: StatusCounts,
    /// Every step of every instance, inherited background steps included.
    pub steps: StatusCounts,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub features: StatusCounts,
    pub scenarios: StatusCounts,
    pub steps: StatusCounts,
    pub by_feature: Vec<FeatureSummary>,
    /// Instance counts per effective tag (feature ∪ rule ∪ scenario ∪
    /// example block).
    pub by_tag: BTreeMap<String, StatusCounts>,
}

/// One concrete scenario instance with the tags in effect for it.
struct Instance<'a> {
    run: &'a ScenarioRun,
    tags: BTreeSet<&'a str>,
}

fn instances<'a>(feature: &'a Feature) -> Vec<Instance<'a>> {
    let mut out = Vec::new();
    let mut push_scenario = |rule: Option<&'a Rule>, scenario: &'a Scenario| {
        let base: BTreeSet<&'a str> = feature
            .tags
            .iter()
            .chain(rule.into_iter().flat_map(|r| r.tags.iter()))
            .chain(scenario.tags.iter())
            .map(String::as_str)
            .collect();

        if scenario.is_outline() {
            for example in &scenario.examples {
                let tags = with_example_tags(&base, example);
                for row in &example.rows {
                    out.push(Instance {
                        run: &row.run,
                        tags: tags.clone(),
                    });
                }
            }
        } else {
            out.push(Instance {
                run: &scenario.run,
                tags: base,
            });
        }
    };

    for scenario in &feature.scenarios {
        push_scenario(None, scenario);
    }
    for rule in &feature.rules {
        for scenario in &rule.scenarios {
            push_scenario(Some(rule), scenario);
        }
    }
    out
}

fn with_example_tags<'a>(base: &BTreeSet<&'a str>, example: &'a Example) -> BTreeSet<&'a str> {
    let mut tags = base.clone();
    tags.extend(example.tags.iter().map(String::as_str));
    tags
}

impl Summary {
    /// Count a correlated feature set. Every count is folded by `options`,
    /// matching the rollup.
    pub fn build(features: &[Feature], options: RollupOptions) -> Self {
        let mut summary = Summary::default();

        for feature in features {
            let mut fs = FeatureSummary {
                path: feature.path.clone(),
                name: feature.name.clone(),
                status: feature.status.fold(options),
                ..Default::default()
            };

            for instance in instances(feature) {
                let status = instance.run.status.fold(options);
                fs.scenarios.add(status);
                for step in instance.run.all_steps() {
                    fs.steps.add(step.fold(options));
                }
                for tag in instance.tags {
                    summary.by_tag.entry(tag.to_string()).or_default().add(status);
                }
            }

            summary.features.add(fs.status);
            summary.scenarios += fs.scenarios;
            summary.steps += fs.steps;
            summary.by_feature.push(fs);
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use livedoc_core::model::{ExampleRow, ScenarioKind};

    fn run(status: Status, steps: Vec<Status>) -> ScenarioRun {
        ScenarioRun {
            status,
            steps,
            ..Default::default()
        }
    }

    #[test]
    fn test_instances_and_tags() {
        let feature = Feature {
            path: "a.feature".into(),
            tags: vec!["shop".into()],
            status: Status::Failed,
            scenarios: vec![
                Scenario {
                    tags: vec!["smoke".into()],
                    run: run(Status::Passed, vec![Status::Passed]),
                    ..Default::default()
                },
                Scenario {
                    kind: ScenarioKind::Outline,
                    examples: vec![Example {
                        tags: vec!["edge".into()],
                        rows: vec![
                            ExampleRow {
                                run: run(Status::Failed, vec![Status::Failed]),
                                ..Default::default()
                            },
                            ExampleRow {
                                run: run(Status::Skipped, vec![Status::Skipped]),
                                ..Default::default()
                            },
                        ],
                        ..Default::default()
                    }],
                    ..Default::default()
                },
            ],
            ..Default::default()
        };

        let summary = Summary::build(&[feature], RollupOptions::default());
        assert_eq!(summary.features.failed, 1);
        assert_eq!(summary.scenarios.total, 3);
        assert_eq!(summary.scenarios.failed, 1);
        assert_eq!(summary.steps.total, 3);
        assert_eq!(summary.by_tag["shop"].total, 3);
        assert_eq!(summary.by_tag["smoke"].passed, 1);
        assert_eq!(summary.by_tag["edge"].total, 2);
    }

    #[test]
    fn test_counts_fold_skipped_when_disabled() {
        let feature = Feature {
            status: Status::Passed,
            scenarios: vec![Scenario {
                run: run(Status::Skipped, vec![Status::Skipped]),
                ..Default::default()
            }],
            ..Default::default()
        };
        let options = RollupOptions {
            include_skipped: false,
            include_pending: true,
        };
        let summary = Summary::build(&[feature], options);
        assert_eq!(summary.scenarios.passed, 1);
        assert_eq!(summary.steps.skipped, 0);
    }
}
