//! Record → scenario lookup.

use livedoc_core::model::{ExecutionRecord, Feature, Scenario};
use rustc_hash::FxHashMap;

/// Position of a scenario in the feature list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScenarioRef {
    pub feature: usize,
    pub rule: Option<usize>,
    pub scenario: usize,
}

/// A matched scenario, plus the example row (flattened index) when the
/// record's name identified one outline instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    pub at: ScenarioRef,
    pub row_hint: Option<usize>,
}

#[derive(Debug, PartialEq, Eq)]
pub enum Lookup {
    Unique(Candidate),
    /// Display labels (`path: name`) of the colliding scenarios.
    Ambiguous(Vec<String>),
    NotFound,
}

struct Entry<'a> {
    at: ScenarioRef,
    path: Vec<&'a str>,
    feature_name: &'a str,
    name: &'a str,
    line: u32,
    row_lines: Vec<u32>,
}

/// Name-keyed index over every scenario of a feature set.
pub struct ScenarioIndex<'a> {
    entries: Vec<Entry<'a>>,
    by_name: FxHashMap<&'a str, Vec<usize>>,
    /// Bound outline instance name → (entry, row). `None` row when the
    /// same bound name occurs on several rows of one outline.
    by_instance: FxHashMap<String, Vec<(usize, Option<usize>)>>,
}

impl<'a> ScenarioIndex<'a> {
    pub fn build(features: &'a [Feature]) -> Self {
        let mut index = ScenarioIndex {
            entries: Vec::new(),
            by_name: FxHashMap::default(),
            by_instance: FxHashMap::default(),
        };

        for (fi, feature) in features.iter().enumerate() {
            for (si, scenario) in feature.scenarios.iter().enumerate() {
                let at = ScenarioRef { feature: fi, rule: None, scenario: si };
                index.add(feature, scenario, at);
            }
            for (ri, rule) in feature.rules.iter().enumerate() {
                for (si, scenario) in rule.scenarios.iter().enumerate() {
                    let at = ScenarioRef { feature: fi, rule: Some(ri), scenario: si };
                    index.add(feature, scenario, at);
                }
            }
        }
        index
    }

    fn add(&mut self, feature: &'a Feature, scenario: &'a Scenario, at: ScenarioRef) {
        let id = self.entries.len();
        let name = scenario.name.trim();
        self.entries.push(Entry {
            at,
            path: path_components(&feature.path),
            feature_name: feature.name.trim(),
            name,
            line: scenario.line,
            row_lines: scenario.rows().map(|(_, r)| r.line).collect(),
        });
        self.by_name.entry(name).or_default().push(id);

        if !scenario.is_outline() {
            return;
        }
        let mut rows_by_name: FxHashMap<String, Vec<usize>> = FxHashMap::default();
        for (ri, (example, row)) in scenario.rows().enumerate() {
            let bound = scenario.instance_name(example, row);
            if bound.trim() != name {
                rows_by_name.entry(bound.trim().to_string()).or_default().push(ri);
            }
        }
        for (bound, rows) in rows_by_name {
            let hint = (rows.len() == 1).then(|| rows[0]);
            self.by_instance.entry(bound).or_default().push((id, hint));
        }
    }

    /// Find the single scenario a record belongs to.
    pub fn lookup(&self, record: &ExecutionRecord) -> Lookup {
        let name = record.scenario_name.trim();
        let mut candidates: Vec<(usize, Option<usize>)> = Vec::new();
        for &id in self.by_name.get(name).into_iter().flatten() {
            candidates.push((id, None));
        }
        for &(id, hint) in self.by_instance.get(name).into_iter().flatten() {
            if !candidates.iter().any(|(c, _)| *c == id) {
                candidates.push((id, hint));
            }
        }

        match record.feature_path.as_deref() {
            Some(path) => {
                let wanted = path_components(path);
                candidates.retain(|(id, _)| paths_match(&self.entries[*id].path, &wanted));
                let best = candidates
                    .iter()
                    .map(|(id, _)| path_score(&self.entries[*id].path, &wanted))
                    .max()
                    .unwrap_or(0);
                candidates.retain(|(id, _)| path_score(&self.entries[*id].path, &wanted) == best);
                if candidates.len() > 1 {
                    if let Some(line) = record.line {
                        narrow(&mut candidates, |id| {
                            let e = &self.entries[id];
                            e.line == line || e.row_lines.contains(&line)
                        });
                    }
                }
            }
            None => {
                if let Some(feature) = record.feature_name.as_deref() {
                    let feature = feature.trim();
                    narrow(&mut candidates, |id| {
                        self.entries[id].feature_name.eq_ignore_ascii_case(feature)
                    });
                }
            }
        }

        match candidates.as_slice() {
            [] => Lookup::NotFound,
            [(id, hint)] => Lookup::Unique(Candidate {
                at: self.entries[*id].at,
                row_hint: *hint,
            }),
            many => Lookup::Ambiguous(
                many.iter()
                    .map(|(id, _)| {
                        let e = &self.entries[*id];
                        format!("{}: {}", e.path.join("/"), e.name)
                    })
                    .collect(),
            ),
        }
    }
}

/// Keep only candidates satisfying `keep`, unless none do.
fn narrow(candidates: &mut Vec<(usize, Option<usize>)>, keep: impl Fn(usize) -> bool) {
    if candidates.iter().any(|(id, _)| keep(*id)) {
        candidates.retain(|(id, _)| keep(*id));
    }
}

/// Path components after dropping URI prefixes and separators.
pub fn path_components(path: &str) -> Vec<&str> {
    let trimmed = path.trim();
    let trimmed = trimmed
        .strip_prefix("classpath:")
        .or_else(|| trimmed.strip_prefix("file://"))
        .or_else(|| trimmed.strip_prefix("file:"))
        .unwrap_or(trimmed);
    trimmed
        .split(['/', '\\'])
        .filter(|c| !c.is_empty() && *c != ".")
        .collect()
}

/// True when one path's components are a suffix of the other's.
pub fn paths_match(a: &[&str], b: &[&str]) -> bool {
    if a.is_empty() || b.is_empty() {
        return false;
    }
    let (short, long) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    long.ends_with(short)
}

/// How specifically two paths agree: the number of shared trailing
/// components, with exact equality ranking above any partial match.
pub fn path_score(a: &[&str], b: &[&str]) -> usize {
    if a == b {
        return usize::MAX;
    }
    a.iter()
        .rev()
        .zip(b.iter().rev())
        .take_while(|(x, y)| x == y)
        .count()
}
