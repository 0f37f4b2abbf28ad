//! Per-status counters.

use std::ops::AddAssign;

use livedoc_core::model::Status;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
    pub pending: usize,
    pub undefined: usize,
    pub not_executed: usize,
    pub total: usize,
}

impl StatusCounts {
    pub fn add(&mut self, status: Status) {
        match status {
            Status::Passed => self.passed += 1,
            Status::Failed => self.failed += 1,
            Status::Skipped => self.skipped += 1,
            Status::Pending => self.pending += 1,
            Status::Undefined => self.undefined += 1,
            Status::NotExecuted => self.not_executed += 1,
        }
        self.total += 1;
    }

    pub fn get(&self, status: Status) -> usize {
        match status {
            Status::Passed => self.passed,
            Status::Failed => self.failed,
            Status::Skipped => self.skipped,
            Status::Pending => self.pending,
            Status::Undefined => self.undefined,
            Status::NotExecuted => self.not_executed,
        }
    }

    pub fn executed(&self) -> usize {
        self.total - self.not_executed
    }
}

impl AddAssign for StatusCounts {
    fn add_assign(&mut self, other: Self) {
        self.passed += other.passed;
        self.failed += other.failed;
        self.skipped += other.skipped;
        self.pending += other.pending;
        self.undefined += other.undefined;
        self.not_executed += other.not_executed;
        self.total += other.total;
    }
}

impl FromIterator<Status> for StatusCounts {
    fn from_iter<I: IntoIterator<Item = Status>>(iter: I) -> Self {
        let mut counts = StatusCounts::default();
        for status in iter {
            counts.add(status);
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_sum_to_total() {
        let counts: StatusCounts = Status::ALL.iter().copied().chain([Status::Failed]).collect();
        assert_eq!(counts.total, 7);
        assert_eq!(counts.failed, 2);
        assert_eq!(counts.executed(), 6);
        let sum: usize = Status::ALL.iter().map(|s| counts.get(*s)).sum();
        assert_eq!(sum, counts.total);
    }
}
