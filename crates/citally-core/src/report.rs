//! Nested pass/fail report and the aggregation step
//!
//! Shape on disk:
//!
//! ```json
//! {
//!   "ci": { "unit-test": { "teamA": { "pass": 1, "fail": 0 } } },
//!   "_last_updated": "2024-05-01 09:30 AM +00:00"
//! }
//! ```
//!
//! Every level is an ordered map so the written JSON is stable between runs.

use crate::log::passed;
use crate::types::TestOutcomes;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Pass/fail counters for one (action, test, section) cell.
///
/// `pass + fail` equals the number of runs that contributed to the cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportEntry {
    /// Runs in which the test passed
    pub pass: u64,
    /// Runs in which the test failed or was missing from the log
    pub fail: u64,
}

impl ReportEntry {
    /// Count one run.
    #[inline]
    pub fn record(&mut self, passed: bool) {
        if passed {
            self.pass += 1;
        } else {
            self.fail += 1;
        }
    }

    /// Runs observed for this cell
    #[inline]
    pub const fn total(&self) -> u64 {
        self.pass + self.fail
    }

    /// Fraction of passing runs, `None` before the first run.
    pub fn pass_rate(&self) -> Option<f64> {
        match self.total() {
            0 => None,
            total => Some(self.pass as f64 / total as f64),
        }
    }
}

/// section → counters
pub type SectionTally = BTreeMap<String, ReportEntry>;

/// test → section → counters
pub type TestTally = BTreeMap<String, SectionTally>;

/// action → test → section → counters, plus the generation stamp.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    /// Tallies keyed by action name
    #[serde(flatten)]
    pub actions: BTreeMap<String, TestTally>,

    /// When the report was generated, in the configured zone
    #[serde(
        rename = "_last_updated",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub last_updated: Option<String>,
}

impl Report {
    /// Empty report
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge one run's outcomes for `action` into the `section` column.
    ///
    /// Each expected test gets exactly one increment: `pass` when the log
    /// reported it passed, `fail` otherwise (including when it is absent).
    /// Outcomes for tests not in `expected_tests` are ignored.
    pub fn record_run<S: AsRef<str>>(
        &mut self,
        action: &str,
        outcomes: &TestOutcomes,
        section: &str,
        expected_tests: &[S],
    ) {
        let tests = self.actions.entry(action.to_owned()).or_default();
        for test in expected_tests {
            let test = test.as_ref();
            tests
                .entry(test.to_owned())
                .or_default()
                .entry(section.to_owned())
                .or_default()
                .record(passed(outcomes, test));
        }
    }

    /// Counters for one cell, if any run reached it.
    pub fn entry(&self, action: &str, test: &str, section: &str) -> Option<&ReportEntry> {
        self.actions.get(action)?.get(test)?.get(section)
    }

    /// Set the generation stamp.
    pub fn stamp(&mut self, timestamp: impl Into<String>) {
        self.last_updated = Some(timestamp.into());
    }

    /// True when no run was recorded
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}
