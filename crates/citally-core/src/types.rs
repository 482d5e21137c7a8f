//! Core type definitions for data-source records and parsed outcomes

use std::collections::HashMap;

/// Test name → passed, as parsed from one job log.
///
/// Later occurrences of a name in the log overwrite earlier ones.
pub type TestOutcomes = HashMap<String, bool>;

/// Repository entry from an organization listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    /// Repository name (without the owner prefix)
    pub name: String,
}

impl Repository {
    /// Create a repository record from its name
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Workflow run status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum WorkflowStatus {
    /// Waiting for a runner
    Queued,
    /// Currently executing
    InProgress,
    /// Finished
    Completed,
}

impl WorkflowStatus {
    /// Parse the API status string. Unknown strings count as completed.
    #[inline]
    pub fn parse(s: &str) -> Self {
        match s {
            "queued" => Self::Queued,
            "in_progress" => Self::InProgress,
            _ => Self::Completed,
        }
    }
}

/// A single workflow run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowRun {
    /// Run ID
    pub id: u64,
    /// Workflow name (the "action" in report terms)
    pub name: String,
    /// Run status
    pub status: WorkflowStatus,
}

impl WorkflowRun {
    /// A completed run with the given id and name, for fixtures and fakes
    pub fn completed(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            status: WorkflowStatus::Completed,
        }
    }
}

/// A single job within a workflow run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowJob {
    /// Job ID
    pub id: u64,
    /// Job name, matched against `preferred_job`
    pub name: String,
}

impl WorkflowJob {
    /// Create a job record
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Counters for one collection pass.
///
/// Only logged and printed; never written into the report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollectStats {
    /// Repositories whose name contained `group`
    pub repositories_seen: u32,
    /// Repositories without a resolvable section
    pub repositories_skipped: u32,
    /// (repository, action) pairs that contributed a log
    pub runs_recorded: u32,
    /// (repository, action) pairs that yielded no log
    pub actions_skipped: u32,
}
