//! Data source seam between the collector and the CI platform
//!
//! The collector only needs four lookups. Keeping them behind a trait lets
//! the GitHub client and the in-memory fake drive the same code path.

use crate::error::Result;
use crate::types::{Repository, WorkflowJob, WorkflowRun};
use std::future::Future;

/// CI platform lookups used by the collector.
///
/// Futures are `Send` so a source can be driven from any Tokio runtime.
pub trait CiSource {
    /// All repositories of an organization
    fn list_repositories<'a>(
        &'a self,
        org: &'a str,
    ) -> impl Future<Output = Result<Vec<Repository>>> + Send + 'a;

    /// Newest completed run of the workflow named `action`, if any
    fn latest_completed_run<'a>(
        &'a self,
        org: &'a str,
        repo: &'a str,
        action: &'a str,
    ) -> impl Future<Output = Result<Option<WorkflowRun>>> + Send + 'a;

    /// Jobs of a run, in API order
    fn list_jobs<'a>(
        &'a self,
        org: &'a str,
        repo: &'a str,
        run_id: u64,
    ) -> impl Future<Output = Result<Vec<WorkflowJob>>> + Send + 'a;

    /// Raw log text of a job
    fn fetch_job_log<'a>(
        &'a self,
        org: &'a str,
        repo: &'a str,
        job_id: u64,
    ) -> impl Future<Output = Result<String>> + Send + 'a;
}
