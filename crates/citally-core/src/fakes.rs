//! In-memory CI source (testing only)
//!
//! [`MemorySource`] answers the [`CiSource`] lookups from maps filled through
//! builder methods, including forced HTTP failures for job and log fetches.

use crate::error::{Error, Result};
use crate::source::CiSource;
use crate::types::{Repository, WorkflowJob, WorkflowRun, WorkflowStatus};
use std::collections::HashMap;
use std::future::Future;

/// Canned response for a job or log lookup
#[derive(Debug, Clone)]
enum Canned<T> {
    Ok(T),
    Status(u16),
}

impl<T: Clone> Canned<T> {
    fn get(&self, what: &str) -> Result<T> {
        match self {
            Canned::Ok(value) => Ok(value.clone()),
            Canned::Status(code) => Err(Error::Workflow(format!(
                "GitHub API error fetching {}: {}",
                what, code
            ))),
        }
    }
}

/// In-memory [`CiSource`].
///
/// Runs are stored newest first, matching the API's ordering.
#[derive(Debug, Default)]
pub struct MemorySource {
    repositories: Vec<Repository>,
    runs: HashMap<String, Vec<WorkflowRun>>,
    jobs: HashMap<u64, Canned<Vec<WorkflowJob>>>,
    logs: HashMap<u64, Canned<String>>,
    fail_listing: bool,
}

impl MemorySource {
    /// Empty source
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a repository to the organization listing
    pub fn with_repository(mut self, name: &str) -> Self {
        self.repositories.push(Repository::new(name));
        self
    }

    /// Append a run to a repository; earlier calls are newer runs
    pub fn with_run(mut self, repo: &str, run: WorkflowRun) -> Self {
        self.runs.entry(repo.to_string()).or_default().push(run);
        self
    }

    /// Jobs returned for a run
    pub fn with_jobs(mut self, run_id: u64, jobs: Vec<WorkflowJob>) -> Self {
        self.jobs.insert(run_id, Canned::Ok(jobs));
        self
    }

    /// Make the job listing of a run fail with an HTTP status
    pub fn with_jobs_status(mut self, run_id: u64, status: u16) -> Self {
        self.jobs.insert(run_id, Canned::Status(status));
        self
    }

    /// Log text returned for a job
    pub fn with_log(mut self, job_id: u64, log: &str) -> Self {
        self.logs.insert(job_id, Canned::Ok(log.to_string()));
        self
    }

    /// Make the log fetch of a job fail with an HTTP status
    pub fn with_log_status(mut self, job_id: u64, status: u16) -> Self {
        self.logs.insert(job_id, Canned::Status(status));
        self
    }

    /// Make the organization listing fail
    pub fn with_failing_listing(mut self) -> Self {
        self.fail_listing = true;
        self
    }
}

impl CiSource for MemorySource {
    fn list_repositories<'a>(
        &'a self,
        _org: &'a str,
    ) -> impl Future<Output = Result<Vec<Repository>>> + Send + 'a {
        async move {
            if self.fail_listing {
                return Err(Error::Workflow(
                    "GitHub API returned error: 500 Internal Server Error".to_string(),
                ));
            }
            Ok(self.repositories.clone())
        }
    }

    fn latest_completed_run<'a>(
        &'a self,
        _org: &'a str,
        repo: &'a str,
        action: &'a str,
    ) -> impl Future<Output = Result<Option<WorkflowRun>>> + Send + 'a {
        async move {
            Ok(self.runs.get(repo).and_then(|runs| {
                runs.iter()
                    .find(|run| run.status == WorkflowStatus::Completed && run.name == action)
                    .cloned()
            }))
        }
    }

    fn list_jobs<'a>(
        &'a self,
        _org: &'a str,
        _repo: &'a str,
        run_id: u64,
    ) -> impl Future<Output = Result<Vec<WorkflowJob>>> + Send + 'a {
        async move {
            match self.jobs.get(&run_id) {
                Some(canned) => canned.get("jobs"),
                None => Ok(Vec::new()),
            }
        }
    }

    fn fetch_job_log<'a>(
        &'a self,
        _org: &'a str,
        _repo: &'a str,
        job_id: u64,
    ) -> impl Future<Output = Result<String>> + Send + 'a {
        async move {
            match self.logs.get(&job_id) {
                Some(canned) => canned.get("job log"),
                None => Err(Error::Workflow(format!(
                    "GitHub API error fetching job log: 404 (job {})",
                    job_id
                ))),
            }
        }
    }
}
