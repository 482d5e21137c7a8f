//! GitHub Actions workflow API client: runs, jobs, and job logs

use super::{check_status, github_headers, PER_PAGE};
use crate::error::{Error, Result};
use crate::types::{WorkflowJob, WorkflowRun, WorkflowStatus};
use serde::Deserialize;
use std::time::Duration;

/// Job listing timeout
pub const JOBS_TIMEOUT: Duration = Duration::from_secs(10);

/// Job log download timeout (includes the redirect to raw storage)
pub const LOG_TIMEOUT: Duration = Duration::from_secs(20);

/// The runs endpoint stops returning results past 1000 entries
const MAX_RUN_PAGES: u32 = 10;

/// GitHub API response for workflow runs list
#[derive(Debug, Deserialize)]
struct WorkflowRunsResponse {
    #[serde(default)]
    workflow_runs: Vec<GitHubWorkflowRun>,
}

/// GitHub API workflow run object; other fields are ignored
#[derive(Debug, Deserialize)]
struct GitHubWorkflowRun {
    id: u64,
    name: Option<String>,
    status: Option<String>,
}

/// GitHub API response for workflow jobs list
#[derive(Debug, Deserialize)]
struct WorkflowJobsResponse {
    #[serde(default)]
    jobs: Vec<GitHubWorkflowJob>,
}

/// GitHub API job object; other fields are ignored
#[derive(Debug, Deserialize)]
struct GitHubWorkflowJob {
    id: u64,
    name: String,
}

/// GitHub Actions workflow API client
pub struct WorkflowApiClient {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl std::fmt::Debug for WorkflowApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkflowApiClient")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish_non_exhaustive()
    }
}

impl WorkflowApiClient {
    /// Create new workflow API client
    pub fn new(base_url: String, token: Option<String>) -> Self {
        Self {
            client: super::build_client(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        }
    }

    /// List one page of workflow runs, newest first
    ///
    /// Endpoint: GET /repos/{owner}/{repo}/actions/runs
    /// Query params: status, per_page, page
    pub async fn list_workflow_runs(
        &self,
        owner: &str,
        repo: &str,
        status: Option<&str>,
        per_page: u32,
        page: u32,
    ) -> Result<Vec<WorkflowRun>> {
        let url = format!("{}/repos/{}/{}/actions/runs", self.base_url, owner, repo);

        let mut request = self.client.get(&url).query(&[
            ("per_page", per_page.to_string().as_str()),
            ("page", page.to_string().as_str()),
        ]);

        if let Some(status_filter) = status {
            request = request.query(&[("status", status_filter)]);
        }

        let response = github_headers(request, self.token.as_deref())
            .send()
            .await
            .map_err(|e| Error::Http(format!("Failed to fetch workflow runs: {}", e)))?;

        let response = check_status(response, "workflow runs")?;

        let runs_response: WorkflowRunsResponse = response.json().await.map_err(|e| {
            Error::Json(format!("Failed to parse workflow runs response: {}", e))
        })?;

        Ok(runs_response
            .workflow_runs
            .into_iter()
            .map(convert_workflow_run)
            .collect())
    }

    /// Newest completed run whose workflow name equals `name`.
    ///
    /// Walks completed runs page by page and stops at the first match.
    pub async fn find_latest_completed_run(
        &self,
        owner: &str,
        repo: &str,
        name: &str,
    ) -> Result<Option<WorkflowRun>> {
        for page in 1..=MAX_RUN_PAGES {
            let runs = self
                .list_workflow_runs(owner, repo, Some("completed"), PER_PAGE, page)
                .await?;

            let exhausted = runs.len() < PER_PAGE as usize;
            if let Some(run) = runs.into_iter().find(|run| run.name == name) {
                return Ok(Some(run));
            }
            if exhausted {
                break;
            }
        }
        Ok(None)
    }

    /// List jobs for a workflow run
    ///
    /// Endpoint: GET /repos/{owner}/{repo}/actions/runs/{run_id}/jobs
    pub async fn list_workflow_jobs(
        &self,
        owner: &str,
        repo: &str,
        run_id: u64,
    ) -> Result<Vec<WorkflowJob>> {
        let url = format!(
            "{}/repos/{}/{}/actions/runs/{}/jobs",
            self.base_url, owner, repo, run_id
        );

        let request = self
            .client
            .get(&url)
            .query(&[("per_page", PER_PAGE.to_string())])
            .timeout(JOBS_TIMEOUT);

        let response = github_headers(request, self.token.as_deref())
            .send()
            .await
            .map_err(|e| Error::Http(format!("Failed to fetch workflow jobs: {}", e)))?;

        let response = check_status(response, "jobs")?;

        let jobs_response: WorkflowJobsResponse = response.json().await.map_err(|e| {
            Error::Json(format!("Failed to parse workflow jobs response: {}", e))
        })?;

        Ok(jobs_response
            .jobs
            .into_iter()
            .map(convert_workflow_job)
            .collect())
    }

    /// Download the raw log of a job
    ///
    /// Endpoint: GET /repos/{owner}/{repo}/actions/jobs/{job_id}/logs
    /// The API answers with a redirect to the raw text, which is followed.
    pub async fn fetch_job_log(&self, owner: &str, repo: &str, job_id: u64) -> Result<String> {
        let url = format!(
            "{}/repos/{}/{}/actions/jobs/{}/logs",
            self.base_url, owner, repo, job_id
        );

        let request = self.client.get(&url).timeout(LOG_TIMEOUT);

        let response = github_headers(request, self.token.as_deref())
            .send()
            .await
            .map_err(|e| Error::Http(format!("Failed to fetch job log: {}", e)))?;

        let response = check_status(response, "job log")?;

        response
            .text()
            .await
            .map_err(|e| Error::Http(format!("Failed to read job log body: {}", e)))
    }
}

/// Convert GitHub API job to our type
fn convert_workflow_job(job: GitHubWorkflowJob) -> WorkflowJob {
    WorkflowJob::new(job.id, job.name)
}

/// Convert GitHub API workflow run to our type
fn convert_workflow_run(run: GitHubWorkflowRun) -> WorkflowRun {
    WorkflowRun {
        id: run.id,
        name: run.name.unwrap_or_default(),
        status: run
            .status
            .as_deref()
            .map(WorkflowStatus::parse)
            .unwrap_or(WorkflowStatus::Completed),
    }
}
