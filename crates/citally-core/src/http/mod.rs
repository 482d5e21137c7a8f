//! HTTP clients for the GitHub REST API
//!
//! [`GitHubApiClient`] lists organization repositories, [`WorkflowApiClient`]
//! covers runs, jobs, and job logs. [`GitHubSource`] joins them behind the
//! [`CiSource`] trait.

pub mod client;
pub mod workflows;

pub use client::GitHubApiClient;
pub use workflows::WorkflowApiClient;

use crate::error::{Error, Result};
use crate::source::CiSource;
use crate::types::{Repository, WorkflowJob, WorkflowRun};
use reqwest::header::{HeaderMap, ACCEPT};
use reqwest::{RequestBuilder, Response, StatusCode};
use std::future::Future;

/// Default API root when `GITHUB_API_URL` is unset
pub const DEFAULT_API_URL: &str = "https://api.github.com";

const GITHUB_ACCEPT: &str = "application/vnd.github+json";
const GITHUB_API_VERSION: &str = "2022-11-28";
const USER_AGENT: &str = concat!("citally/", env!("CARGO_PKG_VERSION"));

/// Largest page size the REST API accepts
pub(crate) const PER_PAGE: u32 = 100;

fn build_client() -> reqwest::Client {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(std::time::Duration::from_secs(30))
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}

/// Attach the API media type, version, and credential.
pub(crate) fn github_headers(request: RequestBuilder, token: Option<&str>) -> RequestBuilder {
    let request = request
        .header(ACCEPT, GITHUB_ACCEPT)
        .header("X-GitHub-Api-Version", GITHUB_API_VERSION);
    match token {
        Some(token) => request.bearer_auth(token),
        None => request,
    }
}

/// Pagination via the `Link` header
pub(crate) fn has_next_page(headers: &HeaderMap) -> bool {
    headers
        .get("Link")
        .and_then(|v| v.to_str().ok())
        .map(|link| link.contains("rel=\"next\""))
        .unwrap_or(false)
}

/// Map a non-success response to an error; `what` names the lookup.
pub(crate) fn check_status(response: Response, what: &str) -> Result<Response> {
    let status = response.status();

    if status == StatusCode::FORBIDDEN || status == StatusCode::TOO_MANY_REQUESTS {
        let remaining = response
            .headers()
            .get("x-ratelimit-remaining")
            .and_then(|v| v.to_str().ok());
        if remaining == Some("0") {
            return Err(Error::RateLimitExceeded(format!(
                "GitHub API rate limit exceeded while fetching {}",
                what
            )));
        }
    }

    if !status.is_success() {
        return Err(Error::Workflow(format!(
            "GitHub API error fetching {}: {}",
            what, status
        )));
    }

    Ok(response)
}

/// GitHub-backed [`CiSource`]
#[derive(Debug)]
pub struct GitHubSource {
    repos: GitHubApiClient,
    workflows: WorkflowApiClient,
}

impl GitHubSource {
    /// Create a source for an API root and token
    pub fn new(base_url: String, token: String) -> Self {
        Self {
            repos: GitHubApiClient::new(base_url.clone(), Some(token.clone())),
            workflows: WorkflowApiClient::new(base_url, Some(token)),
        }
    }

    /// Create from `GITHUB_TOKEN` and `GITHUB_API_URL`.
    ///
    /// A missing or empty token is an error; nothing is fetched without it.
    pub fn from_env() -> Result<Self> {
        let token = std::env::var("GITHUB_TOKEN")
            .ok()
            .filter(|t| !t.is_empty())
            .ok_or_else(|| Error::MissingToken("GITHUB_TOKEN not found".to_string()))?;

        let base_url =
            std::env::var("GITHUB_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        Ok(Self::new(base_url, token))
    }
}

impl CiSource for GitHubSource {
    fn list_repositories<'a>(
        &'a self,
        org: &'a str,
    ) -> impl Future<Output = Result<Vec<Repository>>> + Send + 'a {
        self.repos.list_org_repositories(org)
    }

    fn latest_completed_run<'a>(
        &'a self,
        org: &'a str,
        repo: &'a str,
        action: &'a str,
    ) -> impl Future<Output = Result<Option<WorkflowRun>>> + Send + 'a {
        self.workflows.find_latest_completed_run(org, repo, action)
    }

    fn list_jobs<'a>(
        &'a self,
        org: &'a str,
        repo: &'a str,
        run_id: u64,
    ) -> impl Future<Output = Result<Vec<WorkflowJob>>> + Send + 'a {
        self.workflows.list_workflow_jobs(org, repo, run_id)
    }

    fn fetch_job_log<'a>(
        &'a self,
        org: &'a str,
        repo: &'a str,
        job_id: u64,
    ) -> impl Future<Output = Result<String>> + Send + 'a {
        self.workflows.fetch_job_log(org, repo, job_id)
    }
}
