//! GitHub REST API client for organization repository listing

use super::{check_status, github_headers, has_next_page, PER_PAGE};
use crate::error::{Error, Result};
use crate::types::Repository;
use serde::Deserialize;

/// Safety limit on listing pages (100 repositories each)
const MAX_PAGES: u32 = 1000;

/// GitHub API repository object
#[derive(Debug, Deserialize)]
struct GitHubRepository {
    name: String,
}

/// GitHub API client for organization-level lookups
pub struct GitHubApiClient {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl std::fmt::Debug for GitHubApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubApiClient")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish_non_exhaustive()
    }
}

impl GitHubApiClient {
    /// Create a new GitHub API client
    pub fn new(base_url: String, token: Option<String>) -> Self {
        Self {
            client: super::build_client(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        }
    }

    /// List every repository of an organization.
    ///
    /// Endpoint: GET /orgs/{org}/repos
    /// Follows `Link: rel="next"` pagination.
    pub async fn list_org_repositories(&self, org: &str) -> Result<Vec<Repository>> {
        let url = format!("{}/orgs/{}/repos", self.base_url, org);

        let mut repositories = Vec::new();
        let mut page = 1;

        loop {
            let request = self.client.get(&url).query(&[
                ("type", "all".to_string()),
                ("per_page", PER_PAGE.to_string()),
                ("page", page.to_string()),
            ]);

            let response = github_headers(request, self.token.as_deref())
                .send()
                .await
                .map_err(|e| Error::Http(format!("Failed to list repositories: {}", e)))?;

            let response = check_status(response, "organization repositories")?;
            let has_next = has_next_page(response.headers());

            let batch: Vec<GitHubRepository> = response.json().await.map_err(|e| {
                Error::Json(format!("Failed to parse repository listing: {}", e))
            })?;

            if batch.is_empty() {
                break;
            }

            repositories.extend(batch.into_iter().map(|repo| Repository::new(repo.name)));

            if !has_next {
                break;
            }

            page += 1;

            if page > MAX_PAGES {
                return Err(Error::Workflow(
                    "Too many pages in repository listing".to_string(),
                ));
            }
        }

        Ok(repositories)
    }
}
