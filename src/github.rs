use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::error::{Result, SyncError};
use crate::types::{Issue, IssueComment};

const API_ENDPOINT: &str = "https://api.github.com";
const ACCEPT: &str = "application/vnd.github+json";
const USER_AGENT: &str = concat!("github-notion-sync/", env!("CARGO_PKG_VERSION"));

/// Owner/name pair identifying the repository to sync.
#[derive(Debug, Clone)]
pub struct Repository {
    pub owner: String,
    pub name: String,
}

impl Repository {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }
}

pub struct GitHubClient {
    http: Client,
    token: Option<String>,
    base_url: String,
}

impl GitHubClient {
    /// Without a token, requests run unauthenticated against GitHub's lower
    /// anonymous rate limit.
    pub fn new(token: Option<String>) -> Self {
        Self::with_base_url(token, API_ENDPOINT.to_string())
    }

    pub fn with_base_url(token: Option<String>, base_url: String) -> Self {
        Self {
            http: Client::new(),
            token,
            base_url,
        }
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<T> {
        let mut request = self
            .http
            .get(format!("{}{}", self.base_url, path))
            .header("Accept", ACCEPT)
            .header("User-Agent", USER_AGENT)
            .query(query);

        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;

        if !response.status().is_success() {
            return Err(SyncError::GitHubApi {
                status: response.status().as_u16(),
                message: response
                    .text()
                    .await
                    .unwrap_or_else(|_| "<failed to read response body>".to_string()),
            });
        }

        Ok(response.json().await?)
    }

    /// One page of the open-issues listing. The result still contains pull
    /// requests; callers filter them out.
    pub async fn open_issues_page(
        &self,
        repo: &Repository,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<Issue>> {
        self.get(
            &format!("/repos/{}/{}/issues", repo.owner, repo.name),
            &[
                ("state", "open".to_string()),
                ("per_page", per_page.to_string()),
                ("page", page.to_string()),
            ],
        )
        .await
    }

    pub async fn issue_comments(&self, repo: &Repository, number: u64) -> Result<Vec<IssueComment>> {
        self.get(
            &format!("/repos/{}/{}/issues/{}/comments", repo.owner, repo.name, number),
            &[],
        )
        .await
    }
}
