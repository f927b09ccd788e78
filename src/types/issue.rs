use chrono::{DateTime, Utc};
use serde::Deserialize;

/// An issue as returned by the GitHub issues listing endpoint.
///
/// The listing mixes issues and pull requests; pull requests carry a
/// `pull_request` object and are filtered out after fetching.
#[derive(Deserialize, Debug, Clone)]
pub struct Issue {
    pub number: u64,
    pub title: String,
    pub body: Option<String>,
    pub user: User,
    #[serde(default)]
    pub assignees: Vec<User>,
    #[serde(default)]
    pub labels: Vec<Label>,
    /// Comment count. The enricher fetches the actual thread when nonzero.
    pub comments: u64,
    pub pull_request: Option<PullRequestRef>,
    pub html_url: String,
    pub created_at: DateTime<Utc>,
}

impl Issue {
    pub fn is_pull_request(&self) -> bool {
        self.pull_request.is_some()
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct User {
    pub login: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Label {
    pub name: String,
}

/// Present only on pull-request entries; the contents are irrelevant.
#[derive(Deserialize, Debug, Clone)]
pub struct PullRequestRef {}

#[derive(Deserialize, Debug, Clone)]
pub struct IssueComment {
    pub body: String,
    pub user: User,
    pub html_url: String,
}
