use futures::stream::{self, StreamExt};
use tracing::{debug, warn};

use crate::error::{Result, SyncError};
use crate::github::{GitHubClient, Repository};
use crate::types::{CommentField, CommentRecord, Issue};

use super::MAX_IN_FLIGHT;

/// An issue plus whatever its comments field resolved to: the raw count when
/// nothing was fetched, the thread when it was.
#[derive(Debug)]
pub struct EnrichedIssue {
    pub issue: Issue,
    pub comments: CommentField,
}

/// Fetch the comment thread for every issue reporting a nonzero count.
/// Requests run through a bounded buffer; results keep input order. If any
/// request fails the stage fails, but every failure is captured and logged
/// first rather than only the one that lost the race.
pub async fn attach_comments(
    github: &GitHubClient,
    repo: &Repository,
    issues: Vec<Issue>,
) -> Result<Vec<EnrichedIssue>> {
    let total = issues.len();

    let results: Vec<(u64, Result<EnrichedIssue>)> = stream::iter(issues)
        .map(|issue| async move {
            let number = issue.number;
            (number, enrich_one(github, repo, issue).await)
        })
        .buffered(MAX_IN_FLIGHT)
        .collect()
        .await;

    let mut enriched = Vec::with_capacity(total);
    let mut failures = Vec::new();
    for (number, outcome) in results {
        match outcome {
            Ok(issue) => enriched.push(issue),
            Err(e) => {
                warn!(issue = number, error = %e, "comment fetch failed");
                failures.push(e);
            }
        }
    }

    if !failures.is_empty() {
        return Err(SyncError::BatchFailed {
            stage: "comment fetch",
            total,
            failures,
        });
    }

    Ok(enriched)
}

async fn enrich_one(
    github: &GitHubClient,
    repo: &Repository,
    issue: Issue,
) -> Result<EnrichedIssue> {
    let comments = if issue.comments > 0 {
        let thread = github.issue_comments(repo, issue.number).await?;
        debug!(issue = issue.number, count = thread.len(), "fetched comments");
        CommentField::Fetched(thread.iter().map(CommentRecord::from).collect())
    } else {
        CommentField::Count(issue.comments)
    };

    Ok(EnrichedIssue { issue, comments })
}
