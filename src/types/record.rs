use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::issue::IssueComment;

/// Flat projection of an enriched issue. This is the shape written to the
/// snapshot file and read by the publisher.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct IssueRecord {
    pub url: String,
    pub title: String,
    pub number: u64,
    pub creator: String,
    /// `None` (serialized as `null`) when the issue has no assignees.
    pub assignees: Option<Vec<String>>,
    pub labels: Vec<String>,
    pub comments: CommentField,
    pub body: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Issues with a zero comment count are never enriched and keep the raw
/// count; enriched issues carry the fetched thread. The snapshot therefore
/// holds a number for some issues and an array for others.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum CommentField {
    Count(u64),
    Fetched(Vec<CommentRecord>),
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CommentRecord {
    pub body: String,
    pub user: String,
    pub url: String,
}

impl From<&IssueComment> for CommentRecord {
    fn from(comment: &IssueComment) -> Self {
        Self {
            body: comment.body.clone(),
            user: comment.user.login.clone(),
            url: comment.html_url.clone(),
        }
    }
}
