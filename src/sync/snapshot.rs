use std::path::Path;

use tracing::debug;

use crate::error::{Result, SyncError};
use crate::types::IssueRecord;

use super::enrich::EnrichedIssue;

/// Where the per-run JSON snapshot lands, relative to the working directory.
/// Overwritten on every run; nothing reads it back.
pub const SNAPSHOT_PATH: &str = "issues.json";

/// Project enriched issues into the flat record shape.
pub fn normalize(issues: Vec<EnrichedIssue>) -> Vec<IssueRecord> {
    issues.into_iter().map(record).collect()
}

fn record(enriched: EnrichedIssue) -> IssueRecord {
    let EnrichedIssue { issue, comments } = enriched;

    let assignees = if issue.assignees.is_empty() {
        None
    } else {
        Some(issue.assignees.into_iter().map(|u| u.login).collect())
    };

    IssueRecord {
        url: issue.html_url,
        title: issue.title,
        number: issue.number,
        creator: issue.user.login,
        assignees,
        labels: issue.labels.into_iter().map(|l| l.name).collect(),
        comments,
        body: issue.body,
        created_at: issue.created_at,
    }
}

pub fn write(path: &Path, records: &[IssueRecord]) -> Result<()> {
    let contents = serde_json::to_string_pretty(records)?;
    std::fs::write(path, contents).map_err(|e| SyncError::SnapshotWrite {
        path: path.display().to_string(),
        source: e,
    })?;
    debug!(path = %path.display(), count = records.len(), "wrote snapshot");
    Ok(())
}
