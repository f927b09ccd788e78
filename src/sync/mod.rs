//! The four pipeline stages, executed strictly in order: fetch, enrich,
//! snapshot, publish.

pub mod enrich;
pub mod fetch;
pub mod publish;
pub mod snapshot;
pub mod tags;

use std::path::Path;

use tracing::info;

use crate::error::Result;
use crate::github::{GitHubClient, Repository};
use crate::notion::NotionClient;

/// Cap on outstanding requests in the enrich and publish fan-outs.
pub(crate) const MAX_IN_FLIGHT: usize = 8;

pub struct SyncReport {
    pub issues: usize,
    pub pages_created: usize,
}

/// Run one full sync. Everything the pipeline needs arrives as a parameter;
/// only `main` reads the environment.
pub async fn run(
    github: &GitHubClient,
    notion: &NotionClient,
    repo: &Repository,
    database_id: &str,
    snapshot_path: &Path,
) -> Result<SyncReport> {
    let issues = fetch::open_issues(github, repo).await?;
    info!(count = issues.len(), "fetched open issues");

    let enriched = enrich::attach_comments(github, repo, issues).await?;

    let records = snapshot::normalize(enriched);
    snapshot::write(snapshot_path, &records)?;

    let universe = tags::collect(&records);
    info!(
        labels = ?universe.labels,
        creators = ?universe.creators,
        assignees = ?universe.assignees,
        "aggregated tag universes"
    );

    publish::sync_schema(notion, database_id, &universe).await?;
    let pages_created = publish::create_pages(notion, database_id, &records).await?;

    Ok(SyncReport {
        issues: records.len(),
        pages_created,
    })
}
