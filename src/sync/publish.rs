use futures::stream::{self, StreamExt};
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::error::{Result, SyncError};
use crate::markdown::{self, Block};
use crate::notion::NotionClient;
use crate::types::{CommentField, IssueRecord};

use super::tags::{self, TagUniverse};
use super::MAX_IN_FLIGHT;

/// Replace the database's multi-select option lists with the aggregated
/// universes and (re)declare the date/url properties. Runs before any page
/// is created so every value used on a page exists as an option.
pub async fn sync_schema(
    notion: &NotionClient,
    database_id: &str,
    universe: &TagUniverse,
) -> Result<()> {
    debug!(
        labels = universe.labels.len(),
        creators = universe.creators.len(),
        assignees = universe.assignees.len(),
        "updating database schema"
    );
    notion
        .update_database(database_id, schema_properties(universe))
        .await
}

fn option_list(names: &[String]) -> Vec<Value> {
    names
        .iter()
        .enumerate()
        .map(|(i, name)| json!({ "name": name, "color": tags::color_for(i) }))
        .collect()
}

fn schema_properties(universe: &TagUniverse) -> Value {
    json!({
        "GitHub_Labels": {
            "multi_select": { "options": option_list(&universe.labels) }
        },
        "GitHub_CreatedAt": { "date": {} },
        "GitHub_URL": { "url": {} },
        "GitHub_Creator": {
            "multi_select": { "options": option_list(&universe.creators) }
        },
        "GitHub_Assignees": {
            "multi_select": { "options": option_list(&universe.assignees) }
        },
    })
}

/// Page body: the converted issue body, then a "Comments" heading, then one
/// paragraph per fetched comment.
pub fn page_children(record: &IssueRecord) -> Vec<Block> {
    let mut children = match &record.body {
        Some(body) => markdown::markdown_to_blocks(body),
        None => Vec::new(),
    };

    children.push(Block::heading_2("Comments"));

    if let CommentField::Fetched(comments) = &record.comments {
        for comment in comments {
            children.push(Block::paragraph(&format!(
                "@{}: {}\n{}",
                comment.user, comment.body, comment.url
            )));
        }
    }

    children
}

pub fn page_properties(record: &IssueRecord) -> Value {
    let assignees: Vec<Value> = record
        .assignees
        .as_deref()
        .unwrap_or(&[])
        .iter()
        .map(|name| json!({ "name": name }))
        .collect();
    let labels: Vec<Value> = record
        .labels
        .iter()
        .map(|name| json!({ "name": name }))
        .collect();

    json!({
        "GitHub_URL": { "url": record.url },
        "GitHub_CreatedAt": {
            "date": { "start": record.created_at.to_rfc3339_opts(chrono::SecondsFormat::Secs, true) }
        },
        "GitHub_Creator": { "multi_select": [ { "name": record.creator } ] },
        "GitHub_Assignees": { "multi_select": assignees },
        "GitHub_Labels": { "multi_select": labels },
        "Name": { "title": [ { "text": { "content": record.title } } ] },
    })
}

/// Create one page per record through the bounded fan-out. Failed creations
/// are logged and reported in aggregate; pages already created stay.
pub async fn create_pages(
    notion: &NotionClient,
    database_id: &str,
    records: &[IssueRecord],
) -> Result<usize> {
    let total = records.len();

    let results: Vec<(u64, Result<()>)> = stream::iter(records)
        .map(|record| async move {
            let outcome = notion
                .create_page(database_id, &page_children(record), page_properties(record))
                .await;
            (record.number, outcome)
        })
        .buffered(MAX_IN_FLIGHT)
        .collect()
        .await;

    let mut created = 0;
    let mut failures = Vec::new();
    for (number, outcome) in results {
        match outcome {
            Ok(()) => created += 1,
            Err(e) => {
                warn!(issue = number, error = %e, "page creation failed");
                failures.push(e);
            }
        }
    }

    if !failures.is_empty() {
        return Err(SyncError::BatchFailed {
            stage: "page creation",
            total,
            failures,
        });
    }

    Ok(created)
}
