//! Full-pipeline test against mock GitHub and Notion servers: two open
//! issues (one commented, one not) sharing a label and a creator, checked
//! end to end through fetch, enrichment, snapshot, schema sync, and page
//! creation.

use mockito::Matcher;
use serde_json::json;

use github_notion_sync::github::{GitHubClient, Repository};
use github_notion_sync::notion::NotionClient;
use github_notion_sync::sync;
use github_notion_sync::types::{CommentField, IssueRecord};

fn issues_query(page: &str) -> Matcher {
    Matcher::AllOf(vec![
        Matcher::UrlEncoded("state".into(), "open".into()),
        Matcher::UrlEncoded("per_page".into(), "100".into()),
        Matcher::UrlEncoded("page".into(), page.into()),
    ])
}

#[tokio::test]
async fn test_two_issue_scenario_end_to_end() {
    let mut github_server = mockito::Server::new_async().await;
    let mut notion_server = mockito::Server::new_async().await;

    github_server
        .mock("GET", "/repos/acme/widgets/issues")
        .match_query(issues_query("1"))
        .with_header("content-type", "application/json")
        .with_body(
            json!([
                {
                    "number": 1,
                    "title": "Commented issue",
                    "body": "Something broke",
                    "user": { "login": "alice" },
                    "assignees": [],
                    "labels": [ { "name": "bug" } ],
                    "comments": 1,
                    "html_url": "https://github.com/acme/widgets/issues/1",
                    "created_at": "2024-03-01T12:00:00Z"
                },
                {
                    "number": 2,
                    "title": "Quiet issue",
                    "body": null,
                    "user": { "login": "alice" },
                    "assignees": [],
                    "labels": [ { "name": "bug" } ],
                    "comments": 0,
                    "html_url": "https://github.com/acme/widgets/issues/2",
                    "created_at": "2024-03-02T12:00:00Z"
                }
            ])
            .to_string(),
        )
        .create_async()
        .await;
    github_server
        .mock("GET", "/repos/acme/widgets/issues")
        .match_query(issues_query("2"))
        .with_header("content-type", "application/json")
        .with_body("[]")
        .create_async()
        .await;
    let comments_mock = github_server
        .mock("GET", "/repos/acme/widgets/issues/1/comments")
        .with_header("content-type", "application/json")
        .with_body(
            json!([
                {
                    "body": "me too",
                    "user": { "login": "bob" },
                    "html_url": "https://github.com/acme/widgets/issues/1#issuecomment-1"
                }
            ])
            .to_string(),
        )
        .expect(1)
        .create_async()
        .await;

    let schema_mock = notion_server
        .mock("PATCH", "/databases/db-123")
        .match_body(Matcher::PartialJson(json!({
            "properties": {
                "GitHub_Labels": {
                    "multi_select": { "options": [ { "name": "bug", "color": "gray" } ] }
                },
                "GitHub_Creator": {
                    "multi_select": { "options": [ { "name": "alice", "color": "gray" } ] }
                }
            }
        })))
        .with_header("content-type", "application/json")
        .with_body("{}")
        .expect(1)
        .create_async()
        .await;

    // The commented issue's children: body paragraph, heading, one comment
    // paragraph. Matching on a two-element children prefix singles it out.
    let commented_page = notion_server
        .mock("POST", "/pages")
        .match_body(Matcher::PartialJson(json!({
            "children": [
                { "object": "block", "type": "paragraph" },
                { "object": "block", "type": "heading_2" }
            ],
            "properties": {
                "Name": { "title": [ { "text": { "content": "Commented issue" } } ] }
            }
        })))
        .with_header("content-type", "application/json")
        .with_body("{}")
        .expect(1)
        .create_async()
        .await;
    let quiet_page = notion_server
        .mock("POST", "/pages")
        .match_body(Matcher::PartialJson(json!({
            "children": [ { "object": "block", "type": "heading_2" } ],
            "properties": {
                "Name": { "title": [ { "text": { "content": "Quiet issue" } } ] }
            }
        })))
        .with_header("content-type", "application/json")
        .with_body("{}")
        .expect(1)
        .create_async()
        .await;

    let github = GitHubClient::with_base_url(None, github_server.url());
    let notion = NotionClient::with_base_url("notion-token".to_string(), notion_server.url());
    let repo = Repository::new("acme", "widgets");

    let dir = tempfile::tempdir().unwrap();
    let snapshot_path = dir.path().join("issues.json");

    let report = sync::run(&github, &notion, &repo, "db-123", &snapshot_path)
        .await
        .unwrap();

    assert_eq!(report.issues, 2);
    assert_eq!(report.pages_created, 2);

    comments_mock.assert_async().await;
    schema_mock.assert_async().await;
    commented_page.assert_async().await;
    quiet_page.assert_async().await;

    // Snapshot: two records, comment thread on the first, raw count on the
    // second.
    let contents = std::fs::read_to_string(&snapshot_path).unwrap();
    let records: Vec<IssueRecord> = serde_json::from_str(&contents).unwrap();
    assert_eq!(records.len(), 2);
    assert!(records.iter().all(|r| r.assignees.is_none()));
    match &records[0].comments {
        CommentField::Fetched(thread) => {
            assert_eq!(thread.len(), 1);
            assert_eq!(thread[0].user, "bob");
        }
        other => panic!("expected fetched thread, got {other:?}"),
    }
    assert_eq!(records[1].comments, CommentField::Count(0));
}
