use tracing::debug;

use crate::error::Result;
use crate::github::{GitHubClient, Repository};
use crate::types::Issue;

pub const PAGE_SIZE: u32 = 100;

/// Accumulate every open issue for the repository, walking pages from 1
/// until the first empty page, then drop pull-request entries.
pub async fn open_issues(github: &GitHubClient, repo: &Repository) -> Result<Vec<Issue>> {
    let mut all = Vec::new();
    let mut page = 1;

    loop {
        let batch = github.open_issues_page(repo, page, PAGE_SIZE).await?;
        if batch.is_empty() {
            break;
        }
        debug!(page, count = batch.len(), "fetched issues page");
        all.extend(batch);
        page += 1;
    }

    let before = all.len();
    all.retain(|issue| !issue.is_pull_request());
    if all.len() < before {
        debug!(dropped = before - all.len(), "excluded pull requests");
    }

    Ok(all)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn page_matcher(page: &str) -> Matcher {
        Matcher::AllOf(vec![
            Matcher::UrlEncoded("state".into(), "open".into()),
            Matcher::UrlEncoded("per_page".into(), "100".into()),
            Matcher::UrlEncoded("page".into(), page.into()),
        ])
    }

    fn issue_json(number: u64, pull_request: bool) -> serde_json::Value {
        let mut issue = serde_json::json!({
            "number": number,
            "title": format!("Issue {number}"),
            "body": null,
            "user": { "login": "alice" },
            "assignees": [],
            "labels": [],
            "comments": 0,
            "html_url": format!("https://github.com/acme/widgets/issues/{number}"),
            "created_at": "2024-03-01T12:00:00Z"
        });
        if pull_request {
            issue["pull_request"] =
                serde_json::json!({ "url": "https://api.github.com/repos/acme/widgets/pulls/9" });
        }
        issue
    }

    #[tokio::test]
    async fn test_stops_exactly_at_first_empty_page() {
        let mut server = mockito::Server::new_async().await;
        let body = |issues: Vec<serde_json::Value>| serde_json::Value::Array(issues).to_string();

        server
            .mock("GET", "/repos/acme/widgets/issues")
            .match_query(page_matcher("1"))
            .with_header("content-type", "application/json")
            .with_body(body(vec![issue_json(1, false), issue_json(2, false)]))
            .create_async()
            .await;
        server
            .mock("GET", "/repos/acme/widgets/issues")
            .match_query(page_matcher("2"))
            .with_header("content-type", "application/json")
            .with_body(body(vec![issue_json(3, false)]))
            .create_async()
            .await;
        let empty = server
            .mock("GET", "/repos/acme/widgets/issues")
            .match_query(page_matcher("3"))
            .with_header("content-type", "application/json")
            .with_body("[]")
            .expect(1)
            .create_async()
            .await;
        let beyond = server
            .mock("GET", "/repos/acme/widgets/issues")
            .match_query(page_matcher("4"))
            .with_header("content-type", "application/json")
            .with_body("[]")
            .expect(0)
            .create_async()
            .await;

        let client = GitHubClient::with_base_url(None, server.url());
        let repo = Repository::new("acme", "widgets");
        let issues = open_issues(&client, &repo).await.unwrap();

        assert_eq!(
            issues.iter().map(|i| i.number).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
        empty.assert_async().await;
        beyond.assert_async().await;
    }

    #[tokio::test]
    async fn test_excludes_pull_requests() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/repos/acme/widgets/issues")
            .match_query(page_matcher("1"))
            .with_header("content-type", "application/json")
            .with_body(
                serde_json::json!([
                    issue_json(1, false),
                    issue_json(2, true),
                    issue_json(3, false),
                    issue_json(4, true),
                ])
                .to_string(),
            )
            .create_async()
            .await;
        server
            .mock("GET", "/repos/acme/widgets/issues")
            .match_query(page_matcher("2"))
            .with_header("content-type", "application/json")
            .with_body("[]")
            .create_async()
            .await;

        let client = GitHubClient::with_base_url(None, server.url());
        let repo = Repository::new("acme", "widgets");
        let issues = open_issues(&client, &repo).await.unwrap();

        assert_eq!(
            issues.iter().map(|i| i.number).collect::<Vec<_>>(),
            vec![1, 3]
        );
    }

    #[tokio::test]
    async fn test_transport_error_aborts_the_fetch() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/repos/acme/widgets/issues")
            .match_query(page_matcher("1"))
            .with_status(500)
            .with_body("boom")
            .create_async()
            .await;

        let client = GitHubClient::with_base_url(None, server.url());
        let repo = Repository::new("acme", "widgets");
        assert!(open_issues(&client, &repo).await.is_err());
    }
}
