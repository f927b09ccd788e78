use std::error::Error;
use std::path::Path;

use colored::Colorize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use github_notion_sync::config::Config;
use github_notion_sync::error::Result;
use github_notion_sync::github::GitHubClient;
use github_notion_sync::notion::NotionClient;
use github_notion_sync::sync::{self, snapshot};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {e}");

        let mut source = e.source();
        while let Some(cause) = source {
            eprintln!("Caused by: {cause}");
            source = cause.source();
        }

        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let config = Config::load()?;

    let github = GitHubClient::new(config.github_token());
    let notion = NotionClient::new(config.notion_token()?);
    let repo = config.repository();
    let database_id = config.database_id()?;

    let report = sync::run(
        &github,
        &notion,
        &repo,
        &database_id,
        Path::new(snapshot::SNAPSHOT_PATH),
    )
    .await?;

    println!(
        "{} {} issues from {}/{} into {} pages (snapshot: {})",
        "Synced".green().bold(),
        report.issues,
        repo.owner,
        repo.name,
        report.pages_created,
        snapshot::SNAPSHOT_PATH
    );

    Ok(())
}
