use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("GitHub API error (status {status}): {message}")]
    GitHubApi { status: u16, message: String },

    #[error("Notion API error (status {status}): {message}")]
    NotionApi { status: u16, message: String },

    #[error("Failed to read config file at {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error(
        "No Notion token found. Set NOTION_API_KEY env var or add notion_token to ~/.config/github-notion-sync/config.toml"
    )]
    MissingNotionToken,

    #[error(
        "No Notion database id found. Set NOTION_DB_ID env var or add database_id to ~/.config/github-notion-sync/config.toml"
    )]
    MissingDatabaseId,

    #[error("Failed to write snapshot {path}: {source}")]
    SnapshotWrite {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{stage}: {} of {total} requests failed", failures.len())]
    BatchFailed {
        stage: &'static str,
        total: usize,
        failures: Vec<SyncError>,
    },
}

pub type Result<T> = std::result::Result<T, SyncError>;
