use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::Deserialize;

use crate::error::{Result, SyncError};
use crate::github::Repository;

/// Repository the original sync was written against; used when neither the
/// environment nor the config file names one.
const DEFAULT_OWNER: &str = "jbx-protocol";
const DEFAULT_REPO: &str = "juice-interface";

#[derive(Debug, Deserialize, Default)]
pub struct Config {
    pub github_token: Option<String>,
    pub notion_token: Option<String>,
    pub database_id: Option<String>,
    pub owner: Option<String>,
    pub repo: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            return Ok(Config::default());
        }

        Self::load_from(&config_path)
    }

    fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| SyncError::ConfigRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| SyncError::ConfigParse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    pub fn config_path() -> Result<PathBuf> {
        ProjectDirs::from("", "", "github-notion-sync")
            .map(|dirs| dirs.config_dir().join("config.toml"))
            .ok_or(SyncError::NoConfigDir)
    }

    /// GitHub token is optional; requests fall back to unauthenticated
    /// (rate-limited) access when it is absent. Env var wins over the file.
    pub fn github_token(&self) -> Option<String> {
        std::env::var("GITHUB_API_KEY")
            .ok()
            .or_else(|| self.github_token.clone())
    }

    pub fn notion_token(&self) -> Result<String> {
        if let Ok(token) = std::env::var("NOTION_API_KEY") {
            return Ok(token);
        }

        self.notion_token.clone().ok_or(SyncError::MissingNotionToken)
    }

    pub fn database_id(&self) -> Result<String> {
        if let Ok(id) = std::env::var("NOTION_DB_ID") {
            return Ok(id);
        }

        self.database_id.clone().ok_or(SyncError::MissingDatabaseId)
    }

    pub fn repository(&self) -> Repository {
        let owner = std::env::var("GITHUB_OWNER")
            .ok()
            .or_else(|| self.owner.clone())
            .unwrap_or_else(|| DEFAULT_OWNER.to_string());
        let repo = std::env::var("GITHUB_REPO")
            .ok()
            .or_else(|| self.repo.clone())
            .unwrap_or_else(|| DEFAULT_REPO.to_string());

        Repository::new(owner, repo)
    }
}
