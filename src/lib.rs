//! One-shot sync of a repository's open GitHub issues (with comments) into a
//! Notion database: one page per issue plus shared multi-select schemas for
//! labels, creators, and assignees.

pub mod config;
pub mod error;
pub mod github;
pub mod markdown;
pub mod notion;
pub mod sync;
pub mod types;
