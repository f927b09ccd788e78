mod issue;
mod record;

pub use issue::{Issue, IssueComment, Label, PullRequestRef, User};
pub use record::{CommentField, CommentRecord, IssueRecord};
