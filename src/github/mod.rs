//! GitHub REST access: commits, issues and git trees.

mod client;
mod error;
mod types;

pub use client::GitHubClient;
pub use error::FetchError;
pub use types::{
	Commit, CommitDetail, EntryKind, GitAuthor, Issue, RepoRef, Tree, TreeEntry, TreeRef, User,
};
