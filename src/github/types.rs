use serde::Deserialize;

/// `owner/name` pair identifying a repository.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RepoRef {
	pub owner: String,
	pub name: String,
}

impl RepoRef {
	/// Trims both parts; `None` when either is empty.
	pub fn parse(owner: &str, name: &str) -> Option<Self> {
		let (owner, name) = (owner.trim(), name.trim());
		if owner.is_empty() || name.is_empty() {
			return None;
		}
		Some(Self {
			owner: owner.to_string(),
			name: name.to_string(),
		})
	}
}

impl std::fmt::Display for RepoRef {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}/{}", self.owner, self.name)
	}
}

/// Account as returned inside commits and issues.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct User {
	pub login: String,
	pub avatar_url: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct TreeRef {
	pub sha: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct GitAuthor {
	pub name: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct CommitDetail {
	pub message: String,
	pub tree: TreeRef,
	pub author: Option<GitAuthor>,
}

/// One element of `GET /repos/{owner}/{repo}/commits`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Commit {
	pub sha: String,
	pub commit: CommitDetail,
	/// Linked GitHub account; absent when the author email matches none.
	pub author: Option<User>,
}

/// One element of `GET /repos/{owner}/{repo}/issues`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Issue {
	pub number: u64,
	pub title: String,
	#[serde(default)]
	pub assignees: Vec<User>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
	Blob,
	Tree,
	/// Submodule pointer.
	Commit,
}

impl EntryKind {
	pub fn is_dir(self) -> bool {
		self == EntryKind::Tree
	}
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct TreeEntry {
	pub path: String,
	#[serde(rename = "type")]
	pub kind: EntryKind,
}

/// Response of `GET /repos/{owner}/{repo}/git/trees/{sha}`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Tree {
	pub sha: String,
	pub tree: Vec<TreeEntry>,
	#[serde(default)]
	pub truncated: bool,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn repo_ref_rejects_blank_parts() {
		assert_eq!(RepoRef::parse("", "zed"), None);
		assert_eq!(RepoRef::parse("zed-industries", "  "), None);
		let repo = RepoRef::parse(" rust-lang ", "rust").unwrap();
		assert_eq!(repo.to_string(), "rust-lang/rust");
	}

	#[test]
	fn parses_recursive_tree() {
		let body = r#"{
			"sha": "9fb037999f264ba9a7fc6274d15fa3ae2ab98312",
			"url": "https://api.github.com/repos/o/r/trees/9fb0",
			"tree": [
				{"path": "src", "mode": "040000", "type": "tree", "sha": "a"},
				{"path": "src/lib.rs", "mode": "100644", "type": "blob", "size": 30, "sha": "b"},
				{"path": "vendor/dep", "mode": "160000", "type": "commit", "sha": "c"}
			],
			"truncated": false
		}"#;
		let tree: Tree = serde_json::from_str(body).unwrap();
		assert_eq!(tree.tree.len(), 3);
		assert!(tree.tree[0].kind.is_dir());
		assert_eq!(tree.tree[1].kind, EntryKind::Blob);
		assert_eq!(tree.tree[2].kind, EntryKind::Commit);
		assert!(!tree.truncated);
	}

	#[test]
	fn parses_commit_without_linked_account() {
		let body = r#"[{
			"sha": "6dcb09b",
			"commit": {
				"message": "Fix all the bugs",
				"tree": {"sha": "691272480426f78a0138979dd3ce63b77f706feb"},
				"author": {"name": "Monalisa Octocat", "email": "m@example.com"}
			},
			"author": null
		}]"#;
		let commits: Vec<Commit> = serde_json::from_str(body).unwrap();
		assert_eq!(commits[0].commit.tree.sha, "691272480426f78a0138979dd3ce63b77f706feb");
		assert!(commits[0].author.is_none());
		assert_eq!(commits[0].commit.author.as_ref().unwrap().name, "Monalisa Octocat");
	}

	#[test]
	fn parses_issue_assignees() {
		let body = r#"[{
			"number": 1347,
			"title": "Found a bug",
			"assignees": [{"login": "octocat", "avatar_url": "https://github.com/images/error/octocat.gif"}]
		}, {
			"number": 1348,
			"title": "No one on it"
		}]"#;
		let issues: Vec<Issue> = serde_json::from_str(body).unwrap();
		assert_eq!(issues[0].assignees[0].login, "octocat");
		assert!(issues[1].assignees.is_empty());
	}
}
