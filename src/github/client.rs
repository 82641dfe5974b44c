use log::{debug, warn};
use reqwest::Url;
use reqwest::header::ACCEPT;
use serde::de::DeserializeOwned;

use super::error::FetchError;
use super::types::{Commit, Issue, RepoRef, Tree, TreeEntry};

const MEDIA_TYPE: &str = "application/vnd.github+json";

/// Unauthenticated client for the handful of REST endpoints the viewer reads.
#[derive(Clone, Debug)]
pub struct GitHubClient {
	http: reqwest::Client,
	base: Url,
}

impl GitHubClient {
	pub fn new(api_base: &str) -> Result<Self, FetchError> {
		let base = Url::parse(api_base).map_err(|_| FetchError::InvalidBase(api_base.into()))?;
		if base.cannot_be_a_base() {
			return Err(FetchError::InvalidBase(api_base.into()));
		}
		Ok(Self {
			http: reqwest::Client::new(),
			base,
		})
	}

	/// `{base}/repos/{owner}/{name}/{tail...}` with every segment percent-encoded.
	fn endpoint(&self, repo: &RepoRef, tail: &[&str]) -> Url {
		let mut url = self.base.clone();
		if let Ok(mut segments) = url.path_segments_mut() {
			segments
				.pop_if_empty()
				.extend(["repos", repo.owner.as_str(), repo.name.as_str()])
				.extend(tail);
		}
		url
	}

	async fn get_json<T: DeserializeOwned>(
		&self,
		url: Url,
		query: &[(&str, String)],
	) -> Result<T, FetchError> {
		debug!("GET {url} {query:?}");
		let response = self
			.http
			.get(url.clone())
			.query(query)
			.header(ACCEPT, MEDIA_TYPE)
			.send()
			.await?;
		let status = response.status();
		if !status.is_success() {
			return Err(FetchError::Status {
				status: status.as_u16(),
				url: url.to_string(),
			});
		}
		Ok(response.json::<T>().await?)
	}

	/// Most recent commits on the default branch, newest first.
	pub async fn list_commits(&self, repo: &RepoRef, per_page: u8) -> Result<Vec<Commit>, FetchError> {
		let url = self.endpoint(repo, &["commits"]);
		self.get_json(url, &[("per_page", per_page.to_string())])
			.await
	}

	pub async fn list_issues(&self, repo: &RepoRef, per_page: u8) -> Result<Vec<Issue>, FetchError> {
		let url = self.endpoint(repo, &["issues"]);
		self.get_json(url, &[("per_page", per_page.to_string())])
			.await
	}

	pub async fn get_tree(&self, repo: &RepoRef, sha: &str, recursive: bool) -> Result<Tree, FetchError> {
		let url = self.endpoint(repo, &["git", "trees", sha]);
		let query = if recursive {
			vec![("recursive", "1".to_string())]
		} else {
			Vec::new()
		};
		self.get_json(url, &query).await
	}

	/// Flattened listing of every path reachable from `tree_sha`.
	pub async fn fetch_tree_entries(
		&self,
		repo: &RepoRef,
		tree_sha: &str,
	) -> Result<Vec<TreeEntry>, FetchError> {
		let tree = self.get_tree(repo, tree_sha, true).await?;
		if tree.truncated {
			warn!(
				"tree {} of {repo} was truncated by the API; showing {} entries",
				tree.sha,
				tree.tree.len()
			);
		}
		Ok(tree.tree)
	}
}
