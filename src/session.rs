//! Per-tab state shared by every panel and the canvas, plus the
//! fetch → build → publish pipeline that user actions kick off.

use leptos::prelude::*;
use leptos::task::spawn_local;
use log::{debug, error, info, warn};

use crate::components::force_graph::GraphSnapshot;
use crate::config::{Theme, VizConfig};
use crate::github::{Commit, FetchError, GitHubClient, Issue, RepoRef, User};
use crate::graph::build_snapshot;

/// Someone shown in the people popup.
#[derive(Clone, Debug, PartialEq)]
pub struct Person {
	pub login: String,
	pub avatar_url: Option<String>,
}

impl From<&User> for Person {
	fn from(user: &User) -> Self {
		Self {
			login: user.login.clone(),
			avatar_url: Some(user.avatar_url.clone()),
		}
	}
}

/// A row of the commit panel.
#[derive(Clone, Debug, PartialEq)]
pub struct CommitEntry {
	pub sha: String,
	pub tree_sha: String,
	pub message: String,
	pub author: Person,
}

impl CommitEntry {
	pub fn from_commit(commit: &Commit, char_limit: usize) -> Self {
		let author = match &commit.author {
			Some(user) => Person::from(user),
			None => Person {
				login: commit
					.commit
					.author
					.as_ref()
					.map(|a| a.name.clone())
					.unwrap_or_else(|| "unknown".to_string()),
				avatar_url: None,
			},
		};
		Self {
			sha: commit.sha.clone(),
			tree_sha: commit.commit.tree.sha.clone(),
			message: truncate_message(&commit.commit.message, char_limit),
			author,
		}
	}
}

/// A row of the issue panel.
#[derive(Clone, Debug, PartialEq)]
pub struct IssueEntry {
	pub number: u64,
	pub title: String,
	pub assignees: Vec<Person>,
}

impl From<&Issue> for IssueEntry {
	fn from(issue: &Issue) -> Self {
		Self {
			number: issue.number,
			title: format!("#{} {}", issue.number, issue.title),
			assignees: issue.assignees.iter().map(Person::from).collect(),
		}
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct PeoplePopup {
	pub title: String,
	pub people: Vec<Person>,
}

/// Cuts `message` to `limit` characters and marks the cut with `...`.
pub fn truncate_message(message: &str, limit: usize) -> String {
	if message.chars().count() > limit {
		let mut cut: String = message.chars().take(limit).collect();
		cut.push_str("...");
		cut
	} else {
		message.to_string()
	}
}

/// Fetches the recursive tree at `tree_sha` and turns it into a snapshot.
pub async fn fetch_snapshot(
	client: &GitHubClient,
	repo: &RepoRef,
	tree_sha: &str,
	include_files: bool,
) -> Result<GraphSnapshot, FetchError> {
	let entries = client.fetch_tree_entries(repo, tree_sha).await?;
	Ok(build_snapshot(repo, &entries, include_files))
}

/// Generations an in-flight fetch was issued under.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Stamp {
	pub repo: u64,
	pub tree: u64,
}

/// Orders repository loads and tree fetches so only the latest result of
/// each kind reaches the screen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RequestLedger {
	latest: Stamp,
	/// Repository generation whose commit list is on screen.
	shown_repo: u64,
}

impl RequestLedger {
	/// A new repository supersedes every earlier load and tree fetch.
	pub fn begin_load(&mut self) -> Stamp {
		self.latest.repo += 1;
		self.latest.tree += 1;
		self.latest
	}

	/// Called once a load's commit list replaces the panels.
	pub fn show_repo(&mut self, stamp: Stamp) {
		self.shown_repo = stamp.repo;
	}

	/// A load that failed leaves the previous repository's panels in place,
	/// so commit clicks on them work again.
	pub fn fail_load(&mut self, stamp: Stamp) {
		if self.is_repo_current(stamp) {
			self.shown_repo = stamp.repo;
		}
	}

	/// A commit click on the repository on screen. `None` while another
	/// repository is loading, since the clicked list is already outdated.
	pub fn begin_select(&mut self) -> Option<Stamp> {
		if self.shown_repo != self.latest.repo {
			return None;
		}
		self.latest.tree += 1;
		Some(self.latest)
	}

	pub fn is_repo_current(&self, stamp: Stamp) -> bool {
		self.latest.repo == stamp.repo
	}

	/// Whether a tree fetched under `stamp` may still be shown.
	pub fn is_current(&self, stamp: Stamp) -> bool {
		self.latest == stamp
	}
}

/// Everything an interaction handler needs. Cheap to copy; provided as
/// context by the home page.
#[derive(Clone, Copy)]
pub struct Session {
	pub config: VizConfig,
	pub repo: RwSignal<Option<RepoRef>>,
	/// `None` while a new repository is loading; the canvas is torn down.
	pub snapshot: RwSignal<Option<GraphSnapshot>>,
	pub commits: RwSignal<Vec<CommitEntry>>,
	pub issues: RwSignal<Vec<IssueEntry>>,
	pub popup: RwSignal<Option<PeoplePopup>>,
	pub include_files: RwSignal<bool>,
	pub theme: RwSignal<Theme>,
	pub error: RwSignal<Option<String>>,
	pub loading: RwSignal<bool>,
	requests: StoredValue<RequestLedger>,
}

impl Session {
	pub fn new(config: VizConfig) -> Self {
		Self {
			config,
			repo: RwSignal::new(None),
			snapshot: RwSignal::new(None),
			commits: RwSignal::new(Vec::new()),
			issues: RwSignal::new(Vec::new()),
			popup: RwSignal::new(None),
			include_files: RwSignal::new(true),
			theme: RwSignal::new(Theme::default()),
			error: RwSignal::new(None),
			loading: RwSignal::new(false),
			requests: StoredValue::new(RequestLedger::default()),
		}
	}

	fn report(self, err: FetchError) {
		error!("{err}");
		self.error.set(Some(err.to_string()));
	}

	/// Starts over with a new repository. Blank inputs are ignored.
	pub fn load_repository(self, owner: String, name: String) {
		let Some(repo) = RepoRef::parse(&owner, &name) else {
			debug!("ignoring load with blank owner or repository");
			return;
		};
		let mut requests = self.requests.get_value();
		let stamp = requests.begin_load();
		self.requests.set_value(requests);
		self.error.set(None);
		self.loading.set(true);
		spawn_local(async move {
			if let Err(err) = self.run_load(repo, stamp).await {
				self.requests.update_value(|r| r.fail_load(stamp));
				self.report(err);
			}
			if self.requests.get_value().is_repo_current(stamp) {
				self.loading.set(false);
			}
		});
	}

	async fn run_load(self, repo: RepoRef, stamp: Stamp) -> Result<(), FetchError> {
		let client = GitHubClient::new(self.config.api_base)?;
		info!("loading {repo}");
		let commits = client.list_commits(&repo, self.config.commits_back).await?;
		if !self.requests.get_value().is_repo_current(stamp) {
			debug!("dropping stale commit list for {repo}");
			return Ok(());
		}
		let Some(newest) = commits.first() else {
			return Err(FetchError::NoCommits(repo.to_string()));
		};
		let tree_sha = newest.commit.tree.sha.clone();

		self.snapshot.set(None);
		self.popup.set(None);
		self.issues.set(Vec::new());
		self.commits.set(
			commits
				.iter()
				.take(self.config.commits_back as usize)
				.map(|c| CommitEntry::from_commit(c, self.config.message_char_limit))
				.collect(),
		);
		self.repo.set(Some(repo.clone()));
		self.requests.update_value(|r| r.show_repo(stamp));

		spawn_local(self.run_issues(client.clone(), repo.clone(), stamp));

		let include_files = self.include_files.get_untracked();
		let snapshot = fetch_snapshot(&client, &repo, &tree_sha, include_files).await?;
		self.publish(snapshot, stamp);
		Ok(())
	}

	async fn run_issues(self, client: GitHubClient, repo: RepoRef, stamp: Stamp) {
		match client.list_issues(&repo, self.config.issues_back).await {
			Ok(issues) if self.requests.get_value().is_repo_current(stamp) => {
				debug!("{repo}: {} issues", issues.len());
				self.issues.set(
					issues
						.iter()
						.take(self.config.issues_back as usize)
						.map(IssueEntry::from)
						.collect(),
				);
			}
			Ok(_) => debug!("dropping stale issue list for {repo}"),
			Err(err) => {
				warn!("issues for {repo} unavailable");
				self.report(err);
			}
		}
	}

	/// Re-renders the current repository at another commit's tree.
	pub fn select_commit(self, tree_sha: String) {
		let Some(repo) = self.repo.get_untracked() else {
			return;
		};
		let mut requests = self.requests.get_value();
		let Some(stamp) = requests.begin_select() else {
			debug!("ignoring commit of {repo} while another repository loads");
			return;
		};
		self.requests.set_value(requests);
		self.error.set(None);
		spawn_local(async move {
			let result = async {
				let client = GitHubClient::new(self.config.api_base)?;
				let include_files = self.include_files.get_untracked();
				fetch_snapshot(&client, &repo, &tree_sha, include_files).await
			}
			.await;
			match result {
				Ok(snapshot) => self.publish(snapshot, stamp),
				Err(err) => self.report(err),
			}
		});
	}

	fn publish(self, snapshot: GraphSnapshot, stamp: Stamp) {
		if !self.requests.get_value().is_current(stamp) {
			debug!("dropping stale tree ({} nodes)", snapshot.nodes.len());
			return;
		}
		info!("showing {} nodes", snapshot.nodes.len());
		self.snapshot.set(Some(snapshot));
	}

	pub fn show_people(self, title: String, people: Vec<Person>) {
		self.popup.set(Some(PeoplePopup { title, people }));
	}

	pub fn hide_people(self) {
		self.popup.set(None);
	}

	pub fn toggle_theme(self) {
		self.theme.update(|t| *t = t.toggled());
	}
}
