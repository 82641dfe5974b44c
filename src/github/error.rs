/// Failure of a GitHub API round trip.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
	#[error("request failed: {0}")]
	Http(#[from] reqwest::Error),
	#[error("GitHub answered {status} for {url}")]
	Status { status: u16, url: String },
	#[error("{0} has no commits")]
	NoCommits(String),
	#[error("invalid API base URL `{0}`")]
	InvalidBase(String),
}
