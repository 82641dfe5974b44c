//! Turns a flat git tree listing into the node/link graph the canvas draws.

use log::debug;

use crate::components::force_graph::{GraphSnapshot, PathLink, PathNode, ROOT_ID};
use crate::github::{RepoRef, TreeEntry};

/// Weight attached to every parent/child link.
pub const LINK_VALUE: u32 = 10;

/// Everything before the last `/`, or the root when there is none.
pub fn parent_path(path: &str) -> &str {
	match path.rfind('/') {
		Some(idx) => &path[..idx],
		None => ROOT_ID,
	}
}

/// One more than the number of separators, so top-level entries sit at 1.
pub fn depth_group(path: &str) -> u32 {
	1 + path.matches('/').count() as u32
}

/// Builds one node per entry and one link to its parent directory.
///
/// Entries keep the order the API returned them in. When `include_files` is
/// false, anything that is not a directory is skipped entirely.
pub fn build_snapshot(repo: &RepoRef, entries: &[TreeEntry], include_files: bool) -> GraphSnapshot {
	let mut snapshot = GraphSnapshot::rooted();

	for entry in entries {
		if !include_files && !entry.kind.is_dir() {
			continue;
		}
		let path = entry.path.as_str();
		snapshot.nodes.push(PathNode {
			id: path.to_string(),
			group: depth_group(path),
		});
		snapshot.links.push(PathLink {
			source: parent_path(path).to_string(),
			target: path.to_string(),
			value: LINK_VALUE,
		});
	}

	debug!(
		"{repo}: built {} nodes and {} links from {} entries",
		snapshot.nodes.len(),
		snapshot.links.len(),
		entries.len()
	);
	snapshot
}
