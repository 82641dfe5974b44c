/// Id of the synthetic node standing for the repository root.
pub const ROOT_ID: &str = "/";

/// A file or directory, identified by its full path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathNode {
	pub id: String,
	/// Depth in the path hierarchy; the root is 0.
	pub group: u32,
}

/// Parent directory to child entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathLink {
	pub source: String,
	pub target: String,
	pub value: u32,
}

impl PathLink {
	/// Key used to match links across updates.
	pub fn key(&self) -> (String, String) {
		(self.source.clone(), self.target.clone())
	}
}

/// Everything the canvas should show at one point in time.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GraphSnapshot {
	pub nodes: Vec<PathNode>,
	pub links: Vec<PathLink>,
}

impl GraphSnapshot {
	/// A snapshot holding only the root node.
	pub fn rooted() -> Self {
		Self {
			nodes: vec![PathNode {
				id: ROOT_ID.to_string(),
				group: 0,
			}],
			links: Vec::new(),
		}
	}
}

/// Readable physical state of a simulated node. Velocity stays inside the
/// simulation record, which outlives updates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PhysicalState {
	pub x: f32,
	pub y: f32,
	/// Fixed position while the node is being dragged.
	pub pin: Option<(f32, f32)>,
}

/// A snapshot node ready to be bound to the simulation.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderedNode {
	pub id: String,
	pub group: u32,
	/// `None` lets the engine pick a default placement.
	pub position: Option<(f32, f32)>,
	pub pin: Option<(f32, f32)>,
}
