//! Matching a new snapshot against what is already on screen.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use super::types::{PathNode, PhysicalState, RenderedNode, ROOT_ID};
use crate::graph::parent_path;

/// Keeps the physics of a node that survived the update and takes the new
/// logical fields from the snapshot.
pub fn merge_physical(old: &PhysicalState, node: &PathNode) -> RenderedNode {
	RenderedNode {
		id: node.id.clone(),
		group: node.group,
		position: Some((old.x, old.y)),
		pin: old.pin,
	}
}

/// Position of the closest ancestor of `id` that was on screen before.
pub fn seed_position(id: &str, previous: &HashMap<String, PhysicalState>) -> Option<(f32, f32)> {
	if id == ROOT_ID {
		return None;
	}
	let mut ancestor = parent_path(id);
	loop {
		if let Some(state) = previous.get(ancestor) {
			return Some((state.x, state.y));
		}
		if ancestor == ROOT_ID || ancestor.is_empty() {
			return None;
		}
		ancestor = parent_path(ancestor);
	}
}

/// Carries physical state over to surviving nodes and seeds new ones next to
/// their nearest surviving ancestor.
pub fn reconcile_nodes(
	nodes: &[PathNode],
	previous: &HashMap<String, PhysicalState>,
) -> Vec<RenderedNode> {
	nodes
		.iter()
		.map(|node| match previous.get(&node.id) {
			Some(old) => merge_physical(old, node),
			None => RenderedNode {
				id: node.id.clone(),
				group: node.group,
				position: seed_position(&node.id, previous),
				pin: None,
			},
		})
		.collect()
}

/// Result of a keyed three-way join.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Join<K> {
	pub enter: Vec<K>,
	pub update: Vec<K>,
	pub exit: Vec<K>,
}

/// Splits `incoming` into keys new to `current`, keys present in both, and
/// keys of `current` that are gone. Incoming order is preserved and repeated
/// keys are reported once.
pub fn join_keys<K>(incoming: impl IntoIterator<Item = K>, current: &HashSet<K>) -> Join<K>
where
	K: Clone + Eq + Hash,
{
	let mut seen = HashSet::new();
	let (mut enter, mut update) = (Vec::new(), Vec::new());
	for key in incoming {
		if !seen.insert(key.clone()) {
			continue;
		}
		if current.contains(&key) {
			update.push(key);
		} else {
			enter.push(key);
		}
	}
	let exit = current.iter().filter(|k| !seen.contains(*k)).cloned().collect();
	Join {
		enter,
		update,
		exit,
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn node(id: &str, group: u32) -> PathNode {
		PathNode {
			id: id.into(),
			group,
		}
	}

	fn at(x: f32, y: f32) -> PhysicalState {
		PhysicalState {
			x,
			y,
			..Default::default()
		}
	}

	#[test]
	fn merge_keeps_physics_and_takes_group() {
		let old = PhysicalState {
			x: 3.0,
			y: -4.0,
			pin: Some((3.0, -4.0)),
		};
		let merged = merge_physical(&old, &node("src", 2));
		assert_eq!(merged.group, 2);
		assert_eq!(merged.position, Some((3.0, -4.0)));
		assert_eq!(merged.pin, Some((3.0, -4.0)));
	}

	#[test]
	fn seeds_from_nearest_surviving_ancestor() {
		let previous = HashMap::from([("/".to_string(), at(0.0, 0.0)), ("a".to_string(), at(10.0, 20.0))]);
		assert_eq!(seed_position("a/b", &previous), Some((10.0, 20.0)));
		assert_eq!(seed_position("a/b/c/d", &previous), Some((10.0, 20.0)));
		assert_eq!(seed_position("x/y", &previous), Some((0.0, 0.0)));
		assert_eq!(seed_position("/", &previous), None);
	}

	#[test]
	fn no_ancestor_leaves_position_unset() {
		let previous = HashMap::new();
		assert_eq!(seed_position("a/b", &previous), None);
		let rendered = reconcile_nodes(&[node("/", 0), node("a", 1)], &previous);
		assert!(rendered.iter().all(|n| n.position.is_none()));
	}

	#[test]
	fn new_nodes_start_unpinned() {
		let mut parent = at(5.0, 5.0);
		parent.pin = Some((5.0, 5.0));
		let previous = HashMap::from([("a".to_string(), parent)]);
		let rendered = reconcile_nodes(&[node("a", 1), node("a/new", 2)], &previous);
		assert_eq!(rendered[1].position, Some((5.0, 5.0)));
		assert_eq!(rendered[1].pin, None);
		assert_eq!(rendered[0].pin, Some((5.0, 5.0)));
	}

	#[test]
	fn join_splits_three_ways() {
		let current: HashSet<&str> = ["/", "a", "b"].into_iter().collect();
		let join = join_keys(["/", "a", "c", "c"], &current);
		assert_eq!(join.enter, ["c"]);
		assert_eq!(join.update, ["/", "a"]);
		assert_eq!(join.exit, ["b"]);
	}
}
