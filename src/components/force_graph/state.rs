use std::collections::{HashMap, HashSet};
use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};
use log::debug;

use super::reconcile::{join_keys, reconcile_nodes};
use super::scale::{
	ENTER_COLOR, EXIT_COLOR, OrdinalScale, Rgb, Tween, ease_cubic_in_out, target_radius,
};
use super::types::{GraphSnapshot, PhysicalState, RenderedNode};
use crate::config::LayoutConfig;

pub const HIT_RADIUS: f64 = 12.0;
pub const ENTER_LINK_COLOR: &str = "#bbb";
pub const UPDATE_LINK_COLOR: &str = "#aaa";

const NODE_MASS: f32 = 10.0;
const PLACEMENT_RADIUS: f64 = 100.0;
const COLLIDE_RADIUS: f32 = 12.0;
const COLLIDE_STRENGTH: f32 = 0.4;
const ALPHA_MIN: f64 = 0.001;
// 1 - 0.001^(1/300): cools from 1 to ALPHA_MIN in ~300 steps
const ALPHA_DECAY: f64 = 0.022_762_779;
const DRAG_ALPHA_TARGET: f64 = 0.3;

/// Logical data carried by each simulated node.
#[derive(Clone, Debug, Default)]
pub struct NodeInfo {
	pub id: String,
	pub group: u32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

impl ViewTransform {
	pub fn invert(&self, sx: f64, sy: f64) -> (f64, f64) {
		((sx - self.x) / self.k, (sy - self.y) / self.k)
	}

	pub fn apply(&self, gx: f64, gy: f64) -> (f64, f64) {
		(gx * self.k + self.x, gy * self.k + self.y)
	}
}

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub node: Option<String>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start_x: f32,
	pub node_start_y: f32,
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

/// On-screen circle bound to a live node.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeVisual {
	pub radius: Tween,
	pub fill: &'static str,
	/// View transform stamped at creation, refreshed on zoom/pan.
	pub transform: ViewTransform,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LinkVisual {
	pub stroke: &'static str,
	pub transform: ViewTransform,
}

/// A circle whose node left the graph, shrinking and reddening until gone.
#[derive(Clone, Debug, PartialEq)]
pub struct ExitingNode {
	pub id: String,
	pub x: f64,
	pub y: f64,
	pub radius: Tween,
	pub from: Rgb,
	pub transform: ViewTransform,
}

impl ExitingNode {
	pub fn fill(&self) -> String {
		let to = Rgb::from_hex(EXIT_COLOR).unwrap_or(Rgb(255, 0, 0));
		self.from
			.lerp(to, ease_cubic_in_out(self.radius.progress()))
			.css()
	}
}

/// Undirected key for a simulation edge; `None` for self-links.
fn edge_key(a: &str, b: &str) -> Option<(String, String)> {
	match a.cmp(b) {
		std::cmp::Ordering::Less => Some((a.to_string(), b.to_string())),
		std::cmp::Ordering::Greater => Some((b.to_string(), a.to_string())),
		std::cmp::Ordering::Equal => None,
	}
}

/// Default spot for a node with no surviving ancestor.
fn ring_position(i: usize, count: usize) -> (f32, f32) {
	let angle = (i as f64) * 2.0 * PI / count as f64;
	(
		(PLACEMENT_RADIUS * angle.cos()) as f32,
		(PLACEMENT_RADIUS * angle.sin()) as f32,
	)
}

fn simulation_parameters() -> SimulationParameters {
	SimulationParameters {
		force_charge: 150.0,
		force_spring: 0.05,
		force_max: 100.0,
		node_speed: 3000.0,
		damping_factor: 0.9,
	}
}

/// Long-lived layout for one repository: the physics simulation plus the
/// visuals bound to it, reconciled in place as snapshots arrive.
pub struct LayoutEngine {
	pub graph: ForceGraph<NodeInfo, ()>,
	index: HashMap<String, DefaultNodeIdx>,
	/// Endpoint pairs currently bound as simulation edges, smaller id first.
	edges: HashSet<(String, String)>,
	pub nodes: HashMap<String, NodeVisual>,
	pub links: HashMap<(String, String), LinkVisual>,
	pub exiting: Vec<ExitingNode>,
	scale: OrdinalScale,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub hover: Option<String>,
	pub width: f64,
	pub height: f64,
	pub alpha: f64,
	pub alpha_target: f64,
	pub animation_running: bool,
	config: LayoutConfig,
}

impl LayoutEngine {
	pub fn new(config: LayoutConfig) -> Self {
		let (width, height) = (config.width, config.height);
		Self {
			graph: ForceGraph::new(simulation_parameters()),
			index: HashMap::new(),
			edges: HashSet::new(),
			nodes: HashMap::new(),
			links: HashMap::new(),
			exiting: Vec::new(),
			scale: OrdinalScale::default(),
			transform: ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0,
			},
			drag: DragState::default(),
			pan: PanState::default(),
			hover: None,
			width,
			height,
			alpha: 1.0,
			alpha_target: 0.0,
			animation_running: false,
			config,
		}
	}

	/// Last known physics of every live node, keyed by id.
	pub fn physical_states(&self) -> HashMap<String, PhysicalState> {
		let mut states = HashMap::with_capacity(self.index.len());
		self.graph.visit_nodes(|node| {
			let info = &node.data.user_data;
			states.insert(
				info.id.clone(),
				PhysicalState {
					x: node.x(),
					y: node.y(),
					pin: node.data.is_anchor.then(|| (node.x(), node.y())),
				},
			);
		});
		states
	}

	/// Applies the first snapshot twice so new nodes are already merged and
	/// coloured before the first frame is painted.
	pub fn prewarm(&mut self, snapshot: &GraphSnapshot) {
		self.update(snapshot);
		self.update(snapshot);
	}

	pub fn update(&mut self, snapshot: &GraphSnapshot) {
		let previous = self.physical_states();
		let rendered = reconcile_nodes(&snapshot.nodes, &previous);
		self.join_nodes(snapshot, &previous);
		self.join_links(snapshot);
		self.bind_nodes(&rendered);
		self.bind_edges(snapshot);

		self.alpha = 1.0;
		self.animation_running = true;
		debug!(
			"layout update: {} nodes, {} links, {} exiting",
			self.index.len(),
			self.links.len(),
			self.exiting.len()
		);
	}

	fn join_nodes(&mut self, snapshot: &GraphSnapshot, previous: &HashMap<String, PhysicalState>) {
		let groups: HashMap<&str, u32> = snapshot
			.nodes
			.iter()
			.map(|n| (n.id.as_str(), n.group))
			.collect();
		let current: HashSet<String> = self.nodes.keys().cloned().collect();
		let join = join_keys(snapshot.nodes.iter().map(|n| n.id.clone()), &current);

		for id in join.enter {
			let group = groups.get(id.as_str()).copied().unwrap_or_default();
			self.nodes.insert(
				id,
				NodeVisual {
					radius: Tween::new(0.0, target_radius(group), self.config.enter_ms),
					fill: ENTER_COLOR,
					transform: self.transform,
				},
			);
		}
		for id in join.update {
			let group = groups.get(id.as_str()).copied().unwrap_or_default();
			let fill = self.scale.color(group);
			if let Some(visual) = self.nodes.get_mut(&id) {
				visual.fill = fill;
			}
		}
		for id in join.exit {
			let Some(visual) = self.nodes.remove(&id) else {
				continue;
			};
			if self.drag.node.as_deref() == Some(id.as_str()) {
				self.drag = DragState::default();
				self.alpha_target = 0.0;
			}
			if self.hover.as_deref() == Some(id.as_str()) {
				self.hover = None;
			}
			let Some(last) = previous.get(&id) else {
				continue;
			};
			self.exiting.push(ExitingNode {
				radius: Tween::new(visual.radius.value(), 0.0, self.config.exit_ms),
				from: Rgb::from_hex(visual.fill).unwrap_or(Rgb(0, 128, 0)),
				x: last.x as f64,
				y: last.y as f64,
				transform: visual.transform,
				id,
			});
		}
	}

	fn join_links(&mut self, snapshot: &GraphSnapshot) {
		let current: HashSet<(String, String)> = self.links.keys().cloned().collect();
		let join = join_keys(snapshot.links.iter().map(|l| l.key()), &current);
		for key in join.exit {
			self.links.remove(&key);
		}
		for key in join.update {
			self.links.insert(
				key,
				LinkVisual {
					stroke: UPDATE_LINK_COLOR,
					transform: self.transform,
				},
			);
		}
		for key in join.enter {
			self.links.insert(
				key,
				LinkVisual {
					stroke: ENTER_LINK_COLOR,
					transform: self.transform,
				},
			);
		}
	}

	/// Brings the simulated node set in line with `rendered`. Surviving ids
	/// keep their record, so position, velocity and pin carry over untouched;
	/// only the group is rewritten. Gone ids are removed and new ids added at
	/// their seed position.
	fn bind_nodes(&mut self, rendered: &[RenderedNode]) {
		// Repeated ids collapse onto one node; the last one wins.
		let groups: HashMap<&str, u32> = rendered
			.iter()
			.map(|n| (n.id.as_str(), n.group))
			.collect();

		let gone: Vec<String> = self
			.index
			.keys()
			.filter(|id| !groups.contains_key(id.as_str()))
			.cloned()
			.collect();
		for id in gone {
			if let Some(idx) = self.index.remove(&id) {
				self.graph.remove_node(idx);
			}
		}
		let index = &self.index;
		self.edges
			.retain(|(a, b)| index.contains_key(a) && index.contains_key(b));

		self.graph.visit_nodes_mut(|node| {
			if let Some(&group) = groups.get(node.data.user_data.id.as_str()) {
				node.data.user_data.group = group;
			}
		});

		let count = rendered.len().max(1);
		for (i, node) in rendered.iter().enumerate() {
			if self.index.contains_key(&node.id) {
				continue;
			}
			let (x, y) = node.position.unwrap_or_else(|| ring_position(i, count));
			let idx = self.graph.add_node(NodeData {
				x,
				y,
				mass: NODE_MASS,
				is_anchor: false,
				user_data: NodeInfo {
					id: node.id.clone(),
					group: groups.get(node.id.as_str()).copied().unwrap_or(node.group),
				},
			});
			self.index.insert(node.id.clone(), idx);
		}
	}

	/// Adds an edge for every new link whose endpoints are both simulated.
	fn bind_edges(&mut self, snapshot: &GraphSnapshot) {
		let wanted: HashSet<(String, String)> = snapshot
			.links
			.iter()
			.filter_map(|l| edge_key(&l.source, &l.target))
			.filter(|(a, b)| self.index.contains_key(a) && self.index.contains_key(b))
			.collect();

		if !self.edges.is_subset(&wanted) {
			// force_graph can only drop edges together with a node
			debug!("link between surviving nodes removed, rebuilding simulation");
			self.rebuild();
		}

		for link in &snapshot.links {
			let Some(key) = edge_key(&link.source, &link.target) else {
				continue;
			};
			if self.edges.contains(&key) {
				continue;
			}
			if let (Some(&src), Some(&tgt)) = (self.index.get(&key.0), self.index.get(&key.1)) {
				self.graph.add_edge(src, tgt, EdgeData::default());
				self.edges.insert(key);
			}
		}
	}

	/// Recreates the simulation with the current nodes and no edges.
	fn rebuild(&mut self) {
		let mut graph = ForceGraph::new(simulation_parameters());
		let mut index = HashMap::with_capacity(self.index.len());
		self.graph.visit_nodes(|node| {
			let idx = graph.add_node(NodeData {
				x: node.x(),
				y: node.y(),
				mass: node.data.mass,
				is_anchor: node.data.is_anchor,
				user_data: node.data.user_data.clone(),
			});
			index.insert(node.data.user_data.id.clone(), idx);
		});
		self.graph = graph;
		self.index = index;
		self.edges.clear();
	}

	/// Advances transitions by `dt` seconds and, while the simulation still
	/// has energy, steps the physics.
	pub fn tick(&mut self, dt: f32) {
		let dt_ms = dt as f64 * 1000.0;
		for visual in self.nodes.values_mut() {
			visual.radius.advance(dt_ms);
		}
		for exiting in &mut self.exiting {
			exiting.radius.advance(dt_ms);
		}
		self.exiting.retain(|e| !e.radius.is_done());

		if !self.animation_running {
			return;
		}
		self.alpha += (self.alpha_target - self.alpha) * ALPHA_DECAY;
		if self.alpha < ALPHA_MIN {
			self.animation_running = false;
			return;
		}

		self.graph.update(dt * self.alpha as f32);
		self.collide();
		self.center();
	}

	/// Pushes apart overlapping nodes.
	fn collide(&mut self) {
		let mut points = Vec::with_capacity(self.index.len());
		self.graph.visit_nodes(|node| {
			points.push((node.index(), node.x(), node.y(), node.data.is_anchor));
		});

		let min_dist = COLLIDE_RADIUS * 2.0;
		let mut offsets: HashMap<DefaultNodeIdx, (f32, f32)> = HashMap::new();
		for (i, &(a, ax, ay, a_fixed)) in points.iter().enumerate() {
			for &(b, bx, by, b_fixed) in &points[i + 1..] {
				let (dx, dy) = (bx - ax, by - ay);
				let dist = (dx * dx + dy * dy).sqrt();
				if dist >= min_dist || dist < 1e-6 {
					continue;
				}
				let push = (min_dist - dist) / dist * COLLIDE_STRENGTH * 0.5;
				if !a_fixed {
					let o = offsets.entry(a).or_default();
					o.0 -= dx * push;
					o.1 -= dy * push;
				}
				if !b_fixed {
					let o = offsets.entry(b).or_default();
					o.0 += dx * push;
					o.1 += dy * push;
				}
			}
		}
		if offsets.is_empty() {
			return;
		}
		self.graph.visit_nodes_mut(|node| {
			if let Some(&(ox, oy)) = offsets.get(&node.index()) {
				node.data.x += ox;
				node.data.y += oy;
			}
		});
	}

	/// Moves the free nodes so the mean position sits at the origin.
	fn center(&mut self) {
		let (mut sx, mut sy, mut n) = (0.0_f32, 0.0_f32, 0usize);
		self.graph.visit_nodes(|node| {
			sx += node.x();
			sy += node.y();
			n += 1;
		});
		if n == 0 {
			return;
		}
		let (mx, my) = (sx / n as f32, sy / n as f32);
		self.graph.visit_nodes_mut(|node| {
			if !node.data.is_anchor {
				node.data.x -= mx;
				node.data.y -= my;
			}
		});
	}

	pub fn contains(&self, id: &str) -> bool {
		self.index.contains_key(id)
	}

	pub fn node_ids(&self) -> HashSet<String> {
		self.index.keys().cloned().collect()
	}

	pub fn node_position(&self, id: &str) -> Option<(f32, f32)> {
		let idx = *self.index.get(id)?;
		let mut found = None;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				found = Some((node.x(), node.y()));
			}
		});
		found
	}

	pub fn is_pinned(&self, id: &str) -> bool {
		let Some(&idx) = self.index.get(id) else {
			return false;
		};
		let mut pinned = false;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				pinned = node.data.is_anchor;
			}
		});
		pinned
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		self.transform.invert(sx, sy)
	}

	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<String> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let mut found: Option<(f64, String)> = None;
		self.graph.visit_nodes(|node| {
			let id = &node.data.user_data.id;
			// world-space radii, so the hit area scales with zoom like nodes
			let radius = self
				.nodes
				.get(id)
				.map_or(0.0, |v| v.radius.value())
				.max(HIT_RADIUS);
			let (dx, dy) = (node.x() as f64 - gx, node.y() as f64 - gy);
			let dist = (dx * dx + dy * dy).sqrt();
			if dist < radius && found.as_ref().is_none_or(|(best, _)| dist <= *best) {
				found = Some((dist, id.clone()));
			}
		});
		found.map(|(_, id)| id)
	}

	/// Pointer pressed: grab the node under it, or start panning.
	pub fn press(&mut self, sx: f64, sy: f64) {
		match self.node_at_position(sx, sy) {
			Some(id) => self.drag_start(&id, sx, sy),
			None => {
				self.pan = PanState {
					active: true,
					start_x: sx,
					start_y: sy,
					transform_start_x: self.transform.x,
					transform_start_y: self.transform.y,
				};
			}
		}
	}

	pub fn pointer_move(&mut self, sx: f64, sy: f64) {
		if self.drag.active {
			self.drag_move(sx, sy);
		} else {
			self.hover = self.node_at_position(sx, sy);
			if self.pan.active {
				self.transform.x = self.pan.transform_start_x + (sx - self.pan.start_x);
				self.transform.y = self.pan.transform_start_y + (sy - self.pan.start_y);
				self.restamp();
			}
		}
	}

	pub fn release(&mut self) {
		if self.drag.active {
			self.drag_end();
		}
		self.pan.active = false;
	}

	pub fn leave(&mut self) {
		self.release();
		self.hover = None;
	}

	/// Pins `id` where it is and wakes the simulation if it had gone idle.
	pub fn drag_start(&mut self, id: &str, sx: f64, sy: f64) {
		let Some((x, y)) = self.node_position(id) else {
			return;
		};
		self.drag = DragState {
			active: true,
			node: Some(id.to_string()),
			start_x: sx,
			start_y: sy,
			node_start_x: x,
			node_start_y: y,
		};
		self.pin(id, x, y);
		self.alpha_target = DRAG_ALPHA_TARGET;
		self.animation_running = true;
	}

	pub fn drag_move(&mut self, sx: f64, sy: f64) {
		let Some(id) = self.drag.node.clone() else {
			return;
		};
		let (dx, dy) = (
			(sx - self.drag.start_x) / self.transform.k,
			(sy - self.drag.start_y) / self.transform.k,
		);
		let (nx, ny) = (
			self.drag.node_start_x + dx as f32,
			self.drag.node_start_y + dy as f32,
		);
		self.pin(&id, nx, ny);
	}

	/// Hands the dragged node back to the forces.
	pub fn drag_end(&mut self) {
		if let Some(idx) = self.drag.node.as_ref().and_then(|id| self.index.get(id)).copied() {
			self.graph.visit_nodes_mut(|node| {
				if node.index() == idx {
					node.data.is_anchor = false;
				}
			});
		}
		self.alpha_target = 0.0;
		self.drag = DragState::default();
	}

	fn pin(&mut self, id: &str, x: f32, y: f32) {
		let Some(&idx) = self.index.get(id) else {
			return;
		};
		self.graph.visit_nodes_mut(|node| {
			if node.index() == idx {
				node.data.x = x;
				node.data.y = y;
				node.data.is_anchor = true;
			}
		});
	}

	/// Zooms about the pointer, one wheel notch at a time.
	pub fn zoom(&mut self, sx: f64, sy: f64, delta_y: f64) {
		let (min_k, max_k) = self.config.scale_extent;
		let factor = if delta_y > 0.0 { 0.9 } else { 1.1 };
		let new_k = (self.transform.k * factor).clamp(min_k, max_k);
		let ratio = new_k / self.transform.k;
		self.transform.x = sx - (sx - self.transform.x) * ratio;
		self.transform.y = sy - (sy - self.transform.y) * ratio;
		self.transform.k = new_k;
		self.restamp();
	}

	/// Applies the current transform to every live node and link visual.
	fn restamp(&mut self) {
		let transform = self.transform;
		for visual in self.nodes.values_mut() {
			visual.transform = transform;
		}
		for visual in self.links.values_mut() {
			visual.transform = transform;
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::force_graph::{PathLink, PathNode};
	use crate::graph::{LINK_VALUE, depth_group, parent_path};

	fn snapshot(paths: &[&str]) -> GraphSnapshot {
		let mut snapshot = GraphSnapshot::rooted();
		for &path in paths {
			snapshot.nodes.push(PathNode {
				id: path.into(),
				group: depth_group(path),
			});
			snapshot.links.push(PathLink {
				source: parent_path(path).into(),
				target: path.into(),
				value: LINK_VALUE,
			});
		}
		snapshot
	}

	fn engine() -> LayoutEngine {
		LayoutEngine::new(LayoutConfig::default())
	}

	fn run(engine: &mut LayoutEngine, steps: usize) {
		for _ in 0..steps {
			engine.tick(0.016);
		}
	}

	fn edge_count(engine: &LayoutEngine) -> usize {
		let mut count = 0;
		engine.graph.visit_edges(|_, _, _| count += 1);
		count
	}

	#[test]
	fn first_update_places_every_node() {
		let mut engine = engine();
		engine.update(&snapshot(&["src", "src/lib.rs", "Cargo.toml"]));
		assert_eq!(engine.node_ids().len(), 4);
		assert_eq!(edge_count(&engine), 3);
		assert!(engine.animation_running);
		assert_eq!(engine.alpha, 1.0);
		for id in engine.node_ids() {
			assert_eq!(engine.nodes[&id].fill, ENTER_COLOR);
			assert_eq!(engine.nodes[&id].radius.value(), 0.0);
		}
	}

	#[test]
	fn prewarm_is_idempotent_on_identity() {
		let snap = snapshot(&["a", "a/b", "a/c", "d"]);
		let mut engine = engine();
		engine.update(&snap);
		let ids = engine.node_ids();
		let positions = engine.physical_states();
		engine.update(&snap);
		assert_eq!(engine.node_ids(), ids);
		assert_eq!(engine.nodes.len(), ids.len());
		assert!(engine.exiting.is_empty());
		for (id, state) in positions {
			assert_eq!(engine.node_position(&id), Some((state.x, state.y)));
		}
	}

	#[test]
	fn prewarm_colours_by_group() {
		let mut engine = engine();
		engine.prewarm(&snapshot(&["a", "a/b"]));
		assert_ne!(engine.nodes["a"].fill, ENTER_COLOR);
		assert_ne!(engine.nodes["a"].fill, engine.nodes["a/b"].fill);
	}

	#[test]
	fn surviving_nodes_keep_positions_and_new_leaf_spawns_at_parent() {
		let mut engine = engine();
		engine.prewarm(&snapshot(&["src", "src/old.rs", "src/keep.rs"]));
		run(&mut engine, 30);
		let before = engine.physical_states();

		engine.update(&snapshot(&["src", "src/keep.rs", "src/new.rs"]));

		for id in ["/", "src", "src/keep.rs"] {
			let (x, y) = engine.node_position(id).unwrap();
			assert!((x - before[id].x).abs() < 1e-4);
			assert!((y - before[id].y).abs() < 1e-4);
		}
		assert_eq!(
			engine.node_position("src/new.rs"),
			Some((before["src"].x, before["src"].y))
		);
		assert!(!engine.contains("src/old.rs"));
		assert_eq!(engine.exiting.len(), 1);
		assert_eq!(engine.exiting[0].id, "src/old.rs");
	}

	#[test]
	fn new_subtree_seeds_from_deepest_surviving_ancestor() {
		let mut engine = engine();
		engine.prewarm(&snapshot(&["a"]));
		let a = engine.node_position("a").unwrap();
		engine.update(&snapshot(&["a", "a/b", "a/b/c"]));
		assert_eq!(engine.node_position("a/b"), Some(a));
		assert_eq!(engine.node_position("a/b/c"), Some(a));
	}

	#[test]
	fn exiting_nodes_shrink_and_disappear() {
		let mut engine = engine();
		engine.prewarm(&snapshot(&["a", "b"]));
		run(&mut engine, 60);
		engine.update(&snapshot(&["a"]));
		assert_eq!(engine.exiting.len(), 1);
		let start = engine.exiting[0].radius.value();
		run(&mut engine, 40);
		assert!(engine.exiting[0].radius.value() < start);
		assert_ne!(engine.exiting[0].fill(), Rgb::from_hex(EXIT_COLOR).unwrap().css());
		run(&mut engine, 60);
		assert!(engine.exiting.is_empty());
	}

	#[test]
	fn entering_nodes_grow_to_target_radius() {
		let mut engine = engine();
		engine.update(&snapshot(&["a", "a/b/c/d/e/f"]));
		run(&mut engine, 60);
		assert_eq!(engine.nodes["/"].radius.value(), 18.0);
		assert_eq!(engine.nodes["a"].radius.value(), 18.0 / 2f64.sqrt());
		assert_eq!(engine.nodes["a/b/c/d/e/f"].radius.value(), 7.0);
	}

	#[test]
	fn links_join_by_endpoints() {
		let mut engine = engine();
		engine.update(&snapshot(&["a", "b"]));
		assert!(engine.links.values().all(|l| l.stroke == ENTER_LINK_COLOR));
		engine.update(&snapshot(&["a", "c"]));
		let key = |s: &str, t: &str| (s.to_string(), t.to_string());
		assert_eq!(engine.links[&key("/", "a")].stroke, UPDATE_LINK_COLOR);
		assert_eq!(engine.links[&key("/", "c")].stroke, ENTER_LINK_COLOR);
		assert!(!engine.links.contains_key(&key("/", "b")));
	}

	#[test]
	fn dangling_links_are_skipped() {
		let mut snap = snapshot(&["a"]);
		snap.links.push(PathLink {
			source: "missing".into(),
			target: "a".into(),
			value: LINK_VALUE,
		});
		let mut engine = engine();
		engine.update(&snap);
		assert_eq!(edge_count(&engine), 1);
	}

	#[test]
	fn duplicate_ids_collapse_to_one_node() {
		let mut snap = snapshot(&["a"]);
		snap.nodes.push(PathNode {
			id: "a".into(),
			group: 3,
		});
		let mut engine = engine();
		engine.update(&snap);
		assert_eq!(engine.node_ids().len(), 2);
		let mut group = None;
		engine.graph.visit_nodes(|n| {
			if n.data.user_data.id == "a" {
				group = Some(n.data.user_data.group);
			}
		});
		assert_eq!(group, Some(3));
	}

	#[test]
	fn update_keeps_momentum_of_surviving_nodes() {
		let snap = snapshot(&["src", "src/lib.rs", "src/main.rs", "docs"]);
		let settle = |engine: &mut LayoutEngine| {
			engine.prewarm(&snap);
			run(engine, 20);
		};
		let (mut steady, mut updated) = (engine(), engine());
		settle(&mut steady);
		settle(&mut updated);

		updated.update(&snap);
		updated.alpha = steady.alpha;
		updated.alpha_target = steady.alpha_target;
		let before = steady.physical_states();
		assert_eq!(updated.physical_states(), before);

		steady.tick(0.016);
		updated.tick(0.016);
		let mut moving = false;
		for (id, start) in &before {
			let a = steady.node_position(id).unwrap();
			let b = updated.node_position(id).unwrap();
			moving |= (a.0 - start.x).abs() + (a.1 - start.y).abs() > 1e-4;
			assert!(
				(a.0 - b.0).abs() < 1e-5 && (a.1 - b.1).abs() < 1e-5,
				"{id}: {a:?} vs {b:?}"
			);
		}
		assert!(moving);
	}

	#[test]
	fn surviving_nodes_keep_their_simulation_record() {
		let mut engine = engine();
		engine.prewarm(&snapshot(&["a", "b", "a/c"]));
		let kept = engine.index["a/c"];
		engine.update(&snapshot(&["a", "a/c", "d"]));
		assert_eq!(engine.index["a/c"], kept);
		assert_eq!(engine.node_ids().len(), 4);
		assert_eq!(edge_count(&engine), 3);
	}

	#[test]
	fn removed_link_between_survivors_is_dropped() {
		let mut snap = snapshot(&["a", "b"]);
		snap.links.push(PathLink {
			source: "a".into(),
			target: "b".into(),
			value: LINK_VALUE,
		});
		let mut engine = engine();
		engine.prewarm(&snap);
		assert_eq!(edge_count(&engine), 3);
		engine.update(&snapshot(&["a", "b"]));
		assert_eq!(edge_count(&engine), 2);
		assert_eq!(engine.node_ids().len(), 3);
	}

	#[test]
	fn large_nodes_are_grabbed_anywhere_inside_their_circle() {
		let mut engine = engine();
		engine.prewarm(&GraphSnapshot::rooted());
		run(&mut engine, 60);
		assert_eq!(engine.nodes["/"].radius.value(), 18.0);

		let (x, y) = engine.node_position("/").unwrap();
		let (sx, sy) = engine.transform.apply(x as f64, y as f64);
		assert_eq!(engine.node_at_position(sx + 20.0, sy), None);
		engine.press(sx + 15.0, sy);
		assert_eq!(engine.drag.node.as_deref(), Some("/"));
		assert!(!engine.pan.active);
	}

	#[test]
	fn simulation_cools_down() {
		let mut engine = engine();
		engine.prewarm(&snapshot(&["a", "b", "a/c"]));
		run(&mut engine, 400);
		assert!(!engine.animation_running);
		engine.update(&snapshot(&["a", "b"]));
		assert!(engine.animation_running);
		assert_eq!(engine.alpha, 1.0);
	}

	#[test]
	fn dragging_pins_and_release_unpins() {
		let mut engine = engine();
		engine.prewarm(&snapshot(&["a"]));
		run(&mut engine, 400);
		assert!(!engine.animation_running);

		let (x, y) = engine.node_position("a").unwrap();
		let (sx, sy) = engine.transform.apply(x as f64, y as f64);
		engine.press(sx, sy);
		assert!(engine.drag.active);
		assert_eq!(engine.drag.node.as_deref(), Some("a"));
		assert!(engine.is_pinned("a"));
		assert!(engine.animation_running);
		assert_eq!(engine.alpha_target, DRAG_ALPHA_TARGET);

		engine.pointer_move(sx + 40.0, sy - 20.0);
		assert_eq!(engine.node_position("a"), Some((x + 40.0, y - 20.0)));
		run(&mut engine, 5);
		assert_eq!(engine.node_position("a"), Some((x + 40.0, y - 20.0)));

		engine.release();
		assert!(!engine.is_pinned("a"));
		assert!(!engine.drag.active);
		assert_eq!(engine.alpha_target, 0.0);
	}

	#[test]
	fn pin_survives_an_update() {
		let mut engine = engine();
		engine.prewarm(&snapshot(&["a"]));
		let (x, y) = engine.node_position("a").unwrap();
		let (sx, sy) = engine.transform.apply(x as f64, y as f64);
		engine.press(sx, sy);
		engine.update(&snapshot(&["a", "a/b"]));
		assert!(engine.is_pinned("a"));
		assert_eq!(engine.drag.node.as_deref(), Some("a"));
	}

	#[test]
	fn zoom_is_clamped_to_scale_extent() {
		let mut engine = engine();
		for _ in 0..100 {
			engine.zoom(10.0, 10.0, -1.0);
		}
		assert_eq!(engine.transform.k, 8.0);
		for _ in 0..100 {
			engine.zoom(10.0, 10.0, 1.0);
		}
		assert_eq!(engine.transform.k, 0.3);
	}

	#[test]
	fn zoom_keeps_pointer_fixed() {
		let mut engine = engine();
		let before = engine.screen_to_graph(200.0, 120.0);
		engine.zoom(200.0, 120.0, -1.0);
		let after = engine.screen_to_graph(200.0, 120.0);
		assert!((before.0 - after.0).abs() < 1e-9);
		assert!((before.1 - after.1).abs() < 1e-9);
	}

	#[test]
	fn entering_visuals_are_stamped_with_current_transform() {
		let mut engine = engine();
		engine.prewarm(&snapshot(&["a"]));
		engine.zoom(0.0, 0.0, -1.0);
		assert_eq!(engine.nodes["a"].transform, engine.transform);
		engine.update(&snapshot(&["a", "b"]));
		assert_eq!(engine.nodes["b"].transform, engine.transform);
		assert_eq!(engine.links[&("/".to_string(), "b".to_string())].transform, engine.transform);
	}

	#[test]
	fn panning_moves_the_view() {
		let mut engine = engine();
		let empty = (5.0, 5.0);
		engine.press(empty.0, empty.1);
		assert!(engine.pan.active);
		engine.pointer_move(25.0, -5.0);
		assert_eq!(engine.transform.x, 750.0 + 20.0);
		assert_eq!(engine.transform.y, 450.0 - 10.0);
		engine.release();
		assert!(!engine.pan.active);
	}
}
