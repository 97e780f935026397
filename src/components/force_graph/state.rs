//! Graph simulation state and interaction tracking.
//!
//! Wraps the `force_graph` physics simulation with id bookkeeping, a finite
//! cooldown, the pan/zoom view transform with animated camera moves, and
//! pointer hit-testing for nodes and links.

use std::collections::HashMap;
use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};

use super::adapter::DisplayGraph;
use super::scale::{GraphMetrics, MAX_ZOOM, MIN_ZOOM, ScaledValues};
use super::selection::Selection;
use crate::api::ElementKind;
use crate::theme::Color;

const NODE_MASS: f64 = 10.0;
/// Radius of the ring new nodes are placed on.
const SEED_RADIUS: f64 = 100.0;

/// Energy given to a freshly (re)started layout.
pub const ALPHA_START: f64 = 1.0;
/// Energy kept topped up while a node is dragged.
pub const ALPHA_DRAG: f64 = 0.3;
/// Below this the simulation stops stepping.
pub const ALPHA_MIN: f64 = 0.001;
/// Per-tick decay; settles in roughly 300 ticks.
pub const ALPHA_DECAY: f64 = 0.0228;

/// Pointer travel under which a press and release count as a click.
pub const CLICK_SLOP_PX: f64 = 4.0;

/// Per-node display metadata attached to each node in the simulation.
#[derive(Clone, Debug)]
pub struct NodeInfo {
	pub id: String,
	pub label: String,
	pub color: Color,
}

/// Display metadata of one link, including links whose endpoints are unknown.
#[derive(Clone, Debug, PartialEq)]
pub struct LinkInfo {
	pub id: String,
	pub source: String,
	pub target: String,
	pub label: String,
	pub color: Color,
	pub width: f64,
}

/// Spring and repulsion tuning for the physics engine.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ForceParams {
	pub link_distance: f64,
	pub charge: f64,
}

impl ForceParams {
	pub fn from_metrics(metrics: &GraphMetrics) -> Self {
		Self {
			link_distance: metrics.link_distance,
			charge: metrics.charge,
		}
	}

	/// Spring constant at which an isolated linked pair rests at
	/// `link_distance`: charge * m^2 / d^2 balances spring * d / 2.
	pub fn spring(&self) -> f64 {
		let d = self.link_distance.max(1.0);
		2.0 * self.charge * NODE_MASS * NODE_MASS / (d * d * d)
	}

	fn simulation(&self) -> SimulationParameters {
		SimulationParameters {
			force_charge: self.charge as f32,
			force_spring: self.spring() as f32,
			force_max: 100.0,
			node_speed: 3000.0,
			damping_factor: 0.9,
		}
	}
}

/// Pan and zoom transform: `screen = world * k + (x, y)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	/// Zoom factor, clamped to `MIN_ZOOM..=MAX_ZOOM`.
	pub k: f64,
}

impl ViewTransform {
	fn lerp(self, to: ViewTransform, t: f64) -> Self {
		Self {
			x: self.x + (to.x - self.x) * t,
			y: self.y + (to.y - self.y) * t,
			k: self.k + (to.k - self.k) * t,
		}
	}
}

/// An animated camera move.
#[derive(Clone, Debug)]
struct CameraTween {
	from: ViewTransform,
	to: ViewTransform,
	elapsed_ms: f64,
	duration_ms: f64,
}

fn ease_in_out_cubic(t: f64) -> f64 {
	if t < 0.5 {
		4.0 * t * t * t
	} else {
		1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
	}
}

/// Tracks an in-progress node drag operation.
#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub node_idx: Option<DefaultNodeIdx>,
}

/// Tracks an in-progress canvas pan operation.
#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

/// What a pointer release amounted to.
#[derive(Clone, Debug, PartialEq)]
pub enum PointerOutcome {
	/// A click on an element.
	Picked(Selection),
	/// A click on empty canvas.
	Background,
	/// The pointer moved too far; it was a drag or pan.
	Gesture,
}

#[derive(Clone, Debug)]
struct LinkSlot {
	info: LinkInfo,
	source: DefaultNodeIdx,
	target: DefaultNodeIdx,
}

/// Node ids and link endpoints; a change here restarts the layout.
type Topology = (Vec<String>, Vec<(String, String)>);

fn topology_of(data: &DisplayGraph) -> Topology {
	(
		data.nodes.iter().map(|n| n.id.clone()).collect(),
		data.links
			.iter()
			.map(|l| (l.source.clone(), l.target.clone()))
			.collect(),
	)
}

struct SeedNode {
	info: NodeInfo,
	x: f32,
	y: f32,
	anchor: bool,
}

/// Core graph state combining physics simulation with interaction tracking.
///
/// Created once when the canvas mounts and mutated each frame by the
/// animation loop.
pub struct ForceGraphState {
	pub graph: ForceGraph<NodeInfo, ()>,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub width: f64,
	pub height: f64,
	params: ForceParams,
	index: HashMap<String, DefaultNodeIdx>,
	links: Vec<LinkSlot>,
	all_links: Vec<LinkInfo>,
	topology: Option<Topology>,
	camera: Option<CameraTween>,
	press: Option<(f64, f64)>,
	alpha: f64,
}

impl ForceGraphState {
	pub fn new(data: &DisplayGraph, width: f64, height: f64, params: ForceParams) -> Self {
		let mut state = Self {
			graph: ForceGraph::new(params.simulation()),
			transform: ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0,
			},
			drag: DragState::default(),
			pan: PanState::default(),
			width,
			height,
			params,
			index: HashMap::new(),
			links: Vec::new(),
			all_links: Vec::new(),
			topology: None,
			camera: None,
			press: None,
			alpha: ALPHA_START,
		};
		state.set_data(data);
		state
	}

	/// Replace the displayed graph. Nodes that survive keep their positions;
	/// new ones are seeded on a ring around the origin. Only a change of node
	/// ids or link endpoints restarts the layout.
	pub fn set_data(&mut self, data: &DisplayGraph) {
		let previous = self.positions();
		let seeds = data.nodes.len().max(1) as f64;
		let nodes = data
			.nodes
			.iter()
			.enumerate()
			.map(|(i, node)| {
				let (x, y, anchor) = previous.get(&node.id).copied().unwrap_or_else(|| {
					let angle = i as f64 * 2.0 * PI / seeds;
					(
						(SEED_RADIUS * angle.cos()) as f32,
						(SEED_RADIUS * angle.sin()) as f32,
						false,
					)
				});
				SeedNode {
					info: NodeInfo {
						id: node.id.clone(),
						label: node.label.clone(),
						color: node.color,
					},
					x,
					y,
					anchor,
				}
			})
			.collect();
		let links = data
			.links
			.iter()
			.map(|l| LinkInfo {
				id: l.id.clone(),
				source: l.source.clone(),
				target: l.target.clone(),
				label: l.label.clone(),
				color: l.color,
				width: l.width,
			})
			.collect();
		self.rebuild(nodes, links);

		let topology = topology_of(data);
		if self.topology.as_ref() != Some(&topology) {
			self.topology = Some(topology);
			self.reheat(ALPHA_START);
		}
	}

	/// Bind new force parameters. Rebuilds the simulation in place when they
	/// differ from the current ones.
	pub fn rebind(&mut self, params: ForceParams) {
		if params == self.params {
			return;
		}
		self.params = params;
		let mut nodes = Vec::new();
		self.graph.visit_nodes(|node| {
			nodes.push(SeedNode {
				info: node.data.user_data.clone(),
				x: node.x(),
				y: node.y(),
				anchor: node.data.is_anchor,
			});
		});
		let links = std::mem::take(&mut self.all_links);
		self.rebuild(nodes, links);
		self.reheat(ALPHA_START);
	}

	pub fn params(&self) -> ForceParams {
		self.params
	}

	fn positions(&self) -> HashMap<String, (f32, f32, bool)> {
		let mut positions = HashMap::new();
		self.graph.visit_nodes(|node| {
			positions.insert(
				node.data.user_data.id.clone(),
				(node.x(), node.y(), node.data.is_anchor),
			);
		});
		positions
	}

	fn rebuild(&mut self, nodes: Vec<SeedNode>, links: Vec<LinkInfo>) {
		let mut graph = ForceGraph::new(self.params.simulation());
		let mut index = HashMap::new();
		for seed in nodes {
			let id = seed.info.id.clone();
			let idx = graph.add_node(NodeData {
				x: seed.x,
				y: seed.y,
				mass: NODE_MASS as f32,
				is_anchor: seed.anchor,
				user_data: seed.info,
			});
			index.insert(id, idx);
		}

		let mut slots = Vec::new();
		for info in &links {
			// Links to unknown nodes stay in the display data but cannot be laid out.
			if let (Some(&src), Some(&tgt)) = (index.get(&info.source), index.get(&info.target)) {
				if src != tgt {
					graph.add_edge(src, tgt, EdgeData::default());
				}
				slots.push(LinkSlot {
					info: info.clone(),
					source: src,
					target: tgt,
				});
			}
		}

		self.graph = graph;
		self.index = index;
		self.links = slots;
		self.all_links = links;
		self.drag = DragState::default();
	}

	fn node_id(&self, idx: DefaultNodeIdx) -> Option<String> {
		let mut found = None;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				found = Some(node.data.user_data.id.clone());
			}
		});
		found
	}

	pub fn node_count(&self) -> usize {
		self.index.len()
	}

	/// Current position of a node, if it has finite coordinates.
	pub fn node_position(&self, id: &str) -> Option<(f64, f64)> {
		let idx = *self.index.get(id)?;
		self.position_of(idx)
	}

	fn position_of(&self, idx: DefaultNodeIdx) -> Option<(f64, f64)> {
		let mut found = None;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				found = finite(node.x() as f64, node.y() as f64);
			}
		});
		found
	}

	/// Every laid-out link whose endpoints have finite coordinates.
	pub fn link_segments(&self) -> Vec<(&LinkInfo, (f64, f64), (f64, f64))> {
		let positions = self.index_positions();
		self.links
			.iter()
			.filter_map(|l| {
				let a = *positions.get(&l.source)?;
				let b = *positions.get(&l.target)?;
				Some((&l.info, a, b))
			})
			.collect()
	}

	fn index_positions(&self) -> HashMap<DefaultNodeIdx, (f64, f64)> {
		let mut positions = HashMap::new();
		self.graph.visit_nodes(|node| {
			if let Some(p) = finite(node.x() as f64, node.y() as f64) {
				positions.insert(node.index(), p);
			}
		});
		positions
	}

	/// Where a selection sits in world space: the node, or a link's midpoint.
	pub fn element_position(&self, selection: &Selection) -> Option<(f64, f64)> {
		match selection.kind {
			ElementKind::Node => self.node_position(&selection.id),
			ElementKind::Edge => self
				.link_segments()
				.into_iter()
				.find(|(link, _, _)| link.id == selection.id)
				.map(|(_, a, b)| ((a.0 + b.0) / 2.0, (a.1 + b.1) / 2.0)),
		}
	}

	// --- cooldown ---

	pub fn alpha(&self) -> f64 {
		self.alpha
	}

	pub fn is_settled(&self) -> bool {
		self.alpha < ALPHA_MIN
	}

	/// Nothing will change on screen until the next interaction.
	pub fn is_idle(&self) -> bool {
		self.is_settled() && self.camera.is_none()
	}

	pub fn reheat(&mut self, alpha: f64) {
		self.alpha = self.alpha.max(alpha);
	}

	/// Advance physics and camera by `dt_ms` milliseconds.
	pub fn tick(&mut self, dt_ms: f64) {
		if self.drag.active {
			self.reheat(ALPHA_DRAG);
		}
		if !self.is_settled() {
			self.graph.update((dt_ms / 1000.0) as f32);
			self.alpha *= 1.0 - ALPHA_DECAY;
		}
		self.step_camera(dt_ms);
	}

	// --- camera ---

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	/// Move the camera to `target`, animated over `duration_ms` (0 jumps).
	pub fn animate_to(&mut self, target: ViewTransform, duration_ms: f64) {
		let target = ViewTransform {
			k: target.k.clamp(MIN_ZOOM, MAX_ZOOM),
			..target
		};
		if duration_ms <= 0.0 {
			self.transform = target;
			self.camera = None;
		} else {
			self.camera = Some(CameraTween {
				from: self.transform,
				to: target,
				elapsed_ms: 0.0,
				duration_ms,
			});
		}
	}

	/// Put world point `(gx, gy)` at the canvas center at zoom `k`.
	pub fn center_on(&mut self, gx: f64, gy: f64, k: f64, duration_ms: f64) {
		let k = k.clamp(MIN_ZOOM, MAX_ZOOM);
		self.animate_to(
			ViewTransform {
				x: self.width / 2.0 - gx * k,
				y: self.height / 2.0 - gy * k,
				k,
			},
			duration_ms,
		);
	}

	/// Zoom so every positioned node is visible with `padding` pixels spare.
	pub fn zoom_to_fit(&mut self, padding: f64, duration_ms: f64) {
		let positions = self.index_positions();
		if positions.is_empty() {
			self.center_on(0.0, 0.0, 1.0, duration_ms);
			return;
		}
		let (mut x0, mut y0) = (f64::INFINITY, f64::INFINITY);
		let (mut x1, mut y1) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
		for (x, y) in positions.values() {
			x0 = x0.min(*x);
			y0 = y0.min(*y);
			x1 = x1.max(*x);
			y1 = y1.max(*y);
		}
		let avail_w = (self.width - 2.0 * padding).max(1.0);
		let avail_h = (self.height - 2.0 * padding).max(1.0);
		let k = (avail_w / (x1 - x0).max(1.0)).min(avail_h / (y1 - y0).max(1.0));
		self.center_on((x0 + x1) / 2.0, (y0 + y1) / 2.0, k, duration_ms);
	}

	fn step_camera(&mut self, dt_ms: f64) {
		let Some(tween) = self.camera.as_mut() else {
			return;
		};
		tween.elapsed_ms += dt_ms;
		let t = (tween.elapsed_ms / tween.duration_ms).min(1.0);
		self.transform = tween.from.lerp(tween.to, ease_in_out_cubic(t));
		if t >= 1.0 {
			self.camera = None;
		}
	}

	/// Zoom by a wheel step around the cursor.
	pub fn wheel(&mut self, sx: f64, sy: f64, delta_y: f64) {
		self.camera = None;
		let factor = if delta_y > 0.0 { 0.9 } else { 1.1 };
		let new_k = (self.transform.k * factor).clamp(MIN_ZOOM, MAX_ZOOM);
		let (gx, gy) = self.screen_to_graph(sx, sy);
		self.transform = ViewTransform {
			x: sx - gx * new_k,
			y: sy - gy * new_k,
			k: new_k,
		};
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}

	// --- hit-testing ---

	/// Topmost node under a screen point. Hit radius equals the drawn radius.
	pub fn node_at_position(&self, sx: f64, sy: f64, metrics: &GraphMetrics) -> Option<DefaultNodeIdx> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let scale = ScaledValues::new(metrics, self.transform.k);
		let mut found = None;
		self.graph.visit_nodes(|node| {
			let Some((x, y)) = finite(node.x() as f64, node.y() as f64) else {
				return;
			};
			let (dx, dy) = (x - gx, y - gy);
			if (dx * dx + dy * dy).sqrt() <= scale.node_radius {
				found = Some(node.index());
			}
		});
		found
	}

	/// Closest link within pick distance of a screen point.
	pub fn link_at_position(&self, sx: f64, sy: f64, metrics: &GraphMetrics) -> Option<String> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let scale = ScaledValues::new(metrics, self.transform.k);
		let tolerance = scale.link_width / 2.0 + scale.link_hit_slop;
		self.link_segments()
			.into_iter()
			.map(|(link, a, b)| (link, distance_to_segment((gx, gy), a, b)))
			.filter(|(_, d)| *d <= tolerance)
			.min_by(|a, b| a.1.total_cmp(&b.1))
			.map(|(link, _)| link.id.clone())
	}

	/// Node first, then link.
	pub fn hit(&self, sx: f64, sy: f64, metrics: &GraphMetrics) -> Option<Selection> {
		if let Some(idx) = self.node_at_position(sx, sy, metrics) {
			return self.node_id(idx).map(Selection::node);
		}
		self.link_at_position(sx, sy, metrics).map(Selection::edge)
	}

	// --- pointer gestures ---

	pub fn pointer_down(&mut self, sx: f64, sy: f64, metrics: &GraphMetrics) {
		self.camera = None;
		self.press = Some((sx, sy));
		if let Some(idx) = self.node_at_position(sx, sy, metrics) {
			self.drag = DragState {
				active: true,
				node_idx: Some(idx),
			};
			self.set_anchor(idx, true);
			self.reheat(ALPHA_DRAG);
		} else {
			self.pan = PanState {
				active: true,
				start_x: sx,
				start_y: sy,
				transform_start_x: self.transform.x,
				transform_start_y: self.transform.y,
			};
		}
	}

	pub fn pointer_move(&mut self, sx: f64, sy: f64) {
		if self.drag.active {
			if let Some(idx) = self.drag.node_idx {
				let (gx, gy) = self.screen_to_graph(sx, sy);
				self.graph.visit_nodes_mut(|node| {
					if node.index() == idx {
						node.data.x = gx as f32;
						node.data.y = gy as f32;
						node.data.is_anchor = true;
					}
				});
				self.reheat(ALPHA_DRAG);
			}
		} else if self.pan.active {
			self.transform.x = self.pan.transform_start_x + (sx - self.pan.start_x);
			self.transform.y = self.pan.transform_start_y + (sy - self.pan.start_y);
		}
	}

	/// Finish a gesture. Dragged nodes stay pinned where they were dropped.
	pub fn pointer_up(&mut self, sx: f64, sy: f64, metrics: &GraphMetrics) -> PointerOutcome {
		let was_click = self
			.press
			.take()
			.map(|(px, py)| ((sx - px).powi(2) + (sy - py).powi(2)).sqrt() < CLICK_SLOP_PX)
			.unwrap_or(false);
		if self.drag.active && was_click {
			// A click on a node should not pin it.
			if let Some(idx) = self.drag.node_idx {
				self.set_anchor(idx, false);
			}
		}
		self.drag = DragState::default();
		self.pan.active = false;

		if !was_click {
			return PointerOutcome::Gesture;
		}
		match self.hit(sx, sy, metrics) {
			Some(selection) => PointerOutcome::Picked(selection),
			None => PointerOutcome::Background,
		}
	}

	pub fn pointer_leave(&mut self) {
		self.press = None;
		self.drag = DragState::default();
		self.pan.active = false;
	}

	fn set_anchor(&mut self, idx: DefaultNodeIdx, anchor: bool) {
		self.graph.visit_nodes_mut(|node| {
			if node.index() == idx {
				node.data.is_anchor = anchor;
			}
		});
	}
}

fn finite(x: f64, y: f64) -> Option<(f64, f64)> {
	(x.is_finite() && y.is_finite()).then_some((x, y))
}

fn distance_to_segment(p: (f64, f64), a: (f64, f64), b: (f64, f64)) -> f64 {
	let (dx, dy) = (b.0 - a.0, b.1 - a.1);
	let len2 = dx * dx + dy * dy;
	let t = if len2 == 0.0 {
		0.0
	} else {
		(((p.0 - a.0) * dx + (p.1 - a.1) * dy) / len2).clamp(0.0, 1.0)
	};
	let (cx, cy) = (a.0 + t * dx, a.1 + t * dy);
	((p.0 - cx).powi(2) + (p.1 - cy).powi(2)).sqrt()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::api::{Edge, GraphSnapshot, Node, PropertyMap};
	use crate::components::force_graph::adapter::adapt;
	use crate::components::force_graph::scale::ViewportClass;
	use crate::theme::Theme;

	fn metrics() -> GraphMetrics {
		GraphMetrics::for_class(ViewportClass::Large)
	}

	fn display(node_ids: &[&str], edges: &[(&str, &str)]) -> DisplayGraph {
		let snapshot = GraphSnapshot {
			nodes: node_ids
				.iter()
				.map(|id| Node {
					id: id.to_string(),
					name: id.to_uppercase(),
					..Default::default()
				})
				.collect(),
			edges: edges
				.iter()
				.map(|(s, t)| Edge {
					id: None,
					source_id: s.to_string(),
					target_id: t.to_string(),
					edge_type: "LINK".into(),
					properties: PropertyMap::new(),
				})
				.collect(),
		};
		adapt(&snapshot, &Theme::default().palette, &metrics())
	}

	fn state(node_ids: &[&str], edges: &[(&str, &str)]) -> ForceGraphState {
		ForceGraphState::new(
			&display(node_ids, edges),
			800.0,
			600.0,
			ForceParams::from_metrics(&metrics()),
		)
	}

	fn move_node(state: &mut ForceGraphState, id: &str, x: f32, y: f32) {
		let idx = state.index[id];
		state.graph.visit_nodes_mut(|node| {
			if node.index() == idx {
				node.data.x = x;
				node.data.y = y;
			}
		});
	}

	fn screen_of(state: &ForceGraphState, gx: f64, gy: f64) -> (f64, f64) {
		(
			gx * state.transform.k + state.transform.x,
			gy * state.transform.k + state.transform.y,
		)
	}

	#[test]
	fn spring_balances_charge_at_link_distance() {
		let params = ForceParams {
			link_distance: 100.0,
			charge: 80.0,
		};
		let d = params.link_distance;
		let repulsion = params.charge * NODE_MASS * NODE_MASS / (d * d);
		let attraction = params.spring() * d / 2.0;
		assert!((repulsion - attraction).abs() < 1e-9);
	}

	#[test]
	fn dangling_links_are_not_laid_out() {
		let s = state(&["a", "b"], &[("a", "b"), ("a", "ghost")]);
		assert_eq!(s.node_count(), 2);
		assert_eq!(s.link_segments().len(), 1);
	}

	#[test]
	fn cooldown_settles_and_reheats() {
		let mut s = state(&["a", "b"], &[("a", "b")]);
		assert!(!s.is_settled());
		for _ in 0..400 {
			s.tick(16.0);
		}
		assert!(s.is_settled());
		assert!(s.is_idle());

		let (sx, sy) = {
			let (x, y) = s.node_position("a").unwrap();
			screen_of(&s, x, y)
		};
		s.pointer_down(sx, sy, &metrics());
		assert!(s.drag.active);
		assert!(!s.is_settled());
	}

	#[test]
	fn surviving_nodes_keep_positions_on_refetch() {
		let mut s = state(&["a", "b"], &[("a", "b")]);
		move_node(&mut s, "a", 42.0, -17.0);
		s.set_data(&display(&["a", "c"], &[("a", "c")]));
		assert_eq!(s.node_position("a"), Some((42.0, -17.0)));
		assert!(s.node_position("b").is_none());
		assert!(s.node_position("c").is_some());
	}

	#[test]
	fn rebind_changes_params_and_keeps_layout() {
		let mut s = state(&["a", "b"], &[("a", "b")]);
		move_node(&mut s, "b", 10.0, 20.0);
		let small = ForceParams::from_metrics(&GraphMetrics::for_class(ViewportClass::Small));
		s.rebind(small);
		assert_eq!(s.params(), small);
		assert_eq!(s.node_position("b"), Some((10.0, 20.0)));
		assert_eq!(s.link_segments().len(), 1);
	}

	#[test]
	fn node_hit_radius_follows_zoom() {
		let mut s = state(&["a"], &[]);
		move_node(&mut s, "a", 0.0, 0.0);
		// Large node size is 10px, drawn as 10 / k world units.
		let (cx, cy) = screen_of(&s, 0.0, 0.0);
		assert!(s.node_at_position(cx + 9.0, cy, &metrics()).is_some());
		assert!(s.node_at_position(cx + 11.0, cy, &metrics()).is_none());
		s.animate_to(
			ViewTransform {
				x: 400.0,
				y: 300.0,
				k: 4.0,
			},
			0.0,
		);
		// Same screen-space target at any zoom.
		let (cx, cy) = screen_of(&s, 0.0, 0.0);
		assert!(s.node_at_position(cx + 9.0, cy, &metrics()).is_some());
		assert!(s.node_at_position(cx + 11.0, cy, &metrics()).is_none());
	}

	#[test]
	fn click_picks_node_then_link_then_background() {
		let mut s = state(&["a", "b"], &[("a", "b")]);
		move_node(&mut s, "a", -100.0, 0.0);
		move_node(&mut s, "b", 100.0, 0.0);
		let m = metrics();

		let (x, y) = screen_of(&s, -100.0, 0.0);
		s.pointer_down(x, y, &m);
		assert_eq!(s.pointer_up(x, y, &m), PointerOutcome::Picked(Selection::node("a")));

		let (x, y) = screen_of(&s, 0.0, 1.0);
		s.pointer_down(x, y, &m);
		assert_eq!(s.pointer_up(x, y, &m), PointerOutcome::Picked(Selection::edge("a->b")));

		let (x, y) = screen_of(&s, 0.0, 80.0);
		s.pointer_down(x, y, &m);
		assert_eq!(s.pointer_up(x, y, &m), PointerOutcome::Background);
	}

	#[test]
	fn drag_pins_node_and_is_not_a_click() {
		let mut s = state(&["a"], &[]);
		move_node(&mut s, "a", 0.0, 0.0);
		let m = metrics();
		let (x, y) = screen_of(&s, 0.0, 0.0);
		s.pointer_down(x, y, &m);
		s.pointer_move(x + 50.0, y);
		assert_eq!(s.pointer_up(x + 50.0, y, &m), PointerOutcome::Gesture);
		let (gx, _) = s.node_position("a").unwrap();
		assert!((gx - 50.0).abs() < 1e-3);
		s.tick(16.0);
		let (gx2, _) = s.node_position("a").unwrap();
		assert!((gx2 - 50.0).abs() < 1e-3);
	}

	#[test]
	fn background_drag_pans() {
		let mut s = state(&["a"], &[]);
		move_node(&mut s, "a", 0.0, 0.0);
		let m = metrics();
		let before = s.transform;
		s.pointer_down(10.0, 10.0, &m);
		s.pointer_move(40.0, 30.0);
		assert_eq!(s.pointer_up(40.0, 30.0, &m), PointerOutcome::Gesture);
		assert_eq!(s.transform.x, before.x + 30.0);
		assert_eq!(s.transform.y, before.y + 20.0);
	}

	#[test]
	fn wheel_zoom_keeps_cursor_point_and_clamps() {
		let mut s = state(&["a"], &[]);
		let anchor = s.screen_to_graph(100.0, 100.0);
		s.wheel(100.0, 100.0, -1.0);
		let after = s.screen_to_graph(100.0, 100.0);
		assert!((anchor.0 - after.0).abs() < 1e-9);
		assert!((anchor.1 - after.1).abs() < 1e-9);
		for _ in 0..200 {
			s.wheel(0.0, 0.0, 1.0);
		}
		assert_eq!(s.transform.k, MIN_ZOOM);
	}

	#[test]
	fn center_on_animates_to_target() {
		let mut s = state(&["a"], &[]);
		s.center_on(50.0, -20.0, 12.0, 500.0);
		assert!(!s.is_idle());
		s.tick(250.0);
		assert!(s.transform.k > 1.0 && s.transform.k < 12.0);
		s.tick(300.0);
		assert_eq!(s.transform.k, 12.0);
		let (cx, cy) = s.screen_to_graph(400.0, 300.0);
		assert!((cx - 50.0).abs() < 1e-9 && (cy + 20.0).abs() < 1e-9);
	}

	#[test]
	fn fit_contains_all_nodes() {
		let mut s = state(&["a", "b"], &[]);
		move_node(&mut s, "a", -300.0, -10.0);
		move_node(&mut s, "b", 500.0, 90.0);
		s.zoom_to_fit(100.0, 0.0);
		for id in ["a", "b"] {
			let (gx, gy) = s.node_position(id).unwrap();
			let (x, y) = screen_of(&s, gx, gy);
			assert!((100.0 - 1e-6..=700.0 + 1e-6).contains(&x));
			assert!((0.0..=600.0).contains(&y));
		}
	}

	#[test]
	fn edge_position_is_midpoint() {
		let mut s = state(&["a", "b"], &[("a", "b")]);
		move_node(&mut s, "a", 0.0, 0.0);
		move_node(&mut s, "b", 10.0, 20.0);
		assert_eq!(s.element_position(&Selection::edge("a->b")), Some((5.0, 10.0)));
		assert_eq!(s.element_position(&Selection::node("zz")), None);
	}

	#[test]
	fn non_finite_nodes_are_skipped() {
		let mut s = state(&["a", "b"], &[("a", "b")]);
		move_node(&mut s, "a", f32::NAN, 0.0);
		assert_eq!(s.node_position("a"), None);
		assert!(s.link_segments().is_empty());
		let (x, y) = screen_of(&s, 0.0, 0.0);
		assert_ne!(s.hit(x, y, &metrics()), Some(Selection::node("a")));
	}
}
