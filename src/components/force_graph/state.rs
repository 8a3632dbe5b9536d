use log::debug;

use super::camera::{OrbitCamera, Projected};
use super::highlight::{Highlight, HoverTarget};
use super::index::GraphIndex;
use super::scale::{GroupColors, node_radius};
use super::simulation::{LinkForceTuning, Simulation};
use super::types::GraphData;

/// Pointer slack around a link, in screen pixels.
pub const LINK_HIT_PX: f64 = 4.0;
/// Smallest on-screen node hit radius, in pixels.
pub const MIN_NODE_HIT_PX: f64 = 4.0;
/// Particle width on highlighted links.
pub const HIGHLIGHT_PARTICLE_WIDTH: f64 = 4.0;
/// Fraction of a link a particle travels per second.
const PARTICLE_SPEED: f64 = 0.6;
/// Simulation temperature held while a node is dragged.
const DRAG_ALPHA_TARGET: f64 = 0.3;

/// Knobs the viewer takes from the app configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewerSettings {
	pub link_strength: f64,
	pub particles_per_link: usize,
}

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub node: Option<usize>,
	pub depth: f64,
	pub moved: bool,
}

#[derive(Clone, Debug, Default)]
pub struct OrbitState {
	pub active: bool,
	pub last_x: f64,
	pub last_y: f64,
}

pub struct ForceGraphState {
	pub index: GraphIndex,
	pub sim: Simulation,
	pub camera: OrbitCamera,
	pub colors: Vec<String>,
	pub radii: Vec<f64>,
	pub settings: ViewerSettings,
	pub drag: DragState,
	pub orbit: OrbitState,
	pub particle_t: f64,
	hover: Option<HoverTarget>,
	highlight: Highlight,
}

impl ForceGraphState {
	pub fn new(data: &GraphData, width: f64, height: f64, settings: ViewerSettings) -> Self {
		let index = GraphIndex::build(data);
		let mut sim = Simulation::new(index.node_count(), index.links());

		let values: Vec<f64> = index.links().iter().map(|l| l.value).collect();
		if let Some(tuning) = LinkForceTuning::from_values(values.iter().copied()) {
			debug!("link values span {} ..= {}", tuning.min, tuning.max);
			for (link, &value) in index.links().iter().zip(&values) {
				debug!(
					"link {} -> {}: ratio {:?}, distance {}",
					index.id(link.source),
					index.id(link.target),
					tuning.ratio(value),
					tuning.distance(value)
				);
			}
			sim.tune_links(&tuning, &values, settings.link_strength);
		}

		let colors = GroupColors::assign(&data.nodes);
		let radii = data.nodes.iter().map(|n| node_radius(n.score)).collect();

		Self {
			camera: OrbitCamera::framing(index.node_count(), width, height),
			index,
			sim,
			colors,
			radii,
			settings,
			drag: DragState::default(),
			orbit: OrbitState::default(),
			particle_t: 0.0,
			hover: None,
			highlight: Highlight::default(),
		}
	}

	pub fn project_node(&self, node: usize) -> Option<Projected> {
		self.camera.project(self.sim.position(node))
	}

	/// Front-most node under the pointer.
	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<usize> {
		let mut found: Option<(usize, f64)> = None;
		for node in 0..self.index.node_count() {
			let Some(p) = self.project_node(node) else {
				continue;
			};
			let hit = (self.radii[node] * p.scale).max(MIN_NODE_HIT_PX);
			let (dx, dy) = (p.x - sx, p.y - sy);
			if dx * dx + dy * dy <= hit * hit && found.is_none_or(|(_, d)| p.depth < d) {
				found = Some((node, p.depth));
			}
		}
		found.map(|(node, _)| node)
	}

	/// Link whose projected segment passes closest to the pointer.
	pub fn link_at_position(&self, sx: f64, sy: f64) -> Option<usize> {
		let mut found: Option<(usize, f64)> = None;
		for (li, link) in self.index.links().iter().enumerate() {
			let (Some(a), Some(b)) = (self.project_node(link.source), self.project_node(link.target))
			else {
				continue;
			};
			let dist = segment_distance((sx, sy), (a.x, a.y), (b.x, b.y));
			if dist <= LINK_HIT_PX && found.is_none_or(|(_, d)| dist < d) {
				found = Some((li, dist));
			}
		}
		found.map(|(li, _)| li)
	}

	pub fn target_at_position(&self, sx: f64, sy: f64) -> Option<HoverTarget> {
		self.node_at_position(sx, sy)
			.map(HoverTarget::Node)
			.or_else(|| self.link_at_position(sx, sy).map(HoverTarget::Link))
	}

	pub fn set_hover(&mut self, target: Option<HoverTarget>) {
		if self.hover == target {
			return;
		}
		self.hover = target;
		self.highlight = Highlight::for_target(&self.index, target);
	}

	pub fn highlight(&self) -> &Highlight {
		&self.highlight
	}

	pub fn particle_width(&self, link: usize) -> f64 {
		if self.highlight.contains_link(&self.index, link) {
			HIGHLIGHT_PARTICLE_WIDTH
		} else {
			0.0
		}
	}

	pub fn begin_drag(&mut self, node: usize) {
		let depth = self
			.project_node(node)
			.map(|p| p.depth)
			.unwrap_or(self.camera.distance);
		self.drag = DragState {
			node: Some(node),
			depth,
			moved: false,
		};
	}

	pub fn drag_to(&mut self, sx: f64, sy: f64) {
		let Some(node) = self.drag.node else {
			return;
		};
		if !self.drag.moved {
			self.drag.moved = true;
			self.sim.set_alpha_target(DRAG_ALPHA_TARGET);
			self.sim.reheat();
		}
		let at = self.camera.unproject(sx, sy, self.drag.depth);
		self.sim.pin(node, at);
	}

	/// Ends a drag. A node that actually moved stays fixed where it was dropped.
	pub fn end_drag(&mut self) {
		if let Some(node) = self.drag.node.take() {
			if self.drag.moved {
				let at = self.sim.position(node);
				self.sim.pin(node, at);
				self.sim.set_alpha_target(0.0);
				debug!("pinned node {} at {:?}", self.index.id(node), at);
			}
		}
		self.drag = DragState::default();
	}

	pub fn tick(&mut self, dt: f64) {
		self.sim.tick();
		self.particle_t = (self.particle_t + dt * PARTICLE_SPEED).fract();
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.camera.resize(width, height);
	}
}

fn segment_distance(p: (f64, f64), a: (f64, f64), b: (f64, f64)) -> f64 {
	let (abx, aby) = (b.0 - a.0, b.1 - a.1);
	let len2 = abx * abx + aby * aby;
	let t = if len2 == 0.0 {
		0.0
	} else {
		(((p.0 - a.0) * abx + (p.1 - a.1) * aby) / len2).clamp(0.0, 1.0)
	};
	let (cx, cy) = (a.0 + t * abx, a.1 + t * aby);
	((p.0 - cx).powi(2) + (p.1 - cy).powi(2)).sqrt()
}
