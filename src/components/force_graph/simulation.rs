use std::f64::consts::PI;

use euclid::default::Vector3D;

use super::index::ResolvedLink;

pub type Vec3 = Vector3D<f64>;

const INITIAL_RADIUS: f64 = 10.0;
const DEFAULT_LINK_DISTANCE: f64 = 30.0;
const CHARGE_STRENGTH: f64 = -30.0;
const CHARGE_DISTANCE_MIN2: f64 = 1.0;
const VELOCITY_DECAY: f64 = 0.4;
const ALPHA_MIN: f64 = 0.001;

#[derive(Clone, Debug)]
pub struct SimNode {
	pub pos: Vec3,
	pub vel: Vec3,
	/// Pinned position; the node ignores forces while set.
	pub fixed: Option<Vec3>,
}

#[derive(Clone, Copy, Debug)]
struct SimLink {
	source: usize,
	target: usize,
	distance: f64,
	strength: f64,
	bias: f64,
}

/// Min/max of link values, taken once per payload to drive link distances.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinkForceTuning {
	pub min: f64,
	pub max: f64,
}

impl LinkForceTuning {
	pub fn from_values(values: impl IntoIterator<Item = f64>) -> Option<Self> {
		values.into_iter().fold(None, |acc, v| match acc {
			None => Some(Self { min: v, max: v }),
			Some(t) => Some(Self {
				min: t.min.min(v),
				max: t.max.max(v),
			}),
		})
	}

	/// Higher values pull their endpoints closer.
	pub fn distance(&self, value: f64) -> f64 {
		self.max - value
	}

	/// Position of `value` within `[min, max]`; `None` when all values are equal.
	pub fn ratio(&self, value: f64) -> Option<f64> {
		let span = self.max - self.min;
		(span != 0.0).then(|| (value - self.min) / span)
	}
}

/// 3D force layout: link springs, many-body charge and centering, cooled by alpha.
pub struct Simulation {
	nodes: Vec<SimNode>,
	links: Vec<SimLink>,
	alpha: f64,
	alpha_target: f64,
	alpha_decay: f64,
	jiggle_seed: u64,
}

impl Simulation {
	pub fn new(node_count: usize, links: &[ResolvedLink]) -> Self {
		let nodes = (0..node_count)
			.map(|i| SimNode {
				pos: initial_position(i),
				vel: Vec3::zero(),
				fixed: None,
			})
			.collect();

		let mut degree = vec![0usize; node_count];
		for link in links {
			degree[link.source] += 1;
			degree[link.target] += 1;
		}
		let links = links
			.iter()
			.map(|link| {
				let (ds, dt) = (degree[link.source] as f64, degree[link.target] as f64);
				SimLink {
					source: link.source,
					target: link.target,
					distance: DEFAULT_LINK_DISTANCE,
					strength: 1.0 / ds.min(dt),
					bias: ds / (ds + dt),
				}
			})
			.collect();

		Self {
			nodes,
			links,
			alpha: 1.0,
			alpha_target: 0.0,
			alpha_decay: 1.0 - ALPHA_MIN.powf(1.0 / 300.0),
			jiggle_seed: 0,
		}
	}

	/// Replaces link strength with `strength` and distance with
	/// `tuning.distance(value)` for every link. `values` is parallel to the
	/// links the simulation was built with.
	pub fn tune_links(&mut self, tuning: &LinkForceTuning, values: &[f64], strength: f64) {
		for (link, &value) in self.links.iter_mut().zip(values) {
			link.strength = strength;
			link.distance = tuning.distance(value);
		}
	}

	#[cfg(test)]
	pub fn link_distance(&self, link: usize) -> f64 {
		self.links[link].distance
	}

	#[cfg(test)]
	pub fn nodes(&self) -> &[SimNode] {
		&self.nodes
	}

	pub fn position(&self, node: usize) -> Vec3 {
		self.nodes[node].pos
	}

	#[cfg(test)]
	pub fn alpha(&self) -> f64 {
		self.alpha
	}

	pub fn is_cooled(&self) -> bool {
		self.alpha < ALPHA_MIN && self.alpha_target < ALPHA_MIN
	}

	/// Keeps the simulation warm while a node is being dragged.
	pub fn set_alpha_target(&mut self, target: f64) {
		self.alpha_target = target;
	}

	pub fn reheat(&mut self) {
		self.alpha = self.alpha.max(0.3);
	}

	/// Moves a node and holds it there for the rest of the layout.
	pub fn pin(&mut self, node: usize, at: Vec3) {
		let n = &mut self.nodes[node];
		n.pos = at;
		n.vel = Vec3::zero();
		n.fixed = Some(at);
	}

	/// Advances one step. Returns `false` once cooled.
	pub fn tick(&mut self) -> bool {
		if self.is_cooled() {
			return false;
		}
		self.alpha += (self.alpha_target - self.alpha) * self.alpha_decay;

		self.apply_links();
		self.apply_charge();
		self.apply_center();

		for node in &mut self.nodes {
			match node.fixed {
				Some(at) => {
					node.pos = at;
					node.vel = Vec3::zero();
				}
				None => {
					node.vel *= 1.0 - VELOCITY_DECAY;
					node.pos += node.vel;
				}
			}
		}
		true
	}

	fn apply_links(&mut self) {
		let alpha = self.alpha;
		for li in 0..self.links.len() {
			let link = self.links[li];
			let (s, t) = (&self.nodes[link.source], &self.nodes[link.target]);
			let mut d = (t.pos + t.vel) - (s.pos + s.vel);
			if d.square_length() == 0.0 {
				d = self.jiggle_vec();
			}
			let l = d.length();
			let k = (l - link.distance) / l * alpha * link.strength;
			d *= k;

			self.nodes[link.target].vel -= d * link.bias;
			self.nodes[link.source].vel += d * (1.0 - link.bias);
		}
	}

	fn apply_charge(&mut self) {
		let alpha = self.alpha;
		let n = self.nodes.len();
		for i in 0..n {
			let mut dv = Vec3::zero();
			for j in 0..n {
				if i == j {
					continue;
				}
				let mut d = self.nodes[j].pos - self.nodes[i].pos;
				let mut l2 = d.square_length();
				if l2 == 0.0 {
					d = self.jiggle_vec();
					l2 = d.square_length();
				}
				if l2 < CHARGE_DISTANCE_MIN2 {
					l2 = (CHARGE_DISTANCE_MIN2 * l2).sqrt();
				}
				dv += d * (CHARGE_STRENGTH * alpha / l2);
			}
			self.nodes[i].vel += dv;
		}
	}

	fn apply_center(&mut self) {
		if self.nodes.is_empty() {
			return;
		}
		let sum = self
			.nodes
			.iter()
			.fold(Vec3::zero(), |acc, n| acc + n.pos);
		let shift = sum / self.nodes.len() as f64;
		for node in &mut self.nodes {
			node.pos -= shift;
		}
	}

	fn jiggle_vec(&mut self) -> Vec3 {
		let mut next = || {
			self.jiggle_seed += 1;
			(rand_simple(self.jiggle_seed) - 0.5) * 1e-6
		};
		Vec3::new(next(), next(), next())
	}
}

/// Phyllotaxis spiral on a sphere, so nodes start spread out and distinct.
fn initial_position(i: usize) -> Vec3 {
	let radius = INITIAL_RADIUS * (0.5 + i as f64).cbrt();
	let roll = i as f64 * PI * (3.0 - 5f64.sqrt());
	let yaw = i as f64 * PI * 20.0 / (9.0 + 221f64.sqrt());
	Vec3::new(
		radius * roll.sin() * yaw.cos(),
		radius * roll.cos(),
		radius * roll.sin() * yaw.sin(),
	)
}

/// Simple pseudo-random number generator (deterministic for consistency).
fn rand_simple(seed: u64) -> f64 {
	let x = seed.wrapping_add(1).wrapping_mul(9301).wrapping_add(49297) % 233280;
	(x as f64) / 233280.0
}

#[cfg(test)]
mod tests {
	use super::*;

	fn link(source: usize, target: usize, value: f64) -> ResolvedLink {
		ResolvedLink {
			source,
			target,
			value,
		}
	}

	#[test]
	fn tuning_pulls_high_values_closer() {
		let tuning = LinkForceTuning::from_values([1.0, 5.0, 10.0]).unwrap();
		assert_eq!(tuning.min, 1.0);
		assert_eq!(tuning.max, 10.0);
		assert_eq!(tuning.distance(10.0), 0.0);
		assert_eq!(tuning.distance(1.0), 9.0);
		assert_eq!(tuning.ratio(5.0), Some(4.0 / 9.0));
	}

	#[test]
	fn tuning_with_uniform_values_has_no_ratio() {
		let tuning = LinkForceTuning::from_values([3.0, 3.0]).unwrap();
		assert_eq!(tuning.ratio(3.0), None);
		assert_eq!(tuning.distance(3.0), 0.0);
		assert!(LinkForceTuning::from_values(std::iter::empty()).is_none());
	}

	#[test]
	fn tune_links_applies_distance_and_strength() {
		let links = [link(0, 1, 1.0), link(1, 2, 5.0), link(0, 2, 10.0)];
		let mut sim = Simulation::new(3, &links);
		let values: Vec<f64> = links.iter().map(|l| l.value).collect();
		let tuning = LinkForceTuning::from_values(values.iter().copied()).unwrap();
		sim.tune_links(&tuning, &values, 0.05);

		assert_eq!(sim.link_distance(0), 9.0);
		assert_eq!(sim.link_distance(1), 5.0);
		assert_eq!(sim.link_distance(2), 0.0);
	}

	#[test]
	fn pinned_node_stays_put() {
		let mut sim = Simulation::new(3, &[link(0, 1, 1.0), link(1, 2, 1.0)]);
		let at = Vec3::new(40.0, -5.0, 12.0);
		sim.pin(1, at);
		for _ in 0..50 {
			sim.tick();
		}
		assert_eq!(sim.position(1), at);
	}

	#[test]
	fn unlinked_nodes_repel() {
		let mut sim = Simulation::new(2, &[]);
		let before = (sim.position(0) - sim.position(1)).length();
		for _ in 0..30 {
			sim.tick();
		}
		let after = (sim.position(0) - sim.position(1)).length();
		assert!(after > before);
	}

	#[test]
	fn cools_down_and_stops() {
		let mut sim = Simulation::new(4, &[link(0, 1, 1.0), link(2, 3, 1.0)]);
		let mut ticks = 0;
		while sim.tick() {
			ticks += 1;
			assert!(ticks < 1000);
		}
		assert!(sim.is_cooled());
		assert!(sim.alpha() < ALPHA_MIN);
	}

	#[test]
	fn jiggle_stays_tiny_for_large_seeds() {
		for seed in [0, 461_000, u32::MAX as u64, u64::MAX - 1, u64::MAX] {
			let r = rand_simple(seed);
			assert!((0.0..1.0).contains(&r));
		}
	}

	#[test]
	fn initial_positions_are_distinct() {
		let a = initial_position(0);
		let b = initial_position(1);
		assert!((a - b).length() > 1.0);
	}
}
