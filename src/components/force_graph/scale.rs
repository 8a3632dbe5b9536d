//! Visual scales: node size from score, node color from group.

use std::collections::HashMap;

use serde_json::Value;

use super::types::GraphNode;

/// Radius of a node whose volume value is 1.
pub const NODE_REL_SIZE: f64 = 6.0;

/// Paired categorical palette, assigned to groups in first-seen order.
const PALETTE: &[&str] = &[
	"#a6cee3", "#1f78b4", "#b2df8a", "#33a02c", "#fb9a99", "#e31a1c", "#fdbf6f", "#ff7f00",
	"#cab2d6", "#6a3d9a", "#ffff99", "#b15928",
];

/// Volume value of a node: the square of its score.
pub fn node_val(score: f64) -> f64 {
	score * score
}

/// Sphere radius such that volume scales with [`node_val`].
pub fn node_radius(score: f64) -> f64 {
	node_val(score).max(0.0).cbrt() * NODE_REL_SIZE
}

/// Maps each distinct `group` to a palette color.
#[derive(Clone, Debug, Default)]
pub struct GroupColors {
	assigned: HashMap<String, &'static str>,
}

impl GroupColors {
	/// Colors for `nodes`, in order.
	pub fn assign(nodes: &[GraphNode]) -> Vec<String> {
		let mut scale = Self::default();
		nodes
			.iter()
			.map(|n| scale.color_of(n.group.as_ref()).to_owned())
			.collect()
	}

	pub fn color_of(&mut self, group: Option<&Value>) -> &'static str {
		let key = group_key(group);
		let next = PALETTE[self.assigned.len() % PALETTE.len()];
		*self.assigned.entry(key).or_insert(next)
	}
}

/// Keyed by JSON text, so `1` and `"1"` are different groups.
fn group_key(group: Option<&Value>) -> String {
	match group {
		None | Some(Value::Null) => String::new(),
		Some(value) => value.to_string(),
	}
}
