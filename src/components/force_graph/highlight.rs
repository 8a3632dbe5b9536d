use std::collections::HashSet;

use super::index::GraphIndex;

/// Identifies a link by its `(source id, target id)` pair.
pub type LinkKey = (String, String);

/// What the pointer is currently over.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HoverTarget {
	Node(usize),
	Link(usize),
}

/// Nodes and links emphasized by the current hover focus.
///
/// Never mutated in place: every hover event produces a fresh value that
/// replaces the previous one, so both sets always describe the same focus.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Highlight {
	nodes: HashSet<usize>,
	links: HashSet<LinkKey>,
}

impl Highlight {
	pub fn for_target(index: &GraphIndex, target: Option<HoverTarget>) -> Self {
		match target {
			None => Self::default(),
			Some(HoverTarget::Node(node)) => Self::for_node(index, node),
			Some(HoverTarget::Link(link)) => Self::for_link(index, link),
		}
	}

	fn for_node(index: &GraphIndex, node: usize) -> Self {
		let mut nodes = HashSet::with_capacity(index.neighbors(node).len() + 1);
		nodes.insert(node);
		nodes.extend(index.neighbors(node).iter().copied());

		let links = index
			.incident_links(node)
			.iter()
			.map(|&li| link_key(index, li))
			.collect();

		Self { nodes, links }
	}

	fn for_link(index: &GraphIndex, link: usize) -> Self {
		let resolved = &index.links()[link];
		Self {
			nodes: HashSet::from([resolved.source, resolved.target]),
			links: HashSet::from([link_key(index, link)]),
		}
	}

	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty() && self.links.is_empty()
	}

	pub fn contains_node(&self, node: usize) -> bool {
		self.nodes.contains(&node)
	}

	/// Membership is by endpoint ids, so parallel links light up together.
	pub fn contains_link(&self, index: &GraphIndex, link: usize) -> bool {
		let resolved = &index.links()[link];
		self.links.iter().any(|(s, t)| {
			s == index.id(resolved.source) && t == index.id(resolved.target)
		})
	}

	#[cfg(test)]
	pub fn nodes(&self) -> &HashSet<usize> {
		&self.nodes
	}

	#[cfg(test)]
	pub fn links(&self) -> &HashSet<LinkKey> {
		&self.links
	}
}

fn link_key(index: &GraphIndex, link: usize) -> LinkKey {
	let resolved = &index.links()[link];
	(
		index.id(resolved.source).to_owned(),
		index.id(resolved.target).to_owned(),
	)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::force_graph::types::{GraphData, GraphLink, GraphNode};

	fn index() -> GraphIndex {
		let node = |id: &str| GraphNode {
			id: id.into(),
			score: 1.0,
			group: None,
		};
		let link = |s: &str, t: &str| GraphLink {
			source: s.into(),
			target: t.into(),
			value: 1.0,
		};
		GraphIndex::build(&GraphData {
			nodes: vec![node("a"), node("b"), node("c"), node("d")],
			links: vec![link("a", "b"), link("a", "c"), link("c", "d")],
		})
	}

	fn key(s: &str, t: &str) -> LinkKey {
		(s.into(), t.into())
	}

	#[test]
	fn node_hover_covers_node_neighbors_and_incident_links() {
		let index = index();
		let h = Highlight::for_target(&index, Some(HoverTarget::Node(0)));

		assert_eq!(h.nodes(), &HashSet::from([0, 1, 2]));
		assert_eq!(h.links(), &HashSet::from([key("a", "b"), key("a", "c")]));
		assert!(!h.contains_link(&index, 2));
	}

	#[test]
	fn link_hover_covers_link_and_endpoints() {
		let index = index();
		let h = Highlight::for_target(&index, Some(HoverTarget::Link(2)));

		assert_eq!(h.nodes(), &HashSet::from([2, 3]));
		assert_eq!(h.links(), &HashSet::from([key("c", "d")]));
		assert!(h.contains_link(&index, 2));
	}

	#[test]
	fn hover_away_clears_both_sets() {
		let index = index();
		let node = Highlight::for_target(&index, Some(HoverTarget::Node(2)));
		assert!(!node.is_empty());

		let cleared = Highlight::for_target(&index, None);
		assert!(cleared.nodes().is_empty());
		assert!(cleared.links().is_empty());
	}

	#[test]
	fn switching_focus_leaves_nothing_behind() {
		let index = index();
		let _ = Highlight::for_target(&index, Some(HoverTarget::Node(0)));
		let h = Highlight::for_target(&index, Some(HoverTarget::Link(2)));

		assert!(!h.contains_node(0));
		assert!(!h.contains_link(&index, 0));
	}
}
