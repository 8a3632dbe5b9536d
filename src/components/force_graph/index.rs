use std::collections::HashMap;

use log::warn;

use super::types::GraphData;

/// A link whose endpoints both resolved to nodes of the payload.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedLink {
	pub source: usize,
	pub target: usize,
	pub value: f64,
}

/// Adjacency built once per payload: neighbors and incident links per node.
#[derive(Clone, Debug, Default)]
pub struct GraphIndex {
	ids: Vec<String>,
	links: Vec<ResolvedLink>,
	neighbors: Vec<Vec<usize>>,
	incident: Vec<Vec<usize>>,
}

impl GraphIndex {
	pub fn build(data: &GraphData) -> Self {
		let ids: Vec<String> = data.nodes.iter().map(|n| n.id.clone()).collect();
		let mut id_to_idx = HashMap::with_capacity(ids.len());
		for (i, id) in ids.iter().enumerate() {
			// Later duplicates shadow earlier ones, same as a JS object map.
			id_to_idx.insert(id.clone(), i);
		}

		let mut links = Vec::with_capacity(data.links.len());
		let mut neighbors = vec![Vec::new(); ids.len()];
		let mut incident = vec![Vec::new(); ids.len()];

		for link in &data.links {
			let (Some(&src), Some(&tgt)) =
				(id_to_idx.get(&link.source), id_to_idx.get(&link.target))
			else {
				warn!(
					"dropping link {} -> {}: endpoint not in payload",
					link.source, link.target
				);
				continue;
			};

			let li = links.len();
			links.push(ResolvedLink {
				source: src,
				target: tgt,
				value: link.value,
			});

			incident[src].push(li);
			if tgt != src {
				incident[tgt].push(li);
			}
			if !neighbors[src].contains(&tgt) {
				neighbors[src].push(tgt);
			}
			if !neighbors[tgt].contains(&src) {
				neighbors[tgt].push(src);
			}
		}

		Self {
			ids,
			links,
			neighbors,
			incident,
		}
	}

	pub fn node_count(&self) -> usize {
		self.ids.len()
	}

	pub fn id(&self, node: usize) -> &str {
		&self.ids[node]
	}

	pub fn links(&self) -> &[ResolvedLink] {
		&self.links
	}

	pub fn neighbors(&self, node: usize) -> &[usize] {
		&self.neighbors[node]
	}

	pub fn incident_links(&self, node: usize) -> &[usize] {
		&self.incident[node]
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::force_graph::types::{GraphLink, GraphNode};

	fn sample() -> GraphData {
		let node = |id: &str| GraphNode {
			id: id.into(),
			score: 1.0,
			group: None,
		};
		let link = |s: &str, t: &str, value: f64| GraphLink {
			source: s.into(),
			target: t.into(),
			value,
		};
		GraphData {
			nodes: vec![node("a"), node("b"), node("c"), node("d")],
			links: vec![
				link("a", "b", 1.0),
				link("a", "c", 5.0),
				link("c", "b", 10.0),
				link("a", "ghost", 2.0),
			],
		}
	}

	#[test]
	fn builds_neighbors_and_incident_links() {
		let index = GraphIndex::build(&sample());

		assert_eq!(index.node_count(), 4);
		assert_eq!(index.links().len(), 3);
		assert_eq!(index.neighbors(0), &[1, 2]);
		assert_eq!(index.neighbors(1), &[0, 2]);
		assert_eq!(index.incident_links(2), &[1, 2]);
		assert!(index.neighbors(3).is_empty());
	}

	#[test]
	fn drops_links_with_unknown_endpoints() {
		let index = GraphIndex::build(&sample());
		assert_eq!(index.node_count(), 4);
		assert!(index.links().iter().all(|l| l.value != 2.0));
	}

	#[test]
	fn self_loop_is_incident_once() {
		let mut data = sample();
		data.links = vec![GraphLink {
			source: "d".into(),
			target: "d".into(),
			value: 1.0,
		}];
		let index = GraphIndex::build(&data);
		assert_eq!(index.incident_links(3), &[0]);
		assert_eq!(index.neighbors(3), &[3]);
	}
}
