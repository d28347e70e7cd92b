//! Neighborhood highlighting around a selected course.
//!
//! A bounded breadth-first traversal assigns every node within `depth` hops a
//! highlight level (`depth` for the source, decreasing outward) and a reveal
//! delay that grows with the hop count, so the neighborhood ripples outward
//! when the plan is applied to the scene.

use std::collections::HashSet;

use super::graph::{CourseGraph, EdgeIdx, NodeIdx};

/// A highlighted node.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodeMark {
	/// The highlighted node.
	pub node: NodeIdx,
	/// Hops from the source.
	pub hops: usize,
	/// `depth - hops`; indexes the highlight palette.
	pub level: usize,
	/// Milliseconds before the node starts fading in.
	pub delay: f64,
}

/// A highlighted edge, tagged with the ring of its target.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeMark {
	/// The highlighted edge.
	pub edge: EdgeIdx,
	/// Hops from the source to the edge's target ring.
	pub hops: usize,
	/// `depth - hops` of the target ring.
	pub level: usize,
	/// Reveal delay of the target ring.
	pub delay: f64,
}

/// Everything a selection highlights, in traversal order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HighlightPlan {
	/// Nodes, ring by ring.
	pub nodes: Vec<NodeMark>,
	/// Edges, in frontier order.
	pub edges: Vec<EdgeMark>,
}

impl HighlightPlan {
	/// Highlighted nodes as a set.
	pub fn node_set(&self) -> HashSet<NodeIdx> {
		self.nodes.iter().map(|m| m.node).collect()
	}

	/// Highlighted edges as a set.
	pub fn edge_set(&self) -> HashSet<EdgeIdx> {
		self.edges.iter().map(|m| m.edge).collect()
	}
}

/// Reveal delay for a ring `hops` away from the source: 0 at the source,
/// `max_delay` at the outermost ring.
pub fn reveal_delay(hops: usize, depth: usize, max_delay: f64) -> f64 {
	if depth == 0 {
		return 0.0;
	}
	hops.min(depth) as f64 / depth as f64 * max_delay
}

/// Expands one ring. Returns the outgoing edges of `frontier`, the newly
/// discovered nodes and the visited set including them.
fn expand(
	graph: &CourseGraph,
	frontier: &[NodeIdx],
	mut visited: HashSet<NodeIdx>,
) -> (Vec<EdgeIdx>, Vec<NodeIdx>, HashSet<NodeIdx>) {
	let mut edges = Vec::new();
	let mut next = Vec::new();

	for &node in frontier {
		for &edge in graph.outgoing(node) {
			edges.push(edge);
			let target = graph.edge(edge).target;
			if visited.insert(target) {
				next.push(target);
			}
		}
	}

	(edges, next, visited)
}

/// Plans the highlight of `source` and its outgoing neighborhood up to
/// `depth` hops.
pub fn plan(graph: &CourseGraph, source: NodeIdx, depth: usize, max_delay: f64) -> HighlightPlan {
	let mut plan = HighlightPlan::default();
	let mut frontier = vec![source];
	let mut visited = HashSet::from([source]);

	for hops in 0..=depth {
		let level = depth - hops;
		let delay = reveal_delay(hops, depth, max_delay);
		plan.nodes.extend(frontier.iter().map(|&node| NodeMark {
			node,
			hops,
			level,
			delay,
		}));

		if hops == depth || frontier.is_empty() {
			break;
		}

		let (edges, next, seen) = expand(graph, &frontier, visited);
		let (next_hops, next_level) = (hops + 1, level - 1);
		let next_delay = reveal_delay(next_hops, depth, max_delay);
		plan.edges.extend(edges.into_iter().map(|edge| EdgeMark {
			edge,
			hops: next_hops,
			level: next_level,
			delay: next_delay,
		}));
		frontier = next;
		visited = seen;
	}

	plan
}
