//! Search-as-you-type over course titles.

use super::graph::{CourseGraph, NodeIdx};

/// A search result row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchHit {
	/// Matching course.
	pub node: NodeIdx,
	/// Its title.
	pub title: String,
}

/// First `limit` courses, in import order, whose title contains `query`
/// ignoring case. An empty query matches nothing.
pub fn search(graph: &CourseGraph, query: &str, limit: usize) -> Vec<SearchHit> {
	if query.is_empty() {
		return Vec::new();
	}

	let needle = query.to_lowercase();
	graph
		.node_indices()
		.map(|idx| (idx, graph.node(idx)))
		.filter(|(_, node)| node.title.to_lowercase().contains(&needle))
		.take(limit)
		.map(|(node, n)| SearchHit {
			node,
			title: n.title.clone(),
		})
		.collect()
}
