//! In-memory course graph built once from the imported records.
//!
//! Nodes and edges are stored in import order and addressed by typed indices.
//! The adjacency index maps every node to its outgoing edges in edge order and
//! is never mutated after construction.

use std::collections::HashMap;

use thiserror::Error;

use super::types::{EdgeKind, GraphData};

/// Index of a node in [`CourseGraph::nodes`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeIdx(pub usize);

/// Index of an edge in [`CourseGraph::edges`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeIdx(pub usize);

/// Rejected graph input.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum GraphError {
	/// Two nodes share an identifier.
	#[error("duplicate node id: {id}")]
	DuplicateNode {
		/// The repeated identifier.
		id: String,
	},

	/// An edge endpoint names a node that does not exist.
	#[error("edge {edge} references unknown node {node}")]
	UnknownNode {
		/// Offending edge identifier.
		edge: String,
		/// Missing node identifier.
		node: String,
	},
}

/// A course node.
#[derive(Clone, Debug)]
pub struct Node {
	/// Course identifier.
	pub id: String,
	/// Layout x, graph space.
	pub x: f64,
	/// Layout y, graph space.
	pub y: f64,
	/// Display title.
	pub title: String,
}

/// A prerequisite edge with its endpoint coordinates cached at build time.
#[derive(Clone, Debug)]
pub struct Edge {
	/// Edge identifier.
	pub id: String,
	/// Course the edge leaves.
	pub source: NodeIdx,
	/// Course the edge points to.
	pub target: NodeIdx,
	/// Source x.
	pub x1: f64,
	/// Source y.
	pub y1: f64,
	/// Target x.
	pub x2: f64,
	/// Target y.
	pub y2: f64,
	/// Solid or dashed.
	pub kind: EdgeKind,
}

/// Immutable course graph with its adjacency index.
#[derive(Clone, Debug, Default)]
pub struct CourseGraph {
	nodes: Vec<Node>,
	edges: Vec<Edge>,
	adjacency: Vec<Vec<EdgeIdx>>,
	id_to_idx: HashMap<String, NodeIdx>,
}

impl CourseGraph {
	/// Builds the graph and its adjacency index, rejecting duplicate ids and
	/// dangling edge endpoints.
	pub fn new(data: &GraphData) -> Result<Self, GraphError> {
		let mut nodes = Vec::with_capacity(data.nodes.len());
		let mut id_to_idx = HashMap::with_capacity(data.nodes.len());

		for node in &data.nodes {
			let idx = NodeIdx(nodes.len());
			if id_to_idx.insert(node.id.clone(), idx).is_some() {
				return Err(GraphError::DuplicateNode {
					id: node.id.clone(),
				});
			}
			nodes.push(Node {
				id: node.id.clone(),
				x: node.x,
				y: node.y,
				title: node.title.clone(),
			});
		}

		let lookup = |edge: &str, node: &str| {
			id_to_idx
				.get(node)
				.copied()
				.ok_or_else(|| GraphError::UnknownNode {
					edge: edge.to_string(),
					node: node.to_string(),
				})
		};

		let mut edges = Vec::with_capacity(data.edges.len());
		let mut adjacency = vec![Vec::new(); nodes.len()];
		for edge in &data.edges {
			let source = lookup(&edge.id, &edge.source)?;
			let target = lookup(&edge.id, &edge.target)?;
			let (s, t) = (&nodes[source.0], &nodes[target.0]);
			adjacency[source.0].push(EdgeIdx(edges.len()));
			edges.push(Edge {
				id: edge.id.clone(),
				source,
				target,
				x1: s.x,
				y1: s.y,
				x2: t.x,
				y2: t.y,
				kind: edge.kind,
			});
		}

		Ok(Self {
			nodes,
			edges,
			adjacency,
			id_to_idx,
		})
	}

	/// All nodes in import order.
	pub fn nodes(&self) -> &[Node] {
		&self.nodes
	}

	/// All edges in import order.
	pub fn edges(&self) -> &[Edge] {
		&self.edges
	}

	/// Node at `idx`. Panics on an index from another graph.
	pub fn node(&self, idx: NodeIdx) -> &Node {
		&self.nodes[idx.0]
	}

	/// Edge at `idx`. Panics on an index from another graph.
	pub fn edge(&self, idx: EdgeIdx) -> &Edge {
		&self.edges[idx.0]
	}

	/// Outgoing edges of `idx`, in import order.
	pub fn outgoing(&self, idx: NodeIdx) -> &[EdgeIdx] {
		&self.adjacency[idx.0]
	}

	/// Node with the given identifier.
	pub fn find(&self, id: &str) -> Option<NodeIdx> {
		self.id_to_idx.get(id).copied()
	}

	/// Every node index, in import order.
	pub fn node_indices(&self) -> impl DoubleEndedIterator<Item = NodeIdx> + '_ {
		(0..self.nodes.len()).map(NodeIdx)
	}

	/// Every edge index, in import order.
	pub fn edge_indices(&self) -> impl DoubleEndedIterator<Item = EdgeIdx> + '_ {
		(0..self.edges.len()).map(EdgeIdx)
	}

	/// Whether the graph has no courses.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}
}

#[cfg(test)]
pub(crate) mod tests {
	use super::*;
	use crate::components::course_graph::types::{GraphEdge, GraphNode};

	pub(crate) fn node(id: &str, x: f64, y: f64, title: &str) -> GraphNode {
		GraphNode {
			id: id.into(),
			x,
			y,
			title: title.into(),
		}
	}

	pub(crate) fn edge(id: &str, source: &str, target: &str) -> GraphEdge {
		GraphEdge {
			id: id.into(),
			source: source.into(),
			target: target.into(),
			kind: EdgeKind::Baseline,
		}
	}

	#[test]
	fn adjacency_follows_edge_order() {
		let data = GraphData {
			nodes: vec![
				node("a", 0.0, 0.0, "A"),
				node("b", 10.0, 0.0, "B"),
				node("c", 0.0, 10.0, "C"),
			],
			edges: vec![edge("e1", "a", "c"), edge("e2", "b", "a"), edge("e3", "a", "b")],
		};
		let graph = CourseGraph::new(&data).unwrap();
		let a = graph.find("a").unwrap();
		assert_eq!(graph.outgoing(a), &[EdgeIdx(0), EdgeIdx(2)]);
		assert!(graph.outgoing(graph.find("c").unwrap()).is_empty());

		let e2 = graph.edge(EdgeIdx(1));
		assert_eq!((e2.x1, e2.y1, e2.x2, e2.y2), (10.0, 0.0, 0.0, 0.0));
	}

	#[test]
	fn indices_walk_both_ways() {
		let data = GraphData {
			nodes: vec![node("a", 0.0, 0.0, "A"), node("b", 0.0, 0.0, "B")],
			edges: vec![edge("e1", "a", "b"), edge("e2", "b", "a")],
		};
		let graph = CourseGraph::new(&data).unwrap();
		let nodes: Vec<NodeIdx> = graph.node_indices().rev().collect();
		assert_eq!(nodes, vec![NodeIdx(1), NodeIdx(0)]);
		let edges: Vec<EdgeIdx> = graph.edge_indices().rev().collect();
		assert_eq!(edges, vec![EdgeIdx(1), EdgeIdx(0)]);
	}

	#[test]
	fn rejects_dangling_edges() {
		let data = GraphData {
			nodes: vec![node("a", 0.0, 0.0, "A")],
			edges: vec![edge("e1", "a", "zz")],
		};
		assert_eq!(
			CourseGraph::new(&data).unwrap_err(),
			GraphError::UnknownNode {
				edge: "e1".into(),
				node: "zz".into()
			}
		);
	}

	#[test]
	fn rejects_duplicate_nodes() {
		let data = GraphData {
			nodes: vec![node("a", 0.0, 0.0, "A"), node("a", 1.0, 1.0, "A'")],
			edges: vec![],
		};
		assert!(matches!(
			CourseGraph::new(&data),
			Err(GraphError::DuplicateNode { .. })
		));
	}

	#[test]
	fn parses_exported_json() {
		let json = r#"{
			"nodes": [
				{"id": "1", "x": 1.5, "y": -2.0, "title": "Analysis I"},
				{"id": "2", "x": 3.0, "y": 4.0, "title": "Analysis II"}
			],
			"edges": [
				{"id": "e", "source": "1", "target": "2", "kind": "baseline"},
				{"id": "f", "source": "2", "target": "1", "kind": "indicative"}
			]
		}"#;
		let data: GraphData = serde_json::from_str(json).unwrap();
		let graph = CourseGraph::new(&data).unwrap();
		assert_eq!(graph.edge(EdgeIdx(0)).kind, EdgeKind::Baseline);
		assert_eq!(graph.edge(EdgeIdx(1)).kind, EdgeKind::Indicative);
		assert_eq!(graph.node(NodeIdx(1)).title, "Analysis II");
	}
}
