//! Graph data records handed over by the page for import.

use serde::{Deserialize, Deserializer};

/// A course in the exported layout.
#[derive(Clone, Debug, Deserialize)]
pub struct GraphNode {
	/// Unique identifier for this node. Used to reference nodes in edges.
	pub id: String,
	/// Precomputed layout x, graph space.
	pub x: f64,
	/// Precomputed layout y, graph space.
	pub y: f64,
	/// Course title shown in labels, search results and the info panel.
	#[serde(default)]
	pub title: String,
}

/// How a prerequisite relationship is drawn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EdgeKind {
	/// Required prerequisite, drawn as a solid line.
	#[default]
	Baseline,
	/// Recommended prerequisite, drawn dashed.
	Indicative,
}

impl EdgeKind {
	/// Maps the exporter's edge label. Anything but `baseline` is indicative.
	pub fn from_label(label: &str) -> Self {
		if label.eq_ignore_ascii_case("baseline") {
			EdgeKind::Baseline
		} else {
			EdgeKind::Indicative
		}
	}
}

impl<'de> Deserialize<'de> for EdgeKind {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		let label = String::deserialize(deserializer)?;
		Ok(EdgeKind::from_label(&label))
	}
}

/// A directed prerequisite edge between two courses.
#[derive(Clone, Debug, Deserialize)]
pub struct GraphEdge {
	/// Edge identifier.
	pub id: String,
	/// Source node ID.
	pub source: String,
	/// Target node ID.
	pub target: String,
	#[serde(default, alias = "type", alias = "label")]
	pub kind: EdgeKind,
}

/// Complete graph data: nodes and edges.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct GraphData {
	/// All courses.
	pub nodes: Vec<GraphNode>,
	#[serde(alias = "links")]
	pub edges: Vec<GraphEdge>,
}
