//! The drawing surface the controller issues commands to.
//!
//! [`SceneSurface`] is the narrow capability set the view logic needs: set the
//! view transform, restyle nodes and edges (optionally as timed transitions),
//! show or hide edges, labels and arrowheads. [`SceneModel`] implements it as a
//! retained scene that resolves transitions against a millisecond clock and is
//! painted by the renderer every frame.

use super::geometry::ViewTransform;
use super::graph::{CourseGraph, EdgeIdx, NodeIdx};
use super::theme::{Color, Theme};

/// Timing of a style change, in milliseconds.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Transition {
	/// Wait before the change starts.
	pub delay: f64,
	/// Length of the change.
	pub duration: f64,
}

impl Transition {
	/// Applies at once.
	pub const NONE: Self = Self {
		delay: 0.0,
		duration: 0.0,
	};

	/// Transition starting after `delay` and lasting `duration`.
	pub fn new(delay: f64, duration: f64) -> Self {
		Self { delay, duration }
	}
}

/// Commands the controller issues to whatever draws the graph.
pub trait SceneSurface {
	fn set_transform(&mut self, transform: &ViewTransform);
	fn set_node_radius(&mut self, nodes: &[NodeIdx], radius: f64);
	fn set_node_fill(&mut self, node: NodeIdx, fill: Color, transition: Transition);
	fn set_all_node_fills(&mut self, fill: Color, transition: Transition);
	/// Outline a node with the given stroke width, or remove the outline.
	fn set_node_emphasis(&mut self, node: NodeIdx, width: Option<f64>);
	fn clear_node_emphasis(&mut self);
	fn set_edge_stroke(&mut self, edge: EdgeIdx, stroke: Color);
	fn set_all_edge_strokes(&mut self, stroke: Color);
	/// Visibility is how highlighting hides edges; it switches after the
	/// transition's delay and duration.
	fn set_edge_visible(&mut self, edge: EdgeIdx, visible: bool, transition: Transition);
	fn set_all_edges_visible(&mut self, visible: bool, transition: Transition);
	/// Remove every edge from the drawing until it is redrawn.
	fn hide_all_edges(&mut self);
	/// Draw `edges` with the given stroke width.
	fn draw_edges(&mut self, edges: &[EdgeIdx], line_width: f64);
	fn hide_all_labels(&mut self);
	fn show_labels(&mut self, nodes: &[NodeIdx], font_size: f64);
	fn set_arrowheads(&mut self, visible: bool);
}

/// A color animating between two values.
#[derive(Clone, Copy, Debug, PartialEq)]
struct ColorTrack {
	from: Color,
	to: Color,
	start: f64,
	duration: f64,
}

impl ColorTrack {
	fn fixed(color: Color) -> Self {
		Self {
			from: color,
			to: color,
			start: 0.0,
			duration: 0.0,
		}
	}

	fn at(&self, now: f64) -> Color {
		if now < self.start {
			return self.from;
		}
		if self.duration <= 0.0 {
			return self.to;
		}
		self.from.lerp(self.to, (now - self.start) / self.duration)
	}

	/// Restart towards `to` from wherever the current animation is.
	fn retarget(&mut self, to: Color, now: f64, transition: Transition) {
		*self = Self {
			from: self.at(now),
			to,
			start: now + transition.delay,
			duration: transition.duration,
		};
	}
}

/// A boolean that flips at a given time.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Switch {
	before: bool,
	after: bool,
	at: f64,
}

impl Switch {
	fn fixed(value: bool) -> Self {
		Self {
			before: value,
			after: value,
			at: 0.0,
		}
	}

	fn value(&self, now: f64) -> bool {
		if now >= self.at { self.after } else { self.before }
	}

	fn retarget(&mut self, to: bool, now: f64, transition: Transition) {
		*self = Self {
			before: self.value(now),
			after: to,
			at: now + transition.delay + transition.duration,
		};
	}
}

#[derive(Clone, Debug)]
struct NodeVisual {
	fill: ColorTrack,
	radius: f64,
	emphasis: Option<f64>,
	label_font: Option<f64>,
}

#[derive(Clone, Debug)]
struct EdgeVisual {
	stroke: Color,
	visible: Switch,
	drawn: bool,
	line_width: f64,
}

/// Node style once all running transitions have finished.
#[derive(Clone, Debug, PartialEq)]
pub struct SettledNode {
	/// Final fill.
	pub fill: Color,
	/// Final outline width.
	pub emphasis: Option<f64>,
}

/// Edge style once all running transitions have finished.
#[derive(Clone, Debug, PartialEq)]
pub struct SettledEdge {
	/// Final stroke.
	pub stroke: Color,
	/// Final visibility.
	pub visible: bool,
}

/// Selection-related styles of the whole scene once transitions settle.
#[derive(Clone, Debug, PartialEq)]
pub struct SettledStyles {
	/// One entry per node.
	pub nodes: Vec<SettledNode>,
	/// One entry per edge.
	pub edges: Vec<SettledEdge>,
}

/// Node as it should be painted at the current clock.
#[derive(Clone, Copy, Debug)]
pub struct NodeFrame {
	/// Current fill.
	pub fill: Color,
	/// Radius in graph units.
	pub radius: f64,
	/// Outline width, if emphasized.
	pub emphasis: Option<f64>,
	/// Label font size, if labeled.
	pub label_font: Option<f64>,
}

/// Retained scene for a course graph.
#[derive(Clone, Debug)]
pub struct SceneModel {
	nodes: Vec<NodeVisual>,
	edges: Vec<EdgeVisual>,
	transform: ViewTransform,
	arrowheads: bool,
	now: f64,
}

impl SceneModel {
	/// Every node filled with the default color, every edge stroked, visible
	/// and drawn.
	pub fn new(graph: &CourseGraph, theme: &Theme, node_radius: f64, line_width: f64) -> Self {
		let nodes = graph
			.nodes()
			.iter()
			.map(|_| NodeVisual {
				fill: ColorTrack::fixed(theme.node),
				radius: node_radius,
				emphasis: None,
				label_font: None,
			})
			.collect();
		let edges = graph
			.edges()
			.iter()
			.map(|_| EdgeVisual {
				stroke: theme.edge,
				visible: Switch::fixed(true),
				drawn: true,
				line_width,
			})
			.collect();

		Self {
			nodes,
			edges,
			transform: ViewTransform::IDENTITY,
			arrowheads: true,
			now: 0.0,
		}
	}

	/// Moves the scene clock forward. Style changes issued afterwards start
	/// at `now`.
	pub fn advance(&mut self, now: f64) {
		self.now = self.now.max(now);
	}

	/// Current scene clock, ms.
	pub fn now(&self) -> f64 {
		self.now
	}

	/// Current view transform.
	pub fn transform(&self) -> ViewTransform {
		self.transform
	}

	/// Whether arrowheads are drawn.
	pub fn arrowheads(&self) -> bool {
		self.arrowheads
	}

	/// Node style at the current clock.
	pub fn node(&self, idx: NodeIdx) -> NodeFrame {
		let node = &self.nodes[idx.0];
		NodeFrame {
			fill: node.fill.at(self.now),
			radius: node.radius,
			emphasis: node.emphasis,
			label_font: node.label_font,
		}
	}

	/// Stroke and width of an edge if it should be painted now.
	pub fn edge(&self, idx: EdgeIdx) -> Option<(Color, f64)> {
		let edge = &self.edges[idx.0];
		(edge.drawn && edge.visible.value(self.now)).then_some((edge.stroke, edge.line_width))
	}

	/// Whether the edge has been drawn since edges were last hidden.
	pub fn is_edge_drawn(&self, idx: EdgeIdx) -> bool {
		self.edges[idx.0].drawn
	}

	/// Styles every running transition ends on.
	pub fn settled(&self) -> SettledStyles {
		SettledStyles {
			nodes: self
				.nodes
				.iter()
				.map(|n| SettledNode {
					fill: n.fill.to,
					emphasis: n.emphasis,
				})
				.collect(),
			edges: self
				.edges
				.iter()
				.map(|e| SettledEdge {
					stroke: e.stroke,
					visible: e.visible.after,
				})
				.collect(),
		}
	}
}

impl SceneSurface for SceneModel {
	fn set_transform(&mut self, transform: &ViewTransform) {
		self.transform = *transform;
	}

	fn set_node_radius(&mut self, nodes: &[NodeIdx], radius: f64) {
		for idx in nodes {
			self.nodes[idx.0].radius = radius;
		}
	}

	fn set_node_fill(&mut self, node: NodeIdx, fill: Color, transition: Transition) {
		let now = self.now;
		self.nodes[node.0].fill.retarget(fill, now, transition);
	}

	fn set_all_node_fills(&mut self, fill: Color, transition: Transition) {
		let now = self.now;
		for node in &mut self.nodes {
			node.fill.retarget(fill, now, transition);
		}
	}

	fn set_node_emphasis(&mut self, node: NodeIdx, width: Option<f64>) {
		self.nodes[node.0].emphasis = width;
	}

	fn clear_node_emphasis(&mut self) {
		for node in &mut self.nodes {
			node.emphasis = None;
		}
	}

	fn set_edge_stroke(&mut self, edge: EdgeIdx, stroke: Color) {
		self.edges[edge.0].stroke = stroke;
	}

	fn set_all_edge_strokes(&mut self, stroke: Color) {
		for edge in &mut self.edges {
			edge.stroke = stroke;
		}
	}

	fn set_edge_visible(&mut self, edge: EdgeIdx, visible: bool, transition: Transition) {
		let now = self.now;
		self.edges[edge.0].visible.retarget(visible, now, transition);
	}

	fn set_all_edges_visible(&mut self, visible: bool, transition: Transition) {
		let now = self.now;
		for edge in &mut self.edges {
			edge.visible.retarget(visible, now, transition);
		}
	}

	fn hide_all_edges(&mut self) {
		for edge in &mut self.edges {
			edge.drawn = false;
		}
	}

	fn draw_edges(&mut self, edges: &[EdgeIdx], line_width: f64) {
		for idx in edges {
			let edge = &mut self.edges[idx.0];
			edge.drawn = true;
			edge.line_width = line_width;
		}
	}

	fn hide_all_labels(&mut self) {
		for node in &mut self.nodes {
			node.label_font = None;
		}
	}

	fn show_labels(&mut self, nodes: &[NodeIdx], font_size: f64) {
		for idx in nodes {
			self.nodes[idx.0].label_font = Some(font_size);
		}
	}

	fn set_arrowheads(&mut self, visible: bool) {
		self.arrowheads = visible;
	}
}
