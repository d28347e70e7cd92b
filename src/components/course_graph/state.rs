//! View state and event handlers for the course graph.
//!
//! [`CourseGraphState`] owns the graph, the view transform, the current
//! selection and the redraw scheduler. The component forwards pointer, wheel,
//! resize and frame events to it; every handler issues its drawing through a
//! [`SceneSurface`], so the whole pipeline runs without a browser in tests.
//!
//! Viewport gestures follow a start / zoom / end cycle. Start cancels any
//! pending redraw; each zoom step hides edges and labels and applies the new
//! transform; end (only if the view actually moved) culls the edge set for the
//! final transform and starts a fresh batched redraw, then restores labels and
//! arrowheads.

use std::collections::HashSet;

use log::debug;

use super::animation::{Easing, ViewAnimation};
use super::config::ViewConfig;
use super::geometry::{ViewTransform, Viewport, edge_is_visible, node_is_visible};
use super::graph::{CourseGraph, EdgeIdx, NodeIdx};
use super::highlight::{self, HighlightPlan};
use super::panel::InfoPanel;
use super::scale::ScaledValues;
use super::scene::{SceneModel, SceneSurface, Transition};
use super::scheduler::{RedrawHandle, RedrawScheduler};
use super::search::{SearchHit, search};
use super::tables::CourseTables;
use super::theme::Theme;

/// Courses and prerequisite edges currently highlighted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selection {
	nodes: HashSet<NodeIdx>,
	edges: HashSet<EdgeIdx>,
}

impl Selection {
	fn from_plan(plan: &HighlightPlan) -> Self {
		Self {
			nodes: plan.node_set(),
			edges: plan.edge_set(),
		}
	}

	/// Whether nothing is selected.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty() && self.edges.is_empty()
	}

	/// Whether `idx` is a selected course.
	pub fn contains_node(&self, idx: NodeIdx) -> bool {
		self.nodes.contains(&idx)
	}

	/// Whether `idx` is a selected edge.
	pub fn contains_edge(&self, idx: EdgeIdx) -> bool {
		self.edges.contains(&idx)
	}

	/// Number of selected courses.
	pub fn node_count(&self) -> usize {
		self.nodes.len()
	}
}

/// Tracks an in-progress canvas pan operation.
#[derive(Clone, Debug, Default)]
pub struct PanState {
	/// A press is in progress.
	pub active: bool,
	/// The press has panned the view.
	pub moved: bool,
	/// Press x, screen pixels.
	pub start_x: f64,
	/// Press y, screen pixels.
	pub start_y: f64,
	/// Transform x when the press began.
	pub transform_start_x: f64,
	/// Transform y when the press began.
	pub transform_start_y: f64,
}

/// A two-finger pinch in progress.
#[derive(Clone, Copy, Debug)]
struct Pinch {
	/// Finger distance when the pinch began.
	distance: f64,
	/// Finger midpoint when the pinch began.
	mid: (f64, f64),
	transform: ViewTransform,
}

/// Distance between two fingers and their midpoint.
fn finger_span(a: (f64, f64), b: (f64, f64)) -> (f64, (f64, f64)) {
	let (dx, dy) = (b.0 - a.0, b.1 - a.1);
	((dx * dx + dy * dy).sqrt(), ((a.0 + b.0) / 2.0, (a.1 + b.1) / 2.0))
}

/// What a released press without movement landed on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Click {
	/// A course.
	Node(NodeIdx),
	/// Empty canvas.
	Background,
}

/// Core view state combining the course graph with interaction tracking.
///
/// Created once when the component mounts, then mutated by event handlers and
/// by [`CourseGraphState::frame`] on every animation frame.
pub struct CourseGraphState {
	/// The course graph.
	pub graph: CourseGraph,
	/// Descriptions and sections.
	pub tables: CourseTables,
	/// Behavior settings.
	pub config: ViewConfig,
	/// Colors.
	pub theme: Theme,
	/// Current view transform.
	pub transform: ViewTransform,
	/// Drawing area size.
	pub viewport: Viewport,
	/// Highlighted courses and edges.
	pub selection: Selection,
	/// Batched edge redraw.
	pub redraw: RedrawScheduler,
	/// Press-and-drag tracking.
	pub pan: PanState,
	/// Screen height covered by the info panel at the bottom of the view.
	pub panel_height: f64,
	moved: bool,
	arrowheads_visible: bool,
	animation: Option<ViewAnimation>,
	wheel_idle_at: Option<f64>,
	emphasized: Option<NodeIdx>,
	pinch: Option<Pinch>,
	/// Last pass started by this view.
	redraw_pass: Option<RedrawHandle>,
}

impl CourseGraphState {
	/// State for `graph` at the identity transform with nothing selected.
	pub fn new(
		graph: CourseGraph,
		tables: CourseTables,
		config: ViewConfig,
		theme: Theme,
		viewport: Viewport,
	) -> Self {
		let redraw = RedrawScheduler::new(config.batch_size);
		Self {
			graph,
			tables,
			config,
			theme,
			transform: ViewTransform::IDENTITY,
			viewport,
			selection: Selection::default(),
			redraw,
			pan: PanState::default(),
			panel_height: 0.0,
			moved: false,
			arrowheads_visible: true,
			animation: None,
			wheel_idle_at: None,
			emphasized: None,
			pinch: None,
			redraw_pass: None,
		}
	}

	/// A scene with every course in its default style, sized for the current
	/// zoom level.
	pub fn scene(&self) -> SceneModel {
		let scale = self.scaled();
		SceneModel::new(&self.graph, &self.theme, scale.node_radius, scale.edge_line_width)
	}

	/// Sizes for the current zoom level.
	pub fn scaled(&self) -> ScaledValues {
		ScaledValues::new(&self.config.scale, self.transform.k)
	}

	/// Whether a view animation is pending or running.
	pub fn is_animating(&self) -> bool {
		self.animation.is_some()
	}

	/// Centered on the viewport at zoom `k`.
	fn centered(&self, k: f64) -> ViewTransform {
		ViewTransform::new(self.viewport.width / 2.0, self.viewport.height / 2.0, k)
	}

	/// Centered on `node` at zoom `k`, in the area above the info panel.
	fn focused_on(&self, node: NodeIdx, k: f64) -> ViewTransform {
		let course = self.graph.node(node);
		ViewTransform::new(
			self.viewport.width / 2.0 - k * course.x,
			(self.viewport.height - self.panel_height) / 2.0 - k * course.y,
			k,
		)
	}

	/// Jumps to the close-up intro transform and schedules the zoom-out.
	pub fn start_intro<S: SceneSurface>(&mut self, now: f64, surface: &mut S) {
		let close = self.centered(self.config.intro_start_scale);
		self.jump_to(close, surface);
		self.animate_to(
			self.centered(self.config.intro_end_scale),
			now + self.config.intro_delay,
			self.config.intro_duration,
			Easing::BackInOut,
		);
	}

	fn jump_to<S: SceneSurface>(&mut self, transform: ViewTransform, surface: &mut S) {
		self.zoom_start();
		self.zoom(transform, surface);
		self.zoom_end(surface);
	}

	fn animate_to(&mut self, to: ViewTransform, start: f64, duration: f64, easing: Easing) {
		self.animation = Some(ViewAnimation::new(
			self.transform,
			to,
			&self.viewport,
			start,
			duration,
			easing,
		));
	}

	fn interrupt_animation(&mut self) {
		if let Some(animation) = self.animation.take() {
			debug!("view animation to {:?} interrupted", animation.target());
		}
	}

	/// Courses near enough to the viewport to be drawn.
	pub fn visible_nodes(&self) -> Vec<NodeIdx> {
		let radius = self.config.scale.cull_radius;
		self.graph
			.node_indices()
			.filter(|&idx| node_is_visible(self.graph.node(idx), &self.viewport, &self.transform, radius))
			.collect()
	}

	/// Edges to draw for the current transform, limited to the selection when
	/// one exists.
	pub fn visible_edges(&self) -> Vec<EdgeIdx> {
		let selected_only = !self.selection.edges.is_empty();
		self.graph
			.edge_indices()
			.filter(|&idx| !selected_only || self.selection.contains_edge(idx))
			.filter(|&idx| edge_is_visible(self.graph.edge(idx), &self.viewport, &self.transform))
			.collect()
	}

	/// A viewport gesture begins: drop whatever redraw is still pending.
	pub fn zoom_start(&mut self) {
		self.cancel_redraw();
	}

	fn cancel_redraw(&mut self) {
		if let Some(handle) = self.redraw_pass.take() {
			self.redraw.cancel_handle(&handle);
		}
	}

	/// One step of a viewport gesture.
	pub fn zoom<S: SceneSurface>(&mut self, transform: ViewTransform, surface: &mut S) {
		surface.hide_all_edges();
		surface.hide_all_labels();

		self.transform = transform;
		surface.set_transform(&transform);

		let radius = self.scaled().node_radius;
		surface.set_node_radius(&self.visible_nodes(), radius);
		self.moved = true;
	}

	/// A viewport gesture ends. Presses that never moved the view leave the
	/// drawing untouched.
	pub fn zoom_end<S: SceneSurface>(&mut self, surface: &mut S) {
		if !self.moved {
			return;
		}
		self.redraw_edges();
		self.show_node_labels(surface);
		self.update_arrowheads(surface);
		self.moved = false;
	}

	fn redraw_edges(&mut self) {
		let edges = self.visible_edges();
		let line_width = self.scaled().edge_line_width;
		self.redraw_pass = Some(self.redraw.start(edges, line_width));
	}

	/// Labels of visible (and, with a selection, selected) courses, once zoomed
	/// in far enough.
	pub fn show_node_labels<S: SceneSurface>(&self, surface: &mut S) {
		if !self.config.scale.labels_visible(self.transform.k) {
			return;
		}
		let mut nodes = self.visible_nodes();
		if self.selection.node_count() > 0 {
			nodes.retain(|&idx| self.selection.contains_node(idx));
		}
		surface.show_labels(&nodes, self.scaled().label_font_size);
	}

	fn update_arrowheads<S: SceneSurface>(&mut self, surface: &mut S) {
		let wanted = self.config.scale.arrowheads_visible(self.transform.k);
		if wanted != self.arrowheads_visible {
			surface.set_arrowheads(wanted);
			self.arrowheads_visible = wanted;
		}
	}

	/// Redraws everything for the current transform.
	pub fn refresh<S: SceneSurface>(&mut self, surface: &mut S) {
		let transform = self.transform;
		self.jump_to(transform, surface);
	}

	/// New drawing area size; redraws everything for it.
	pub fn resize<S: SceneSurface>(&mut self, width: f64, height: f64, surface: &mut S) {
		self.viewport = Viewport::new(width, height);
		self.refresh(surface);
	}

	/// Resets node and edge styles. With `replacing` the graph is dimmed to make
	/// room for a new highlight; otherwise the default look comes back.
	pub fn clear_selection<S: SceneSurface>(&mut self, replacing: bool, surface: &mut S) {
		self.selection = Selection::default();
		let fade = Transition::new(0.0, self.config.clear_duration);

		if replacing {
			surface.set_all_node_fills(self.theme.background_node, fade);
			surface.set_all_edges_visible(false, Transition::NONE);
		} else {
			surface.set_all_node_fills(self.theme.node, fade);
			surface.set_all_edge_strokes(self.theme.edge);
			surface.set_all_edges_visible(true, fade);
			surface.clear_node_emphasis();
			self.emphasized = None;
		}
	}

	/// Dims the graph and reveals `node`'s neighborhood ring by ring.
	pub fn highlight<S: SceneSurface>(&mut self, node: NodeIdx, surface: &mut S) {
		self.clear_selection(true, surface);

		let plan = highlight::plan(
			&self.graph,
			node,
			self.config.highlight_depth,
			self.config.max_reveal_delay,
		);
		let fade_in = self.config.highlight_duration;

		for mark in &plan.nodes {
			let fill = self.theme.highlight_color(mark.level);
			surface.set_node_fill(mark.node, fill, Transition::new(mark.delay, fade_in));
		}
		for mark in &plan.edges {
			surface.set_edge_stroke(mark.edge, self.theme.highlight_color(mark.level));
			// Show the edge once its target has finished fading in.
			surface.set_edge_visible(mark.edge, true, Transition::new(mark.delay + fade_in, 0.0));
		}

		self.selection = Selection::from_plan(&plan);
	}

	/// Selects a course: highlight, relabel, fly to it. Returns the info panel
	/// content for it.
	pub fn select_node<S: SceneSurface>(
		&mut self,
		node: NodeIdx,
		now: f64,
		surface: &mut S,
	) -> InfoPanel {
		debug!("selected {}", self.graph.node(node).id);
		self.cancel_redraw();
		self.highlight(node, surface);

		surface.hide_all_labels();
		self.show_node_labels(surface);

		let target = self.focused_on(node, self.config.focus_scale);
		self.animate_to(target, now, self.config.focus_duration, Easing::CubicInOut);

		InfoPanel::build(&self.graph, &self.tables, node)
	}

	/// Clears the selection and restores the full graph.
	pub fn background_click<S: SceneSurface>(&mut self, surface: &mut S) {
		self.clear_selection(false, surface);
		self.show_node_labels(surface);
		self.refresh(surface);
	}

	/// Outlines `node` (hovered in the info panel), removing any previous
	/// outline.
	pub fn emphasize<S: SceneSurface>(&mut self, node: Option<NodeIdx>, surface: &mut S) {
		if let Some(previous) = self.emphasized.take() {
			surface.set_node_emphasis(previous, None);
		}
		if let Some(idx) = node {
			surface.set_node_emphasis(idx, Some(self.scaled().emphasis_width));
			self.emphasized = Some(idx);
		}
	}

	/// Title search with the configured result limit.
	pub fn search(&self, query: &str) -> Vec<SearchHit> {
		search(&self.graph, query, self.config.search_limit)
	}

	/// Topmost course drawn under a screen point.
	pub fn node_at(&self, sx: f64, sy: f64) -> Option<NodeIdx> {
		let (gx, gy) = self.transform.invert(sx, sy);
		let radius = self.scaled().node_radius;
		self.graph.node_indices().rev().find(|&idx| {
			let node = self.graph.node(idx);
			let (dx, dy) = (node.x - gx, node.y - gy);
			(dx * dx + dy * dy).sqrt() <= radius
		})
	}

	/// A press begins at a screen point: stop animations and pending redraws.
	pub fn pointer_down(&mut self, sx: f64, sy: f64) {
		self.interrupt_animation();
		self.zoom_start();
		self.pan = PanState {
			active: true,
			moved: false,
			start_x: sx,
			start_y: sy,
			transform_start_x: self.transform.x,
			transform_start_y: self.transform.y,
		};
	}

	/// Pans while a press is held.
	pub fn pointer_move<S: SceneSurface>(&mut self, sx: f64, sy: f64, surface: &mut S) {
		if !self.pan.active || (sx == self.pan.start_x && sy == self.pan.start_y) {
			return;
		}
		self.pan.moved = true;
		let transform = ViewTransform::new(
			self.pan.transform_start_x + (sx - self.pan.start_x),
			self.pan.transform_start_y + (sy - self.pan.start_y),
			self.transform.k,
		);
		self.zoom(transform, surface);
	}

	/// Ends a press. A press that never moved is reported as a click.
	pub fn pointer_up<S: SceneSurface>(&mut self, sx: f64, sy: f64, surface: &mut S) -> Option<Click> {
		if !self.pan.active {
			return None;
		}
		let moved = self.pan.moved;
		self.pan = PanState::default();
		self.zoom_end(surface);

		(!moved).then(|| match self.node_at(sx, sy) {
			Some(idx) => Click::Node(idx),
			None => Click::Background,
		})
	}

	/// Abandons a press when the pointer leaves the canvas.
	pub fn pointer_leave<S: SceneSurface>(&mut self, surface: &mut S) {
		if self.pan.active {
			self.pan = PanState::default();
			self.zoom_end(surface);
		}
	}

	/// Touches went down; `touches` are all fingers now on the canvas. One
	/// finger presses like the mouse, a second one turns the press into a
	/// pinch.
	pub fn touch_start(&mut self, touches: &[(f64, f64)]) {
		match *touches {
			[] => {}
			[(x, y)] => {
				if self.pinch.is_none() {
					self.pointer_down(x, y);
				}
			}
			[a, b, ..] => {
				if self.pinch.is_none() && !self.pan.active {
					self.interrupt_animation();
					self.zoom_start();
				}
				// A press that became a pinch is never a click.
				self.pan = PanState::default();
				let (distance, mid) = finger_span(a, b);
				self.pinch = Some(Pinch {
					distance,
					mid,
					transform: self.transform,
				});
			}
		}
	}

	/// Pans with one finger, pinch-zooms with two. The graph point under the
	/// starting midpoint follows the fingers' midpoint.
	pub fn touch_move<S: SceneSurface>(&mut self, touches: &[(f64, f64)], surface: &mut S) {
		match (touches, self.pinch) {
			(&[a, b, ..], Some(pinch)) => {
				let (distance, mid) = finger_span(a, b);
				let factor = if pinch.distance > 0.0 {
					distance / pinch.distance
				} else {
					1.0
				};
				let zoomed = pinch.transform.zoom_around(
					pinch.mid.0,
					pinch.mid.1,
					factor,
					self.config.zoom_extent,
				);
				let transform = ViewTransform::new(
					zoomed.x + mid.0 - pinch.mid.0,
					zoomed.y + mid.1 - pinch.mid.1,
					zoomed.k,
				);
				self.zoom(transform, surface);
			}
			(&[(x, y)], None) => self.pointer_move(x, y, surface),
			_ => {}
		}
	}

	/// Fingers lifted; `touches` are the ones still down and `lifted` is where
	/// the last one left. A pinch ends once fewer than two fingers remain; a
	/// single-finger tap is reported as a click.
	pub fn touch_end<S: SceneSurface>(
		&mut self,
		touches: &[(f64, f64)],
		lifted: (f64, f64),
		surface: &mut S,
	) -> Option<Click> {
		if self.pinch.is_some() {
			if touches.len() < 2 {
				self.pinch = None;
				self.zoom_end(surface);
			}
			return None;
		}
		if touches.is_empty() {
			self.pointer_up(lifted.0, lifted.1, surface)
		} else {
			None
		}
	}

	/// The browser took the touches over; ends the gesture without a click.
	pub fn touch_cancel<S: SceneSurface>(&mut self, surface: &mut S) {
		self.pinch = None;
		self.pan = PanState::default();
		self.zoom_end(surface);
	}

	/// Zooms around the pointer. The gesture ends once the wheel has been idle
	/// for `wheel_idle` ms.
	/// Horizontal-only scrolling (`delta_y == 0`) leaves the view alone.
	pub fn wheel<S: SceneSurface>(&mut self, sx: f64, sy: f64, delta_y: f64, now: f64, surface: &mut S) {
		if delta_y == 0.0 {
			return;
		}
		self.interrupt_animation();
		if self.wheel_idle_at.is_none() {
			self.zoom_start();
		}
		let factor = if delta_y > 0.0 {
			1.0 / self.config.wheel_step
		} else {
			self.config.wheel_step
		};
		let transform = self
			.transform
			.zoom_around(sx, sy, factor, self.config.zoom_extent);
		self.zoom(transform, surface);
		self.wheel_idle_at = Some(now + self.config.wheel_idle);
	}

	/// Per-frame work: finish idle wheel gestures, step view animations and
	/// draw at most one redraw batch. Returns true if a batch was drawn.
	pub fn frame<S: SceneSurface>(&mut self, now: f64, surface: &mut S) -> bool {
		if self.wheel_idle_at.is_some_and(|at| now >= at) {
			self.wheel_idle_at = None;
			self.zoom_end(surface);
		}

		if let Some(mut animation) = self.animation.take() {
			if animation.is_due(now) {
				if animation.begin() {
					self.zoom_start();
				}
				self.zoom(animation.at(now), surface);
				if animation.is_finished(now) {
					self.zoom_end(surface);
				} else {
					self.animation = Some(animation);
				}
			} else {
				self.animation = Some(animation);
			}
		}

		match self.redraw.tick() {
			Some(batch) if self.redraw_pass == Some(batch.handle) => {
				surface.draw_edges(&batch.edges, batch.line_width);
				true
			}
			_ => false,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::course_graph::graph::tests::{edge, node};
	use crate::components::course_graph::theme::Color;
	use crate::components::course_graph::types::GraphData;

	/// Records the commands that matter for scheduling and labeling.
	#[derive(Default)]
	struct RecordingSurface {
		batches: Vec<Vec<EdgeIdx>>,
		labels: Vec<Vec<NodeIdx>>,
		arrowheads: Vec<bool>,
		edges_hidden: usize,
	}

	impl SceneSurface for RecordingSurface {
		fn set_transform(&mut self, _: &ViewTransform) {}
		fn set_node_radius(&mut self, _: &[NodeIdx], _: f64) {}
		fn set_node_fill(&mut self, _: NodeIdx, _: Color, _: Transition) {}
		fn set_all_node_fills(&mut self, _: Color, _: Transition) {}
		fn set_node_emphasis(&mut self, _: NodeIdx, _: Option<f64>) {}
		fn clear_node_emphasis(&mut self) {}
		fn set_edge_stroke(&mut self, _: EdgeIdx, _: Color) {}
		fn set_all_edge_strokes(&mut self, _: Color) {}
		fn set_edge_visible(&mut self, _: EdgeIdx, _: bool, _: Transition) {}
		fn set_all_edges_visible(&mut self, _: bool, _: Transition) {}
		fn hide_all_edges(&mut self) {
			self.edges_hidden += 1;
		}
		fn draw_edges(&mut self, edges: &[EdgeIdx], _: f64) {
			self.batches.push(edges.to_vec());
		}
		fn hide_all_labels(&mut self) {}
		fn show_labels(&mut self, nodes: &[NodeIdx], _: f64) {
			self.labels.push(nodes.to_vec());
		}
		fn set_arrowheads(&mut self, visible: bool) {
			self.arrowheads.push(visible);
		}
	}

	const VIEW: Viewport = Viewport {
		width: 800.0,
		height: 600.0,
	};

	fn state(data: GraphData) -> CourseGraphState {
		CourseGraphState::new(
			CourseGraph::new(&data).unwrap(),
			CourseTables::default(),
			ViewConfig::default(),
			Theme::default(),
			VIEW,
		)
	}

	/// A hub at the center with `n` short spokes, all on screen at identity.
	fn star(n: usize) -> GraphData {
		let mut nodes = vec![node("hub", 400.0, 300.0, "Hub")];
		let mut edges = Vec::new();
		for i in 0..n {
			let id = format!("s{i}");
			nodes.push(node(&id, 100.0 + (i % 600) as f64, 100.0, &id));
			edges.push(edge(&format!("e{i}"), "hub", &id));
		}
		GraphData { nodes, edges }
	}

	/// Two clusters far apart; each transform sees only one of them.
	fn two_clusters() -> GraphData {
		let mut nodes = Vec::new();
		let mut edges = Vec::new();
		for (prefix, base) in [("l", 0.0), ("r", 10_000.0)] {
			for i in 0..=120 {
				nodes.push(node(&format!("{prefix}{i}"), base + 100.0 + i as f64, 300.0, ""));
			}
			for i in 0..120 {
				edges.push(edge(
					&format!("{prefix}e{i}"),
					&format!("{prefix}{i}"),
					&format!("{prefix}{}", i + 1),
				));
			}
		}
		GraphData { nodes, edges }
	}

	fn gesture(state: &mut CourseGraphState, transform: ViewTransform, surface: &mut impl SceneSurface) {
		state.zoom_start();
		state.zoom(transform, surface);
		state.zoom_end(surface);
	}

	#[test]
	fn redraw_issues_fixed_size_batches() {
		let mut state = state(star(237));
		let mut surface = RecordingSurface::default();
		gesture(&mut state, ViewTransform::IDENTITY, &mut surface);

		let mut now = 0.0;
		while state.frame(now, &mut surface) {
			now += 16.0;
			let done = surface.batches.len() == 5;
			assert_eq!(state.redraw.drawing_complete(), done);
		}
		let sizes: Vec<usize> = surface.batches.iter().map(Vec::len).collect();
		assert_eq!(sizes, vec![50, 50, 50, 50, 37]);
		assert!(state.redraw.drawing_complete());
	}

	#[test]
	fn new_gesture_discards_pending_batches() {
		let mut state = state(two_clusters());
		let mut surface = RecordingSurface::default();
		let left = ViewTransform::IDENTITY;
		let right = ViewTransform::new(-10_000.0, 0.0, 1.0);

		gesture(&mut state, left, &mut surface);
		state.frame(0.0, &mut surface);
		assert_eq!(surface.batches.len(), 1);

		state.zoom_start();
		state.zoom(right, &mut surface);
		assert!(!state.frame(16.0, &mut surface));
		state.zoom_end(&mut surface);
		let mut now = 32.0;
		while state.frame(now, &mut surface) {
			now += 16.0;
		}

		let right_edges: HashSet<EdgeIdx> = state.visible_edges().into_iter().collect();
		assert_eq!(right_edges.len(), 120);
		let after_cancel: Vec<EdgeIdx> = surface.batches[1..].concat();
		assert_eq!(after_cancel.len(), 120);
		assert!(after_cancel.iter().all(|e| right_edges.contains(e)));
	}

	#[test]
	fn gesture_end_without_movement_draws_nothing() {
		let mut state = state(star(10));
		let mut surface = RecordingSurface::default();
		state.zoom_end(&mut surface);
		assert!(!state.redraw.is_running());
		assert!(state.redraw.drawing_complete());
	}

	#[test]
	fn arrowheads_toggle_only_on_crossing() {
		let mut state = state(star(3));
		let mut surface = RecordingSurface::default();
		gesture(&mut state, ViewTransform::new(0.0, 0.0, 1.0), &mut surface);
		gesture(&mut state, ViewTransform::new(0.0, 0.0, 0.2), &mut surface);
		gesture(&mut state, ViewTransform::new(0.0, 0.0, 0.1), &mut surface);
		gesture(&mut state, ViewTransform::new(0.0, 0.0, 0.25), &mut surface);
		gesture(&mut state, ViewTransform::new(0.0, 0.0, 2.0), &mut surface);
		assert_eq!(surface.arrowheads, vec![false, true]);
	}

	#[test]
	fn labels_need_zoom_and_follow_selection() {
		let mut state = state(star(3));
		let mut surface = RecordingSurface::default();
		gesture(&mut state, ViewTransform::new(0.0, 0.0, 0.5), &mut surface);
		assert!(surface.labels.is_empty());

		gesture(&mut state, ViewTransform::IDENTITY, &mut surface);
		assert_eq!(surface.labels.last().unwrap().len(), 4);

		let mut scene = state.scene();
		let leaf = state.graph.find("s1").unwrap();
		state.select_node(leaf, 0.0, &mut scene);
		state.show_node_labels(&mut surface);
		assert_eq!(surface.labels.last().unwrap(), &vec![leaf]);
	}

	#[test]
	fn selection_limits_redraw_to_highlighted_edges() {
		let data = GraphData {
			nodes: vec![
				node("a", 100.0, 100.0, "A"),
				node("b", 200.0, 100.0, "B"),
				node("c", 300.0, 100.0, "C"),
				node("d", 400.0, 100.0, "D"),
			],
			edges: vec![edge("ab", "a", "b"), edge("cd", "c", "d")],
		};
		let mut state = state(data);
		let mut scene = state.scene();
		let a = state.graph.find("a").unwrap();
		state.select_node(a, 0.0, &mut scene);
		assert_eq!(state.visible_edges(), vec![EdgeIdx(0)]);
	}

	#[test]
	fn clearing_restores_default_styles() {
		let mut state = state(star(6));
		let mut scene = state.scene();
		let before = scene.settled();

		let hub = state.graph.find("hub").unwrap();
		state.select_node(hub, 0.0, &mut scene);
		state.emphasize(Some(NodeIdx(2)), &mut scene);
		assert_ne!(scene.settled(), before);

		state.background_click(&mut scene);
		let cleared = scene.settled();
		assert_eq!(cleared, before);
		assert!(state.selection.is_empty());

		state.background_click(&mut scene);
		assert_eq!(scene.settled(), cleared);
	}

	#[test]
	fn highlight_colors_rings_and_hides_the_rest() {
		let data = GraphData {
			nodes: vec![
				node("a", 0.0, 0.0, "A"),
				node("b", 0.0, 0.0, "B"),
				node("c", 0.0, 0.0, "C"),
				node("x", 0.0, 0.0, "X"),
			],
			edges: vec![edge("ab", "a", "b"), edge("bc", "b", "c"), edge("xa", "x", "a")],
		};
		let mut state = state(data);
		let mut scene = state.scene();
		let theme = Theme::default();
		state.highlight(NodeIdx(0), &mut scene);

		let settled = scene.settled();
		assert_eq!(settled.nodes[0].fill, theme.highlight_color(2));
		assert_eq!(settled.nodes[1].fill, theme.highlight_color(1));
		assert_eq!(settled.nodes[2].fill, theme.highlight_color(0));
		assert_eq!(settled.nodes[3].fill, theme.background_node);
		assert_eq!(settled.edges[0].stroke, theme.highlight_color(1));
		assert!(settled.edges[0].visible && settled.edges[1].visible);
		assert!(!settled.edges[2].visible);

		// The second ring's edge appears once its target has faded in.
		scene.advance(1999.0);
		assert!(scene.edge(EdgeIdx(1)).is_none());
		scene.advance(3000.0);
		assert!(scene.edge(EdgeIdx(1)).is_some());
	}

	#[test]
	fn selection_flies_to_the_course() {
		let mut state = state(star(2));
		let mut scene = state.scene();
		state.panel_height = 200.0;
		let hub = state.graph.find("hub").unwrap();
		let panel = state.select_node(hub, 100.0, &mut scene);
		assert_eq!(panel.title, "Hub");
		assert!(state.is_animating());

		state.frame(100.0, &mut scene);
		state.frame(900.0, &mut scene);
		assert!(!state.redraw.is_running());
		state.frame(1600.0, &mut scene);
		assert!(!state.is_animating());

		let expected = ViewTransform::new(400.0 - 0.3 * 400.0, 200.0 - 0.3 * 300.0, 0.3);
		assert_eq!(state.transform, expected);
		assert_eq!(scene.transform(), expected);
		assert!(state.redraw.is_running() || state.redraw.drawing_complete());
	}

	#[test]
	fn press_without_drag_is_a_click() {
		let mut state = state(star(2));
		let mut scene = state.scene();
		gesture(&mut state, ViewTransform::IDENTITY, &mut scene);

		state.pointer_down(400.0, 300.0);
		assert_eq!(
			state.pointer_up(402.0, 301.0, &mut scene),
			Some(Click::Node(state.graph.find("hub").unwrap()))
		);

		state.pointer_down(700.0, 500.0);
		assert_eq!(state.pointer_up(700.0, 500.0, &mut scene), Some(Click::Background));

		state.pointer_down(700.0, 500.0);
		state.pointer_move(650.0, 450.0, &mut scene);
		assert_eq!(state.pointer_up(650.0, 450.0, &mut scene), None);
		assert_eq!(state.transform, ViewTransform::new(-50.0, -50.0, 1.0));
		assert!(state.redraw.is_running());
	}

	#[test]
	fn wheel_gesture_ends_after_idle() {
		let mut state = state(star(2));
		let mut surface = RecordingSurface::default();
		state.wheel(400.0, 300.0, -1.0, 0.0, &mut surface);
		state.wheel(400.0, 300.0, -1.0, 100.0, &mut surface);
		assert!(!state.frame(200.0, &mut surface));
		assert!(state.frame(250.0, &mut surface));
		assert!((state.transform.k - 1.21).abs() < 1e-9);
	}

	#[test]
	fn horizontal_scroll_does_not_zoom() {
		let mut state = state(star(2));
		let mut surface = RecordingSurface::default();
		state.wheel(400.0, 300.0, 0.0, 0.0, &mut surface);
		assert_eq!(state.transform, ViewTransform::IDENTITY);
		assert_eq!(surface.edges_hidden, 0);
		assert!(!state.frame(1000.0, &mut surface));
	}

	#[test]
	fn pinch_zooms_around_the_fingers() {
		let mut state = state(star(2));
		let mut surface = RecordingSurface::default();
		gesture(&mut state, ViewTransform::IDENTITY, &mut surface);
		assert!(state.redraw.is_running());

		state.touch_start(&[(300.0, 300.0)]);
		state.touch_start(&[(300.0, 300.0), (500.0, 300.0)]);
		assert!(!state.redraw.is_running());

		// Fingers spread to twice the distance while drifting by (50, 50).
		state.touch_move(&[(250.0, 350.0), (650.0, 350.0)], &mut surface);
		assert_eq!(state.transform, ViewTransform::new(-350.0, -250.0, 2.0));
		assert_eq!(state.transform.invert(450.0, 350.0), (400.0, 300.0));

		state.touch_move(&[(0.0, 350.0), (1000.0, 350.0)], &mut surface);
		assert_eq!(state.transform.k, 2.5);

		assert_eq!(state.touch_end(&[(1000.0, 350.0)], (0.0, 350.0), &mut surface), None);
		assert!(state.redraw.is_running());
		// The remaining finger neither pans nor clicks.
		let settled = state.transform;
		state.touch_move(&[(900.0, 300.0)], &mut surface);
		assert_eq!(state.touch_end(&[], (900.0, 300.0), &mut surface), None);
		assert_eq!(state.transform, settled);
	}

	#[test]
	fn one_finger_taps_and_drags_like_the_mouse() {
		let mut state = state(star(2));
		let mut surface = RecordingSurface::default();
		let hub = state.graph.find("hub").unwrap();

		state.touch_start(&[(400.0, 300.0)]);
		assert_eq!(
			state.touch_end(&[], (400.0, 300.0), &mut surface),
			Some(Click::Node(hub))
		);

		state.touch_start(&[(700.0, 500.0)]);
		state.touch_move(&[(650.0, 450.0)], &mut surface);
		assert_eq!(state.touch_end(&[], (650.0, 450.0), &mut surface), None);
		assert_eq!(state.transform, ViewTransform::new(-50.0, -50.0, 1.0));
	}

	#[test]
	fn cancelled_touch_ends_the_gesture() {
		let mut state = state(star(2));
		let mut surface = RecordingSurface::default();
		state.touch_start(&[(300.0, 300.0), (500.0, 300.0)]);
		state.touch_move(&[(200.0, 300.0), (600.0, 300.0)], &mut surface);
		state.touch_cancel(&mut surface);
		assert!(state.redraw.is_running());
		assert_eq!(state.touch_end(&[], (600.0, 300.0), &mut surface), None);
	}

	#[test]
	fn only_the_views_own_pass_is_drawn() {
		let mut state = state(star(3));
		let mut surface = RecordingSurface::default();
		state.redraw.start(vec![EdgeIdx(0)], 1.0);
		assert!(!state.frame(0.0, &mut surface));
		assert!(surface.batches.is_empty());

		gesture(&mut state, ViewTransform::IDENTITY, &mut surface);
		assert!(state.frame(16.0, &mut surface));
		assert_eq!(surface.batches.len(), 1);
	}
}
