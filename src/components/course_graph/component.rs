//! Leptos component wrapping the course graph canvas.
//!
//! The component creates an HTML canvas element plus the search box and info
//! panel overlays, and wires mouse, wheel and touch handlers to
//! [`CourseGraphState`].
//! An animation loop runs via `requestAnimationFrame`, stepping the retained
//! scene, the view animation and the batched edge redraw, then repainting.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{
	CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, TouchEvent, TouchList, WheelEvent,
	Window,
};

use super::config::ViewConfig;
use super::geometry::Viewport;
use super::graph::CourseGraph;
use super::overlay::{InfoPanelContent, PanelAction, SearchBox};
use super::panel::InfoPanel;
use super::render;
use super::scene::SceneModel;
use super::search::SearchHit;
use super::state::{Click, CourseGraphState};
use super::tables::CourseTables;
use super::theme::Theme;

/// View state together with the scene it draws into.
struct GraphContext {
	state: CourseGraphState,
	scene: SceneModel,
}

impl GraphContext {
	/// Brings the scene up to `now` so new commands start from current values.
	fn advance(&mut self, now: f64) {
		self.scene.advance(now);
	}

	/// Applies a canvas click. Returns the panel for a selected course, or
	/// `None` after a background click.
	fn click(&mut self, click: Click, now: f64, panel_height: f64) -> Option<InfoPanel> {
		match click {
			Click::Node(idx) => {
				self.state.panel_height = panel_height;
				Some(self.state.select_node(idx, now, &mut self.scene))
			}
			Click::Background => {
				self.state.background_click(&mut self.scene);
				None
			}
		}
	}

	fn select(&mut self, action: PanelAction, now: f64, panel_height: f64) -> Option<InfoPanel> {
		self.advance(now);
		match action {
			PanelAction::Hover(node) => {
				self.state.emphasize(node, &mut self.scene);
				None
			}
			PanelAction::Select(node) => {
				self.state.emphasize(None, &mut self.scene);
				self.state.panel_height = panel_height;
				Some(self.state.select_node(node, now, &mut self.scene))
			}
		}
	}
}

/// Milliseconds on the page clock.
fn now_ms() -> f64 {
	web_sys::window()
		.and_then(|w| w.performance())
		.map(|p| p.now())
		.unwrap_or(0.0)
}

/// Size of the canvas' container, falling back to the window.
fn container_size(canvas: &HtmlCanvasElement, window: &Window) -> (f64, f64) {
	let parent = canvas
		.parent_element()
		.map(|p| (p.client_width() as f64, p.client_height() as f64))
		.filter(|&(w, h)| w > 0.0 && h > 0.0);
	parent.unwrap_or_else(|| {
		(
			window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(800.0),
			window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(600.0),
		)
	})
}

/// Top-left corner of the canvas in client coordinates.
fn canvas_origin(canvas_ref: NodeRef<leptos::html::Canvas>) -> (f64, f64) {
	canvas_ref
		.get_untracked()
		.map(|canvas| {
			let rect = canvas.get_bounding_client_rect();
			(rect.left(), rect.top())
		})
		.unwrap_or((0.0, 0.0))
}

/// Mouse position relative to the canvas.
fn canvas_point(canvas_ref: NodeRef<leptos::html::Canvas>, ev: &MouseEvent) -> (f64, f64) {
	let (left, top) = canvas_origin(canvas_ref);
	(ev.client_x() as f64 - left, ev.client_y() as f64 - top)
}

/// Touch positions relative to the canvas.
fn touch_points(canvas_ref: NodeRef<leptos::html::Canvas>, touches: &TouchList) -> Vec<(f64, f64)> {
	let (left, top) = canvas_origin(canvas_ref);
	(0..touches.length())
		.filter_map(|i| touches.get(i))
		.map(|t| (t.client_x() as f64 - left, t.client_y() as f64 - top))
		.collect()
}

/// Shows the outcome of a canvas click in the overlay: the selected course's
/// panel, or an empty panel and search box after a background click.
fn publish_click(
	clicked: Option<Option<InfoPanel>>,
	panel: RwSignal<Option<InfoPanel>>,
	query: RwSignal<String>,
) {
	match clicked {
		Some(Some(info)) => panel.set(Some(info)),
		Some(None) => {
			panel.set(None);
			query.set(String::new());
		}
		None => {}
	}
}

/// Renders the interactive prerequisite graph with its search box and info
/// panel.
///
/// The component fills its parent container and follows window resizes. On
/// mount it plays the intro zoom from a close-up to the whole graph.
#[component]
pub fn CourseGraphView(
	graph: CourseGraph,
	#[prop(optional)] tables: CourseTables,
	#[prop(optional)] config: ViewConfig,
	#[prop(optional)] theme: Theme,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let panel_ref = NodeRef::<leptos::html::Div>::new();
	let context: Rc<RefCell<Option<GraphContext>>> = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let (context_init, animate_init, resize_cb_init) =
		(context.clone(), animate.clone(), resize_cb.clone());

	let panel = RwSignal::new(None::<InfoPanel>);
	let query = RwSignal::new(String::new());
	let hits = RwSignal::new(Vec::<SearchHit>::new());
	let action = RwSignal::new(None::<PanelAction>);

	let panel_height = move || {
		panel_ref
			.get_untracked()
			.map(|el| el.client_height() as f64)
			.unwrap_or(0.0)
	};

	let mut setup = Some((graph, tables, config, theme));
	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let Some((graph, tables, config, theme)) = setup.take() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			return;
		};

		let (w, h) = container_size(&canvas, &window);
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let Some(ctx) = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
		else {
			warn!("canvas has no 2d context; course graph not drawn");
			return;
		};

		info!(
			"course graph: {} courses, {} prerequisites, {w}x{h}",
			graph.nodes().len(),
			graph.edges().len()
		);
		let now = now_ms();
		let state = CourseGraphState::new(graph, tables, config, theme, Viewport::new(w, h));
		let mut c = GraphContext {
			scene: state.scene(),
			state,
		};
		c.advance(now);
		c.state.start_intro(now, &mut c.scene);
		*context_init.borrow_mut() = Some(c);

		let (context_resize, canvas_resize) = (context_init.clone(), canvas.clone());
		*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
			let Some(win) = web_sys::window() else {
				return;
			};
			let (nw, nh) = container_size(&canvas_resize, &win);
			canvas_resize.set_width(nw as u32);
			canvas_resize.set_height(nh as u32);
			if let Some(ref mut c) = *context_resize.borrow_mut() {
				c.advance(now_ms());
				c.state.resize(nw, nh, &mut c.scene);
			}
		}));
		if let Some(ref cb) = *resize_cb_init.borrow() {
			let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}

		let (context_anim, animate_inner) = (context_init.clone(), animate_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if let Some(ref mut c) = *context_anim.borrow_mut() {
				let now = now_ms();
				c.advance(now);
				c.state.frame(now, &mut c.scene);
				render::render(
					&c.scene,
					&c.state.graph,
					&ctx,
					&c.state.theme,
					c.state.viewport.width,
					c.state.viewport.height,
				);
			}
			if let (Some(cb), Some(win)) = (&*animate_inner.borrow(), web_sys::window()) {
				let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let context_action = context.clone();
	Effect::new(move |_| {
		let Some(act) = action.get() else {
			return;
		};
		let selected = context_action
			.borrow_mut()
			.as_mut()
			.and_then(|c| c.select(act, now_ms(), panel_height()));
		if let Some(info) = selected {
			panel.set(Some(info));
		}
	});

	let context_search = context.clone();
	Effect::new(move |_| {
		let results = query.with(|q| {
			context_search
				.borrow()
				.as_ref()
				.map(|c| c.state.search(q))
				.unwrap_or_default()
		});
		hits.set(results);
	});

	let context_md = context.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let (x, y) = canvas_point(canvas_ref, &ev);
		if let Some(ref mut c) = *context_md.borrow_mut() {
			c.state.pointer_down(x, y);
		}
	};

	let context_mm = context.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let (x, y) = canvas_point(canvas_ref, &ev);
		if let Some(ref mut c) = *context_mm.borrow_mut() {
			c.advance(now_ms());
			c.state.pointer_move(x, y, &mut c.scene);
		}
	};

	let context_mu = context.clone();
	let on_mouseup = move |ev: MouseEvent| {
		let (x, y) = canvas_point(canvas_ref, &ev);
		let clicked = context_mu.borrow_mut().as_mut().and_then(|c| {
			let now = now_ms();
			c.advance(now);
			let click = c.state.pointer_up(x, y, &mut c.scene)?;
			Some(c.click(click, now, panel_height()))
		});
		publish_click(clicked, panel, query);
	};

	let context_ml = context.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut c) = *context_ml.borrow_mut() {
			c.advance(now_ms());
			c.state.pointer_leave(&mut c.scene);
		}
	};

	let context_wh = context.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let (x, y) = canvas_point(canvas_ref, &ev);
		if let Some(ref mut c) = *context_wh.borrow_mut() {
			let now = now_ms();
			c.advance(now);
			c.state.wheel(x, y, ev.delta_y(), now, &mut c.scene);
		}
	};

	let context_ts = context.clone();
	let on_touchstart = move |ev: TouchEvent| {
		ev.prevent_default();
		let touches = touch_points(canvas_ref, &ev.touches());
		if let Some(ref mut c) = *context_ts.borrow_mut() {
			c.state.touch_start(&touches);
		}
	};

	let context_tm = context.clone();
	let on_touchmove = move |ev: TouchEvent| {
		ev.prevent_default();
		let touches = touch_points(canvas_ref, &ev.touches());
		if let Some(ref mut c) = *context_tm.borrow_mut() {
			c.advance(now_ms());
			c.state.touch_move(&touches, &mut c.scene);
		}
	};

	let context_te = context.clone();
	let on_touchend = move |ev: TouchEvent| {
		ev.prevent_default();
		let touches = touch_points(canvas_ref, &ev.touches());
		let Some(&lifted) = touch_points(canvas_ref, &ev.changed_touches()).last() else {
			return;
		};
		let clicked = context_te.borrow_mut().as_mut().and_then(|c| {
			let now = now_ms();
			c.advance(now);
			let click = c.state.touch_end(&touches, lifted, &mut c.scene)?;
			Some(c.click(click, now, panel_height()))
		});
		publish_click(clicked, panel, query);
	};

	let context_tc = context.clone();
	let on_touchcancel = move |_: TouchEvent| {
		if let Some(ref mut c) = *context_tc.borrow_mut() {
			c.advance(now_ms());
			c.state.touch_cancel(&mut c.scene);
		}
	};

	view! {
		<div class="course-graph" style="position: relative; width: 100%; height: 100%;">
			<canvas
				node_ref=canvas_ref
				class="course-graph-canvas"
				on:mousedown=on_mousedown
				on:mousemove=on_mousemove
				on:mouseup=on_mouseup
				on:mouseleave=on_mouseleave
				on:wheel=on_wheel
				on:touchstart=on_touchstart
				on:touchmove=on_touchmove
				on:touchend=on_touchend
				on:touchcancel=on_touchcancel
				style="display: block; cursor: grab; touch-action: none;"
			/>
			<SearchBox query=query hits=hits action=action />
			<div
				node_ref=panel_ref
				class="infopanel"
				class:visible=move || panel.with(Option::is_some)
			>
				<InfoPanelContent panel=panel action=action />
			</div>
		</div>
	}
}
