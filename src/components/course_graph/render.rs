//! Canvas rendering of the retained scene.
//!
//! Rendering uses multiple passes for correct z-ordering:
//! 1. Background (screen space)
//! 2. Drawn and visible edges with their arrowheads (graph space)
//! 3. Nodes, then emphasis outlines
//! 4. Labels on top

use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::graph::{CourseGraph, Edge};
use super::scene::SceneModel;
use super::theme::{Color, Theme};
use super::types::EdgeKind;

/// Dash pattern of indicative edges, in multiples of the stroke width.
const INDICATIVE_DASH: (f64, f64) = (6.0, 4.0);
/// Label offset from the node center, graph units.
const LABEL_OFFSET: (f64, f64) = (5.0, -16.0);

/// Paints the complete scene to the canvas.
pub fn render(
	scene: &SceneModel,
	graph: &CourseGraph,
	ctx: &CanvasRenderingContext2d,
	theme: &Theme,
	width: f64,
	height: f64,
) {
	ctx.set_fill_style_str(&theme.background.to_css());
	ctx.fill_rect(0.0, 0.0, width, height);

	let transform = scene.transform();
	ctx.save();
	let _ = ctx.translate(transform.x, transform.y);
	let _ = ctx.scale(transform.k, transform.k);

	draw_edges(scene, graph, ctx);
	draw_nodes(scene, graph, ctx, theme);
	draw_labels(scene, graph, ctx, theme);

	ctx.restore();
}

fn draw_edges(scene: &SceneModel, graph: &CourseGraph, ctx: &CanvasRenderingContext2d) {
	let arrowheads = scene.arrowheads();

	for idx in graph.edge_indices() {
		let Some((stroke, width)) = scene.edge(idx) else {
			continue;
		};
		let edge = graph.edge(idx);
		let target_radius = scene.node(edge.target).radius;

		ctx.set_stroke_style_str(&stroke.to_css());
		ctx.set_line_width(width);
		match edge.kind {
			EdgeKind::Baseline => {
				let _ = ctx.set_line_dash(&js_sys::Array::new());
			}
			EdgeKind::Indicative => {
				let _ = ctx.set_line_dash(&js_sys::Array::of2(
					&JsValue::from_f64(INDICATIVE_DASH.0 * width),
					&JsValue::from_f64(INDICATIVE_DASH.1 * width),
				));
			}
		}

		ctx.begin_path();
		ctx.move_to(edge.x1, edge.y1);
		ctx.line_to(edge.x2, edge.y2);
		ctx.stroke();

		if arrowheads {
			draw_arrowhead(ctx, edge, stroke, target_radius);
		}
	}

	let _ = ctx.set_line_dash(&js_sys::Array::new());
}

/// Filled triangle whose tip touches the target node's rim.
fn draw_arrowhead(ctx: &CanvasRenderingContext2d, edge: &Edge, color: Color, target_radius: f64) {
	let (dx, dy) = (edge.x2 - edge.x1, edge.y2 - edge.y1);
	let dist = (dx * dx + dy * dy).sqrt();
	if dist <= target_radius {
		return;
	}

	let size = target_radius * 0.5;
	let (ux, uy) = (dx / dist, dy / dist);
	let (tip_x, tip_y) = (edge.x2 - ux * target_radius, edge.y2 - uy * target_radius);
	let (back_x, back_y) = (tip_x - ux * size, tip_y - uy * size);
	let (px, py) = (-uy * size * 0.5, ux * size * 0.5);

	ctx.set_fill_style_str(&color.to_css());
	ctx.begin_path();
	ctx.move_to(tip_x, tip_y);
	ctx.line_to(back_x + px, back_y + py);
	ctx.line_to(back_x - px, back_y - py);
	ctx.close_path();
	ctx.fill();
}

fn draw_nodes(
	scene: &SceneModel,
	graph: &CourseGraph,
	ctx: &CanvasRenderingContext2d,
	theme: &Theme,
) {
	for idx in graph.node_indices() {
		let node = graph.node(idx);
		let frame = scene.node(idx);

		ctx.begin_path();
		let _ = ctx.arc(node.x, node.y, frame.radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(&frame.fill.to_css());
		ctx.fill();

		if let Some(width) = frame.emphasis {
			ctx.set_stroke_style_str(&theme.emphasis.to_css());
			ctx.set_line_width(width);
			ctx.stroke();
		}
	}
}

fn draw_labels(
	scene: &SceneModel,
	graph: &CourseGraph,
	ctx: &CanvasRenderingContext2d,
	theme: &Theme,
) {
	ctx.set_fill_style_str(&theme.label.to_css());
	for idx in graph.node_indices() {
		let Some(font_size) = scene.node(idx).label_font else {
			continue;
		};
		let node = graph.node(idx);
		ctx.set_font(&format!("{font_size}px sans-serif"));
		let _ = ctx.fill_text(&node.title, node.x + LABEL_OFFSET.0, node.y + LABEL_OFFSET.1);
	}
}
