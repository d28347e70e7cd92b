//! prereq-graph: Interactive course prerequisite graph for the browser.
//!
//! This crate provides a WASM-based visualization of a precomputed course
//! layout with pan/zoom, batched edge redraws, prerequisite-chain
//! highlighting, a course info panel and title search.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, error, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;

pub use components::course_graph::{
	CourseGraph, CourseGraphView, CourseTables, EdgeKind, GraphData, GraphEdge, GraphError,
	GraphNode, TableError, Theme, ViewConfig,
};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("prereq-graph: logging initialized");
}

/// Text content of the script element with the given id.
fn script_text(id: &str) -> Option<String> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id(id)?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	script.text().ok()
}

/// Load the course layout from a script element with id="course-graph".
/// Expected format: JSON with { nodes: [...], edges: [...] }
fn load_graph() -> CourseGraph {
	let Some(json_text) = script_text("course-graph") else {
		warn!("prereq-graph: no course-graph element, showing an empty graph");
		return CourseGraph::default();
	};

	let data = match serde_json::from_str::<GraphData>(&json_text) {
		Ok(data) => data,
		Err(e) => {
			error!("prereq-graph: failed to parse graph data: {}", e);
			return CourseGraph::default();
		}
	};

	match CourseGraph::new(&data) {
		Ok(graph) => {
			info!(
				"prereq-graph: loaded {} courses, {} prerequisites",
				data.nodes.len(),
				data.edges.len()
			);
			graph
		}
		Err(e) => {
			error!("prereq-graph: invalid graph data: {}", e);
			CourseGraph::default()
		}
	}
}

/// Load the description and section tables. Either may be missing or broken
/// without affecting the other.
fn load_tables() -> CourseTables {
	let mut tables = CourseTables::default();

	if let Some(text) = script_text("course-descriptions") {
		match CourseTables::parse_descriptions(&text) {
			Ok(descriptions) => {
				info!("prereq-graph: loaded {} descriptions", descriptions.len());
				tables = tables.with_descriptions(descriptions);
			}
			Err(e) => warn!("prereq-graph: description table ignored: {}", e),
		}
	}

	if let Some(text) = script_text("course-sections") {
		match CourseTables::parse_sections(&text) {
			Ok(sections) => {
				info!("prereq-graph: loaded sections for {} courses", sections.len());
				tables = tables.with_sections(sections);
			}
			Err(e) => warn!("prereq-graph: section table ignored: {}", e),
		}
	}

	tables
}

/// Load view settings from an optional script element with id="graph-config".
fn load_config() -> ViewConfig {
	let Some(json_text) = script_text("graph-config") else {
		return ViewConfig::default();
	};
	serde_json::from_str(&json_text).unwrap_or_else(|e| {
		warn!("prereq-graph: failed to parse graph config, using defaults: {}", e);
		ViewConfig::default()
	})
}

/// Main application component.
/// Loads the course data from the DOM and renders the graph view.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let graph = load_graph();
	let tables = load_tables();
	let config = load_config();

	view! {
		<Html attr:lang="en" attr:dir="ltr" />
		<Title text="Course Prerequisites" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="fullscreen-graph" style="position: fixed; inset: 0;">
			<CourseGraphView graph=graph tables=tables config=config />
		</div>
	}
}
