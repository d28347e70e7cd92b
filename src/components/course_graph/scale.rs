//! Zoom-dependent scaling configuration for graph visuals.
//!
//! This module centralizes all zoom-dependent visual parameters. Nodes, edges
//! and labels are drawn in graph space under the view transform, so anything
//! that should keep a roughly constant apparent size divides by the zoom level.
//!
//! # Coordinate Spaces
//!
//! - **Graph space**: The fixed coordinate system of the exported layout.
//! - **Screen space**: Pixel coordinates on the canvas.
//!
//! # Scaling Behaviors
//!
//! - [`ScaleBehavior::Screen`]: Constant screen size. Divides by `k`.
//! - [`ScaleBehavior::ScreenCapped`]: Constant screen size, but never larger
//!   than a graph-space maximum. Keeps nodes from ballooning when zoomed out.

use serde::Deserialize;

/// Defines how a visual property scales with zoom level.
#[derive(Clone, Debug, PartialEq)]
pub enum ScaleBehavior {
	/// Constant screen-space size. Unaffected by zoom.
	Screen,
	/// Constant screen-space size, capped at `max_world` graph units.
	ScreenCapped { max_world: f64 },
}

impl ScaleBehavior {
	/// Compute the graph-space value for a given base value and zoom level.
	pub fn apply(&self, base: f64, k: f64) -> f64 {
		match self {
			ScaleBehavior::Screen => base / k,
			ScaleBehavior::ScreenCapped { max_world } => (base / k).min(*max_world),
		}
	}
}

/// Sizes and zoom thresholds for graph elements.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct ScaleConfig {
	/// Node radius in screen pixels.
	pub node_size: f64,
	/// Largest node radius in graph units.
	pub max_node_size: f64,
	/// Edge stroke width in screen pixels.
	pub line_width: f64,
	/// Label font size in screen pixels.
	pub font_size: f64,
	/// Labels are shown only above this zoom level.
	pub label_min_k: f64,
	/// Arrowheads are hidden below this zoom level.
	pub arrowhead_min_k: f64,
	/// Conservative on-screen node radius used for culling.
	pub cull_radius: f64,
}

impl Default for ScaleConfig {
	fn default() -> Self {
		Self {
			node_size: 13.0,
			max_node_size: 75.0,
			line_width: 1.0,
			font_size: 12.0,
			label_min_k: 0.5,
			arrowhead_min_k: 0.25,
			cull_radius: 100.0,
		}
	}
}

impl ScaleConfig {
	fn node_behavior(&self) -> ScaleBehavior {
		ScaleBehavior::ScreenCapped {
			max_world: self.max_node_size,
		}
	}

	/// Whether node labels should be drawn at zoom level `k`.
	pub fn labels_visible(&self, k: f64) -> bool {
		k > self.label_min_k
	}

	/// Whether edge arrowheads should be drawn at zoom level `k`.
	pub fn arrowheads_visible(&self, k: f64) -> bool {
		k >= self.arrowhead_min_k
	}
}

/// Pre-computed scale values for a specific zoom level.
///
/// Create this once per zoom step and pass it to whatever needs sizes.
/// All sizes are in graph space (ready to use under the view transform).
#[derive(Clone, Debug)]
pub struct ScaledValues {
	/// Current zoom level.
	pub k: f64,
	/// Node radius in graph space.
	pub node_radius: f64,
	/// Edge stroke width, rounded to two decimals.
	pub edge_line_width: f64,
	/// Label font size in graph space.
	pub label_font_size: f64,
	/// Stroke width used to emphasize a hovered node.
	pub emphasis_width: f64,
}

impl ScaledValues {
	/// Compute scaled values from configuration and current zoom level.
	pub fn new(config: &ScaleConfig, k: f64) -> Self {
		let node_radius = config.node_behavior().apply(config.node_size, k);
		let line_width = ScaleBehavior::Screen.apply(config.line_width, k);

		Self {
			k,
			node_radius,
			edge_line_width: (line_width * 100.0).round() / 100.0,
			label_font_size: ScaleBehavior::Screen.apply(config.font_size, k),
			emphasis_width: node_radius / 6.0,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn sizes_shrink_as_zoom_grows() {
		let config = ScaleConfig::default();
		let near = ScaledValues::new(&config, 2.0);
		let far = ScaledValues::new(&config, 0.5);
		assert_eq!(near.node_radius, 6.5);
		assert_eq!(far.node_radius, 26.0);
		assert_eq!(near.label_font_size, 6.0);
		assert_eq!(far.edge_line_width, 2.0);
	}

	#[test]
	fn node_radius_is_capped() {
		let scale = ScaledValues::new(&ScaleConfig::default(), 0.05);
		assert_eq!(scale.node_radius, 75.0);
	}

	#[test]
	fn line_width_is_rounded() {
		let scale = ScaledValues::new(&ScaleConfig::default(), 3.0);
		assert_eq!(scale.edge_line_width, 0.33);
	}

	#[test]
	fn thresholds() {
		let config = ScaleConfig::default();
		assert!(!config.labels_visible(0.5));
		assert!(config.labels_visible(0.51));
		assert!(config.arrowheads_visible(0.25));
		assert!(!config.arrowheads_visible(0.2));
	}
}
