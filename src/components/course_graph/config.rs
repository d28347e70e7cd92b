//! Tunable behavior of the course graph view.
//!
//! Every field has a default; a page can override any subset by embedding a
//! JSON object in a `graph-config` script element.

use serde::Deserialize;

use super::scale::ScaleConfig;

/// View, highlight and scheduling parameters.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
	/// Sizes and zoom thresholds.
	pub scale: ScaleConfig,
	/// Hops from the selected course that get highlighted.
	pub highlight_depth: usize,
	/// Reveal delay of the outermost highlighted ring, ms.
	pub max_reveal_delay: f64,
	/// Fade-in time of a highlighted node, ms.
	pub highlight_duration: f64,
	/// Fade time when a selection is cleared, ms.
	pub clear_duration: f64,
	/// Edges drawn per animation frame during a redraw.
	pub batch_size: usize,
	/// Allowed zoom range.
	pub zoom_extent: (f64, f64),
	/// Zoom factor per wheel notch.
	pub wheel_step: f64,
	/// A wheel gesture ends this long after the last wheel event, ms.
	pub wheel_idle: f64,
	/// Most search results shown.
	pub search_limit: usize,
	/// Zoom level the view flies to when a course is selected.
	pub focus_scale: f64,
	/// Fly-to duration, ms.
	pub focus_duration: f64,
	/// Zoom level the intro starts at.
	pub intro_start_scale: f64,
	/// Zoom level the intro ends at.
	pub intro_end_scale: f64,
	/// Wait before the intro zoom starts, ms.
	pub intro_delay: f64,
	/// Intro zoom duration, ms.
	pub intro_duration: f64,
}

impl Default for ViewConfig {
	fn default() -> Self {
		Self {
			scale: ScaleConfig::default(),
			highlight_depth: 2,
			max_reveal_delay: 2000.0,
			highlight_duration: 1000.0,
			clear_duration: 250.0,
			batch_size: 50,
			zoom_extent: (0.05, 2.5),
			wheel_step: 1.1,
			wheel_idle: 150.0,
			search_limit: 10,
			focus_scale: 0.3,
			focus_duration: 1500.0,
			intro_start_scale: 60.0,
			intro_end_scale: 0.07,
			intro_delay: 1500.0,
			intro_duration: 5000.0,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn partial_override_keeps_defaults() {
		let config: ViewConfig = serde_json::from_str(
			r#"{"batch_size": 20, "zoom_extent": [0.1, 4.0], "scale": {"font_size": 14.0}}"#,
		)
		.unwrap();
		assert_eq!(config.batch_size, 20);
		assert_eq!(config.zoom_extent, (0.1, 4.0));
		assert_eq!(config.scale.font_size, 14.0);
		assert_eq!(config.scale.node_size, 13.0);
		assert_eq!(config.highlight_depth, 2);
	}
}
