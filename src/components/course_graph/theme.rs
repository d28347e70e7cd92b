//! Visual theming for the course graph.
//!
//! Colors for the default, dimmed and highlighted states of nodes and edges.

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	/// Red.
	pub r: u8,
	/// Green.
	pub g: u8,
	/// Blue.
	pub b: u8,
	/// Alpha, `0.0..=1.0`.
	pub a: f64,
}

impl Color {
	/// Opaque color.
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	/// Color with alpha.
	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	/// Linear interpolation between two colors
	pub fn lerp(self, other: Color, t: f64) -> Self {
		let t = t.clamp(0.0, 1.0);
		let mix = |a: u8, b: u8| (a as f64 * (1.0 - t) + b as f64 * t).round() as u8;
		Self {
			r: mix(self.r, other.r),
			g: mix(self.g, other.g),
			b: mix(self.b, other.b),
			a: self.a * (1.0 - t) + other.a * t,
		}
	}

	/// CSS color string.
	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// Complete visual theme.
#[derive(Clone, Debug)]
pub struct Theme {
	/// Canvas background.
	pub background: Color,
	/// Node fill with no selection.
	pub node: Color,
	/// Edge stroke with no selection.
	pub edge: Color,
	/// Node fill outside the highlighted neighborhood.
	pub background_node: Color,
	/// Highlight colors indexed by highlight level; the last entry is the
	/// selected node itself.
	pub highlight: Vec<Color>,
	/// Label text.
	pub label: Color,
	/// Stroke of a node emphasized from the info panel.
	pub emphasis: Color,
}

impl Theme {
	/// Fill or stroke for highlight `level`. Levels past the palette reuse its
	/// strongest color.
	pub fn highlight_color(&self, level: usize) -> Color {
		match self.highlight.get(level) {
			Some(color) => *color,
			None => self.highlight.last().copied().unwrap_or(self.node),
		}
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self {
			background: Color::rgb(255, 255, 255),
			node: Color::rgb(145, 145, 145),
			edge: Color::rgba(145, 145, 145, 0.8),
			background_node: Color::rgba(142, 136, 130, 0.1),
			highlight: vec![
				Color::rgb(180, 180, 180),
				Color::rgb(100, 100, 100),
				Color::rgb(0, 0, 0),
			],
			label: Color::rgb(40, 40, 40),
			emphasis: Color::rgb(0, 0, 0),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn lerp_hits_endpoints() {
		let a = Color::rgba(0, 100, 200, 0.0);
		let b = Color::rgb(200, 100, 0);
		assert_eq!(a.lerp(b, 0.0), a);
		assert_eq!(a.lerp(b, 1.0), b);
		assert_eq!(a.lerp(b, 0.5), Color::rgba(100, 100, 100, 0.5));
	}

	#[test]
	fn css_output() {
		assert_eq!(Color::rgb(255, 0, 16).to_css(), "#ff0010");
		assert_eq!(Color::rgba(1, 2, 3, 0.5).to_css(), "rgba(1, 2, 3, 0.5)");
	}

	#[test]
	fn highlight_levels_saturate() {
		let theme = Theme::default();
		assert_eq!(theme.highlight_color(0), Color::rgb(180, 180, 180));
		assert_eq!(theme.highlight_color(7), Color::rgb(0, 0, 0));
	}
}
