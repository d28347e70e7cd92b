//! View transform and visibility culling.
//!
//! Everything here is a pure function of graph-space coordinates and the
//! current transform, so it can run on every zoom step without touching the
//! scene.

use super::graph::{Edge, Node};

/// Pan and zoom transform applied to the entire graph view.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewTransform {
	/// Horizontal translation, screen pixels.
	pub x: f64,
	/// Vertical translation, screen pixels.
	pub y: f64,
	/// Zoom factor (1.0 = 100%).
	pub k: f64,
}

impl Default for ViewTransform {
	fn default() -> Self {
		Self::IDENTITY
	}
}

impl ViewTransform {
	/// No pan, no zoom.
	pub const IDENTITY: Self = Self {
		x: 0.0,
		y: 0.0,
		k: 1.0,
	};

	/// Transform with translation `(x, y)` and zoom `k`.
	pub fn new(x: f64, y: f64, k: f64) -> Self {
		Self { x, y, k }
	}

	/// Graph space to screen space.
	pub fn apply(&self, gx: f64, gy: f64) -> (f64, f64) {
		(gx * self.k + self.x, gy * self.k + self.y)
	}

	/// Screen space to graph space.
	pub fn invert(&self, sx: f64, sy: f64) -> (f64, f64) {
		((sx - self.x) / self.k, (sy - self.y) / self.k)
	}

	/// Zoom by `factor` around the screen point `(sx, sy)`, keeping the graph
	/// point under it fixed. The resulting scale is clamped to `extent`.
	pub fn zoom_around(&self, sx: f64, sy: f64, factor: f64, extent: (f64, f64)) -> Self {
		let k = (self.k * factor).clamp(extent.0, extent.1);
		let ratio = k / self.k;
		Self {
			x: sx - (sx - self.x) * ratio,
			y: sy - (sy - self.y) * ratio,
			k,
		}
	}
}

/// Size of the drawing area in screen pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
	/// Width in pixels.
	pub width: f64,
	/// Height in pixels.
	pub height: f64,
}

impl Viewport {
	/// Viewport of the given size.
	pub fn new(width: f64, height: f64) -> Self {
		Self { width, height }
	}

	fn contains(&self, x: f64, y: f64) -> bool {
		x > 0.0 && x < self.width && y > 0.0 && y < self.height
	}

	/// Left, top, right and bottom borders as segments.
	fn borders(&self) -> [Segment; 4] {
		let (w, h) = (self.width, self.height);
		[
			Segment::new(0.0, 0.0, 0.0, h),
			Segment::new(0.0, 0.0, w, 0.0),
			Segment::new(w, 0.0, w, h),
			Segment::new(0.0, h, w, h),
		]
	}
}

/// A line segment between two screen points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
	/// Start x.
	pub x1: f64,
	/// Start y.
	pub y1: f64,
	/// End x.
	pub x2: f64,
	/// End y.
	pub y2: f64,
}

impl Segment {
	/// Segment from `(x1, y1)` to `(x2, y2)`.
	pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
		Self { x1, y1, x2, y2 }
	}
}

/// Whether two segments share a point.
///
/// Both intersection parameters must fall in `[0, 1]`, so segments whose
/// supporting lines cross outside either segment do not count. Parallel and
/// collinear segments have no unique intersection and are reported as
/// disjoint.
pub fn segments_intersect(a: &Segment, b: &Segment) -> bool {
	let (s1x, s1y) = (a.x2 - a.x1, a.y2 - a.y1);
	let (s2x, s2y) = (b.x2 - b.x1, b.y2 - b.y1);

	let denom = -s2x * s1y + s1x * s2y;
	if denom == 0.0 {
		return false;
	}

	let s = (-s1y * (a.x1 - b.x1) + s1x * (a.y1 - b.y1)) / denom;
	let t = (s2x * (a.y1 - b.y1) - s2y * (a.x1 - b.x1)) / denom;

	(0.0..=1.0).contains(&s) && (0.0..=1.0).contains(&t)
}

/// Whether a node could appear on screen.
///
/// `radius` is a fixed conservative on-screen radius rather than the node's
/// drawn size, so culling never has to look at the scene.
pub fn node_is_visible(
	node: &Node,
	viewport: &Viewport,
	transform: &ViewTransform,
	radius: f64,
) -> bool {
	let (x, y) = transform.apply(node.x, node.y);
	x + radius > 0.0 && x - radius < viewport.width && y + radius > 0.0 && y - radius < viewport.height
}

/// Whether an edge could appear on screen: both endpoints inside the viewport,
/// or the segment crossing one of its borders.
pub fn edge_is_visible(edge: &Edge, viewport: &Viewport, transform: &ViewTransform) -> bool {
	let (x1, y1) = transform.apply(edge.x1, edge.y1);
	let (x2, y2) = transform.apply(edge.x2, edge.y2);

	if viewport.contains(x1, y1) && viewport.contains(x2, y2) {
		return true;
	}

	let segment = Segment::new(x1, y1, x2, y2);
	viewport
		.borders()
		.iter()
		.any(|border| segments_intersect(&segment, border))
}
