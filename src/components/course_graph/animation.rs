//! Animated view transitions (intro zoom, fly-to on selection).
//!
//! The graph point under the viewport center is interpolated linearly and the
//! zoom level geometrically, which keeps the motion even across large zoom
//! ratios.

use super::geometry::{ViewTransform, Viewport};

/// Timing curve of a view animation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Easing {
	/// Slow start and end.
	CubicInOut,
	/// Overshoots slightly at both ends.
	BackInOut,
}

impl Easing {
	/// Eased progress for linear progress `t` in `[0, 1]`.
	pub fn apply(self, t: f64) -> f64 {
		let t = t.clamp(0.0, 1.0) * 2.0;
		match self {
			Easing::CubicInOut => {
				if t <= 1.0 {
					t * t * t / 2.0
				} else {
					let t = t - 2.0;
					(t * t * t + 2.0) / 2.0
				}
			}
			Easing::BackInOut => {
				const S: f64 = 1.70158;
				if t < 1.0 {
					t * t * ((S + 1.0) * t - S) / 2.0
				} else {
					let t = t - 2.0;
					(t * t * ((S + 1.0) * t + S) + 2.0) / 2.0
				}
			}
		}
	}
}

/// An in-flight transition from one view transform to another.
#[derive(Clone, Debug)]
pub struct ViewAnimation {
	from: ViewTransform,
	to: ViewTransform,
	anchor: (f64, f64),
	start: f64,
	duration: f64,
	easing: Easing,
	started: bool,
}

impl ViewAnimation {
	/// Animation from `from` to `to` anchored at the viewport center.
	pub fn new(
		from: ViewTransform,
		to: ViewTransform,
		viewport: &Viewport,
		start: f64,
		duration: f64,
		easing: Easing,
	) -> Self {
		Self {
			from,
			to,
			anchor: (viewport.width / 2.0, viewport.height / 2.0),
			start,
			duration,
			easing,
			started: false,
		}
	}

	/// Transform the animation ends on.
	pub fn target(&self) -> ViewTransform {
		self.to
	}

	/// Whether `now` is past the animation's start.
	pub fn is_due(&self, now: f64) -> bool {
		now >= self.start
	}

	/// Marks the animation as running. Returns true the first time only.
	pub fn begin(&mut self) -> bool {
		!std::mem::replace(&mut self.started, true)
	}

	/// Whether the animation has reached its end at `now`.
	pub fn is_finished(&self, now: f64) -> bool {
		now >= self.start + self.duration
	}

	/// Transform at `now`; exactly the endpoints outside the running window.
	pub fn at(&self, now: f64) -> ViewTransform {
		if self.is_finished(now) {
			return self.to;
		}
		if now <= self.start {
			return self.from;
		}
		let t = self.easing.apply((now - self.start) / self.duration);

		let (ax, ay) = self.anchor;
		let (fx, fy) = self.from.invert(ax, ay);
		let (tx, ty) = self.to.invert(ax, ay);
		let (cx, cy) = (fx + (tx - fx) * t, fy + (ty - fy) * t);
		let k = (self.from.k.ln() + (self.to.k.ln() - self.from.k.ln()) * t).exp();

		ViewTransform::new(ax - cx * k, ay - cy * k, k)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn easings_fix_endpoints() {
		for easing in [Easing::CubicInOut, Easing::BackInOut] {
			assert_eq!(easing.apply(0.0), 0.0);
			assert_eq!(easing.apply(1.0), 1.0);
			assert!((easing.apply(0.5) - 0.5).abs() < 1e-12);
		}
		assert!(Easing::BackInOut.apply(0.1) < 0.0);
	}

	#[test]
	fn lands_exactly_on_target() {
		let viewport = Viewport::new(800.0, 600.0);
		let from = ViewTransform::new(400.0, 300.0, 60.0);
		let to = ViewTransform::new(400.0, 300.0, 0.07);
		let mut anim = ViewAnimation::new(from, to, &viewport, 1500.0, 5000.0, Easing::BackInOut);

		assert!(!anim.is_due(1000.0));
		assert!(anim.begin());
		assert!(!anim.begin());
		assert_eq!(anim.at(1500.0), from);
		assert_eq!(anim.at(6500.0), to);
		assert!(anim.is_finished(6500.0));
	}

	#[test]
	fn keeps_center_fixed_when_only_zooming() {
		let viewport = Viewport::new(800.0, 600.0);
		let from = ViewTransform::new(400.0, 300.0, 2.0);
		let to = ViewTransform::new(400.0, 300.0, 0.5);
		let anim = ViewAnimation::new(from, to, &viewport, 0.0, 100.0, Easing::CubicInOut);
		let mid = anim.at(50.0);
		assert!((mid.k - 1.0).abs() < 1e-9);
		assert!((mid.x - 400.0).abs() < 1e-9 && (mid.y - 300.0).abs() < 1e-9);
	}
}
