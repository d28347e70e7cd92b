//! Cooperative batched redraw of visible edges.
//!
//! A redraw pass is started when a viewport gesture ends and is drained one
//! batch per animation frame, so large edge sets never block input handling.
//! Only one pass exists at a time: starting a pass replaces the pending one,
//! and a cancelled pass issues no further batches.

use std::collections::VecDeque;

use log::debug;

use super::graph::EdgeIdx;

/// Identifies one redraw pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RedrawHandle {
	generation: u64,
}

/// One tick's worth of edges to draw.
#[derive(Clone, Debug, PartialEq)]
pub struct EdgeBatch {
	/// Pass the batch belongs to.
	pub handle: RedrawHandle,
	/// Edges to draw, in pass order.
	pub edges: Vec<EdgeIdx>,
	/// Stroke width for the pass's zoom level.
	pub line_width: f64,
}

#[derive(Debug)]
struct RedrawPass {
	handle: RedrawHandle,
	remaining: VecDeque<EdgeIdx>,
	line_width: f64,
}

/// Owns the (at most one) pending redraw pass.
#[derive(Debug)]
pub struct RedrawScheduler {
	batch_size: usize,
	generation: u64,
	pending: Option<RedrawPass>,
	drawing_complete: bool,
}

impl RedrawScheduler {
	/// Scheduler issuing at most `batch_size` edges per tick.
	pub fn new(batch_size: usize) -> Self {
		Self {
			batch_size: batch_size.max(1),
			generation: 0,
			pending: None,
			drawing_complete: true,
		}
	}

	/// Starts a pass over `edges`, replacing any pending pass.
	pub fn start(&mut self, edges: Vec<EdgeIdx>, line_width: f64) -> RedrawHandle {
		self.cancel();
		self.generation += 1;
		let handle = RedrawHandle {
			generation: self.generation,
		};
		debug!("redraw pass {} started with {} edges", handle.generation, edges.len());
		self.pending = Some(RedrawPass {
			handle,
			remaining: edges.into(),
			line_width,
		});
		self.drawing_complete = false;
		handle
	}

	/// Discards the pending pass, if any.
	pub fn cancel(&mut self) {
		if let Some(pass) = self.pending.take() {
			debug!(
				"redraw pass {} cancelled with {} edges left",
				pass.handle.generation,
				pass.remaining.len()
			);
		}
	}

	/// Cancels the pass identified by `handle` if it is still pending.
	pub fn cancel_handle(&mut self, handle: &RedrawHandle) {
		if self.is_active(handle) {
			self.cancel();
		}
	}

	/// Whether `handle` is the pending pass.
	pub fn is_active(&self, handle: &RedrawHandle) -> bool {
		self.pending.as_ref().is_some_and(|p| p.handle == *handle)
	}

	/// Whether any pass is pending.
	pub fn is_running(&self) -> bool {
		self.pending.is_some()
	}

	/// Whether the last started pass drew its final batch.
	pub fn drawing_complete(&self) -> bool {
		self.drawing_complete
	}

	/// Takes the next batch of the pending pass. The pass stops, and drawing
	/// is complete, once its remaining set is empty.
	pub fn tick(&mut self) -> Option<EdgeBatch> {
		let pass = self.pending.as_mut()?;
		let take = self.batch_size.min(pass.remaining.len());
		let batch = EdgeBatch {
			handle: pass.handle,
			edges: pass.remaining.drain(..take).collect(),
			line_width: pass.line_width,
		};

		if pass.remaining.is_empty() {
			debug!("redraw pass {} complete", pass.handle.generation);
			self.pending = None;
			self.drawing_complete = true;
		}

		Some(batch)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn edges(n: usize) -> Vec<EdgeIdx> {
		(0..n).map(EdgeIdx).collect()
	}

	#[test]
	fn drains_in_fixed_batches() {
		let mut scheduler = RedrawScheduler::new(50);
		scheduler.start(edges(237), 1.0);

		let mut sizes = Vec::new();
		while let Some(batch) = scheduler.tick() {
			sizes.push(batch.edges.len());
			let last = sizes.len() == 5;
			assert_eq!(scheduler.drawing_complete(), last);
		}
		assert_eq!(sizes, vec![50, 50, 50, 50, 37]);
		assert!(scheduler.drawing_complete());
		assert!(!scheduler.is_running());
	}

	#[test]
	fn batches_preserve_order() {
		let mut scheduler = RedrawScheduler::new(2);
		scheduler.start(edges(3), 0.5);
		assert_eq!(scheduler.tick().unwrap().edges, vec![EdgeIdx(0), EdgeIdx(1)]);
		let last = scheduler.tick().unwrap();
		assert_eq!(last.edges, vec![EdgeIdx(2)]);
		assert_eq!(last.line_width, 0.5);
		assert!(scheduler.tick().is_none());
	}

	#[test]
	fn empty_pass_completes_on_first_tick() {
		let mut scheduler = RedrawScheduler::new(50);
		scheduler.start(Vec::new(), 1.0);
		assert!(!scheduler.drawing_complete());
		assert_eq!(scheduler.tick().unwrap().edges, Vec::new());
		assert!(scheduler.drawing_complete());
	}

	#[test]
	fn cancel_stops_future_batches() {
		let mut scheduler = RedrawScheduler::new(50);
		let handle = scheduler.start(edges(120), 1.0);
		scheduler.tick();
		scheduler.cancel_handle(&handle);
		assert!(scheduler.tick().is_none());
		assert!(!scheduler.drawing_complete());
	}

	#[test]
	fn new_pass_preempts_the_old_one() {
		let mut scheduler = RedrawScheduler::new(50);
		let first = scheduler.start(edges(120), 1.0);
		scheduler.tick();
		let second = scheduler.start(vec![EdgeIdx(500)], 2.0);

		assert!(!scheduler.is_active(&first));
		// A stale handle must not cancel the newer pass.
		scheduler.cancel_handle(&first);
		let batch = scheduler.tick().unwrap();
		assert_eq!(batch.handle, second);
		assert_eq!(batch.edges, vec![EdgeIdx(500)]);
	}
}
