use log::debug;

use super::smooth::FrameClock;
use super::surface::Surface;

/// Quiet period after the last resize notification before rebuilding.
pub const RESIZE_QUIET_MS: f64 = 200.0;

/// What the host page looks like right now, in device-independent pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
	pub width: f64,
	pub height: f64,
	/// Full scrollable height of the document.
	pub content_height: f64,
	pub scroll_y: f64,
	pub pixel_ratio: f64,
}

impl Default for Viewport {
	fn default() -> Self {
		Self::new(0.0, 0.0)
	}
}

impl Viewport {
	pub fn new(width: f64, height: f64) -> Self {
		Self {
			width,
			height,
			content_height: height,
			scroll_y: 0.0,
			pixel_ratio: 1.0,
		}
	}

	pub fn full_height(&self) -> f64 {
		self.content_height.max(self.height)
	}
}

/// A self-contained animation: built from a viewport, stepped, then drawn.
pub trait Engine {
	/// Discard every entity and lay out a fresh generation for `viewport`.
	fn rebuild(&mut self, viewport: &Viewport);
	/// Advance the simulation by `dt` seconds; `now_ms` is the frame timestamp.
	fn update(&mut self, dt: f64, now_ms: f64);
	fn draw<S: Surface>(&self, surface: &mut S, viewport: &Viewport);
}

/// Coalesces bursts of resize notifications into one rebuild.
#[derive(Clone, Debug)]
pub struct ResizeDebounce {
	quiet_ms: f64,
	last_notify_ms: Option<f64>,
}

impl ResizeDebounce {
	pub fn new(quiet_ms: f64) -> Self {
		Self {
			quiet_ms,
			last_notify_ms: None,
		}
	}

	pub fn notify(&mut self, now_ms: f64) {
		self.last_notify_ms = Some(now_ms);
	}

	/// True exactly once, on the first poll after the quiet period.
	pub fn poll(&mut self, now_ms: f64) -> bool {
		match self.last_notify_ms {
			Some(at) if now_ms - at >= self.quiet_ms => {
				self.last_notify_ms = None;
				true
			}
			_ => false,
		}
	}
}

/// Runs one engine: clock, debounced rebuilds, update and draw per frame.
pub struct FrameDriver<E> {
	engine: E,
	clock: FrameClock,
	resize: ResizeDebounce,
	viewport: Viewport,
	pending: Option<Viewport>,
}

impl<E: Engine> FrameDriver<E> {
	pub fn new(mut engine: E, viewport: Viewport, resize_quiet_ms: f64) -> Self {
		engine.rebuild(&viewport);
		Self {
			engine,
			clock: FrameClock::default(),
			resize: ResizeDebounce::new(resize_quiet_ms),
			viewport,
			pending: None,
		}
	}

	pub fn engine(&self) -> &E {
		&self.engine
	}

	pub fn viewport(&self) -> &Viewport {
		&self.viewport
	}

	/// Record a new viewport; the rebuild waits for the quiet period.
	pub fn request_resize(&mut self, viewport: Viewport, now_ms: f64) {
		self.pending = Some(viewport);
		self.resize.notify(now_ms);
	}

	pub fn set_scroll(&mut self, scroll_y: f64) {
		self.viewport.scroll_y = scroll_y;
	}

	/// One animation callback: maybe rebuild, then update and redraw.
	pub fn frame<S: Surface>(&mut self, now_ms: f64, surface: &mut S) {
		if self.resize.poll(now_ms) {
			if let Some(mut viewport) = self.pending.take() {
				viewport.scroll_y = self.viewport.scroll_y;
				self.viewport = viewport;
				surface.resize(&self.viewport);
				self.engine.rebuild(&self.viewport);
				debug!(
					"rebuilt for {}x{} viewport",
					self.viewport.width, self.viewport.height
				);
			}
		}

		let dt = self.clock.tick(now_ms);
		self.engine.update(dt, now_ms);

		surface.set_scale(self.viewport.pixel_ratio.max(1.0));
		self.engine.draw(surface, &self.viewport);
	}
}
