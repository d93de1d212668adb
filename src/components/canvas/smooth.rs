//! Frame-rate helpers shared by both engines.

/// Largest simulation step accepted from the clock, in seconds.
pub const MAX_FRAME_STEP: f64 = 0.1;

/// Exponential smoothing of a `[0, 1]` intensity toward `target`.
///
/// Convergence speed is proportional to the remaining distance, so a change
/// of target never produces a visible snap.
pub fn smooth(current: f64, target: f64, rate: f64) -> f64 {
	(current + (target - current) * rate).clamp(0.0, 1.0)
}

pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
	a + (b - a) * t
}

/// Turns animation-frame timestamps (milliseconds) into clamped deltas.
#[derive(Clone, Debug)]
pub struct FrameClock {
	last_ms: Option<f64>,
	max_step: f64,
}

impl Default for FrameClock {
	fn default() -> Self {
		Self::new(MAX_FRAME_STEP)
	}
}

impl FrameClock {
	pub fn new(max_step: f64) -> Self {
		Self {
			last_ms: None,
			max_step,
		}
	}

	/// Seconds elapsed since the previous tick. The first tick yields zero.
	pub fn tick(&mut self, now_ms: f64) -> f64 {
		let dt = match self.last_ms {
			Some(prev) => ((now_ms - prev) / 1000.0).clamp(0.0, self.max_step),
			None => 0.0,
		};
		self.last_ms = Some(now_ms);
		if dt.is_nan() { 0.0 } else { dt }
	}
}
