use crate::components::canvas::{RESIZE_QUIET_MS, Rgb};
use crate::components::circuit::config::{CYAN, PURPLE};

/// Below this width the mobile preset applies.
pub const MOBILE_BREAKPOINT: f64 = 768.0;

/// Tuning of one particle field.
#[derive(Clone, Debug, PartialEq)]
pub struct ParticleConfig {
	pub count: usize,
	/// Preferred minimum distance between particles at placement.
	pub min_spacing: f64,
	pub placement_attempts: usize,
	/// Drift speed range in px/s.
	pub speed: (f64, f64),
	pub radius: (f64, f64),
	pub palette: (Rgb, Rgb),
	/// Largest lightening toward white applied per particle.
	pub color_variation: f64,
	pub connect_distance: f64,
	pub disconnect_distance: f64,
	/// Per-frame easing rate of strand strength.
	pub smoothing_rate: f64,
	/// Strength under which a breaking strand is dropped.
	pub snap_threshold: f64,
	pub line_width: f64,
	/// Peak strand opacity.
	pub line_alpha: f64,
	/// Resting particle opacity; connected particles brighten toward 1.
	pub particle_alpha: f64,
	pub glow_rate: f64,
}

impl Default for ParticleConfig {
	fn default() -> Self {
		Self::desktop()
	}
}

impl ParticleConfig {
	pub fn desktop() -> Self {
		Self {
			count: 90,
			min_spacing: 60.0,
			placement_attempts: 30,
			speed: (6.0, 18.0),
			radius: (1.5, 3.0),
			palette: (PURPLE, CYAN),
			color_variation: 0.25,
			connect_distance: 130.0,
			disconnect_distance: 170.0,
			smoothing_rate: 0.08,
			snap_threshold: 0.01,
			line_width: 1.0,
			line_alpha: 0.45,
			particle_alpha: 0.7,
			glow_rate: 0.1,
		}
	}

	/// Fewer, closer particles for narrow screens.
	pub fn mobile() -> Self {
		Self {
			count: 40,
			min_spacing: 45.0,
			connect_distance: 95.0,
			disconnect_distance: 125.0,
			line_width: 0.75,
			line_alpha: 0.35,
			..Self::desktop()
		}
	}

	/// Dense, fine-lined variant for small hero panels.
	pub fn compact() -> Self {
		Self {
			count: 60,
			min_spacing: 35.0,
			speed: (4.0, 12.0),
			radius: (1.0, 2.2),
			color_variation: 0.1,
			connect_distance: 90.0,
			disconnect_distance: 115.0,
			line_width: 0.6,
			line_alpha: 0.3,
			..Self::desktop()
		}
	}
}

/// Presets chosen by viewport width at each rebuild.
#[derive(Clone, Debug, PartialEq)]
pub struct ParticleProfile {
	pub wide: ParticleConfig,
	pub narrow: ParticleConfig,
	pub breakpoint: f64,
	pub resize_quiet_ms: f64,
}

impl Default for ParticleProfile {
	fn default() -> Self {
		Self {
			wide: ParticleConfig::desktop(),
			narrow: ParticleConfig::mobile(),
			breakpoint: MOBILE_BREAKPOINT,
			resize_quiet_ms: RESIZE_QUIET_MS,
		}
	}
}

impl ParticleProfile {
	/// One preset regardless of width.
	pub fn uniform(config: ParticleConfig) -> Self {
		Self {
			wide: config.clone(),
			narrow: config,
			..Self::default()
		}
	}

	pub fn select(&self, width: f64) -> &ParticleConfig {
		if width < self.breakpoint {
			&self.narrow
		} else {
			&self.wide
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn presets_keep_a_hysteresis_band() {
		for config in [
			ParticleConfig::desktop(),
			ParticleConfig::mobile(),
			ParticleConfig::compact(),
		] {
			assert!(config.connect_distance < config.disconnect_distance);
			assert!(config.radius.0 <= config.radius.1);
			assert!(config.speed.0 <= config.speed.1);
		}
	}

	#[test]
	fn profile_switches_at_breakpoint() {
		let profile = ParticleProfile::default();
		assert_eq!(profile.select(375.0), &ParticleConfig::mobile());
		assert_eq!(profile.select(768.0), &ParticleConfig::desktop());
		let compact = ParticleProfile::uniform(ParticleConfig::compact());
		assert_eq!(compact.select(375.0), compact.select(1920.0));
	}
}
