use log::debug;
use rand::Rng;
use rand::rngs::SmallRng;

use super::config::{ParticleConfig, ParticleProfile};
use super::connection::ConnectionSet;
use super::field::{Particle, place_particles};
use super::render;
use crate::components::canvas::smooth::smooth;
use crate::components::canvas::{Engine, Surface, Viewport};

/// Particles, their strands and the preset picked for the current viewport.
pub struct ParticleFieldState<R = SmallRng> {
	pub profile: ParticleProfile,
	pub config: ParticleConfig,
	pub particles: Vec<Particle>,
	pub connections: ConnectionSet,
	width: f64,
	height: f64,
	rng: R,
}

impl<R: Rng> ParticleFieldState<R> {
	pub fn new(profile: ParticleProfile, rng: R) -> Self {
		let config = profile.wide.clone();
		Self {
			profile,
			config,
			particles: Vec::new(),
			connections: ConnectionSet::default(),
			width: 0.0,
			height: 0.0,
			rng,
		}
	}

	pub fn size(&self) -> (f64, f64) {
		(self.width, self.height)
	}
}

impl<R: Rng> Engine for ParticleFieldState<R> {
	fn rebuild(&mut self, viewport: &Viewport) {
		self.width = viewport.width.max(0.0);
		self.height = viewport.height.max(0.0);
		self.config = self.profile.select(self.width).clone();
		self.particles = place_particles(self.width, self.height, &self.config, &mut self.rng);
		self.connections.clear();
		debug!(
			"particle field: {} particles over {}x{}",
			self.particles.len(),
			self.width,
			self.height
		);
	}

	fn update(&mut self, dt: f64, _now_ms: f64) {
		for (i, particle) in self.particles.iter_mut().enumerate() {
			if particle.step(dt, self.width, self.height) {
				self.connections.forget(i);
			}
		}
		self.connections.update(&self.particles, &self.config);

		let peaks = self.connections.peak_strengths(self.particles.len());
		for (particle, peak) in self.particles.iter_mut().zip(peaks) {
			particle.glow = smooth(particle.glow, peak, self.config.glow_rate);
		}
	}

	fn draw<S: Surface>(&self, surface: &mut S, viewport: &Viewport) {
		render::render(self, surface, viewport);
	}
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;

	use super::*;
	use crate::components::particles::connection::PairKey;

	fn field(width: f64, height: f64) -> ParticleFieldState {
		let mut state = ParticleFieldState::new(ParticleProfile::default(), SmallRng::seed_from_u64(5));
		state.rebuild(&Viewport::new(width, height));
		state
	}

	#[test]
	fn rebuild_picks_the_preset_for_the_width() {
		let narrow = field(390.0, 844.0);
		assert_eq!(narrow.config, ParticleConfig::mobile());
		assert_eq!(narrow.particles.len(), ParticleConfig::mobile().count);

		let wide = field(1440.0, 900.0);
		assert_eq!(wide.config, ParticleConfig::desktop());
		assert_eq!(wide.particles.len(), ParticleConfig::desktop().count);
	}

	#[test]
	fn strands_form_and_stay_bounded() {
		let mut state = field(1280.0, 720.0);
		for _ in 0..300 {
			state.update(1.0 / 60.0, 0.0);
			for (key, link) in state.connections.iter() {
				assert!((0.0..=1.0).contains(&link.strength));
				let (a, b) = key.indices();
				assert!(b < state.particles.len() && a < b);
			}
			for p in &state.particles {
				assert!((0.0..=1.0).contains(&p.glow));
			}
		}
		assert!(!state.connections.is_empty());
		assert!(state.particles.iter().any(|p| p.glow > 0.1));
	}

	#[test]
	fn resize_replaces_the_whole_batch() {
		let mut state = field(1280.0, 720.0);
		for _ in 0..60 {
			state.update(1.0 / 60.0, 0.0);
		}
		let before = state.particles.clone();
		state.rebuild(&Viewport::new(600.0, 400.0));
		assert!(state.connections.is_empty());
		assert_eq!(state.size(), (600.0, 400.0));
		assert_ne!(state.particles, before);
		assert!(state.particles.iter().all(|p| p.x <= 600.0 && p.y <= 400.0));
	}

	#[test]
	fn wrapping_particle_leaves_its_strands_behind() {
		let mut state = field(1280.0, 720.0);
		state.particles.truncate(2);
		for (p, (x, vx)) in state.particles.iter_mut().zip([(0.0, -12.0), (59.0, 0.0)]) {
			(p.x, p.y, p.vx, p.vy) = (x, 300.0, vx, 0.0);
		}
		let key = PairKey::new(0, 1);

		let mut frames = 0;
		while state.particles[0].x <= 0.0 && frames < 1000 {
			state.update(1.0 / 60.0, 0.0);
			if state.particles[0].x <= 0.0 {
				assert!(state.connections.get(key).is_some());
			}
			frames += 1;
		}
		assert!(state.particles[0].x > 1000.0, "never wrapped");
		assert!(state.connections.get(key).is_none());
		state.update(1.0 / 60.0, 0.0);
		assert!(state.connections.get(key).is_none());
	}

	#[test]
	fn empty_field_is_a_quiet_no_op() {
		let profile = ParticleProfile::uniform(ParticleConfig {
			count: 0,
			..ParticleConfig::desktop()
		});
		let mut state = ParticleFieldState::new(profile, SmallRng::seed_from_u64(0));
		state.rebuild(&Viewport::new(800.0, 600.0));
		state.update(0.016, 16.0);
		assert!(state.particles.is_empty());
		assert!(state.connections.is_empty());
	}
}
