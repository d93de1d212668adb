use std::f64::consts::TAU;

use rand::Rng;

use super::config::ParticleConfig;
use crate::components::canvas::Rgb;
use crate::components::canvas::smooth::lerp;

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
	pub x: f64,
	pub y: f64,
	/// Velocity in px/s.
	pub vx: f64,
	pub vy: f64,
	pub radius: f64,
	pub color: Rgb,
	/// Smoothed brightness from the particle's strongest strand.
	pub glow: f64,
}

impl Particle {
	pub fn pos(&self) -> (f64, f64) {
		(self.x, self.y)
	}

	pub fn distance(&self, other: &Particle) -> f64 {
		(self.x - other.x).hypot(self.y - other.y)
	}

	/// Integrate velocity and wrap once fully past an edge. Returns true when
	/// the particle jumped to the opposite side.
	pub fn step(&mut self, dt: f64, width: f64, height: f64) -> bool {
		let (x, y) = (self.x + self.vx * dt, self.y + self.vy * dt);
		self.x = wrap(x, width, self.radius);
		self.y = wrap(y, height, self.radius);
		self.x != x || self.y != y
	}
}

/// Re-enter from the far side only after leaving by more than `margin`.
pub fn wrap(pos: f64, extent: f64, margin: f64) -> f64 {
	if pos < -margin {
		extent + margin
	} else if pos > extent + margin {
		-margin
	} else {
		pos
	}
}

fn unit<R: Rng>(rng: &mut R) -> f64 {
	rng.gen_range(0.0..1.0)
}

/// Scatter `config.count` particles over `width × height`, keeping them
/// apart where the attempt budget allows.
pub fn place_particles<R: Rng>(
	width: f64,
	height: f64,
	config: &ParticleConfig,
	rng: &mut R,
) -> Vec<Particle> {
	let (width, height) = (width.max(0.0), height.max(0.0));
	let mut particles: Vec<Particle> = Vec::with_capacity(config.count);

	for _ in 0..config.count {
		let mut spot = (unit(rng) * width, unit(rng) * height);
		for _ in 1..config.placement_attempts.max(1) {
			let clear = particles
				.iter()
				.all(|p| (p.x - spot.0).hypot(p.y - spot.1) >= config.min_spacing);
			if clear {
				break;
			}
			spot = (unit(rng) * width, unit(rng) * height);
		}

		let angle = unit(rng) * TAU;
		let speed = lerp(config.speed.0, config.speed.1, unit(rng));
		let radius = lerp(config.radius.0, config.radius.1, unit(rng));
		let (a, b) = config.palette;
		let color = a
			.mix(b, unit(rng))
			.mix(Rgb::WHITE, unit(rng) * config.color_variation);

		particles.push(Particle {
			x: spot.0,
			y: spot.1,
			vx: angle.cos() * speed,
			vy: angle.sin() * speed,
			radius,
			color,
			glow: 0.0,
		});
	}

	particles
}
