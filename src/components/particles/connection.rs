use std::collections::BTreeMap;

use super::config::ParticleConfig;
use super::field::Particle;
use crate::components::canvas::smooth::smooth;

/// Unordered pair of particle indices, stored low-first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PairKey {
	lo: u32,
	hi: u32,
}

impl PairKey {
	pub fn new(a: usize, b: usize) -> Self {
		let (a, b) = (a as u32, b as u32);
		Self {
			lo: a.min(b),
			hi: a.max(b),
		}
	}

	pub fn indices(self) -> (usize, usize) {
		(self.lo as usize, self.hi as usize)
	}
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Connection {
	pub strength: f64,
}

/// Where a pair's distance falls relative to the hysteresis band.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Band {
	/// Closer than the connect distance.
	Near,
	/// Inside the band; existing strands ease toward this strength.
	Stretched(f64),
	/// Beyond the disconnect distance.
	Far,
}

impl Band {
	pub fn classify(distance: f64, connect: f64, disconnect: f64) -> Self {
		if distance < connect {
			Band::Near
		} else if distance > disconnect {
			Band::Far
		} else {
			let span = (disconnect - connect).max(f64::EPSILON);
			Band::Stretched((1.0 - (distance - connect) / span).clamp(0.0, 1.0))
		}
	}
}

/// Live strands between particle pairs.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ConnectionSet {
	links: BTreeMap<PairKey, Connection>,
}

impl ConnectionSet {
	pub fn is_empty(&self) -> bool {
		self.links.is_empty()
	}

	pub fn get(&self, key: PairKey) -> Option<&Connection> {
		self.links.get(&key)
	}

	pub fn iter(&self) -> impl Iterator<Item = (PairKey, &Connection)> {
		self.links.iter().map(|(k, c)| (*k, c))
	}

	pub fn clear(&mut self) {
		self.links.clear();
	}

	/// Drop every strand touching `particle`.
	pub fn forget(&mut self, particle: usize) {
		self.links.retain(|key, _| {
			let (a, b) = key.indices();
			a != particle && b != particle
		});
	}

	/// Apply one frame of the connection lifecycle to a single pair.
	pub fn observe(&mut self, key: PairKey, distance: f64, config: &ParticleConfig) {
		let rate = config.smoothing_rate;
		match Band::classify(distance, config.connect_distance, config.disconnect_distance) {
			Band::Near => {
				let link = self.links.entry(key).or_insert(Connection { strength: 0.0 });
				link.strength = smooth(link.strength, 1.0, rate);
			}
			Band::Stretched(target) => {
				if let Some(link) = self.links.get_mut(&key) {
					link.strength = smooth(link.strength, target, rate);
				}
			}
			Band::Far => {
				let Some(link) = self.links.get_mut(&key) else {
					return;
				};
				link.strength = smooth(link.strength, 0.0, rate);
				if link.strength < config.snap_threshold {
					self.links.remove(&key);
				}
			}
		}
	}

	/// One frame over every pair of `particles`.
	pub fn update(&mut self, particles: &[Particle], config: &ParticleConfig) {
		for (i, a) in particles.iter().enumerate() {
			for (j, b) in particles.iter().enumerate().skip(i + 1) {
				let key = PairKey::new(i, j);
				let distance = a.distance(b);
				if distance > config.disconnect_distance && !self.links.contains_key(&key) {
					continue;
				}
				self.observe(key, distance, config);
			}
		}
	}

	/// Strongest strand touching each of `count` particles.
	pub fn peak_strengths(&self, count: usize) -> Vec<f64> {
		let mut peaks = vec![0.0; count];
		for (key, link) in self.iter() {
			let (a, b) = key.indices();
			for i in [a, b] {
				if let Some(peak) = peaks.get_mut(i) {
					*peak = f64::max(*peak, link.strength);
				}
			}
		}
		peaks
	}
}

/// Strand opacity: full strength while within reach, squared falloff once
/// stretched past it.
pub fn strand_opacity(strength: f64, distance: f64, connect_distance: f64) -> f64 {
	let strength = strength.clamp(0.0, 1.0);
	if distance <= connect_distance {
		strength
	} else {
		strength * strength
	}
}
