use rand::Rng;

use super::config::PulseConfig;
use super::graph::{EdgeId, Graph, NodeId};
use crate::components::canvas::Rgb;

/// Edges shorter than this are treated as this long when converting speed.
const MIN_EDGE_LENGTH: f64 = 1e-6;

/// A point of light walking the graph.
#[derive(Clone, Debug, PartialEq)]
pub struct Pulse {
	pub edge: EdgeId,
	/// Fraction of the current edge covered, starting from the entry end.
	pub progress: f64,
	/// Traveling `to -> from` on the current edge.
	pub reverse: bool,
	pub color: Rgb,
	pub life: f64,
	pub path_length: f64,
	pub max_path: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PulseStep {
	Traveling,
	/// Arrived at a node and moved onto another edge.
	Turned,
	Dead,
}

/// Strength and color of the strongest pulse near a point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Influence {
	pub strength: f64,
	pub color: Rgb,
}

/// Snapshot of a pulse position for influence queries within one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PulseHead {
	pub x: f64,
	pub y: f64,
	pub life: f64,
	pub color: Rgb,
}

/// Fast linear fade-in, long sustain, convex fade-out near `max_path`.
pub fn life_curve(path_length: f64, max_path: f64, config: &PulseConfig) -> f64 {
	let fade_in = if config.fade_in_distance > 0.0 {
		(path_length / config.fade_in_distance).min(1.0)
	} else {
		1.0
	};
	let t = if max_path > 0.0 { path_length / max_path } else { 1.0 };
	let start = config.fade_out_start.clamp(0.0, 1.0);
	let fade_out = if t > start {
		let span = (1.0 - start).max(f64::EPSILON);
		1.0 - ((t - start) / span).powf(config.fade_out_exponent)
	} else {
		1.0
	};
	(fade_in * fade_out).clamp(0.0, 1.0)
}

impl Pulse {
	/// Entry and exit points of the current edge in travel direction.
	pub fn endpoints(&self, graph: &Graph) -> ((f64, f64), (f64, f64)) {
		let (a, b) = graph.endpoints(self.edge);
		if self.reverse { (b, a) } else { (a, b) }
	}

	pub fn point_at(&self, graph: &Graph, progress: f64) -> (f64, f64) {
		let ((x1, y1), (x2, y2)) = self.endpoints(graph);
		(x1 + (x2 - x1) * progress, y1 + (y2 - y1) * progress)
	}

	pub fn position(&self, graph: &Graph) -> (f64, f64) {
		self.point_at(graph, self.progress)
	}

	pub fn arrival_node(&self, graph: &Graph) -> NodeId {
		let edge = graph.edge(self.edge);
		if self.reverse { edge.from } else { edge.to }
	}

	pub fn head(&self, graph: &Graph) -> PulseHead {
		let (x, y) = self.position(graph);
		PulseHead {
			x,
			y,
			life: self.life,
			color: self.color,
		}
	}

	/// Move `dt` seconds along the graph, turning onto a random next edge on
	/// arrival.
	pub fn advance<R: Rng>(
		&mut self,
		graph: &Graph,
		config: &PulseConfig,
		dt: f64,
		rng: &mut R,
	) -> PulseStep {
		let length = graph.edge(self.edge).length.max(MIN_EDGE_LENGTH);
		self.progress += config.speed / length * dt;
		self.path_length += config.speed * dt;
		self.life = life_curve(self.path_length, self.max_path, config);

		if self.progress < 1.0 {
			return PulseStep::Traveling;
		}

		let arrival = self.arrival_node(graph);
		let next: Vec<EdgeId> = graph
			.node(arrival)
			.edges
			.iter()
			.copied()
			.filter(|&e| e != self.edge)
			.collect();
		if next.is_empty() || self.life <= config.death_life {
			return PulseStep::Dead;
		}

		let edge = next[rng.gen_range(0..next.len())];
		self.reverse = graph.edge(edge).to == arrival;
		self.edge = edge;
		self.progress = 0.0;
		PulseStep::Turned
	}
}

/// Strongest life-weighted influence of `heads` at `(x, y)`.
pub fn influence_at(heads: &[PulseHead], x: f64, y: f64, config: &PulseConfig) -> Influence {
	let reach = config.glow_radius * config.influence_reach;
	let mut best = Influence {
		strength: 0.0,
		color: config.primary,
	};
	if reach <= 0.0 {
		return best;
	}
	for head in heads {
		let dist = (head.x - x).hypot(head.y - y);
		let strength = (1.0 - dist / reach).max(0.0) * head.life;
		if strength > best.strength {
			best = Influence {
				strength,
				color: head.color,
			};
		}
	}
	best
}

/// The live pulse population and its spawn cadence.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PulseSimulator {
	pulses: Vec<Pulse>,
	last_spawn_ms: Option<f64>,
}

impl PulseSimulator {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn pulses(&self) -> &[Pulse] {
		&self.pulses
	}

	pub fn len(&self) -> usize {
		self.pulses.len()
	}

	pub fn is_empty(&self) -> bool {
		self.pulses.is_empty()
	}

	/// Drop every pulse; used when the graph is replaced.
	pub fn clear(&mut self) {
		self.pulses.clear();
	}

	/// Start a pulse on a random edge. Returns false at the cap or on an
	/// edgeless graph.
	pub fn spawn<R: Rng>(&mut self, graph: &Graph, config: &PulseConfig, rng: &mut R) -> bool {
		let edges = graph.edges().len();
		if self.pulses.len() >= config.max_pulses || edges == 0 {
			return false;
		}

		let edge = rng.gen_range(0..edges);
		let reverse = rng.gen_bool(0.5);
		let color = if rng.gen_bool(config.primary_weight.clamp(0.0, 1.0)) {
			config.primary
		} else {
			config.secondary
		};
		let span = (config.max_path - config.min_path).max(0.0);
		let max_path = config.min_path + rng.gen_range(0.0..1.0) * span;

		self.pulses.push(Pulse {
			edge,
			progress: 0.0,
			reverse,
			color,
			life: life_curve(0.0, max_path, config),
			path_length: 0.0,
			max_path,
		});
		true
	}

	/// Spawn when the interval since the last spawn has elapsed.
	pub fn maybe_spawn<R: Rng>(
		&mut self,
		now_ms: f64,
		graph: &Graph,
		config: &PulseConfig,
		rng: &mut R,
	) -> bool {
		let due = match self.last_spawn_ms {
			Some(last) => now_ms - last > config.spawn_interval_ms,
			None => true,
		};
		if !due {
			return false;
		}
		self.last_spawn_ms = Some(now_ms);
		self.spawn(graph, config, rng)
	}

	/// Advance all pulses and drop the dead ones.
	pub fn advance<R: Rng>(&mut self, graph: &Graph, config: &PulseConfig, dt: f64, rng: &mut R) {
		self.pulses
			.retain_mut(|pulse| pulse.advance(graph, config, dt, rng) != PulseStep::Dead);
	}

	pub fn heads(&self, graph: &Graph) -> Vec<PulseHead> {
		self.pulses.iter().map(|p| p.head(graph)).collect()
	}
}
