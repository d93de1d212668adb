use log::debug;
use rand::Rng;
use rand::rngs::SmallRng;

use super::config::CircuitConfig;
use super::graph::Graph;
use super::pulse::{PulseSimulator, influence_at};
use super::render;
use crate::components::canvas::{Engine, Surface, Viewport};

/// Everything the circuit background owns: one graph generation, its pulses
/// and the generator both are drawn from.
pub struct CircuitState<R = SmallRng> {
	pub config: CircuitConfig,
	pub graph: Graph,
	pub pulses: PulseSimulator,
	rng: R,
}

impl<R: Rng> CircuitState<R> {
	pub fn new(config: CircuitConfig, rng: R) -> Self {
		Self {
			config,
			graph: Graph::default(),
			pulses: PulseSimulator::new(),
			rng,
		}
	}

	/// Ease every node and edge glow toward the current pulse influence.
	fn update_glow(&mut self) {
		let heads = self.pulses.heads(&self.graph);
		let (pulse, style) = (&self.config.pulse, &self.config.style);

		for id in 0..self.graph.edges().len() {
			let (x, y) = self.graph.edge_midpoint(id);
			let target = influence_at(&heads, x, y, pulse);
			self.graph.edge_mut(id).glow.approach(
				target.strength,
				target.color,
				style.glow_rate,
				style.glow_color_threshold,
			);
		}

		for id in 0..self.graph.nodes().len() {
			let (x, y) = self.graph.node(id).pos();
			let target = influence_at(&heads, x, y, pulse);
			self.graph.node_mut(id).glow.approach(
				target.strength,
				target.color,
				style.glow_rate,
				style.glow_color_threshold,
			);
		}
	}
}

impl<R: Rng> Engine for CircuitState<R> {
	fn rebuild(&mut self, viewport: &Viewport) {
		self.graph = Graph::build(
			viewport.width,
			viewport.full_height(),
			&self.config.graph,
			&mut self.rng,
		);
		self.pulses.clear();
		debug!(
			"circuit graph: {} nodes, {} edges",
			self.graph.nodes().len(),
			self.graph.edges().len()
		);
	}

	fn update(&mut self, dt: f64, now_ms: f64) {
		self.pulses
			.maybe_spawn(now_ms, &self.graph, &self.config.pulse, &mut self.rng);
		self.pulses
			.advance(&self.graph, &self.config.pulse, dt, &mut self.rng);
		self.update_glow();
	}

	fn draw<S: Surface>(&self, surface: &mut S, viewport: &Viewport) {
		render::render(self, surface, viewport);
	}
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;
	use rand::rngs::mock::StepRng;

	use super::*;

	fn state(seed: u64) -> CircuitState {
		let mut state = CircuitState::new(CircuitConfig::default(), SmallRng::seed_from_u64(seed));
		state.rebuild(&Viewport::new(1920.0, 1080.0));
		state
	}

	/// One spawn, then 1000 frames at 60 fps.
	fn run(seed: u64) -> Vec<(usize, (f64, f64), f64)> {
		let mut state = state(seed);
		let config = state.config.pulse.clone();
		assert!(state.pulses.spawn(&state.graph, &config, &mut state.rng));
		for _ in 0..1000 {
			state
				.pulses
				.advance(&state.graph, &config, 1.0 / 60.0, &mut state.rng);
		}
		state
			.pulses
			.pulses()
			.iter()
			.map(|p| (p.edge, p.position(&state.graph), p.path_length))
			.collect()
	}

	#[test]
	fn seeded_run_is_reproducible() {
		let graph = state(99).graph;
		assert_eq!(graph, state(99).graph);
		assert!(!graph.edges().is_empty());
		assert_ne!(graph, state(100).graph);
		assert_eq!(run(99), run(99));
	}

	/// With every draw at zero each node keeps the same jitter, every cell
	/// outside the band holds a node and every candidate link is made.
	#[test]
	fn zero_stream_run_follows_a_known_route() {
		let mut state = CircuitState::new(CircuitConfig::default(), StepRng::new(0, 0));
		state.rebuild(&Viewport::new(1920.0, 1080.0));

		// Five columns either side of the band, fifteen rows, each block a
		// fully linked 5x15 lattice.
		assert_eq!(state.graph.nodes().len(), 150);
		assert_eq!(state.graph.edges().len(), 484);
		assert_eq!(state.graph.node(0).pos(), (-12.0, -12.0));

		let config = state.config.pulse.clone();
		assert!(state.pulses.spawn(&state.graph, &config, &mut state.rng));
		let dt = 1.0 / 64.0;
		for _ in 0..450 {
			state.pulses.advance(&state.graph, &config, dt, &mut state.rng);
		}

		// Route 1 -> 0 -> 10 -> 1 -> ..., now on the third pass down 0 -> 10.
		let pulse = &state.pulses.pulses()[0];
		assert_eq!(pulse.max_path, 800.0);
		assert_eq!(pulse.color, config.primary);
		assert_eq!(pulse.edge, 8);
		assert!(!pulse.reverse);
		assert_eq!(pulse.path_length, 703.125);
		assert!((pulse.progress - 0.859375).abs() < 1e-12);
		let (x, y) = pulse.position(&state.graph);
		assert!((x + 12.0).abs() < 1e-9 && (y - 56.75).abs() < 1e-9);
		assert!((pulse.life - 0.53947).abs() < 1e-4, "life {}", pulse.life);

		// It fades out past 800 px and dies on reaching node 1.
		for _ in 450..1000 {
			state.pulses.advance(&state.graph, &config, dt, &mut state.rng);
		}
		assert!(state.pulses.is_empty());
	}

	#[test]
	fn rebuild_discards_pulses() {
		let mut state = state(3);
		for frame in 0..120 {
			state.update(1.0 / 60.0, frame as f64 * 400.0);
		}
		assert!(!state.pulses.is_empty());
		state.rebuild(&Viewport::new(1280.0, 720.0));
		assert!(state.pulses.is_empty());
	}

	#[test]
	fn glow_follows_pulses_and_stays_bounded() {
		let mut state = state(17);
		let mut lit = false;
		for frame in 0..600 {
			state.update(1.0 / 60.0, frame as f64 * 1000.0 / 60.0);
			for node in state.graph.nodes() {
				assert!((0.0..=1.0).contains(&node.glow.level));
				lit |= node.glow.level > 0.1;
			}
			for edge in state.graph.edges() {
				assert!((0.0..=1.0).contains(&edge.glow.level));
			}
		}
		assert!(lit, "no node ever lit up");
	}

	#[test]
	fn empty_graph_is_a_quiet_no_op() {
		// The softened content band covers both grid columns at this width.
		let mut state = CircuitState::new(CircuitConfig::default(), SmallRng::seed_from_u64(0));
		state.rebuild(&Viewport::new(40.0, 30.0));
		for frame in 0..10 {
			state.update(1.0 / 60.0, frame as f64 * 500.0);
		}
		assert!(state.graph.is_empty());
		assert!(state.pulses.is_empty());
	}

	#[test]
	fn narrow_viewport_without_edges_never_spawns() {
		let mut state = CircuitState::new(CircuitConfig::default(), SmallRng::seed_from_u64(0));
		state.rebuild(&Viewport::new(10.0, 10.0));
		for frame in 0..10 {
			state.update(1.0 / 60.0, frame as f64 * 500.0);
		}
		assert!(state.graph.edges().is_empty());
		assert!(state.pulses.is_empty());
	}
}
