use crate::components::canvas::{RESIZE_QUIET_MS, Rgb};

pub const PURPLE: Rgb = Rgb::new(124, 92, 252);
pub const CYAN: Rgb = Rgb::new(34, 211, 238);
pub const BACKGROUND: Rgb = Rgb::new(8, 8, 12);

/// Layout of the node grid and the band kept clear for page content.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphConfig {
	/// Spacing between candidate node positions.
	pub grid: f64,
	/// Chance that a grid cell outside the exclusion band gets a node.
	pub node_probability: f64,
	/// Chance that a candidate neighbor link becomes an edge.
	pub edge_probability: f64,
	/// Jitter amplitude as a fraction of `grid`.
	pub jitter: f64,
	pub content_max_width: f64,
	/// Share of the viewport width the content column may take.
	pub content_width_ratio: f64,
	pub exclusion_margin: f64,
}

impl Default for GraphConfig {
	fn default() -> Self {
		Self {
			grid: 80.0,
			node_probability: 0.6,
			edge_probability: 0.5,
			jitter: 0.3,
			content_max_width: 1280.0,
			content_width_ratio: 0.55,
			exclusion_margin: 60.0,
		}
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct PulseConfig {
	/// Travel speed in px/s, independent of edge length.
	pub speed: f64,
	pub max_pulses: usize,
	pub spawn_interval_ms: f64,
	pub glow_radius: f64,
	/// Influence reaches zero at `glow_radius * influence_reach`.
	pub influence_reach: f64,
	/// Distance over which a new pulse ramps up to full life.
	pub fade_in_distance: f64,
	/// Fraction of `max_path` after which life starts to fall.
	pub fade_out_start: f64,
	pub fade_out_exponent: f64,
	pub min_path: f64,
	pub max_path: f64,
	/// A pulse at or below this life dies at its next node.
	pub death_life: f64,
	pub primary: Rgb,
	pub secondary: Rgb,
	/// Probability of `primary` on spawn.
	pub primary_weight: f64,
}

impl Default for PulseConfig {
	fn default() -> Self {
		Self {
			speed: 100.0,
			max_pulses: 24,
			spawn_interval_ms: 300.0,
			glow_radius: 40.0,
			influence_reach: 3.0,
			fade_in_distance: 60.0,
			fade_out_start: 0.7,
			fade_out_exponent: 1.5,
			min_path: 800.0,
			max_path: 2000.0,
			death_life: 0.05,
			primary: PURPLE,
			secondary: CYAN,
			primary_weight: 0.6,
		}
	}
}

/// Visual constants of the circuit renderer.
#[derive(Clone, Debug, PartialEq)]
pub struct CircuitStyle {
	pub node_radius: f64,
	pub node_stroke: f64,
	pub edge_width: f64,
	pub base_alpha: f64,
	pub background: Rgb,
	pub rest_color: Rgb,
	/// Per-frame glow smoothing rate.
	pub glow_rate: f64,
	/// Influence above which an entity adopts the pulse color.
	pub glow_color_threshold: f64,
	/// Glow below which the rest color is drawn.
	pub glow_visible: f64,
	/// Trail length as a fraction of the current edge.
	pub trail_fraction: f64,
	pub trail_width: f64,
	pub head_radius: f64,
	pub core_radius: f64,
}

impl Default for CircuitStyle {
	fn default() -> Self {
		Self {
			node_radius: 4.0,
			node_stroke: 1.0,
			edge_width: 1.5,
			base_alpha: 0.15,
			background: BACKGROUND,
			rest_color: PURPLE,
			glow_rate: 0.12,
			glow_color_threshold: 0.05,
			glow_visible: 0.02,
			trail_fraction: 0.35,
			trail_width: 2.5,
			head_radius: 3.0,
			core_radius: 1.2,
		}
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct CircuitConfig {
	pub graph: GraphConfig,
	pub pulse: PulseConfig,
	pub style: CircuitStyle,
	/// Narrower windows skip the circuit entirely.
	pub min_viewport_width: f64,
	pub resize_quiet_ms: f64,
}

impl Default for CircuitConfig {
	fn default() -> Self {
		Self {
			graph: GraphConfig::default(),
			pulse: PulseConfig::default(),
			style: CircuitStyle::default(),
			min_viewport_width: 1024.0,
			resize_quiet_ms: RESIZE_QUIET_MS,
		}
	}
}
