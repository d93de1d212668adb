use rand::Rng;

use super::state::CircuitState;
use crate::components::canvas::{ColorStop, LineCap, Paint, Rgb, Surface, Viewport};

/// Vertical window of page coordinates worth drawing this frame.
struct Visible {
	top: f64,
	bottom: f64,
}

impl Visible {
	fn new(viewport: &Viewport, pad: f64) -> Self {
		Self {
			top: viewport.scroll_y - pad,
			bottom: viewport.scroll_y + viewport.height + pad,
		}
	}

	fn contains(&self, y: f64) -> bool {
		y >= self.top && y <= self.bottom
	}

	fn overlaps(&self, y1: f64, y2: f64) -> bool {
		y1.max(y2) >= self.top && y1.min(y2) <= self.bottom
	}
}

/// Redraw the whole circuit: edges, then nodes, then pulses, all shifted by
/// the page scroll so the network moves with the content.
pub fn render<R: Rng, S: Surface>(state: &CircuitState<R>, surface: &mut S, viewport: &Viewport) {
	surface.clear(viewport.width, viewport.height);
	surface.save();
	surface.translate(0.0, -viewport.scroll_y);
	surface.set_line_cap(LineCap::Butt);

	let visible = Visible::new(viewport, state.config.pulse.glow_radius);
	draw_edges(state, surface, &visible);
	draw_nodes(state, surface, &visible);
	draw_pulses(state, surface, &visible);

	surface.restore();
}

fn draw_edges<R: Rng, S: Surface>(state: &CircuitState<R>, surface: &mut S, visible: &Visible) {
	let style = &state.config.style;
	let gap = style.node_radius + 1.5;

	for (id, edge) in state.graph.edges().iter().enumerate() {
		let ((x1, y1), (x2, y2)) = state.graph.endpoints(id);
		if !visible.overlaps(y1, y2) {
			continue;
		}
		let (dx, dy) = (x2 - x1, y2 - y1);
		let len = dx.hypot(dy);
		if len < style.node_radius * 3.0 {
			continue;
		}

		let glow = edge.glow.level;
		let color = if glow > style.glow_visible {
			edge.glow.color
		} else {
			style.rest_color
		};
		let (ux, uy) = (dx / len, dy / len);
		surface.set_line_width(style.edge_width + glow * 1.5);
		surface.stroke_line(
			(x1 + ux * gap, y1 + uy * gap),
			(x2 - ux * gap, y2 - uy * gap),
			&Paint::solid(color, style.base_alpha + glow * 0.5),
		);
	}
}

fn draw_nodes<R: Rng, S: Surface>(state: &CircuitState<R>, surface: &mut S, visible: &Visible) {
	let style = &state.config.style;
	let hollow = Paint::solid(style.background, 1.0);

	for node in state.graph.nodes() {
		if !visible.contains(node.y) {
			continue;
		}
		let glow = node.glow.level;
		let color = if glow > style.glow_visible {
			node.glow.color
		} else {
			style.rest_color
		};

		// Clear the interior so edges never show through.
		surface.fill_circle(node.pos(), style.node_radius + 0.5, &hollow);
		surface.set_line_width(style.node_stroke + glow * 0.5);
		surface.stroke_circle(
			node.pos(),
			style.node_radius,
			&Paint::solid(color, style.base_alpha * 1.8 + glow * 0.7),
		);
	}
}

fn draw_pulses<R: Rng, S: Surface>(state: &CircuitState<R>, surface: &mut S, visible: &Visible) {
	let (style, radius) = (&state.config.style, state.config.pulse.glow_radius);

	for pulse in state.pulses.pulses() {
		let (x, y) = pulse.position(&state.graph);
		if !visible.contains(y) {
			continue;
		}
		let (c, alpha) = (pulse.color, pulse.life);

		surface.fill_circle(
			(x, y),
			radius,
			&Paint::Radial {
				center: (x, y),
				inner: 0.0,
				outer: radius,
				stops: [
					ColorStop::new(0.0, c, 0.3 * alpha),
					ColorStop::new(1.0, c, 0.0),
				],
			},
		);

		let trail_start = (pulse.progress - style.trail_fraction).max(0.0);
		let start = pulse.point_at(&state.graph, trail_start);
		surface.set_line_width(style.trail_width);
		surface.stroke_line(
			start,
			(x, y),
			&Paint::Linear {
				from: start,
				to: (x, y),
				stops: [
					ColorStop::new(0.0, c, 0.0),
					ColorStop::new(1.0, c, 0.8 * alpha),
				],
			},
		);

		surface.fill_circle((x, y), style.head_radius, &Paint::solid(c, 0.9 * alpha));
		surface.fill_circle((x, y), style.core_radius, &Paint::solid(Rgb::WHITE, 0.6 * alpha));
	}
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;
	use rand::rngs::SmallRng;

	use super::*;
	use crate::components::canvas::recording::{DrawOp, RecordingSurface};
	use crate::components::circuit::config::{CircuitConfig, PURPLE};
	use crate::components::circuit::graph::Graph;
	use crate::components::circuit::pulse::Pulse;

	fn line_state() -> CircuitState {
		let mut state = CircuitState::new(CircuitConfig::default(), SmallRng::seed_from_u64(0));
		state.graph = Graph::from_links(
			&[(100.0, 100.0), (200.0, 100.0), (300.0, 100.0)],
			&[(0, 1), (1, 2)],
		);
		state
	}

	#[test]
	fn draws_back_to_front_under_scroll() {
		let mut state = line_state();
		let config = state.config.pulse.clone();
		let mut rng = SmallRng::seed_from_u64(1);
		state.pulses.spawn(&state.graph, &config, &mut rng);

		let mut viewport = Viewport::new(400.0, 300.0);
		viewport.scroll_y = 40.0;
		let mut surface = RecordingSurface::default();
		render(&state, &mut surface, &viewport);

		assert_eq!(surface.ops[0], DrawOp::Clear(400.0, 300.0));
		assert!(surface.ops.contains(&DrawOp::Translate(0.0, -40.0)));
		let last_edge = surface
			.rposition(|op| matches!(op, DrawOp::Line { paint: Paint::Solid { .. }, .. }))
			.unwrap();
		let first_node = surface
			.position(|op| matches!(op, DrawOp::StrokeCircle { .. }))
			.unwrap();
		let first_glow = surface
			.position(|op| matches!(op, DrawOp::FillCircle { paint: Paint::Radial { .. }, .. }))
			.unwrap();
		assert!(last_edge < first_node);
		assert!(first_node < first_glow);
		assert_eq!(surface.ops.last(), Some(&DrawOp::Restore));
	}

	#[test]
	fn edges_stop_short_of_node_outlines() {
		let state = line_state();
		let mut surface = RecordingSurface::default();
		render(&state, &mut surface, &Viewport::new(400.0, 300.0));
		let first = surface.lines().next().unwrap();
		let DrawOp::Line { from, to, paint } = first else {
			unreachable!()
		};
		assert_eq!(*from, (105.5, 100.0));
		assert_eq!(*to, (194.5, 100.0));
		assert_eq!(*paint, Paint::solid(PURPLE, 0.15));
	}

	#[test]
	fn off_screen_entities_are_culled() {
		let mut state = line_state();
		state.graph = Graph::from_links(&[(10.0, 2000.0), (90.0, 2000.0)], &[(0, 1)]);
		let mut surface = RecordingSurface::default();
		render(&state, &mut surface, &Viewport::new(400.0, 300.0));
		assert_eq!(surface.lines().count(), 0);
		assert!(surface.position(|op| matches!(op, DrawOp::StrokeCircle { .. })).is_none());
	}

	#[test]
	fn pulse_trail_starts_behind_head() {
		let mut state = line_state();
		let mut rng = SmallRng::seed_from_u64(3);
		let config = state.config.pulse.clone();
		state.pulses.spawn(&state.graph, &config, &mut rng);
		state.pulses.advance(&state.graph, &config, 0.5, &mut rng);
		let pulse: &Pulse = &state.pulses.pulses()[0];
		let head = pulse.position(&state.graph);

		let mut surface = RecordingSurface::default();
		render(&state, &mut surface, &Viewport::new(400.0, 300.0));
		let trail = surface
			.lines()
			.find(|op| matches!(op, DrawOp::Line { paint: Paint::Linear { .. }, .. }))
			.unwrap();
		let DrawOp::Line { from, to, .. } = trail else {
			unreachable!()
		};
		assert_eq!(*to, head);
		assert!((from.0 - head.0).abs() > 1.0);
	}
}
