use rand::Rng;

use super::connection::strand_opacity;
use super::state::ParticleFieldState;
use crate::components::canvas::{ColorStop, LineCap, Paint, Surface, Viewport};

/// Strands first, particles on top.
pub fn render<R: Rng, S: Surface>(
	state: &ParticleFieldState<R>,
	surface: &mut S,
	viewport: &Viewport,
) {
	let config = &state.config;
	surface.clear(viewport.width, viewport.height);
	surface.set_line_cap(LineCap::Round);
	surface.set_line_width(config.line_width);

	for (key, link) in state.connections.iter() {
		let (a, b) = key.indices();
		let (Some(p), Some(q)) = (state.particles.get(a), state.particles.get(b)) else {
			continue;
		};
		let alpha =
			strand_opacity(link.strength, p.distance(q), config.connect_distance) * config.line_alpha;
		if alpha <= 0.0 {
			continue;
		}
		surface.stroke_line(
			p.pos(),
			q.pos(),
			&Paint::Linear {
				from: p.pos(),
				to: q.pos(),
				stops: [
					ColorStop::new(0.0, p.color, alpha),
					ColorStop::new(1.0, q.color, alpha),
				],
			},
		);
	}

	for p in &state.particles {
		let alpha = config.particle_alpha + p.glow * (1.0 - config.particle_alpha);
		surface.fill_circle(p.pos(), p.radius, &Paint::solid(p.color, alpha));
	}
}
