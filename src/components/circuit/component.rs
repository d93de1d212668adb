use leptos::prelude::*;
use log::{info, warn};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use web_sys::HtmlCanvasElement;

use super::config::CircuitConfig;
use super::state::CircuitState;
use crate::components::canvas::{self, HostError, Sizing};

fn start(canvas: HtmlCanvasElement, config: CircuitConfig, seed: u64) -> Result<bool, HostError> {
	let window = canvas::window()?;
	let viewport = canvas::read_viewport(&window, &canvas, Sizing::Window)?;
	if viewport.width < config.min_viewport_width {
		info!(
			"circuit background skipped below {}px (window is {}px)",
			config.min_viewport_width, viewport.width
		);
		return Ok(false);
	}
	let quiet = config.resize_quiet_ms;
	let state = CircuitState::new(config, SmallRng::seed_from_u64(seed));
	canvas::attach(canvas, state, Sizing::Window, quiet)?;
	Ok(true)
}

/// Fixed full-window canvas with the pulse network behind the page content.
#[component]
pub fn CircuitBackground(
	#[prop(optional)] config: Option<CircuitConfig>,
	#[prop(optional)] seed: Option<u64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let config = config.clone().unwrap_or_default();
		let seed = seed.unwrap_or_else(canvas::entropy_seed);
		if let Err(err) = start(canvas, config, seed) {
			warn!("circuit background unavailable: {err}");
		}
	});

	view! {
		<canvas
			node_ref=canvas_ref
			class="circuit-bg"
			style="position: fixed; inset: 0; pointer-events: none; z-index: 0;"
		/>
	}
}
