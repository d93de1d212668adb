use leptos::prelude::*;
use log::warn;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use web_sys::HtmlCanvasElement;

use super::config::ParticleProfile;
use super::state::ParticleFieldState;
use crate::components::canvas::{self, Sizing};

/// Drifting particle network. Fills its parent element unless `fullscreen`.
#[component]
pub fn ParticleField(
	#[prop(optional)] profile: Option<ParticleProfile>,
	#[prop(optional)] seed: Option<u64>,
	#[prop(default = false)] fullscreen: bool,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let sizing = if fullscreen {
		Sizing::Window
	} else {
		Sizing::Parent
	};

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let profile = profile.clone().unwrap_or_default();
		let quiet = profile.resize_quiet_ms;
		let rng = SmallRng::seed_from_u64(seed.unwrap_or_else(canvas::entropy_seed));
		let state = ParticleFieldState::new(profile, rng);
		if let Err(err) = canvas::attach(canvas, state, sizing, quiet) {
			warn!("particle field unavailable: {err}");
		}
	});

	view! {
		<canvas
			node_ref=canvas_ref
			class="particle-field"
			style="position: absolute; inset: 0; display: block; pointer-events: none;"
		/>
	}
}
