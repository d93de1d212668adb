use leptos::prelude::*;

use crate::components::circuit::CircuitBackground;
use crate::components::particles::ParticleField;

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<CircuitBackground />
			<main class="content">
				<section class="hero">
					<ParticleField />
					<div class="hero-overlay">
						<h1>"Signals, not noise."</h1>
						<p class="subtitle">"Scroll to see the circuit follow the page."</p>
					</div>
				</section>
				<section class="body-copy">
					<h2>"Built for the long page"</h2>
					<p>"The network spans the full document height and stays clear of this column."</p>
				</section>
			</main>
		</ErrorBoundary>
	}
}
