//! Node-and-pulse circuit network anchored to the page content.

mod component;
pub mod config;
pub mod graph;
pub mod pulse;
mod render;
mod state;

pub use component::CircuitBackground;
pub use config::{CircuitConfig, CircuitStyle, GraphConfig, PulseConfig};
pub use state::CircuitState;
