//! Drifting particles joined by elastic strands.

mod component;
pub mod config;
pub mod connection;
pub mod field;
mod render;
mod state;

pub use component::ParticleField;
pub use config::{ParticleConfig, ParticleProfile};
pub use state::ParticleFieldState;
